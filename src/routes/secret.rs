//! Secret-presence probe.
//!
//! Reports whether the configured environment variable holds a value, without
//! ever exposing the value itself. The variable is read on every request so a
//! change to the process environment is visible immediately.

use std::ffi::OsStr;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SecretResponse {
    pub demo_secret_present: bool,
}

/// Whether the environment variable `name` is set to a non-empty value.
///
/// An explicitly empty variable counts as absent. Values that are not valid
/// UTF-8 still count as present.
pub fn secret_present(name: impl AsRef<OsStr>) -> bool {
    std::env::var_os(name).is_some_and(|value| !value.is_empty())
}

/// Secret-presence handler.
#[instrument(name = "secret::secret", skip_all)]
pub async fn secret(State(state): State<AppState>) -> Json<SecretResponse> {
    let present = secret_present(state.secret_var());
    tracing::debug!(var = %state.secret_var(), present, "Checked secret presence");
    Json(SecretResponse {
        demo_secret_present: present,
    })
}
