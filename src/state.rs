//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds only the immutable configuration; handlers read the environment at
/// request time rather than caching anything here.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Creates a new application state from the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Name of the environment variable reported by `/secret`.
    pub fn secret_var(&self) -> &str {
        &self.config.probe.secret_var
    }
}
