//! HTTP route handlers.
//!
//! Both probes are served with `Cache-Control: no-store` since they report
//! live process state. Requests that match no route get a JSON error body.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod secret;

use axum::{
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_PROBE;
use crate::error;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// GET-only probe route. HEAD is rejected instead of falling through to GET.
fn probe(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route
        .head(error::method_not_allowed)
        .fallback(error::method_not_allowed)
}

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    // Probes - never cached, always fresh
    let probe_routes = Router::new()
        .route("/health", probe(get(health::health)))
        .route("/secret", probe(get(secret::secret)))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_PROBE),
        ));

    Router::new()
        .merge(probe_routes)
        .fallback(error::not_found)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
