//! secret-probe: a liveness and secret-presence probe service.
//!
//! Exposes `GET /health` and `GET /secret`. The latter reports whether a
//! configured environment variable is set, never its value.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use routes::create_router;
pub use state::AppState;
