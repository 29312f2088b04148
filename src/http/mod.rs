//! HTTP server module.
//!
//! Serves plain HTTP via `axum-server` and drains in-flight requests on
//! SIGTERM/SIGINT before exiting. TLS termination is left to a reverse proxy.

mod server;
mod shutdown;

pub use server::{serve, start_server, ServerError};
