//! End-to-end tests for the probe routes.
//!
//! Most tests drive the router in-process with `oneshot`. The server test
//! binds an ephemeral port and speaks raw HTTP/1.1 over TCP.
//!
//! Each test probes its own environment variable so tests can run in parallel.
//!
//! Run with: cargo test --test probe_tests
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use axum_server::Handle;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tower::ServiceExt;

use secret_probe::{create_router, AppConfig, AppState};

fn app_probing(var: &str) -> Router {
    let mut config = AppConfig::default();
    config.probe.secret_var = var.to_string();
    create_router(AppState::new(config))
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, http::HeaderMap, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, headers, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, json) = send(app, Method::GET, uri).await;
    (status, json)
}

#[tokio::test]
async fn health_returns_ok() {
    let app = app_probing("SECRET_PROBE_IT_HEALTH");

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn health_is_idempotent() {
    let app = app_probing("SECRET_PROBE_IT_HEALTH_REPEAT");

    for _ in 0..3 {
        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));
    }
}

#[tokio::test]
async fn secret_absent_when_unset() {
    std::env::remove_var("SECRET_PROBE_IT_UNSET");
    let app = app_probing("SECRET_PROBE_IT_UNSET");

    let (status, body) = get(&app, "/secret").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "demo_secret_present": false }));
}

#[tokio::test]
async fn secret_present_when_set() {
    std::env::set_var("SECRET_PROBE_IT_SET", "s3cr3t");
    let app = app_probing("SECRET_PROBE_IT_SET");

    let (status, body) = get(&app, "/secret").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "demo_secret_present": true }));
}

#[tokio::test]
async fn secret_absent_when_empty() {
    std::env::set_var("SECRET_PROBE_IT_EMPTY", "");
    let app = app_probing("SECRET_PROBE_IT_EMPTY");

    let (_, body) = get(&app, "/secret").await;
    assert_eq!(body, json!({ "demo_secret_present": false }));
}

#[tokio::test]
async fn secret_value_never_leaks() {
    std::env::set_var("SECRET_PROBE_IT_LEAK", "do-not-print-me");
    let app = app_probing("SECRET_PROBE_IT_LEAK");

    let (_, headers, body) = send(&app, Method::GET, "/secret").await;
    assert!(!body.to_string().contains("do-not-print-me"));
    for value in headers.values() {
        assert!(!value.to_str().unwrap_or_default().contains("do-not-print-me"));
    }
}

#[tokio::test]
async fn secret_tracks_environment_changes() {
    let var = "SECRET_PROBE_IT_TOGGLE";
    std::env::remove_var(var);
    let app = app_probing(var);

    let (_, body) = get(&app, "/secret").await;
    assert_eq!(body["demo_secret_present"], false);

    std::env::set_var(var, "now-set");
    let (_, body) = get(&app, "/secret").await;
    assert_eq!(body["demo_secret_present"], true);

    // Unchanged environment gives the same answer
    let (_, again) = get(&app, "/secret").await;
    assert_eq!(again, body);

    std::env::remove_var(var);
    let (_, body) = get(&app, "/secret").await;
    assert_eq!(body["demo_secret_present"], false);
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let app = app_probing("SECRET_PROBE_IT_404");

    let (status, body) = get(&app, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not Found" }));
}

#[tokio::test]
async fn wrong_method_is_not_allowed() {
    let app = app_probing("SECRET_PROBE_IT_405");

    for uri in ["/health", "/secret"] {
        let (status, _, body) = send(&app, Method::POST, uri).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "POST {}", uri);
        assert_eq!(body, json!({ "detail": "Method Not Allowed" }));
    }

    let (status, _, _) = send(&app, Method::DELETE, "/secret").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn head_does_not_fall_through_to_get() {
    std::env::set_var("SECRET_PROBE_IT_HEAD", "set");
    let app = app_probing("SECRET_PROBE_IT_HEAD");

    for uri in ["/health", "/secret"] {
        // HEAD responses carry headers only; the JSON error body is stripped
        let (status, headers, _) = send(&app, Method::HEAD, uri).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "HEAD {}", uri);
        assert_eq!(headers["content-type"], "application/json", "HEAD {}", uri);
    }

    // GET on the same routes is unaffected
    let (status, body) = get(&app, "/secret").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "demo_secret_present": true }));
}

#[tokio::test]
async fn trailing_slash_is_not_found() {
    let app = app_probing("SECRET_PROBE_IT_SLASH");

    for uri in ["/health/", "/secret/"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
        assert_eq!(body, json!({ "detail": "Not Found" }));
    }
}

#[tokio::test]
async fn probes_are_not_cacheable() {
    let app = app_probing("SECRET_PROBE_IT_CACHE");

    for uri in ["/health", "/secret"] {
        let (_, headers, _) = send(&app, Method::GET, uri).await;
        assert_eq!(headers["cache-control"], "no-store", "GET {}", uri);
        assert_eq!(headers["content-type"], "application/json");
    }
}

#[tokio::test]
async fn every_response_carries_request_id() {
    let app = app_probing("SECRET_PROBE_IT_REQID");

    let (_, first, _) = send(&app, Method::GET, "/health").await;
    let (_, second, _) = send(&app, Method::GET, "/health").await;
    let (_, missing, _) = send(&app, Method::GET, "/missing").await;

    let first = first["x-request-id"].to_str().unwrap();
    let second = second["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(first).is_ok());
    assert_ne!(first, second);
    assert!(missing.contains_key("x-request-id"));
}

#[tokio::test]
async fn server_serves_over_tcp_and_shuts_down() {
    let app = app_probing("SECRET_PROBE_IT_TCP");
    let handle = Handle::new();
    let server = tokio::spawn(secret_probe::http::serve(
        app,
        "127.0.0.1:0".parse().unwrap(),
        handle.clone(),
    ));

    let addr = handle.listening().await.expect("server failed to bind");

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    assert!(raw.starts_with("HTTP/1.1 200 OK"), "unexpected response: {}", raw);
    assert!(raw.ends_with(r#"{"ok":true}"#), "unexpected body: {}", raw);

    handle.graceful_shutdown(Some(Duration::from_secs(1)));
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
}
