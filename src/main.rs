//! secret-probe entry point.
//!
//! Initializes tracing, loads configuration from an optional TOML file, builds
//! the Axum router and serves it until SIGINT or SIGTERM.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use secret_probe::config::{AppConfig, DEFAULT_LOG_FILTER};
use secret_probe::http::start_server;
use secret_probe::{create_router, AppState};

/// secret-probe: liveness and secret-presence probe service
#[derive(Parser, Debug)]
#[command(name = "secret-probe", version, about)]
struct Args {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level filter (e.g., "secret_probe=debug,axum=trace")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Bind host, overrides http.host
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides http.port
    #[arg(short, long)]
    port: Option<u16>,
}

impl Args {
    fn load_config(&self) -> Result<AppConfig, secret_probe::config::ConfigError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(host) = &self.host {
            config.http.host = host.clone();
        }
        if let Some(port) = self.port {
            config.http.port = port;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(filter: &str, json: bool) {
    let registry = tracing_subscriber::registry().with(EnvFilter::new(filter));
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration before tracing so the log format is known
    let config = args.load_config()?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, config.logging.is_json());

    tracing::info!(
        config = ?args.config,
        secret_var = %config.probe.secret_var,
        "Loaded configuration"
    );

    let state = AppState::new(config.clone());
    let app = create_router(state);

    start_server(app, &config).await?;

    Ok(())
}
