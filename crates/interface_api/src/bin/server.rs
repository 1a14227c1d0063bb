//! Blue Button Claims - API Server Binary
//!
//! This binary starts the HTTP API server of the claims sample.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin bluebutton-api
//!
//! # Run with environment variables
//! API_CLIENT_ID=... API_CLIENT_SECRET=... cargo run --bin bluebutton-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 3001)
//! * `API_CLIENT_ID` - Client id of the registered application
//! * `API_CLIENT_SECRET` - Client secret of the registered application
//! * `API_CALLBACK_URL` - Redirect URI registered with the application
//! * `API_LOCAL_BASE_URL` - Base URL of the `local` environment
//! * `API_REQUEST_TIMEOUT_SECS` - Upstream request timeout (default: 30)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//!
//! Values may also come from a `.bluebutton-config.{json,yaml,toml}` file in
//! the working directory; environment variables win.

use anyhow::Context;
use interface_api::{config::ApiConfig, create_router, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Failed to load configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Blue Button Claims API Server"
    );

    if let Err(e) = config.bluebutton().validate() {
        tracing::warn!(error = %e, "Authorization will fail until the application credentials are configured");
    }

    let state = AppState::new(config.clone()).context("Failed to create Blue Button client")?;
    let app = create_router(state);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
