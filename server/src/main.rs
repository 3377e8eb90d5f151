//! Commerce API HTTP server.
//!
//! Serves the catalog, discount and order endpoints over the in-memory
//! service implementations.
//!
//! # Usage
//!
//! ```bash
//! # Run with defaults (0.0.0.0:8080, demo data loaded)
//! cargo run --bin commerce-api
//!
//! # JSON logs on another port
//! PORT=3000 LOG_FORMAT=json cargo run --bin commerce-api
//! ```

mod config;

use axum::http::HeaderValue;
use commerce_api_core::environment::SystemClock;
use commerce_api_testing::InMemoryCommerce;
use commerce_api_web::{api_router, AppState};
use config::{Config, LogFormat};
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::Notify;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    init_tracing(&config);

    info!(
        bind_address = %config.bind_address(),
        log_format = ?config.log_format,
        seed_demo_data = config.seed_demo_data,
        "Starting Commerce API server"
    );

    let services = Arc::new(InMemoryCommerce::with_clock(Arc::new(SystemClock)));
    if config.seed_demo_data {
        services.seed_demo_data()?;
        info!("Demo data loaded");
    }

    let app = api_router(AppState::from_services(services)).layer(cors_layer(&config)?);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(address = %listener.local_addr()?, "Server listening");

    // Drop lingering connections once the shutdown timeout has elapsed
    let shutdown_started = Arc::new(Notify::new());
    let signal_seen = Arc::clone(&shutdown_started);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            signal_seen.notify_one();
        })
        .into_future();

    let timeout = config.shutdown_timeout();
    tokio::select! {
        result = server => result?,
        () = async {
            shutdown_started.notified().await;
            tokio::time::sleep(timeout).await;
        } => {
            warn!(timeout_secs = timeout.as_secs(), "Shutdown timeout elapsed, closing open connections");
        }
    }

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn cors_layer(config: &Config) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.cors_allow_origin == "*" {
        return Ok(layer.allow_origin(Any));
    }
    let origin = HeaderValue::from_str(&config.cors_allow_origin)
        .map_err(|e| format!("invalid CORS_ALLOW_ORIGIN '{}': {e}", config.cors_allow_origin))?;
    Ok(layer.allow_origin(origin))
}

/// Graceful shutdown signal handler.
///
/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
