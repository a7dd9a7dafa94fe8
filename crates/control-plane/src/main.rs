// Workshops API server
// Decision: No DATABASE_URL means dev mode with the in-memory store

use anyhow::{Context, Result};
use std::sync::Arc;
use workshops_control_plane::build_app;
use workshops_control_plane::config::ServerConfig;
use workshops_control_plane::storage::StorageBackend;
use workshops_core::telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Configure via environment variables:
    // - RUST_LOG: Log filter (default: "workshops=debug,tower_http=debug")
    // - LOG_FORMAT: "text" or "json"
    let mut telemetry_config = TelemetryConfig::from_env();
    if telemetry_config.log_filter.is_none() {
        // Target matching is by prefix, so this covers every workshops_* crate
        telemetry_config.log_filter = Some("workshops=debug,tower_http=debug".to_string());
    }
    telemetry_config.service_version = Some(env!("CARGO_PKG_VERSION").to_string());
    init_telemetry(telemetry_config);

    tracing::info!("workshops-control-plane starting...");

    let config = ServerConfig::from_env();
    if config.is_dev_mode() {
        tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on restart)");
    }

    let backend = StorageBackend::from_config(&config)
        .await
        .context("Failed to initialize storage")?;
    if !backend.is_dev_mode() {
        tracing::info!("Connected to database");
    }

    let app = build_app(Arc::new(backend), &config);

    let listener = tokio::net::TcpListener::bind(&config.http_addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", config.http_addr))?;
    tracing::info!("HTTP server listening on {}", config.http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
