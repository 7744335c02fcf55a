//! Pipeline Demo Server — Entry Point
//!
//! Wiring sequence:
//! 1. Load configuration (defaults → CONFIG_PATH toml → env vars)
//! 2. Init tracing (JSON structured logging)
//! 3. Build the Prometheus registry when metrics are enabled
//! 4. Spawn the HTTP server
//! 5. Wait for SIGINT/SIGTERM (or server failure) → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{info, warn};

use pipeline_demo::adapters::http::HttpServer;
use pipeline_demo::adapters::metrics::MetricsRegistry;
use pipeline_demo::config;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config = config::load_config().context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(
        version = %config.version,
        port = config.port,
        metrics_enabled = config.metrics_enabled,
        "Starting pipeline demo server"
    );

    // ── 3. Metrics registry (instrumented variant only) ─────
    let metrics = if config.metrics_enabled {
        Some(Arc::new(
            MetricsRegistry::new().context("Failed to register metrics")?,
        ))
    } else {
        None
    };

    // ── 4. Spawn HTTP server ────────────────────────────────
    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let server = HttpServer::new(config, metrics);
    let mut server_handle = tokio::spawn(server.run(shutdown_tx.subscribe()));

    // ── 5. Wait for a signal, or for the server to die ──────
    tokio::select! {
        result = &mut server_handle => {
            return result.context("Server task panicked")?;
        }
        () = shutdown_signal() => {
            info!("Shutdown signal received, draining connections");
        }
    }

    let _ = shutdown_tx.send(());

    match tokio::time::timeout(Duration::from_secs(10), server_handle).await {
        Ok(result) => result.context("Server task panicked")??,
        Err(_) => warn!("Server did not stop within 10s, exiting anyway"),
    }

    info!("Shutdown complete");
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on unix (container stop).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for SIGINT");
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
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
