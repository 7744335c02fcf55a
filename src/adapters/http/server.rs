//! HTTP Server - Route Registration and Serve Loop
//!
//! Builds the axum router for the configured variant and runs it
//! until the shutdown broadcast fires. The plain variant serves only
//! `/`; the instrumented variant adds `/health`, `/metrics` and the
//! request-timing middleware around every route.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{info, instrument};

use super::greeting::greeting;
use crate::adapters::metrics::{
    health, metrics_handler, track_http_metrics, MetricsRegistry,
};
use crate::config::AppConfig;

/// Router state shared by the greeting handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Version rendered in the greeting.
    pub version: Arc<str>,
}

/// Axum-based demo server.
pub struct HttpServer {
    config: AppConfig,
    /// Present only when metrics are enabled.
    metrics: Option<Arc<MetricsRegistry>>,
}

impl HttpServer {
    /// Create a new server. Pass a registry to enable instrumentation.
    pub const fn new(
        config: AppConfig,
        metrics: Option<Arc<MetricsRegistry>>,
    ) -> Self {
        Self { config, metrics }
    }

    /// Build the router for this server's variant.
    pub fn router(&self) -> Router {
        let state = AppState {
            version: Arc::from(self.config.version.as_str()),
        };
        let app = Router::new().route("/", get(greeting)).with_state(state);

        match &self.metrics {
            Some(metrics) => {
                let observability = Router::new()
                    .route("/health", get(health))
                    .route("/metrics", get(metrics_handler))
                    .with_state(Arc::clone(metrics));

                app.merge(observability).layer(middleware::from_fn_with_state(
                    Arc::clone(metrics),
                    track_http_metrics,
                ))
            }
            None => app,
        }
    }

    /// Bind the configured port and serve until shutdown.
    #[instrument(skip(self, shutdown_rx), fields(port = self.config.port))]
    pub async fn run(self, shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        let addr = self.config.bind_address();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        self.serve(listener, shutdown_rx).await
    }

    /// Serve on an already-bound listener until shutdown.
    pub async fn serve(
        self,
        listener: TcpListener,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<()> {
        let port = listener.local_addr()?.port();
        let app = self.router();

        info!(port, version = %self.config.version, "Server running on port {port}");
        if self.metrics.is_some() {
            info!(
                url = %format!("http://localhost:{port}/metrics"),
                "Metrics available at http://localhost:{port}/metrics"
            );
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await
            .context("HTTP server error")?;

        info!("Server stopped");
        Ok(())
    }
}
