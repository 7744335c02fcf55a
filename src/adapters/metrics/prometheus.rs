//! Prometheus Metrics Registry - HTTP Request Observability
//!
//! Owns the process-wide Prometheus registry: default process
//! metrics plus the request counter and duration histogram fed by
//! the request-timing middleware. Rendered on every `/metrics` scrape.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use prometheus::core::Collector;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry,
    TextEncoder,
};
use tracing::debug;

use crate::adapters::http::ApiError;

/// Label names shared by both request instruments.
pub const REQUEST_LABELS: [&str; 3] = ["method", "route", "status"];

/// Centralized Prometheus metrics for the demo server.
///
/// Constructed once at startup and shared by `Arc` with the router.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Completed HTTP requests, by method/route/status.
    pub http_requests_total: IntCounterVec,
    /// HTTP request duration in seconds, by method/route/status.
    pub http_request_duration_seconds: HistogramVec,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &REQUEST_LABELS,
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "Duration of HTTP requests in seconds",
            )
            .buckets(prometheus::DEFAULT_BUCKETS.to_vec()),
            &REQUEST_LABELS,
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        // Default process metrics (cpu, memory, fds, start time)
        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
        })
    }

    /// Record one completed request.
    pub fn observe_request(
        &self,
        method: &str,
        route: &str,
        status: u16,
        elapsed_secs: f64,
    ) {
        let status = status.to_string();
        let labels = [method, route, status.as_str()];

        self.http_requests_total.with_label_values(&labels).inc();
        self.http_request_duration_seconds
            .with_label_values(&labels)
            .observe(elapsed_secs);
    }

    /// Number of completed requests recorded for a label combination.
    ///
    /// Read-only: unlike `with_label_values`, an unseen combination is
    /// not materialized as a zero-valued series.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn request_count(&self, method: &str, route: &str, status: u16) -> u64 {
        let status = status.to_string();
        let wanted = [("method", method), ("route", route), ("status", status.as_str())];

        self.http_requests_total
            .collect()
            .iter()
            .flat_map(|family| family.get_metric())
            .find(|metric| {
                wanted.iter().all(|(name, value)| {
                    metric
                        .get_label()
                        .iter()
                        .any(|pair| pair.get_name() == *name && pair.get_value() == *value)
                })
            })
            .map_or(0, |metric| metric.get_counter().get_value() as u64)
    }

    /// Render every registered family in the text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// `GET /metrics`: scrape endpoint.
pub async fn metrics_handler(
    State(metrics): State<Arc<MetricsRegistry>>,
) -> Result<impl IntoResponse, ApiError> {
    let body = metrics.render()?;
    debug!(bytes = body.len(), "Metrics rendered");
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
