//! Request-timing middleware.
//!
//! Records `http_requests_total` and `http_request_duration_seconds`
//! once per completed request, after the inner service has produced
//! the final response.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use super::MetricsRegistry;

/// Axum interceptor feeding the request instruments.
///
/// The `route` label is the matched route template when the router
/// matched, otherwise the raw request path.
pub async fn track_http_metrics(
    State(metrics): State<Arc<MetricsRegistry>>,
    matched_path: Option<MatchedPath>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().as_str().to_owned();
    let route = matched_path.map_or_else(
        || request.uri().path().to_owned(),
        |path| path.as_str().to_owned(),
    );

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed = start.elapsed().as_secs_f64();
    metrics.observe_request(&method, &route, status, elapsed);

    debug!(
        method = %method,
        route = %route,
        status,
        elapsed_ms = elapsed * 1000.0,
        "Request completed"
    );

    response
}
