//! Metrics and Monitoring Adapters
//!
//! Prometheus registry and `/metrics` scrape handler, the
//! request-timing middleware that feeds it, and the `/health`
//! endpoint. Only mounted when metrics are enabled.

pub mod health;
pub mod middleware;
pub mod prometheus;

pub use self::health::{health, HealthStatus};
pub use self::middleware::track_http_metrics;
pub use self::prometheus::{metrics_handler, MetricsRegistry};
