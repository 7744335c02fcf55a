//! Adapters Layer
//!
//! Concrete infrastructure for the demo server, grouped by concern:
//! - `http`: axum router, greeting page and serve loop
//! - `metrics`: Prometheus registry, request-timing middleware, health

pub mod http;
pub mod metrics;
