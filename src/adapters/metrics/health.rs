//! Health endpoint.
//!
//! `GET /health` reports a static `healthy` status with the current
//! UTC time. It performs no I/O and cannot fail.

use axum::Json;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Body of a health response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: &'static str,
    /// ISO-8601 UTC, millisecond precision (`2024-01-01T00:00:00.000Z`).
    pub timestamp: String,
}

impl HealthStatus {
    /// Healthy status stamped with `now`.
    pub fn healthy_at(now: DateTime<Utc>) -> Self {
        Self {
            status: "healthy",
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// `GET /health`: liveness probe.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::healthy_at(Utc::now()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_timestamp_format() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        let status = HealthStatus::healthy_at(now);
        assert_eq!(status.status, "healthy");
        assert_eq!(status.timestamp, "2024-03-05T07:08:09.000Z");
    }

    #[test]
    fn test_serialized_shape() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        let json = serde_json::to_value(HealthStatus::healthy_at(now)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "healthy",
                "timestamp": "2024-03-05T07:08:09.000Z"
            })
        );
    }
}
