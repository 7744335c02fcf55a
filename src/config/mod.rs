//! Configuration Module - Environment-driven Server Configuration
//!
//! Builds the server configuration once at startup from built-in
//! defaults, an optional TOML file (`CONFIG_PATH`) and environment
//! variable overrides (`PORT`, `APP_VERSION`, `METRICS_ENABLED`,
//! `LOG_LEVEL`).

pub mod loader;

use serde::Deserialize;

pub use loader::{load_config, ConfigError};

/// Listening port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;

/// Greeting version for the plain (uninstrumented) server.
pub const DEFAULT_PLAIN_VERSION: &str = "2.0.0";

/// Greeting version for the instrumented server.
pub const DEFAULT_INSTRUMENTED_VERSION: &str = "3.0.0";

/// Resolved server configuration.
///
/// Populated once in `main` and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
  /// TCP port to listen on (default 8080).
  pub port: u16,
  /// Version string rendered in the greeting page.
  pub version: String,
  /// Enables `/health`, `/metrics` and request instrumentation.
  pub metrics_enabled: bool,
  /// Fallback log filter when `RUST_LOG` is unset.
  pub log_level: String,
}

impl AppConfig {
  /// Socket address the server binds to.
  pub fn bind_address(&self) -> String {
    format!("0.0.0.0:{}", self.port)
  }

  /// Default greeting version for the given feature flag.
  pub const fn default_version(metrics_enabled: bool) -> &'static str {
    if metrics_enabled {
      DEFAULT_INSTRUMENTED_VERSION
    } else {
      DEFAULT_PLAIN_VERSION
    }
  }
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      port: DEFAULT_PORT,
      version: DEFAULT_INSTRUMENTED_VERSION.to_string(),
      metrics_enabled: true,
      log_level: default_log_level(),
    }
  }
}

/// Optional on-disk configuration layer.
///
/// Every field may be omitted; environment variables win over the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
  pub port: Option<u16>,
  pub version: Option<String>,
  pub metrics_enabled: Option<bool>,
  pub log_level: Option<String>,
}

fn default_log_level() -> String {
  "info".to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_bind_address_uses_port() {
    let config = AppConfig {
      port: 9090,
      ..AppConfig::default()
    };
    assert_eq!(config.bind_address(), "0.0.0.0:9090");
  }

  #[test]
  fn test_default_version_follows_metrics_flag() {
    assert_eq!(AppConfig::default_version(false), "2.0.0");
    assert_eq!(AppConfig::default_version(true), "3.0.0");
  }
}
