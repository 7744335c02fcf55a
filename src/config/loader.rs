//! Configuration Loader - Layered Defaults, File and Environment
//!
//! Resolution order: built-in defaults, then the TOML file named by
//! `CONFIG_PATH` (if any), then environment variables. Empty
//! environment values count as unset.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use super::{default_log_level, AppConfig, FileConfig, DEFAULT_PORT};

/// Typed configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid PORT value {value:?}: expected an integer in 0..=65535")]
  InvalidPort { value: String },
  #[error("invalid METRICS_ENABLED value {value:?}: expected true/false")]
  InvalidFlag { value: String },
  #[error("failed to read config file {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },
  #[error("failed to parse config file {path}: {source}")]
  Parse {
    path: String,
    #[source]
    source: toml::de::Error,
  },
  #[error("version must not be empty")]
  EmptyVersion,
}

/// Load configuration from the process environment.
///
/// # Errors
/// Returns a [`ConfigError`] if an environment value cannot be parsed
/// or the config file named by `CONFIG_PATH` is unreadable or invalid.
pub fn load_config() -> Result<AppConfig, ConfigError> {
  let config = load_with(|key| std::env::var(key).ok())?;

  info!(
    port = config.port,
    version = %config.version,
    metrics_enabled = config.metrics_enabled,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Resolve configuration through an arbitrary key lookup.
///
/// `lookup` stands in for the environment so callers (and tests) can
/// supply values without touching process state.
pub fn load_with<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
  F: Fn(&str) -> Option<String>,
{
  let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

  let file = match var("CONFIG_PATH") {
    Some(path) => read_file(&path)?,
    None => FileConfig::default(),
  };

  let port = match var("PORT") {
    Some(raw) => parse_port(&raw)?,
    None => file.port.unwrap_or(DEFAULT_PORT),
  };

  let metrics_enabled = match var("METRICS_ENABLED") {
    Some(raw) => parse_flag(&raw)?,
    None => file.metrics_enabled.unwrap_or(true),
  };

  let version = var("APP_VERSION")
    .or(file.version)
    .unwrap_or_else(|| AppConfig::default_version(metrics_enabled).to_string());

  let log_level = var("LOG_LEVEL")
    .or(file.log_level)
    .unwrap_or_else(default_log_level);

  let config = AppConfig {
    port,
    version,
    metrics_enabled,
    log_level,
  };
  validate_config(&config)?;
  Ok(config)
}

/// Parse a `PORT` value.
pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
  raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
    value: raw.to_string(),
  })
}

/// Parse a boolean feature flag (`true/false`, `1/0`, `yes/no`, `on/off`).
pub fn parse_flag(raw: &str) -> Result<bool, ConfigError> {
  match raw.trim().to_ascii_lowercase().as_str() {
    "true" | "1" | "yes" | "on" => Ok(true),
    "false" | "0" | "no" | "off" => Ok(false),
    _ => Err(ConfigError::InvalidFlag {
      value: raw.to_string(),
    }),
  }
}

fn read_file(path: &str) -> Result<FileConfig, ConfigError> {
  let content =
    std::fs::read_to_string(Path::new(path)).map_err(|source| ConfigError::Read {
      path: path.to_string(),
      source,
    })?;

  toml::from_str(&content).map_err(|source| ConfigError::Parse {
    path: path.to_string(),
    source,
  })
}

fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
  if config.version.trim().is_empty() {
    return Err(ConfigError::EmptyVersion);
  }
  Ok(())
}
