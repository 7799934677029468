//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::schema::WatcherConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variables recognized as overrides.
const ENV_ERROR_RATE_THRESHOLD: &str = "ERROR_RATE_THRESHOLD";
const ENV_WINDOW_SIZE: &str = "WINDOW_SIZE";
const ENV_ALERT_COOLDOWN_SEC: &str = "ALERT_COOLDOWN_SEC";
const ENV_SLACK_WEBHOOK_URL: &str = "SLACK_WEBHOOK_URL";
const ENV_LOG_FILE: &str = "LOG_FILE";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: optional TOML file, then environment overrides,
/// then validation.
pub fn load_config(path: Option<&Path>) -> Result<WatcherConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => WatcherConfig::default(),
    };

    apply_env_overrides(&mut config, &|var| std::env::var(var).ok())?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply the recognized environment overrides from `lookup`.
///
/// Taking the lookup as a function keeps this testable without mutating
/// process-global environment state.
fn apply_env_overrides(
    config: &mut WatcherConfig,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(value) = lookup(ENV_ERROR_RATE_THRESHOLD) {
        config.window.error_rate_threshold =
            value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_ERROR_RATE_THRESHOLD,
                value,
            })?;
    }

    if let Some(value) = lookup(ENV_WINDOW_SIZE) {
        config.window.size = value.parse().map_err(|_| ConfigError::InvalidEnv {
            var: ENV_WINDOW_SIZE,
            value,
        })?;
    }

    if let Some(value) = lookup(ENV_ALERT_COOLDOWN_SEC) {
        config.alerts.cooldown_secs = value.parse().map_err(|_| ConfigError::InvalidEnv {
            var: ENV_ALERT_COOLDOWN_SEC,
            value,
        })?;
    }

    if let Some(value) = lookup(ENV_SLACK_WEBHOOK_URL) {
        config.alerts.webhook_url = Some(value);
    }

    if let Some(value) = lookup(ENV_LOG_FILE) {
        config.log_file = PathBuf::from(value);
    }

    Ok(())
}
