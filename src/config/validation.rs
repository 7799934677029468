//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (window size > 0, sane threshold)
//! - Check the webhook URL is well-formed before the first alert fires
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: WatcherConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::WatcherConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("window size must be at least 1")]
    ZeroWindowSize,

    #[error("error rate threshold must be a finite, non-negative percentage (got {0})")]
    BadThreshold(f64),

    #[error("notify timeout must be at least 1 second")]
    ZeroNotifyTimeout,

    #[error("webhook URL is not valid: {0}")]
    BadWebhookUrl(String),
}

/// Validate a loaded configuration, collecting every problem found.
pub fn validate_config(config: &WatcherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.window.size == 0 {
        errors.push(ValidationError::ZeroWindowSize);
    }

    let threshold = config.window.error_rate_threshold;
    if !threshold.is_finite() || threshold < 0.0 {
        errors.push(ValidationError::BadThreshold(threshold));
    }

    if config.alerts.notify_timeout_secs == 0 {
        errors.push(ValidationError::ZeroNotifyTimeout);
    }

    if let Some(webhook_url) = &config.alerts.webhook_url {
        match Url::parse(webhook_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => {
                errors.push(ValidationError::BadWebhookUrl(format!(
                    "unsupported scheme {}",
                    url.scheme()
                )));
            }
            Err(e) => errors.push(ValidationError::BadWebhookUrl(e.to_string())),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&WatcherConfig::default()).is_ok());
    }

    #[test]
    fn rejects_zero_window() {
        let mut config = WatcherConfig::default();
        config.window.size = 0;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::ZeroWindowSize)));
    }

    #[test]
    fn rejects_negative_threshold() {
        let mut config = WatcherConfig::default();
        config.window.error_rate_threshold = -1.0;

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_nan_threshold() {
        let mut config = WatcherConfig::default();
        config.window.error_rate_threshold = f64::NAN;

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_malformed_webhook_url() {
        let mut config = WatcherConfig::default();
        config.alerts.webhook_url = Some("not a url".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::BadWebhookUrl(_))));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let mut config = WatcherConfig::default();
        config.alerts.webhook_url = Some("ftp://hooks.example.com/x".to_string());

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn accepts_https_webhook() {
        let mut config = WatcherConfig::default();
        config.alerts.webhook_url = Some("https://hooks.slack.com/services/T/B/x".to_string());

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = WatcherConfig::default();
        config.window.size = 0;
        config.alerts.notify_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
