//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! watcher. All types derive Serde traits for deserialization from
//! config files; every field has a default so a minimal (or absent)
//! config file is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the log watcher.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Path of the access log to follow.
    pub log_file: PathBuf,

    /// Rolling window settings.
    pub window: WindowConfig,

    /// Alert dispatch settings.
    pub alerts: AlertConfig,

    /// Line source settings.
    pub source: SourceConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("/var/log/nginx/access.log"),
            window: WindowConfig::default(),
            alerts: AlertConfig::default(),
            source: SourceConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Rolling window configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Number of recent requests the window holds.
    pub size: usize,

    /// 5xx error rate (percent) above which an alert fires.
    pub error_rate_threshold: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            size: 200,
            error_rate_threshold: 2.0,
        }
    }
}

/// Alert dispatch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Minimum seconds between two successful alerts of the same kind.
    pub cooldown_secs: u64,

    /// Incoming webhook URL. Absent means alerts are only logged.
    pub webhook_url: Option<String>,

    /// Timeout for one webhook request in seconds.
    pub notify_timeout_secs: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: 300,
            webhook_url: None,
            notify_timeout_secs: 5,
        }
    }
}

/// Line source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Seconds between checks for the log file's creation.
    pub creation_poll_secs: u64,

    /// Milliseconds to sleep when the source reports no new line.
    pub idle_backoff_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            creation_poll_secs: 2,
            idle_backoff_ms: 100,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
