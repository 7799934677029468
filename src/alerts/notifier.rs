//! Alert delivery channels.
//!
//! # Responsibilities
//! - Deliver a formatted alert message to the operator
//! - Report delivery outcome so the caller can manage its cooldown
//!
//! # Design Decisions
//! - Delivery is a bounded operation: the webhook client carries a
//!   request timeout so a hanging sink cannot stall line ingestion
//! - No automatic retry; re-delivery is driven by future qualifying
//!   events passing the cooldown gate
//! - When no webhook is configured, alerts go to the operational log
//!   and count as delivered

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Error type for alert delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The sink responded with a non-200 status.
    #[error("webhook returned {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The request never completed (connect failure, timeout).
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// A channel that can deliver one alert message.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

/// JSON body posted to the incoming webhook.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
    username: &'a str,
    icon_emoji: &'a str,
}

/// Slack-compatible incoming webhook channel.
pub struct SlackWebhook {
    webhook_url: String,
    client: reqwest::Client,
}

impl SlackWebhook {
    pub const USERNAME: &'static str = "DevOps Monitor";
    pub const ICON_EMOJI: &'static str = ":warning:";

    pub fn new(webhook_url: String, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            webhook_url,
            client,
        })
    }
}

#[async_trait]
impl Notifier for SlackWebhook {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            text,
            username: Self::USERNAME,
            icon_emoji: Self::ICON_EMOJI,
        };

        tracing::debug!(channel = self.name(), "Sending alert to webhook");

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 200 {
            tracing::info!(channel = self.name(), "Alert delivered");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Fallback channel used when no webhook URL is configured.
///
/// Emits the alert to the operational log and reports success, so the
/// cooldown gate applies to log-only alerts the same way.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        tracing::warn!(alert = %text, "Alert (no webhook configured)");
        Ok(())
    }
}
