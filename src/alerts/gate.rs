//! Cooldown gating for alert delivery.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// The two alert conditions the watcher raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    /// The active serving pool switched unexpectedly.
    Failover,
    /// The rolling 5xx error rate exceeded the configured threshold.
    ErrorRate,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Failover => "failover",
            AlertKind::ErrorRate => "error_rate",
        }
    }
}

/// Source of monotonic time, injectable for deterministic tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Production clock backed by `Instant::now`.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Per-kind cooldown timer for alert notifications.
///
/// A kind may fire when it has never been sent, or when at least the
/// cooldown duration has elapsed since its last recorded send. Sends
/// are recorded only after the notifier reports success.
#[derive(Debug)]
pub struct AlertGate {
    cooldown: Duration,
    last_sent: HashMap<AlertKind, Instant>,
}

impl AlertGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_sent: HashMap::new(),
        }
    }

    /// True iff an alert of `kind` is allowed at `now`.
    ///
    /// Comparison is strict: `elapsed < cooldown` suppresses, exactly
    /// `cooldown` re-arms.
    pub fn should_send(&self, kind: AlertKind, now: Instant) -> bool {
        match self.last_sent.get(&kind) {
            None => true,
            Some(&sent_at) => now.duration_since(sent_at) >= self.cooldown,
        }
    }

    /// Seconds since the last recorded send of `kind`, for logging.
    pub fn elapsed_since_last(&self, kind: AlertKind, now: Instant) -> Option<u64> {
        self.last_sent
            .get(&kind)
            .map(|&sent_at| now.duration_since(sent_at).as_secs())
    }

    /// Record a successful send of `kind`. Call only after delivery.
    pub fn record_sent(&mut self, kind: AlertKind, now: Instant) {
        self.last_sent.insert(kind, now);
    }
}
