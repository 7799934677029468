//! Alerting subsystem.
//!
//! # Data Flow
//! ```text
//! StreamProcessor detects a condition
//!     → message.rs (format operator-facing text)
//!     → gate.rs (per-kind cooldown check)
//!     → notifier.rs (webhook delivery, or log-only fallback)
//!     → gate.rs record_sent on successful delivery only
//! ```
//!
//! # Design Decisions
//! - Cooldowns are per alert kind and fully independent
//! - A failed delivery leaves the cooldown untouched, so the next
//!   qualifying event retries naturally
//! - Cooldown arithmetic uses a monotonic clock behind a trait so tests
//!   can simulate elapsed time

pub mod gate;
pub mod message;
pub mod notifier;

pub use gate::{AlertGate, AlertKind, Clock, SystemClock};
pub use notifier::{LogNotifier, Notifier, NotifyError, SlackWebhook};
