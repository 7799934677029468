//! Stream processing orchestration.
//!
//! # Data Flow
//! ```text
//! LineSource (live tail or scripted)
//!     → parser (tolerant field extraction)
//!     → window (status code FIFO) + detector (pool tracking)
//!     → gate (per-kind cooldown)
//!     → notifier (webhook or log-only)
//! ```
//!
//! # Design Decisions
//! - One sequential loop owns all mutable state; no locks needed
//! - Parse failures are counted and skipped, never fatal
//! - A notify attempt already in flight completes before a shutdown
//!   request is honored; cancellation only interrupts the wait for the
//!   next line
//! - Source termination ends the loop; restarting is the operator's job

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use crate::alerts::{message, AlertGate, AlertKind, Clock, Notifier};
use crate::config::WatcherConfig;
use crate::detector::{PoolTransition, TransitionDetector};
use crate::parser::LineParser;
use crate::source::{LineSource, SourceError, SourceEvent};
use crate::window::RollingWindow;

/// Raw parse failures logged verbatim before going quiet.
const PARSE_FAILURE_LOG_LIMIT: u64 = 5;

/// Why the processing loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A shutdown was requested and honored cleanly.
    ShutdownRequested,
    /// The line source terminated; the watcher must be restarted.
    SourceTerminated,
}

/// The streaming state machine: pulls lines, folds them into window and
/// detector state, and dispatches cooldown-gated alerts.
pub struct StreamProcessor {
    parser: LineParser,
    window: RollingWindow,
    detector: TransitionDetector,
    gate: AlertGate,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    error_rate_threshold: f64,
    idle_backoff: Duration,
    processed_lines: u64,
    parse_failures: u64,
}

impl StreamProcessor {
    pub fn new(
        config: &WatcherConfig,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            parser: LineParser::new(),
            window: RollingWindow::new(config.window.size),
            detector: TransitionDetector::new(),
            gate: AlertGate::new(Duration::from_secs(config.alerts.cooldown_secs)),
            notifier,
            clock,
            error_rate_threshold: config.window.error_rate_threshold,
            idle_backoff: Duration::from_millis(config.source.idle_backoff_ms),
            processed_lines: 0,
            parse_failures: 0,
        }
    }

    /// Run until the source terminates or shutdown is requested.
    pub async fn run<S: LineSource>(
        &mut self,
        source: &mut S,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<RunOutcome, SourceError> {
        // WaitingForSource: the source may not be able to produce lines
        // yet (log file not created). Cancellable like the main loop.
        tokio::select! {
            ready = source.ready() => ready?,
            _ = shutdown.recv() => {
                tracing::info!("Shutdown requested before source became ready");
                return Ok(RunOutcome::ShutdownRequested);
            }
        }

        tracing::info!("Streaming started");

        loop {
            let event = tokio::select! {
                event = source.next_line() => event?,
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown requested, leaving processing loop");
                    return Ok(RunOutcome::ShutdownRequested);
                }
            };

            match event {
                SourceEvent::Line(line) => self.handle_line(&line).await,
                SourceEvent::Idle => {
                    tokio::time::sleep(self.idle_backoff).await;
                }
                SourceEvent::Terminated => {
                    tracing::error!(
                        processed_lines = self.processed_lines,
                        "Line source terminated"
                    );
                    return Ok(RunOutcome::SourceTerminated);
                }
            }
        }
    }

    /// Fold one raw line into the watcher state, dispatching any alerts
    /// it triggers.
    pub async fn handle_line(&mut self, line: &str) {
        self.processed_lines += 1;

        let Some(record) = self.parser.parse(line) else {
            self.parse_failures += 1;
            if self.parse_failures <= PARSE_FAILURE_LOG_LIMIT {
                tracing::warn!(
                    line = %truncate(line, 100),
                    parse_failures = self.parse_failures,
                    "Failed to parse log line"
                );
            }
            return;
        };

        tracing::debug!(
            line_no = self.processed_lines,
            pool = %record.pool,
            status = record.status,
            release = %record.release,
            "Parsed request"
        );

        self.window.push(record.status);

        if let PoolTransition::Changed { from, to } = self.detector.observe(&record.pool) {
            tracing::warn!(%from, %to, release = %record.release, "Failover detected");
            let text = message::failover(&from, &to, &record.release, chrono::Local::now());
            self.dispatch(AlertKind::Failover, &text).await;
        }

        // Evaluated on every record once the window is full; repeated
        // qualifying rates are suppressed by the cooldown alone.
        if self.window.is_full() {
            let rate = self.window.error_rate();
            tracing::debug!(rate, window = self.window.len(), "Window error rate");

            if rate > self.error_rate_threshold {
                tracing::warn!(
                    rate,
                    threshold = self.error_rate_threshold,
                    pool = %record.pool,
                    "Error rate above threshold"
                );
                let text = message::error_rate(
                    rate,
                    self.error_rate_threshold,
                    self.window.capacity(),
                    &record.pool,
                    chrono::Local::now(),
                );
                self.dispatch(AlertKind::ErrorRate, &text).await;
            }
        }
    }

    /// Attempt a gated alert delivery. The cooldown is recorded only on
    /// success, so a failed delivery retries on the next qualifying
    /// event.
    async fn dispatch(&mut self, kind: AlertKind, text: &str) {
        let now = self.clock.now();

        if !self.gate.should_send(kind, now) {
            tracing::info!(
                kind = kind.as_str(),
                elapsed_secs = self.gate.elapsed_since_last(kind, now),
                "Alert suppressed by cooldown"
            );
            return;
        }

        match self.notifier.send(text).await {
            Ok(()) => {
                self.gate.record_sent(kind, now);
                tracing::info!(
                    kind = kind.as_str(),
                    channel = self.notifier.name(),
                    "Alert sent"
                );
            }
            Err(e) => {
                tracing::error!(
                    kind = kind.as_str(),
                    channel = self.notifier.name(),
                    error = %e,
                    "Failed to deliver alert"
                );
            }
        }
    }

    pub fn processed_lines(&self) -> u64 {
        self.processed_lines
    }

    pub fn parse_failures(&self) -> u64 {
        self.parse_failures
    }

    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    /// Pool seen on the most recent successfully parsed line.
    pub fn current_pool(&self) -> Option<&str> {
        self.detector.current()
    }
}

fn truncate(line: &str, max: usize) -> &str {
    match line.char_indices().nth(max) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
