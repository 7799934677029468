//! Log line sources.
//!
//! # Data Flow
//! ```text
//! live log file (appended by the load balancer)
//!     → tail.rs (wait for creation, follow appended lines)
//!     → LineSource::next_line
//!     → StreamProcessor
//! ```
//!
//! # Design Decisions
//! - The transport is abstracted behind `LineSource` so the processor
//!   can be tested against a scripted sequence of lines with no real
//!   file or child process involved
//! - A quiet source is signalled distinctly (`Idle`) from a dead one
//!   (`Terminated`); only the latter ends the processing loop

use async_trait::async_trait;
use thiserror::Error;

pub mod tail;

pub use tail::TailSource;

/// One pull from a line source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    /// A complete log line, trailing newline stripped.
    Line(String),
    /// No line available right now; the source is still alive.
    Idle,
    /// The underlying source ended and will produce no more lines.
    Terminated,
}

/// Error type for line sources.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error on line source: {0}")]
    Io(#[from] std::io::Error),
}

/// Supplier of raw log lines, one at a time.
#[async_trait]
pub trait LineSource: Send {
    /// Block until the source is able to produce lines.
    ///
    /// Sources that are ready immediately keep the default no-op.
    async fn ready(&mut self) -> Result<(), SourceError> {
        Ok(())
    }

    /// Pull the next event from the source.
    async fn next_line(&mut self) -> Result<SourceEvent, SourceError>;
}
