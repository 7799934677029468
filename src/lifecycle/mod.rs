//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Signal received → finish in-flight notify → release tail → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - A broadcast channel fans the shutdown request out to every task
//! - The processor honors shutdown between lines, never mid-notify

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
