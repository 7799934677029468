//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via the tracing crate; every operational event
//!   carries key-value fields
//! - `RUST_LOG` wins over the configured level so operators can turn up
//!   verbosity without touching config

pub mod logging;
