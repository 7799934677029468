//! Pool transition detection.
//!
//! # Responsibilities
//! - Remember the last pool seen across parsed requests
//! - Classify each observation as initial, unchanged or a failover
//!
//! # Design Decisions
//! - Internal state is updated unconditionally after classification
//! - Only `Changed` drives alerting; the first observation never does

/// Outcome of observing the pool field of one parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolTransition {
    /// First pool ever observed.
    Initial,
    /// Same pool as the previous request.
    Unchanged,
    /// The active pool switched between two consecutive requests.
    Changed { from: String, to: String },
}

/// Tracks the last-seen serving pool and detects failovers.
#[derive(Debug, Default)]
pub struct TransitionDetector {
    current: Option<String>,
}

impl TransitionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `pool` against the previous observation, then adopt it
    /// as the current pool regardless of the result.
    pub fn observe(&mut self, pool: &str) -> PoolTransition {
        let result = match self.current.as_deref() {
            None => PoolTransition::Initial,
            Some(current) if current == pool => PoolTransition::Unchanged,
            Some(current) => PoolTransition::Changed {
                from: current.to_string(),
                to: pool.to_string(),
            },
        };

        self.current = Some(pool.to_string());
        result
    }

    /// The pool observed most recently, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
