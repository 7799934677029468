//! Rolling request window.
//!
//! # Responsibilities
//! - Hold the most recent N upstream status codes
//! - Evict strictly FIFO once capacity is reached
//! - Compute the 5xx error rate on demand
//!
//! # Design Decisions
//! - Only status >= 500 counts as an error; 4xx is a client problem
//! - Empty window reports 0.0, so there is no division by zero to guard
//! - The window is never cleared; it only ever slides forward

use std::collections::VecDeque;

/// Fixed-capacity FIFO buffer of recent upstream status codes.
#[derive(Debug)]
pub struct RollingWindow {
    codes: VecDeque<u16>,
    capacity: usize,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            codes: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a status code, evicting the oldest entry when full.
    pub fn push(&mut self, code: u16) {
        if self.codes.len() >= self.capacity {
            self.codes.pop_front();
        }
        self.codes.push_back(code);
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// True once the window has collected `capacity` codes.
    pub fn is_full(&self) -> bool {
        self.codes.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Percentage of entries with a 5xx status. 0.0 when empty.
    pub fn error_rate(&self) -> f64 {
        if self.codes.is_empty() {
            return 0.0;
        }

        let errors = self.codes.iter().filter(|&&code| code >= 500).count();
        (errors as f64 / self.codes.len() as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_rate_is_zero() {
        let window = RollingWindow::new(10);
        assert_eq!(window.len(), 0);
        assert_eq!(window.error_rate(), 0.0);
        assert!(!window.is_full());
    }

    #[test]
    fn rate_is_exact_percentage() {
        let mut window = RollingWindow::new(5);
        for code in [200, 200, 500, 503, 200] {
            window.push(code);
        }
        assert!(window.is_full());
        assert_eq!(window.error_rate(), 40.0);
    }

    #[test]
    fn four_xx_is_not_an_error() {
        let mut window = RollingWindow::new(4);
        for code in [404, 400, 499, 200] {
            window.push(code);
        }
        assert_eq!(window.error_rate(), 0.0);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut window = RollingWindow::new(3);
        for code in 0..100u16 {
            window.push(code);
            assert!(window.len() <= 3);
        }
    }

    #[test]
    fn eviction_is_fifo() {
        let mut window = RollingWindow::new(3);
        for code in [500, 500, 500] {
            window.push(code);
        }
        assert_eq!(window.error_rate(), 100.0);

        // Each 200 pushed past capacity displaces one of the oldest 500s.
        window.push(200);
        assert!((window.error_rate() - 200.0 / 3.0).abs() < 1e-9);
        window.push(200);
        window.push(200);
        assert_eq!(window.error_rate(), 0.0);
    }

    #[test]
    fn partial_window_rate_uses_current_length() {
        let mut window = RollingWindow::new(200);
        window.push(500);
        window.push(200);
        assert_eq!(window.error_rate(), 50.0);
        assert!(!window.is_full());
    }
}
