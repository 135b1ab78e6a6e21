//! Cancel-and-restart timers owned by a tokenizer instance.
//!
//! Nothing runs in the background. A timer only remembers its deadline; the
//! host asks for the earliest deadline, sleeps until then and calls
//! `Tokenizer::tick` with the current instant.

use std::time::{Duration, Instant};

/// A single-shot timer handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm the timer, replacing any pending deadline.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Cancel the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the deadline has passed at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| d <= now)
    }

    /// Disarm and return true if the timer was due at `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rearm_replaces_deadline() {
        let start = Instant::now();
        let mut timer = Timer::new();
        timer.arm(start, Duration::from_millis(500));
        timer.arm(start + Duration::from_millis(300), Duration::from_millis(500));

        assert!(!timer.fire(start + Duration::from_millis(500)));
        assert!(timer.fire(start + Duration::from_millis(800)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut timer = Timer::new();
        timer.arm(start, Duration::ZERO);
        timer.cancel();
        assert!(!timer.fire(start + Duration::from_secs(1)));
    }
}
