//! One-shot deadline driving the loading → results transition.

use std::time::{Duration, Instant};

/// How long the loading screen stays up before results are shown
pub const LOADING_DELAY: Duration = Duration::from_millis(2000);

/// A transition scheduled for a fixed point in time.
///
/// The event loop polls it; it never fires on its own, so dropping or
/// clearing it is all cancellation takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTransition {
    deadline: Instant,
}

impl ScheduledTransition {
    pub fn starting_at(now: Instant, delay: Duration) -> Self {
        Self {
            deadline: now + delay,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Time left before the deadline (zero once due)
    #[cfg(test)]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_before_deadline() {
        let now = Instant::now();
        let t = ScheduledTransition::starting_at(now, LOADING_DELAY);
        assert!(!t.is_due(now));
        assert!(!t.is_due(now + Duration::from_millis(1999)));
    }

    #[test]
    fn test_due_at_deadline() {
        let now = Instant::now();
        let t = ScheduledTransition::starting_at(now, LOADING_DELAY);
        assert!(t.is_due(now + LOADING_DELAY));
        assert!(t.is_due(now + Duration::from_secs(5)));
    }

    #[test]
    fn test_remaining_saturates() {
        let now = Instant::now();
        let t = ScheduledTransition::starting_at(now, LOADING_DELAY);
        assert_eq!(t.remaining(now), LOADING_DELAY);
        assert_eq!(t.remaining(now + Duration::from_secs(3)), Duration::ZERO);
    }
}
