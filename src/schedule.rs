//! Cooperative timers for the single-threaded game loop
use std::time::{Duration, Instant};

/// A handle to a periodic timer.
///
/// The timer does nothing by itself: the owner polls it with the current time
/// via [`Periodic::fire()`], and the event loop sleeps until
/// [`Periodic::deadline()`].  Dropping the handle cancels the timer, so
/// whoever owns the handle decides whether the timer is running.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Periodic {
    period: Duration,
    deadline: Instant,
}

impl Periodic {
    /// Start a timer at `now` that first fires one `period` later
    pub(crate) fn start(now: Instant, period: Duration) -> Periodic {
        Periodic {
            period,
            deadline: now + period,
        }
    }

    #[cfg(test)]
    pub(crate) fn period(&self) -> Duration {
        self.period
    }

    /// The instant at which the timer is next due
    pub(crate) fn deadline(&self) -> Instant {
        self.deadline
    }

    /// If the timer is due at `now`, re-arm it for one period after the
    /// deadline it just met and return `true`.  A timer that has fallen a
    /// whole period or more behind fires once, not once per missed period,
    /// and is re-armed for one period after `now`.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        if now < self.deadline {
            return false;
        }
        let next = self.deadline + self.period;
        self.deadline = if next > now { next } else { now + self.period };
        true
    }
}

/// Return the earlier of two optional deadlines
pub(crate) fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}
