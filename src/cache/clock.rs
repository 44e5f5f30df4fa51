//! Clock abstraction for cache expiry checks
//!
//! Expiry comparisons depend on wall-clock "now". Hiding the clock behind a
//! trait lets tests simulate elapsed time without real delays.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

/// Source of the current time for expiry comparisons
pub trait Clock: Send + Sync {
    /// Returns the current instant as a UTC timestamp
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
///
/// This is the clock every production constructor installs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for deterministic tests
///
/// Starts at a fixed instant and only moves when told to via [`advance`]
/// or [`set`].
///
/// [`advance`]: ManualClock::advance
/// [`set`]: ManualClock::set
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at the given instant
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    /// Moves the clock forward (or backward, for negative durations)
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write();
        *now = *now + by;
    }

    /// Jumps the clock to an absolute instant
    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.write() = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}
