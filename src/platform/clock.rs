//! Monotonic time behind a swappable interface.
//!
//! The scheduler never reads the wall clock directly; it goes through
//! [`Clock`], so tests can script time instead of sleeping through it.

use std::thread;
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Elapsed time since the clock was created. Must never decrease.
    fn now(&mut self) -> Duration;

    /// Blocks for roughly `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// The real monotonic clock, backed by [`std::time::Instant`].
#[derive(Debug)]
pub struct StdClock {
    start: Instant,
}

impl StdClock {
    /// Creates a clock starting at zero now.
    pub fn new() -> Self {
        StdClock {
            start: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        StdClock::new()
    }
}

impl Clock for StdClock {
    fn now(&mut self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
