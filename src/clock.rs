//! Clock Module
//!
//! Pluggable time source used by the cache facade and both GC strategies.
//! Injecting a clock at construction makes expiry behavior deterministic
//! in tests.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;

// == Clock Trait ==
/// A source of the current instant.
///
/// The cache facade and every GC sweep judge expiry against the same clock,
/// so swapping the clock swaps the notion of "now" everywhere at once.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> SystemTime;
}

/// Shared handle to a clock, cloned into every component that needs one.
pub type SharedClock = Arc<dyn Clock>;

// == System Clock ==
/// The default clock: reads the real wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

// == Manual Clock ==
/// A clock that only moves when told to.
///
/// Useful for deterministic expiry tests: set entries, advance the clock past
/// their expiration instants, and observe expiry without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<SystemTime>,
}

impl ManualClock {
    /// Creates a manual clock frozen at the given instant.
    pub fn new(start: SystemTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward by the given duration.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock();
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        *self.now.lock()
    }
}
