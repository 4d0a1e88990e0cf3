//! Timestamps and time sources

use core::cell::Cell;
use core::fmt::Debug;
use core::time::Duration;

use std::time::Instant;

/// A point in monotonic time
///
/// Only ordering and subtraction of a duration are needed to decide which
/// samples fall out of a window.
pub trait Timestamp: Copy + Ord + Debug {
    /// `self - duration`, or `None` if that point is not representable
    fn checked_sub(self, duration: Duration) -> Option<Self>;
}

impl Timestamp for Instant {
    #[inline]
    fn checked_sub(self, duration: Duration) -> Option<Self> {
        Instant::checked_sub(&self, duration)
    }
}

/// Offset from an arbitrary, host-defined epoch
impl Timestamp for Duration {
    #[inline]
    fn checked_sub(self, duration: Duration) -> Option<Self> {
        Duration::checked_sub(self, duration)
    }
}

/// Source of the current time for samples pushed without a timestamp
///
/// Successive calls must never go backwards.
pub trait Clock: Debug {
    /// Timestamp type produced by this clock
    type Instant: Timestamp;

    /// Current time
    fn now(&self) -> Self::Instant;
}

/// The operating system's monotonic clock
#[derive(Clone, Copy, Debug, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    type Instant = Instant;

    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock moved forward explicitly by its owner
///
/// Time is an offset from zero. Useful for deterministic replays and for hosts
/// that already timestamp their measurements.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use runstats::time_window::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// clock.advance(Duration::from_millis(5));
/// assert_eq!(clock.now(), Duration::from_millis(5));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock at the given offset
    pub fn starting_at(now: Duration) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// Move the clock to `now`; ignored if that would move it backwards
    pub fn set(&self, now: Duration) {
        if now > self.now.get() {
            self.now.set(now);
        }
    }
}

impl Clock for ManualClock {
    type Instant = Duration;

    fn now(&self) -> Duration {
        self.now.get()
    }
}
