//! Mean and variance over several sliding time windows at once

use core::fmt::Debug;
use core::time::Duration;

use crate::math::Numeric;
use crate::traits::{ConfigError, Estimator};

use super::clock::{Clock, MonotonicClock};
use super::config::TimeWindowConfig;
use super::history::{History, Window};

/// Point-in-time statistics of one window
#[derive(Clone, Debug, PartialEq)]
pub struct WindowSnapshot<V> {
    /// Window duration
    pub duration: Duration,
    /// Number of samples in the window
    pub size: usize,
    /// Mean of the window
    pub mean: V,
    /// Population variance of the window
    pub variance: V,
}

/// Variance and mean of one or more sliding time windows
///
/// Tracks a primary window and any number of secondary windows, each with its
/// own duration, against a single shared sample history. The [`Estimator`]
/// methods report the primary window; the `*_in` methods report any configured
/// window by duration.
///
/// Samples must arrive in non-decreasing time order. A sample older than the
/// latest stored one is silently dropped, and so is a call to
/// [`advance`](Self::advance) with a time in the past.
///
/// Assumes the sum of the samples in each window does not overflow.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use runstats::time_window::SlidingTimeWindowVariance;
/// use runstats::traits::Estimator;
///
/// let ms = Duration::from_millis;
/// let mut variance =
///     SlidingTimeWindowVariance::<u64>::new(ms(1), &[ms(50), ms(100)]);
///
/// let t0 = std::time::Instant::now();
/// variance.push_at(1, t0);
/// variance.push_at(3, t0 + Duration::from_micros(10));
/// variance.push_at(17, t0 + Duration::from_micros(20));
/// assert_eq!(variance.get(), 50);
///
/// // the sample at t0 leaves the 1ms window only
/// variance.advance(t0 + Duration::from_micros(1_010));
/// assert_eq!(variance.get(), 49);
/// assert_eq!(variance.variance_in(ms(50)), Some(50));
/// assert_eq!(variance.sample_buffer_size(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct SlidingTimeWindowVariance<V, C: Clock = MonotonicClock> {
    /// Time source for samples pushed without a timestamp
    clock: C,
    /// Shared history and per-window aggregates
    history: History<V, C::Instant>,
}

impl<V: Numeric> SlidingTimeWindowVariance<V, MonotonicClock> {
    /// Create an estimator timed by the system's monotonic clock
    ///
    /// # Arguments
    ///
    /// * `primary` - Duration of the window reported by [`Estimator::get`]
    /// * `secondary` - Durations of the additional windows
    ///
    /// # Panics
    ///
    /// Panics if a duration is configured twice.
    pub fn new(primary: Duration, secondary: &[Duration]) -> Self {
        match Self::try_new(primary, secondary) {
            Ok(estimator) => estimator,
            Err(err) => panic!("invalid time window configuration: {}", err),
        }
    }

    /// Create an estimator timed by the system's monotonic clock, rejecting
    /// duplicate durations
    pub fn try_new(primary: Duration, secondary: &[Duration]) -> Result<Self, ConfigError> {
        let config = TimeWindowConfig {
            primary,
            secondary: secondary.to_vec(),
        };
        Self::with_clock(MonotonicClock, &config)
    }

    /// Create an estimator from a configuration, timed by the system's
    /// monotonic clock
    pub fn from_config(config: &TimeWindowConfig) -> Result<Self, ConfigError> {
        Self::with_clock(MonotonicClock, config)
    }
}

impl<V: Numeric, C: Clock> SlidingTimeWindowVariance<V, C> {
    /// Create an estimator with a custom time source
    pub fn with_clock(clock: C, config: &TimeWindowConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            clock,
            history: History::new(config, true)?,
        })
    }

    /// Push a sample observed at `timestamp` into every window, then advance
    /// every window to `timestamp`
    ///
    /// Does nothing if `timestamp` is older than the latest stored sample.
    pub fn push_at(&mut self, value: V, timestamp: C::Instant) {
        self.history.push_at(value, timestamp);
    }

    /// Drop from every window the samples that fall outside of it at `now`,
    /// then release the samples no window needs anymore
    ///
    /// Does nothing if `now` is older than the latest stored sample.
    pub fn advance(&mut self, now: C::Instant) {
        self.history.advance(now);
    }

    /// Advance every window to the current time of the clock
    pub fn advance_to_now(&mut self) {
        let now = self.clock.now();
        self.advance(now);
    }

    /// Get the mean of the primary window
    pub fn mean(&self) -> V {
        self.history.primary().mean()
    }

    /// Get the variance of the window with the given duration
    ///
    /// Returns `None` if no such window is configured.
    pub fn variance_in(&self, duration: Duration) -> Option<V> {
        self.history.window(duration).map(Window::variance)
    }

    /// Get the mean of the window with the given duration
    pub fn mean_in(&self, duration: Duration) -> Option<V> {
        self.history.window(duration).map(Window::mean)
    }

    /// Get the number of samples in the window with the given duration
    pub fn size_in(&self, duration: Duration) -> Option<usize> {
        self.history.window(duration).map(Window::size)
    }

    /// Get the number of samples physically retained in the shared history
    ///
    /// This is at least the size of the largest window, and may be more while
    /// a longer window still holds samples a shorter one already dropped.
    pub fn sample_buffer_size(&self) -> usize {
        self.history.len()
    }

    /// Get the duration of the primary window
    pub fn primary(&self) -> Duration {
        self.history.primary().duration()
    }

    /// Get the configured durations, primary first
    pub fn durations(&self) -> impl Iterator<Item = Duration> + '_ {
        self.history.windows().map(Window::duration)
    }

    /// Get the statistics of every window, primary first
    pub fn windows(&self) -> impl Iterator<Item = WindowSnapshot<V>> + '_ {
        self.history.windows().map(|window| WindowSnapshot {
            duration: window.duration(),
            size: window.size(),
            mean: window.mean(),
            variance: window.variance(),
        })
    }

    /// Get the time source
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<V, C> Estimator for SlidingTimeWindowVariance<V, C>
where
    V: Numeric + Debug,
    C: Clock,
{
    type Value = V;

    /// Push a sample observed now, according to the clock
    fn push(&mut self, sample: V) {
        let now = self.clock.now();
        self.push_at(sample, now);
    }

    fn reset(&mut self) {
        self.history.reset();
    }

    /// Get the variance of the primary window
    fn get(&self) -> V {
        self.history.primary().variance()
    }

    /// Get the number of samples in the primary window
    fn size(&self) -> usize {
        self.history.primary().size()
    }
}
