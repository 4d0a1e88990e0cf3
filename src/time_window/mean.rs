//! Mean over several sliding time windows at once

use core::fmt::Debug;
use core::time::Duration;

use crate::math::Numeric;
use crate::traits::{ConfigError, Estimator};

use super::clock::{Clock, MonotonicClock};
use super::config::TimeWindowConfig;
use super::history::{History, Window};

/// Mean of one or more sliding time windows
///
/// The mean-only counterpart of
/// [`SlidingTimeWindowVariance`](super::SlidingTimeWindowVariance): same shared
/// history, same eviction rules, but each window only keeps a count and a sum.
/// The [`Estimator`] methods report the primary window; [`get_in`](Self::get_in)
/// and [`size_in`](Self::size_in) report any configured window by duration.
///
/// Samples must arrive in non-decreasing time order. Late samples and calls to
/// [`advance`](Self::advance) with a time in the past are silently dropped.
///
/// Assumes the sum of the samples in each window does not overflow.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use runstats::time_window::{ManualClock, SlidingTimeWindowMean, TimeWindowConfig};
/// use runstats::traits::Estimator;
///
/// let config = TimeWindowConfig::new(Duration::from_secs(1))
///     .with_secondary(Duration::from_secs(10));
/// let mut requests =
///     SlidingTimeWindowMean::<u64, _>::with_clock(ManualClock::new(), &config).unwrap();
///
/// requests.push(40);
/// requests.clock().advance(Duration::from_secs(5));
/// requests.push(60);
///
/// assert_eq!(requests.get(), 60);
/// assert_eq!(requests.get_in(Duration::from_secs(10)), Some(50));
/// ```
#[derive(Clone, Debug)]
pub struct SlidingTimeWindowMean<V, C: Clock = MonotonicClock> {
    /// Time source for samples pushed without a timestamp
    clock: C,
    /// Shared history and per-window count and sum
    history: History<V, C::Instant>,
}

impl<V: Numeric> SlidingTimeWindowMean<V, MonotonicClock> {
    /// Create an estimator timed by the system's monotonic clock
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

    /// Create an estimator from a configuration
    pub fn from_config(config: &TimeWindowConfig) -> Result<Self, ConfigError> {
        Self::with_clock(MonotonicClock, config)
    }
}

impl<V: Numeric, C: Clock> SlidingTimeWindowMean<V, C> {
    /// Create an estimator with a custom time source
    pub fn with_clock(clock: C, config: &TimeWindowConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            clock,
            history: History::new(config, false)?,
        })
    }

    /// Push a sample observed at `timestamp`, then advance every window to it
    pub fn push_at(&mut self, value: V, timestamp: C::Instant) {
        self.history.push_at(value, timestamp);
    }

    /// Drop from every window the samples that fall outside of it at `now`
    pub fn advance(&mut self, now: C::Instant) {
        self.history.advance(now);
    }

    pub fn advance_to_now(&mut self) {
        let now = self.clock.now();
        self.history.advance(now);
    }

    /// Get the mean of the window with the given duration
    ///
    /// Returns `None` if no such window is configured.
    pub fn get_in(&self, duration: Duration) -> Option<V> {
        self.history.window(duration).map(Window::mean)
    }

    /// Get the number of samples in the window with the given duration
    pub fn size_in(&self, duration: Duration) -> Option<usize> {
        self.history.window(duration).map(Window::size)
    }

    /// Get the number of samples physically retained in the shared history
    pub fn sample_buffer_size(&self) -> usize {
        self.history.len()
    }

    pub fn primary(&self) -> Duration {
        self.history.primary().duration()
    }

    /// Get the configured durations, primary first
    pub fn durations(&self) -> impl Iterator<Item = Duration> + '_ {
        self.history.windows().map(Window::duration)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<V, C> Estimator for SlidingTimeWindowMean<V, C>
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

    /// Get the mean of the primary window
    fn get(&self) -> V {
        self.history.primary().mean()
    }

    fn size(&self) -> usize {
        self.history.primary().size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_window::ManualClock;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn us(micros: u64) -> Duration {
        Duration::from_micros(micros)
    }

    fn three_windows<V: Numeric>() -> SlidingTimeWindowMean<V, ManualClock> {
        let config = TimeWindowConfig::new(ms(1))
            .with_secondary(ms(50))
            .with_secondary(ms(100));
        SlidingTimeWindowMean::with_clock(ManualClock::new(), &config).unwrap()
    }

    /// (size, mean) of the 1ms, 50ms and 100ms windows
    fn state<V: Numeric + Debug>(
        estimator: &SlidingTimeWindowMean<V, ManualClock>,
    ) -> [(usize, V); 3] {
        [ms(1), ms(50), ms(100)]
            .map(|d| (estimator.size_in(d).unwrap(), estimator.get_in(d).unwrap()))
    }

    #[test]
    fn test_empty() {
        let estimator = three_windows::<u64>();
        assert_eq!(estimator.get(), 0);
        assert_eq!(estimator.size(), 0);
        assert_eq!(state(&estimator), [(0, 0), (0, 0), (0, 0)]);
        assert_eq!(estimator.sample_buffer_size(), 0);
    }

    #[test]
    fn test_all_windows_expire_then_accept_again() {
        let mut estimator = three_windows::<u64>();
        let t0 = Duration::from_secs(1);
        estimator.clock().set(t0);

        estimator.push(2);
        assert_eq!(state(&estimator), [(1, 2), (1, 2), (1, 2)]);
        assert_eq!(estimator.sample_buffer_size(), 1);

        estimator.clock().advance(ms(150));
        estimator.advance_to_now();
        assert_eq!(state(&estimator), [(0, 0), (0, 0), (0, 0)]);
        assert_eq!(estimator.sample_buffer_size(), 0);

        estimator.push(2);
        assert_eq!(state(&estimator), [(1, 2), (1, 2), (1, 2)]);
        assert_eq!(estimator.sample_buffer_size(), 1);

        estimator.reset();
        assert_eq!(state(&estimator), [(0, 0), (0, 0), (0, 0)]);
        assert_eq!(estimator.sample_buffer_size(), 0);
    }

    #[test]
    fn test_windows_expire_in_order_u64() {
        let mut estimator = three_windows::<u64>();
        let t0 = Duration::from_secs(1);

        estimator.push_at(1, t0);
        assert_eq!(state(&estimator), [(1, 1), (1, 1), (1, 1)]);

        estimator.push_at(3, t0 + us(10));
        assert_eq!(state(&estimator), [(2, 2), (2, 2), (2, 2)]);

        estimator.push_at(17, t0 + us(20));
        assert_eq!(state(&estimator), [(3, 7), (3, 7), (3, 7)]);
        assert_eq!(estimator.sample_buffer_size(), 3);

        estimator.advance(t0 + us(1_010));
        assert_eq!(state(&estimator), [(2, 10), (3, 7), (3, 7)]);
        assert_eq!(estimator.sample_buffer_size(), 3);

        estimator.advance(t0 + us(1_020));
        assert_eq!(state(&estimator), [(1, 17), (3, 7), (3, 7)]);

        estimator.advance(t0 + us(1_050));
        assert_eq!(state(&estimator), [(0, 0), (3, 7), (3, 7)]);
        assert_eq!(estimator.sample_buffer_size(), 3);

        estimator.advance(t0 + us(50_010));
        assert_eq!(state(&estimator), [(0, 0), (2, 10), (3, 7)]);
        assert_eq!(estimator.sample_buffer_size(), 3);

        estimator.advance(t0 + us(100_010));
        assert_eq!(state(&estimator), [(0, 0), (0, 0), (2, 10)]);
        assert_eq!(estimator.sample_buffer_size(), 2);

        estimator.advance(t0 + ms(150));
        assert_eq!(state(&estimator), [(0, 0), (0, 0), (0, 0)]);
        assert_eq!(estimator.sample_buffer_size(), 0);
    }

    #[test]
    fn test_windows_expire_in_order_f64() {
        let mut estimator = three_windows::<f64>();
        let t0 = Duration::from_secs(1);
        let close = |a: f64, b: f64| (a - b).abs() < 1e-12;

        estimator.push_at(2.0, t0);
        assert_eq!(estimator.get(), 2.0);
        estimator.advance(t0 + ms(150));
        assert_eq!(state(&estimator), [(0, 0.0), (0, 0.0), (0, 0.0)]);
        estimator.reset();

        estimator.push_at(1.0, t0);
        assert_eq!(state(&estimator), [(1, 1.0), (1, 1.0), (1, 1.0)]);

        estimator.push_at(4.0, t0 + us(10));
        assert_eq!(state(&estimator), [(2, 2.5), (2, 2.5), (2, 2.5)]);

        estimator.push_at(17.0, t0 + us(20));
        for (size, mean) in state(&estimator) {
            assert_eq!(size, 3);
            assert!(close(mean, 7.333333333333), "got {}", mean);
        }

        estimator.advance(t0 + us(1_010));
        assert_eq!(estimator.get(), 10.5);
        assert!(close(estimator.get_in(ms(50)).unwrap(), 7.333333333333));

        estimator.advance(t0 + us(1_020));
        assert_eq!(estimator.get(), 17.0);

        estimator.advance(t0 + us(1_050));
        assert_eq!(estimator.get(), 0.0);
        assert_eq!(estimator.size(), 0);

        estimator.advance(t0 + us(50_010));
        assert_eq!(estimator.get_in(ms(50)), Some(10.5));
        assert!(close(estimator.get_in(ms(100)).unwrap(), 7.333333333333));

        estimator.advance(t0 + us(100_010));
        assert_eq!(estimator.get_in(ms(50)), Some(0.0));
        assert_eq!(estimator.get_in(ms(100)), Some(10.5));
        assert_eq!(estimator.sample_buffer_size(), 2);

        estimator.advance(t0 + ms(150));
        assert_eq!(state(&estimator), [(0, 0.0), (0, 0.0), (0, 0.0)]);
        assert_eq!(estimator.sample_buffer_size(), 0);
    }

    #[test]
    fn test_out_of_order_is_ignored() {
        let mut estimator = three_windows::<i32>();
        let t0 = Duration::from_secs(1);

        estimator.push_at(-4, t0 + us(20));
        estimator.push_at(100, t0 + us(10));
        assert_eq!(estimator.get(), -4);
        assert_eq!(estimator.sample_buffer_size(), 1);

        estimator.push_at(-8, t0 + us(20));
        assert_eq!(estimator.get(), -6);

        estimator.advance(t0);
        assert_eq!(estimator.size(), 2);
    }

    #[test]
    fn test_configuration() {
        let estimator = three_windows::<u64>();
        assert_eq!(estimator.primary(), ms(1));
        assert_eq!(estimator.durations().collect::<Vec<_>>(), vec![ms(1), ms(50), ms(100)]);
        assert_eq!(estimator.get_in(ms(7)), None);
        assert_eq!(estimator.size_in(ms(7)), None);

        let err = SlidingTimeWindowMean::<u64>::try_new(ms(5), &[ms(5)]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateWindow(ms(5)));
        let config = TimeWindowConfig::new(ms(5)).with_secondary(ms(5));
        assert!(SlidingTimeWindowMean::<f64>::from_config(&config).is_err());
    }

    #[test]
    fn test_monotonic_clock() {
        let mut estimator = SlidingTimeWindowMean::<f64>::new(Duration::from_secs(60), &[]);
        estimator.push(1.0);
        estimator.push(3.0);
        assert_eq!(estimator.size(), 2);
        assert_eq!(estimator.get(), 2.0);
    }
}
