//! Fixed-capacity sliding window mean and variance

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::collections::VecDeque;

#[cfg(not(feature = "std"))]
use alloc::collections::VecDeque;

use crate::math::{self, Numeric};
use crate::traits::{ConfigError, Estimator};

/// Mean of a sliding window holding at most `capacity` samples
///
/// Keeps the window contents and their running sum. Assumes the sum of the
/// samples in one window does not overflow.
///
/// # Example
///
/// ```
/// use runstats::traits::Estimator;
/// use runstats::window::SlidingWindowMean;
///
/// let mut mean = SlidingWindowMean::new(2);
///
/// mean.push(1.0);
/// mean.push(2.0);
/// mean.push(6.0);
///
/// assert_eq!(mean.get(), 4.0);
/// assert_eq!(mean.oldest(), Some(&2.0));
/// ```
#[derive(Clone, Debug)]
pub struct SlidingWindowMean<V> {
    /// Maximum number of samples in the window
    capacity: usize,
    /// Window contents, oldest first
    samples: VecDeque<V>,
    /// Sum of the window contents
    sum: V,
}

impl<V: Numeric> SlidingWindowMean<V> {
    /// Create a new sliding window mean
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of samples in the window
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to handle
    /// that case.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        Self {
            capacity,
            // grows with the samples, the capacity is only a bound
            samples: VecDeque::new(),
            sum: V::zero(),
        }
    }

    /// Create a new sliding window mean, rejecting a zero capacity
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self::new(capacity))
    }

    /// Get the window capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if the window holds exactly `capacity` samples
    pub fn full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    /// Get the oldest sample in the window, or `None` if the window is empty
    pub fn oldest(&self) -> Option<&V> {
        self.samples.front()
    }

    /// Get the sum of the samples in the window
    pub fn sum(&self) -> V {
        self.sum.clone()
    }
}

impl<V: Numeric + Debug> Estimator for SlidingWindowMean<V> {
    type Value = V;

    fn push(&mut self, sample: V) {
        let mut sum = core::mem::replace(&mut self.sum, V::zero());
        if self.full() {
            if let Some(evicted) = self.samples.pop_front() {
                sum = sum - evicted;
            }
        }
        self.sum = sum + sample.clone();
        self.samples.push_back(sample);
    }

    fn reset(&mut self) {
        self.samples.clear();
        self.sum = V::zero();
    }

    fn get(&self) -> V {
        if self.samples.is_empty() {
            V::zero()
        } else {
            self.sum.clone().div_count(self.samples.len())
        }
    }

    fn size(&self) -> usize {
        self.samples.len()
    }
}

/// Variance of a sliding window holding at most `capacity` samples
///
/// While the window fills up, each sample is a plain Welford insertion. Once it
/// is full, every push removes the oldest sample `y` and inserts `x` in the
/// same step, which changes the sum of squared deviations by
/// `(x - y) * ((x + y) - (new_mean + old_mean))`. That update is applied in one
/// non-negative-safe operation, so no negative intermediate ever exists.
///
/// # Example
///
/// ```
/// use runstats::traits::Estimator;
/// use runstats::window::SlidingWindowVariance;
///
/// let mut variance = SlidingWindowVariance::<u64>::new(3);
///
/// for value in [1, 3, 17, 1, 1, 1] {
///     variance.push(value);
/// }
///
/// assert_eq!(variance.mean(), 1);
/// assert_eq!(variance.get(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct SlidingWindowVariance<V> {
    /// Window contents and their mean
    mean: SlidingWindowMean<V>,
    /// Sum of squared differences from the window mean
    m2: V,
}

impl<V: Numeric> SlidingWindowVariance<V> {
    /// Create a new sliding window variance
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            mean: SlidingWindowMean::new(capacity),
            m2: V::zero(),
        }
    }

    /// Create a new sliding window variance, rejecting a zero capacity
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            mean: SlidingWindowMean::try_new(capacity)?,
            m2: V::zero(),
        })
    }

    /// Get the window capacity
    pub fn capacity(&self) -> usize {
        self.mean.capacity()
    }

    /// Check if the window holds exactly `capacity` samples
    pub fn full(&self) -> bool {
        self.mean.full()
    }

    /// Get the oldest sample in the window, or `None` if the window is empty
    pub fn oldest(&self) -> Option<&V> {
        self.mean.oldest()
    }
}

impl<V: Numeric + Debug> SlidingWindowVariance<V> {
    /// Get the mean of the window
    pub fn mean(&self) -> V {
        self.mean.get()
    }
}

impl<V: Numeric + Debug> Estimator for SlidingWindowVariance<V> {
    type Value = V;

    fn push(&mut self, x: V) {
        let old_mean = self.mean.get();
        let evicted = if self.full() {
            self.mean.oldest().cloned()
        } else {
            None
        };
        let new_mean = self.mean.add(x.clone());

        match evicted {
            Some(y) => math::add_product_of_differences(
                &mut self.m2,
                x.clone(),
                y.clone(),
                x + y,
                new_mean + old_mean,
            ),
            None => {
                math::add_product_of_differences(&mut self.m2, x.clone(), old_mean, x, new_mean)
            }
        }
    }

    fn reset(&mut self) {
        self.mean.reset();
        self.m2 = V::zero();
    }

    fn get(&self) -> V {
        let n = self.size();
        if n == 0 {
            V::zero()
        } else {
            self.m2.clone().div_count(n)
        }
    }

    fn size(&self) -> usize {
        self.mean.size()
    }
}
