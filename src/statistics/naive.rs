//! Cumulative sum mean

use crate::math::Numeric;
use crate::traits::Estimator;

/// Mean computed as the cumulative sum divided by the number of samples
///
/// Cheap, but the sum overflows long before the mean does; only use it on
/// sanity-checked data or with an arbitrary-precision value type.
///
/// # Example
///
/// ```
/// use runstats::statistics::NaiveMean;
/// use runstats::traits::Estimator;
///
/// let mut mean = NaiveMean::new();
/// mean.push(1.0);
/// mean.push(2.0);
/// assert_eq!(mean.get(), 1.5);
/// ```
#[derive(Clone, Debug)]
pub struct NaiveMean<V> {
    count: usize,
    sum: V,
}

impl<V: Numeric> Default for NaiveMean<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Numeric> NaiveMean<V> {
    /// Create a new empty mean estimator
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: V::zero(),
        }
    }

    /// Get the sum of all samples
    pub fn sum(&self) -> V {
        self.sum.clone()
    }
}

impl<V: Numeric + core::fmt::Debug> Estimator for NaiveMean<V> {
    type Value = V;

    fn push(&mut self, sample: V) {
        self.count += 1;
        let sum = core::mem::replace(&mut self.sum, V::zero());
        self.sum = sum + sample;
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn get(&self) -> V {
        if self.count == 0 {
            V::zero()
        } else {
            self.sum.clone().div_count(self.count)
        }
    }

    fn size(&self) -> usize {
        self.count
    }
}
