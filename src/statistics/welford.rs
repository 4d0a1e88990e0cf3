//! Welford's incremental mean and variance
//!
//! Both estimators update the previous aggregate with each new sample, so the
//! running mean never needs the full sum and the variance never needs the sum
//! of squares. All arithmetic is ordered so it stays valid for unsigned types.

use core::fmt::Debug;

use crate::math::{self, Numeric};
use crate::traits::Estimator;

/// Incremental mean
///
/// Each sample moves the previous mean by `(x - mean) / n`. For integer types
/// the division truncates, so the mean rounds toward its previous value (like
/// a midpoint that rounds toward its first argument). Because it never
/// materializes the sum, it is exact at the edges of the domain: the mean of
/// `u64::MAX` pushed twice is `u64::MAX`, and the mean of `i64::MIN` and
/// `i64::MAX` is `-1` (see [`Numeric::step_toward`]).
///
/// # Example
///
/// ```
/// use runstats::statistics::WelfordMean;
/// use runstats::traits::Estimator;
///
/// let mut mean = WelfordMean::<u64>::new();
///
/// assert_eq!(mean.add(1), 1);
/// assert_eq!(mean.add(3), 2);
/// assert_eq!(mean.add(3), 2); // 2.33 rounds toward the previous mean
///
/// mean.reset();
/// assert_eq!(mean.add(3), 3);
/// assert_eq!(mean.add(3), 3);
/// assert_eq!(mean.add(1), 3); // 2.33 rounds toward the previous mean
/// ```
#[derive(Clone, Debug)]
pub struct WelfordMean<V> {
    /// Number of values seen
    count: usize,
    /// Running mean
    mean: V,
}

impl<V: Numeric> Default for WelfordMean<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Numeric> WelfordMean<V> {
    /// Create a new empty mean estimator
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: V::zero(),
        }
    }
}

impl<V: Numeric + Debug> Estimator for WelfordMean<V> {
    type Value = V;

    fn push(&mut self, sample: V) {
        self.count += 1;
        let mean = core::mem::replace(&mut self.mean, V::zero());
        self.mean = mean.step_toward(sample, self.count);
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn get(&self) -> V {
        self.mean.clone()
    }

    fn size(&self) -> usize {
        self.count
    }
}

/// Incremental population variance using Welford's algorithm
///
/// Keeps the sum of squared deviations from the mean (`M2`) and updates it with
/// `(x - old_mean) * (x - new_mean)` for every sample. That product is never
/// negative for a single insertion; the update still goes through
/// [`math::add_product_of_differences`] so unsigned types never underflow.
///
/// The running mean comes from `M`, any mean [`Estimator`] over the same values
/// (a [`WelfordMean`] unless specified otherwise).
///
/// # Example
///
/// ```
/// use runstats::statistics::WelfordVariance;
/// use runstats::traits::Estimator;
///
/// let mut variance = WelfordVariance::<f64>::new();
///
/// for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     variance.push(value);
/// }
///
/// assert!((variance.mean() - 5.0).abs() < 1e-12);
/// assert!((variance.get() - 4.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct WelfordVariance<V, M = WelfordMean<V>> {
    /// Running mean of the same samples
    mean: M,
    /// Sum of squared differences from mean (M2 in Welford's algorithm)
    m2: V,
}

impl<V, M> Default for WelfordVariance<V, M>
where
    V: Numeric,
    M: Estimator<Value = V> + Default,
{
    fn default() -> Self {
        Self::with_mean(M::default())
    }
}

impl<V: Numeric + Debug> WelfordVariance<V> {
    /// Create a new empty variance estimator
    pub fn new() -> Self {
        Self::with_mean(WelfordMean::new())
    }
}

impl<V, M> WelfordVariance<V, M>
where
    V: Numeric,
    M: Estimator<Value = V>,
{
    /// Create a variance estimator on top of the given mean estimator
    ///
    /// The mean estimator should be empty; samples it already saw do not
    /// contribute to the variance.
    pub fn with_mean(mean: M) -> Self {
        Self { mean, m2: V::zero() }
    }

    /// Get the mean of the samples seen so far
    pub fn mean(&self) -> V {
        self.mean.get()
    }
}

impl<V, M> Estimator for WelfordVariance<V, M>
where
    V: Numeric + Debug,
    M: Estimator<Value = V>,
{
    type Value = V;

    fn push(&mut self, x: V) {
        let old_mean = self.mean.get();
        let new_mean = self.mean.add(x.clone());
        math::add_product_of_differences(&mut self.m2, x.clone(), old_mean, x, new_mean);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::NaiveMean;

    #[test]
    fn test_mean_basic_u64() {
        let mut mean = WelfordMean::<u64>::new();
        assert_eq!(mean.get(), 0);
        assert_eq!(mean.size(), 0);

        assert_eq!(mean.add(1), 1);
        assert_eq!(mean.add(3), 2);
        assert_eq!(mean.size(), 2);

        mean.reset();
        assert_eq!(mean.get(), 0);
        assert_eq!(mean.size(), 0);
        mean.push(1);
        mean.push(3);
        assert_eq!(mean.get(), 2);
    }

    #[test]
    fn test_mean_basic_f64() {
        let mut mean = WelfordMean::<f64>::new();
        assert_eq!(mean.add(1.0), 1.0);
        assert_eq!(mean.add(2.0), 1.5);
        assert_eq!(mean.size(), 2);
    }

    #[test]
    fn test_mean_rounds_toward_previous() {
        let mut mean = WelfordMean::<u64>::new();
        assert_eq!(mean.add(1), 1);
        assert_eq!(mean.add(3), 2);
        assert_eq!(mean.add(3), 2);

        mean.reset();
        assert_eq!(mean.add(3), 3);
        assert_eq!(mean.add(3), 3);
        assert_eq!(mean.add(1), 3);
    }

    #[test]
    fn test_mean_u64_max_max_one() {
        let mut mean = WelfordMean::<u64>::new();
        let max = u64::MAX;

        assert_eq!(mean.add(max), max);
        assert_eq!(mean.add(max), max);
        // (2 * max + 1) / 3, rounded toward max
        let expected = ((2 * max as u128 + 1) / 3) as u64 + 1;
        assert_eq!(mean.add(1), expected);
    }

    #[test]
    fn test_mean_u64_one_max_max() {
        let mut mean = WelfordMean::<u64>::new();
        let max = u64::MAX;

        assert_eq!(mean.add(1), 1);
        assert_eq!(mean.add(max), 1u64 << 63);
        let expected = ((2 * max as u128 + 1) / 3) as u64;
        assert_eq!(mean.add(max), expected);
    }

    #[test]
    fn test_mean_f64_max_max_one() {
        let mut mean = WelfordMean::<f64>::new();
        let max = f64::MAX;

        assert_eq!(mean.add(max), max);
        assert_eq!(mean.add(max), max);
        let expected = max / 3.0 * 2.0;
        let got = mean.add(1.0);
        assert!(((got - expected) / expected).abs() < 1e-12, "got {}", got);
    }

    #[test]
    fn test_mean_f64_one_max_max() {
        let mut mean = WelfordMean::<f64>::new();
        let max = f64::MAX;

        assert_eq!(mean.add(1.0), 1.0);
        // 1.0 is negligible next to max
        assert_eq!(mean.add(max), max / 2.0);
        let expected = max / 3.0 * 2.0;
        let got = mean.add(max);
        assert!(((got - expected) / expected).abs() < 1e-12, "got {}", got);
    }

    #[test]
    fn test_mean_negative_values() {
        let mut mean = WelfordMean::<i64>::new();
        assert_eq!(mean.add(-10), -10);
        assert_eq!(mean.add(-20), -15);
        assert_eq!(mean.add(30), 0);
    }

    #[test]
    fn test_mean_signed_extremes() {
        let mut mean = WelfordMean::<i64>::new();
        assert_eq!(mean.add(i64::MIN), i64::MIN);
        assert_eq!(mean.add(i64::MAX), -1);

        let mut mean = WelfordMean::<i8>::new();
        assert_eq!(mean.add(i8::MIN), i8::MIN);
        assert_eq!(mean.add(i8::MAX), -1);
        // (-1 - 128 + 1) / 3 rounded toward the previous mean
        assert_eq!(mean.add(i8::MIN), -43);

        let mut mean = WelfordMean::<i64>::new();
        assert_eq!(mean.add(i64::MAX), i64::MAX);
        assert_eq!(mean.add(i64::MIN), 0);
    }

    #[test]
    fn test_variance_basic_u64() {
        let mut variance = WelfordVariance::<u64>::new();
        assert_eq!(variance.get(), 0);
        assert_eq!(variance.size(), 0);

        assert_eq!(variance.add(1), 0);
        assert_eq!(variance.add(3), 1);
        assert_eq!(variance.add(17), 50);
        assert_eq!(variance.size(), 3);
        assert_eq!(variance.mean(), 7);

        variance.reset();
        assert_eq!(variance.get(), 0);
        assert_eq!(variance.size(), 0);
        assert_eq!(variance.mean(), 0);
    }

    #[test]
    fn test_variance_basic_f64() {
        let mut variance = WelfordVariance::<f64>::new();
        assert_eq!(variance.add(1.0), 0.0);
        assert_eq!(variance.add(3.0), 1.0);
        let v = variance.add(17.0);
        assert!((v - 152.0 / 3.0).abs() < 1e-12, "got {}", v);
    }

    #[test]
    fn test_variance_constant_stream_is_zero() {
        let mut variance = WelfordVariance::<f64>::new();
        for _ in 0..1000 {
            variance.push(0.1);
        }
        assert_eq!(variance.get(), 0.0);

        let mut variance = WelfordVariance::<u32>::new();
        for _ in 0..1000 {
            variance.push(u32::MAX);
        }
        assert_eq!(variance.get(), 0);
    }

    #[test]
    fn test_variance_with_naive_mean() {
        let mut variance = WelfordVariance::<f64, NaiveMean<f64>>::default();
        for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            variance.push(value);
        }
        assert_eq!(variance.mean(), 5.0);
        assert!((variance.get() - 4.0).abs() < 1e-12);
    }
}
