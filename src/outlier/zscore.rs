//! Z-score outlier filter

use core::fmt::Debug;

use num_traits::{One, Zero};

use crate::math::{self, Numeric};
use crate::statistics::{WelfordMean, WelfordVariance};
use crate::traits::Estimator;

/// Estimator adaptor that drops samples more than three standard deviations
/// away from the mean of the stream
///
/// The boundary is tracked by an auxiliary mean `M` and variance `W` that see
/// every sample, rejected or not, so a persistent shift in the stream is
/// eventually accepted. The wrapped estimator only sees the accepted samples.
/// The auxiliary estimators default to [`WelfordMean`] and [`WelfordVariance`];
/// any mean and variance [`Estimator`] over the same values can replace them
/// through [`with_estimators`](Self::with_estimators).
///
/// A sample `x` is rejected when the wrapped estimator is non-empty, the
/// auxiliary variance `V` is non-zero, and `(x - mean)² > 9 * V`. The test is
/// done on squares, so no square root is needed and integer domains work, but
/// the squared deviation must fit in the sample type.
///
/// # Example
///
/// ```
/// use runstats::outlier::ZScoreOutlierFilter;
/// use runstats::statistics::WelfordMean;
/// use runstats::traits::Estimator;
///
/// let mut mean = ZScoreOutlierFilter::new(WelfordMean::<u64>::new());
///
/// mean.push(1);
/// mean.push(3);
/// mean.push(17);
///
/// assert_eq!(mean.get(), 2);
/// assert_eq!(mean.size_discarded(), 1);
///
/// // the boundary has moved toward 17 in the meantime
/// mean.push(17);
/// assert_eq!(mean.size(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct ZScoreOutlierFilter<
    E: Estimator,
    M = WelfordMean<<E as Estimator>::Value>,
    W = WelfordVariance<<E as Estimator>::Value>,
> {
    /// Estimator receiving the accepted samples
    inner: E,
    /// Mean of every sample pushed
    mean: M,
    /// Variance of every sample pushed
    variance: W,
    /// Number of rejected samples
    discarded: usize,
}

impl<E, M, W> Default for ZScoreOutlierFilter<E, M, W>
where
    E: Estimator + Default,
    E::Value: Numeric,
    M: Estimator<Value = E::Value> + Default,
    W: Estimator<Value = E::Value> + Default,
{
    fn default() -> Self {
        Self::with_estimators(E::default(), M::default(), W::default())
    }
}

impl<E> ZScoreOutlierFilter<E>
where
    E: Estimator,
    E::Value: Numeric + Debug,
{
    /// Wrap an estimator
    ///
    /// The estimator should be empty; the filter only learns the distribution
    /// of the samples pushed through it.
    pub fn new(inner: E) -> Self {
        Self::with_estimators(inner, WelfordMean::new(), WelfordVariance::new())
    }
}

impl<E, M, W> ZScoreOutlierFilter<E, M, W>
where
    E: Estimator,
    E::Value: Numeric,
    M: Estimator<Value = E::Value>,
    W: Estimator<Value = E::Value>,
{
    /// Wrap an estimator, tracking the boundary with the given mean and
    /// variance estimators
    ///
    /// All three estimators should be empty.
    pub fn with_estimators(inner: E, mean: M, variance: W) -> Self {
        Self {
            inner,
            mean,
            variance,
            discarded: 0,
        }
    }

    /// Check whether `x` would be rejected if pushed now
    pub fn is_outlier(&self, x: &E::Value) -> bool {
        if self.inner.is_empty() {
            return false;
        }
        let variance = self.variance.get();
        if Zero::is_zero(&variance) {
            return false;
        }

        let (deviation, _) = math::abs_diff(x.clone(), self.mean.get());
        let one = <E::Value as One>::one();
        let three = one.clone() + one.clone() + one;
        deviation.clone() * deviation > three.clone() * three * variance
    }

    /// Get the number of rejected samples since creation or the last reset
    pub fn size_discarded(&self) -> usize {
        self.discarded
    }

    /// Get the wrapped estimator
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Unwrap the estimator
    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E, M, W> Estimator for ZScoreOutlierFilter<E, M, W>
where
    E: Estimator,
    E::Value: Numeric + Debug,
    M: Estimator<Value = E::Value>,
    W: Estimator<Value = E::Value>,
{
    type Value = E::Value;

    fn push(&mut self, x: E::Value) {
        if self.is_outlier(&x) {
            self.discarded += 1;
            tracing::trace!(
                sample = ?x,
                mean = ?self.mean.get(),
                variance = ?self.variance.get(),
                discarded = self.discarded,
                "rejected outlier"
            );
        } else {
            self.inner.push(x.clone());
        }

        self.mean.push(x.clone());
        self.variance.push(x);
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.mean.reset();
        self.variance.reset();
        self.discarded = 0;
    }

    /// Get the value of the wrapped estimator
    fn get(&self) -> E::Value {
        self.inner.get()
    }

    /// Get the number of accepted samples held by the wrapped estimator
    fn size(&self) -> usize {
        self.inner.size()
    }
}
