//! Core traits for streaming estimators
//!
//! All estimators implement the base [`Estimator`] trait, so they can be
//! composed: an outlier filter can sit in front of any mean or variance
//! estimator, and a variance estimator can be built on top of any mean
//! estimator.

use core::fmt::{self, Debug};
use core::time::Duration;

/// Error while configuring an estimator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A count-based window must hold at least one sample
    ZeroCapacity,
    /// The same time window duration was configured twice
    DuplicateWindow(Duration),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => write!(f, "window capacity must be positive"),
            ConfigError::DuplicateWindow(duration) => {
                write!(f, "duplicate time window: {:?}", duration)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// A device that computes some statistic from real-time observations
///
/// New observations are supplied with [`push`](Estimator::push), or with
/// [`add`](Estimator::add) which also returns the updated estimate. The current
/// estimate is read with [`get`](Estimator::get), which is O(1) and has no
/// side effects.
///
/// # Example
///
/// ```
/// use runstats::statistics::WelfordMean;
/// use runstats::traits::Estimator;
///
/// fn feed<E: Estimator<Value = f64>>(estimator: &mut E, samples: &[f64]) -> f64 {
///     for &x in samples {
///         estimator.push(x);
///     }
///     estimator.get()
/// }
///
/// let mut mean = WelfordMean::new();
/// assert_eq!(feed(&mut mean, &[1.0, 2.0, 3.0]), 2.0);
/// ```
pub trait Estimator: Debug {
    /// The type of samples and of the estimate
    type Value;

    /// Update the estimate with a new sample
    fn push(&mut self, sample: Self::Value);

    /// Update the estimate with a new sample and return the new estimate
    fn add(&mut self, sample: Self::Value) -> Self::Value {
        self.push(sample);
        self.get()
    }

    /// Discard everything, as if freshly constructed
    fn reset(&mut self);

    /// Current estimate
    fn get(&self) -> Self::Value;

    /// Number of samples the estimate is currently built from
    fn size(&self) -> usize;

    /// Check if no sample contributes to the estimate
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Last {
        value: Option<i32>,
        n: usize,
    }

    impl Estimator for Last {
        type Value = i32;

        fn push(&mut self, sample: i32) {
            self.value = Some(sample);
            self.n += 1;
        }

        fn reset(&mut self) {
            *self = Self::default();
        }

        fn get(&self) -> i32 {
            self.value.unwrap_or(0)
        }

        fn size(&self) -> usize {
            self.n
        }
    }

    #[test]
    fn test_provided_methods() {
        let mut last = Last::default();
        assert!(last.is_empty());

        assert_eq!(last.add(4), 4);
        assert_eq!(last.add(-2), -2);
        assert_eq!(last.size(), 2);
        assert!(!last.is_empty());

        last.reset();
        assert!(last.is_empty());
        assert_eq!(last.get(), 0);
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::ZeroCapacity.to_string(),
            "window capacity must be positive"
        );
        assert_eq!(
            ConfigError::DuplicateWindow(Duration::from_millis(50)).to_string(),
            "duplicate time window: 50ms"
        );
    }
}
