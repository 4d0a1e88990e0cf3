//! Incremental mean and variance over unbounded streams
//!
//! Estimators in this module see every sample ever pushed and update their
//! aggregate in O(1), without keeping any history.
//!
//! # Algorithms
//!
//! - [`NaiveMean`]: cumulative sum divided by count; fast but overflows easily
//! - [`WelfordMean`]: updates the previous mean with each new sample
//! - [`WelfordVariance`]: Welford's algorithm on top of any mean estimator
//!
//! # Example
//!
//! ```
//! use runstats::statistics::WelfordVariance;
//! use runstats::traits::Estimator;
//!
//! let mut variance = WelfordVariance::<u64>::new();
//!
//! for value in [1, 3, 17] {
//!     variance.push(value);
//! }
//!
//! assert_eq!(variance.mean(), 7);
//! assert_eq!(variance.get(), 50);
//! ```

mod naive;
mod welford;

pub use naive::NaiveMean;
pub use welford::{WelfordMean, WelfordVariance};
