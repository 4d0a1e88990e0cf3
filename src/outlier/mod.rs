//! Outlier rejection for any estimator
//!
//! Adaptors in this module sit in front of an [`Estimator`](crate::traits::Estimator)
//! and decide, sample by sample, whether it gets to see the value.
//!
//! # Example
//!
//! ```
//! use runstats::outlier::ZScoreOutlierFilter;
//! use runstats::statistics::WelfordMean;
//! use runstats::traits::Estimator;
//!
//! let mut latency = ZScoreOutlierFilter::new(WelfordMean::<f64>::new());
//!
//! for value in [10.0, 12.0, 11.0, 9.0, 10.0, 500.0] {
//!     latency.push(value);
//! }
//!
//! assert_eq!(latency.size(), 5);
//! assert_eq!(latency.size_discarded(), 1);
//! ```

mod zscore;

pub use zscore::ZScoreOutlierFilter;
