//! # Runstats
//!
//! Online mean and variance estimators for streams of measurements.
//!
//! Runstats keeps running statistics of real-time observations in O(1) per
//! sample, over the whole stream, over the last N samples, or over the last few
//! milliseconds, seconds or minutes. All estimators work on unsigned integers
//! as well as signed integers and floats: no intermediate value ever leaves the
//! domain of the sample type, and a variance is never negative.
//!
//! ## Features
//!
//! - **Incremental statistics**: Welford mean and variance over an unbounded stream
//! - **Count windows**: mean and variance of the last N samples
//! - **Time windows**: mean or variance over several time windows sharing one sample history
//! - **Outlier filtering**: z-score rejection in front of any estimator
//! - **Composability**: every estimator implements [`Estimator`](traits::Estimator)
//!
//! ## Quick Start
//!
//! ```rust
//! use runstats::prelude::*;
//!
//! // Whole-stream statistics of unsigned samples
//! let mut variance = WelfordVariance::<u64>::new();
//! for latency_us in [1, 3, 17] {
//!     variance.push(latency_us);
//! }
//! assert_eq!(variance.mean(), 7);
//! assert_eq!(variance.get(), 50);
//!
//! // Same statistics, outliers removed
//! let mut filtered = ZScoreOutlierFilter::new(WelfordMean::<u64>::new());
//! for latency_us in [1, 3, 17] {
//!     filtered.push(latency_us);
//! }
//! assert_eq!(filtered.get(), 2);
//! ```
//!
//! ## Time Windows
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use runstats::time_window::SlidingTimeWindowVariance;
//! use runstats::traits::Estimator;
//!
//! let mut variance = SlidingTimeWindowVariance::<f64>::new(
//!     Duration::from_secs(1),
//!     &[Duration::from_secs(60), Duration::from_secs(3600)],
//! );
//!
//! let now = Instant::now();
//! variance.push_at(1.0, now);
//! variance.push_at(3.0, now);
//!
//! assert_eq!(variance.get(), 1.0);
//! assert_eq!(variance.variance_in(Duration::from_secs(60)), Some(1.0));
//! ```
//!
//! ## Feature Flags
//!
//! Estimator families (pick what you need):
//! - `window` (default): count-based sliding windows
//! - `time-window` (default): sliding time windows, requires `std`
//! - `outlier` (default): outlier filtering adaptors
//! - `full`: Enable all estimator families and `serde`
//!
//! The incremental statistics in [`statistics`] are always available.
//!
//! Platform features:
//! - `std` (default): Standard library support
//! - `serde`: Enable (de)serialization of time window configuration

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Core traits and arithmetic always available
pub mod math;
pub mod traits;

pub mod statistics;

#[cfg(feature = "window")]
#[cfg_attr(docsrs, doc(cfg(feature = "window")))]
pub mod window;

#[cfg(feature = "time-window")]
#[cfg_attr(docsrs, doc(cfg(feature = "time-window")))]
pub mod time_window;

#[cfg(feature = "outlier")]
#[cfg_attr(docsrs, doc(cfg(feature = "outlier")))]
pub mod outlier;

pub mod prelude {
    pub use crate::math::Numeric;
    pub use crate::traits::*;

    pub use crate::statistics::{NaiveMean, WelfordMean, WelfordVariance};

    #[cfg(feature = "window")]
    pub use crate::window::{SlidingWindowMean, SlidingWindowVariance};

    #[cfg(feature = "time-window")]
    pub use crate::time_window::{
        Clock, ManualClock, MonotonicClock, SlidingTimeWindowMean, SlidingTimeWindowVariance,
        TimeWindowConfig,
    };

    #[cfg(feature = "outlier")]
    pub use crate::outlier::ZScoreOutlierFilter;
}

pub use statistics::{WelfordMean, WelfordVariance};

#[cfg(feature = "window")]
pub use window::SlidingWindowVariance;

#[cfg(feature = "time-window")]
pub use time_window::{SlidingTimeWindowMean, SlidingTimeWindowVariance};

#[cfg(feature = "outlier")]
pub use outlier::ZScoreOutlierFilter;
