//! Mean and variance over the last N samples
//!
//! Count-based sliding windows keep the most recent samples in a bounded
//! buffer. Each push evicts the oldest sample once the buffer is full and
//! updates the aggregates in O(1).
//!
//! # Example
//!
//! ```
//! use runstats::traits::Estimator;
//! use runstats::window::SlidingWindowVariance;
//!
//! let mut variance = SlidingWindowVariance::<u64>::new(3);
//!
//! for value in [1, 3, 17] {
//!     variance.push(value);
//! }
//! assert_eq!((variance.mean(), variance.get()), (7, 50));
//!
//! // 1 leaves, 1 enters
//! variance.push(1);
//! assert_eq!((variance.mean(), variance.get()), (7, 50));
//!
//! // 3 leaves, 1 enters
//! variance.push(1);
//! assert_eq!((variance.mean(), variance.get()), (6, 56));
//! ```

mod sliding;

pub use sliding::{SlidingWindowMean, SlidingWindowVariance};
