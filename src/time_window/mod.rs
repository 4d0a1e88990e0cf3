//! Mean and variance over sliding time windows
//!
//! A [`SlidingTimeWindowVariance`] tracks one primary window and any number of
//! secondary windows of different durations over a single shared history of
//! timestamped samples. Samples leave a window once they are older than the
//! window's duration, and leave the history once no window needs them.
//! [`SlidingTimeWindowMean`] does the same without the squared deviations.
//!
//! Timestamps come from a [`Clock`]: the system's [`MonotonicClock`] by
//! default, or a [`ManualClock`] when the host drives time itself. Samples can
//! also be pushed with an explicit timestamp via
//! [`push_at`](SlidingTimeWindowVariance::push_at).
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use runstats::time_window::{ManualClock, SlidingTimeWindowVariance, TimeWindowConfig};
//! use runstats::traits::Estimator;
//!
//! let config = TimeWindowConfig::new(Duration::from_secs(1))
//!     .with_secondary(Duration::from_secs(60));
//! let mut latency =
//!     SlidingTimeWindowVariance::<u64, _>::with_clock(ManualClock::new(), &config).unwrap();
//!
//! latency.push(120);
//! latency.push(80);
//! assert_eq!(latency.mean(), 100);
//!
//! latency.clock().advance(Duration::from_secs(2));
//! latency.advance_to_now();
//! assert_eq!(latency.size(), 0);
//! assert_eq!(latency.mean_in(Duration::from_secs(60)), Some(100));
//! ```

mod clock;
mod config;
mod history;
mod mean;
mod variance;

pub use clock::{Clock, ManualClock, MonotonicClock, Timestamp};
pub use config::TimeWindowConfig;
pub use mean::SlidingTimeWindowMean;
pub use variance::{SlidingTimeWindowVariance, WindowSnapshot};
