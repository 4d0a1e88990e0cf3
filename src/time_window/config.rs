//! Window durations of a multi-resolution estimator

use core::time::Duration;

use crate::traits::ConfigError;

/// Durations tracked by a [`SlidingTimeWindowVariance`](super::SlidingTimeWindowVariance)
///
/// The primary window is the one reported by the [`Estimator`](crate::traits::Estimator)
/// methods; secondary windows are tracked against the same sample history and
/// queried by duration.
///
/// With the `serde` feature this can be loaded from host configuration:
///
/// ```
/// # #[cfg(feature = "serde")]
/// # {
/// use std::time::Duration;
/// use runstats::time_window::TimeWindowConfig;
///
/// let config: TimeWindowConfig = serde_json::from_str(
///     r#"{ "primary": { "secs": 1, "nanos": 0 },
///          "secondary": [ { "secs": 60, "nanos": 0 } ] }"#,
/// ).unwrap();
///
/// assert_eq!(config.primary, Duration::from_secs(1));
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindowConfig {
    /// Duration of the primary window
    pub primary: Duration,
    /// Durations of the secondary windows
    #[cfg_attr(feature = "serde", serde(default))]
    pub secondary: Vec<Duration>,
}

impl TimeWindowConfig {
    /// Configuration with a single window
    pub fn new(primary: Duration) -> Self {
        Self {
            primary,
            secondary: Vec::new(),
        }
    }

    /// Add a secondary window
    pub fn with_secondary(mut self, duration: Duration) -> Self {
        self.secondary.push(duration);
        self
    }

    /// All durations, primary first
    pub fn durations(&self) -> impl Iterator<Item = Duration> + '_ {
        core::iter::once(self.primary).chain(self.secondary.iter().copied())
    }

    /// Check that no duration is configured twice
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, duration) in self.durations().enumerate() {
            if self.durations().skip(i + 1).any(|other| other == duration) {
                return Err(ConfigError::DuplicateWindow(duration));
            }
        }
        Ok(())
    }
}
