//! Shared sample history behind the time window estimators
//!
//! All windows share one time-ordered sample history. Each window only keeps
//! its aggregates (count, sum, and optionally the sum of squared deviations)
//! and a cursor to its oldest sample, so a sample is stored once no matter how
//! many windows contain it, and it is dropped as soon as the longest window
//! that still needs it lets it go.

use core::time::Duration;

use std::collections::VecDeque;

use crate::math::{self, Numeric};
use crate::traits::ConfigError;

use super::clock::Timestamp;
use super::config::TimeWindowConfig;

/// A sample and the time it was observed
#[derive(Clone, Debug)]
struct Sample<V, T> {
    timestamp: T,
    value: V,
}

/// Aggregates of one window over the shared history
#[derive(Clone, Debug)]
pub(super) struct Window<V> {
    duration: Duration,
    count: usize,
    sum: V,
    /// Sum of squared differences from the window mean, `None` for mean-only
    /// windows
    m2: Option<V>,
    /// Sequence number of the oldest sample in the window, `None` iff empty
    begin: Option<u64>,
}

impl<V: Numeric> Window<V> {
    fn new(duration: Duration, track_variance: bool) -> Self {
        Self {
            duration,
            count: 0,
            sum: V::zero(),
            m2: track_variance.then(V::zero),
            begin: None,
        }
    }

    pub(super) fn duration(&self) -> Duration {
        self.duration
    }

    pub(super) fn size(&self) -> usize {
        self.count
    }

    pub(super) fn mean(&self) -> V {
        if self.count == 0 {
            V::zero()
        } else {
            self.sum.clone().div_count(self.count)
        }
    }

    /// Population variance, always zero for mean-only windows
    pub(super) fn variance(&self) -> V {
        match &self.m2 {
            Some(m2) if self.count > 0 => m2.clone().div_count(self.count),
            _ => V::zero(),
        }
    }

    fn insert(&mut self, seq: u64, value: V) {
        let old_mean = self.m2.as_ref().map(|_| self.mean());
        self.count += 1;
        let sum = core::mem::replace(&mut self.sum, V::zero());
        self.sum = sum + value.clone();

        if let Some(old_mean) = old_mean {
            let new_mean = self.mean();
            if let Some(m2) = self.m2.as_mut() {
                math::add_product_of_differences(m2, value.clone(), old_mean, value, new_mean);
            }
        }
        if self.begin.is_none() {
            self.begin = Some(seq);
        }
    }

    /// Drop every sample observed strictly before `cutoff`
    ///
    /// Returns the sequence number of the new oldest sample, or `None` if the
    /// window is now empty.
    fn evict_before<T: Timestamp>(
        &mut self,
        cutoff: T,
        samples: &VecDeque<Sample<V, T>>,
        first_seq: u64,
    ) -> Option<u64> {
        let mut seq = self.begin?;

        while let Some(sample) = samples.get((seq - first_seq) as usize) {
            if sample.timestamp >= cutoff {
                break;
            }

            let old_mean = self.mean();
            self.count -= 1;
            if self.count == 0 {
                self.clear();
                return None;
            }

            let x = sample.value.clone();
            let sum = core::mem::replace(&mut self.sum, V::zero());
            self.sum = sum - x.clone();
            let new_mean = self.mean();
            let single = self.count == 1;
            if let Some(m2) = self.m2.as_mut() {
                if single {
                    *m2 = V::zero();
                } else {
                    math::sub_product_of_differences(m2, x.clone(), old_mean, x, new_mean);
                }
            }
            seq += 1;
        }

        self.begin = Some(seq);
        self.begin
    }

    fn clear(&mut self) {
        self.count = 0;
        self.sum = V::zero();
        if let Some(m2) = self.m2.as_mut() {
            *m2 = V::zero();
        }
        self.begin = None;
    }
}

/// Timestamped samples plus one aggregate per configured window
#[derive(Clone, Debug)]
pub(super) struct History<V, T> {
    /// Samples still needed by at least one window, oldest first
    samples: VecDeque<Sample<V, T>>,
    /// Sequence number of the front of `samples`
    first_seq: u64,
    /// One entry per configured duration, primary first
    windows: Vec<Window<V>>,
}

impl<V: Numeric, T: Timestamp> History<V, T> {
    /// Build an empty history, rejecting duplicate durations
    pub(super) fn new(
        config: &TimeWindowConfig,
        track_variance: bool,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(
            primary = ?config.primary,
            secondary = ?config.secondary,
            track_variance,
            "configured sliding time windows"
        );

        Ok(Self {
            samples: VecDeque::new(),
            first_seq: 0,
            windows: config
                .durations()
                .map(|duration| Window::new(duration, track_variance))
                .collect(),
        })
    }

    /// Insert into every window, then advance every window to `timestamp`
    ///
    /// Does nothing if `timestamp` is older than the latest stored sample.
    pub(super) fn push_at(&mut self, value: V, timestamp: T) {
        if let Some(latest) = self.samples.back() {
            if timestamp < latest.timestamp {
                tracing::trace!(
                    ?timestamp,
                    latest = ?latest.timestamp,
                    "dropping out-of-order sample"
                );
                return;
            }
        }

        let seq = self.first_seq + self.samples.len() as u64;
        for window in &mut self.windows {
            window.insert(seq, value.clone());
        }
        self.samples.push_back(Sample { timestamp, value });
        self.advance(timestamp);
    }

    /// Evict expired samples from every window, then release the samples no
    /// window needs anymore
    ///
    /// Does nothing if `now` is older than the latest stored sample.
    pub(super) fn advance(&mut self, now: T) {
        let latest = match self.samples.back() {
            Some(latest) => latest.timestamp,
            None => return,
        };
        if now < latest {
            tracing::trace!(?now, ?latest, "ignoring advance to the past");
            return;
        }

        let mut floor: Option<u64> = None;
        for window in &mut self.windows {
            // nothing can be older than a cutoff before the epoch
            let begin = match now.checked_sub(window.duration) {
                Some(cutoff) => {
                    let before = window.count;
                    let begin = window.evict_before(cutoff, &self.samples, self.first_seq);
                    if window.count != before {
                        tracing::trace!(
                            window = ?window.duration,
                            evicted = before - window.count,
                            remaining = window.count,
                            "evicted samples"
                        );
                    }
                    begin
                }
                None => window.begin,
            };
            floor = match (floor, begin) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
        }

        let end_seq = self.first_seq + self.samples.len() as u64;
        let floor = floor.unwrap_or(end_seq);
        let released = (floor - self.first_seq) as usize;
        if released > 0 {
            self.samples.drain(..released);
            self.first_seq = floor;
            tracing::trace!(
                released,
                retained = self.samples.len(),
                "released samples from history"
            );
        }
    }

    /// Empty every window and the history
    ///
    /// Sequence numbers keep counting up, so cursors never alias old samples.
    pub(super) fn reset(&mut self) {
        self.first_seq += self.samples.len() as u64;
        self.samples.clear();
        for window in &mut self.windows {
            window.clear();
        }
    }

    /// Number of samples physically retained
    pub(super) fn len(&self) -> usize {
        self.samples.len()
    }

    pub(super) fn primary(&self) -> &Window<V> {
        &self.windows[0]
    }

    pub(super) fn window(&self, duration: Duration) -> Option<&Window<V>> {
        self.windows.iter().find(|window| window.duration == duration)
    }

    /// Every window, primary first
    pub(super) fn windows(&self) -> core::slice::Iter<'_, Window<V>> {
        self.windows.iter()
    }
}
