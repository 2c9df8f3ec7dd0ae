//! RTT min/max tracking for bandwidth-based threshold control.
//!
//! Keeps the latest sample, the smallest and largest samples seen, and the
//! maximum that was in force before the most recent increase of the maximum.
//! All four stay `None` until the first sample.

use std::time::Duration;

use tracing::trace;

/// Running RTT extremes for one connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RttTracker {
    /// Smallest sample seen.
    min: Option<Duration>,
    /// Largest sample seen.
    max: Option<Duration>,
    /// Most recent sample.
    cur: Option<Duration>,
    /// Value `max` held before its last increase.
    prev_max: Option<Duration>,
}

impl RttTracker {
    /// Create a tracker with no samples.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new RTT sample. The caller filters out zero samples.
    pub fn observe(&mut self, rtt: Duration) {
        debug_assert!(!rtt.is_zero(), "zero RTT must be filtered by the caller");

        self.cur = Some(rtt);

        self.min = Some(match self.min {
            Some(min) => min.min(rtt),
            None => rtt,
        });

        match self.max {
            None => {
                // No earlier maximum to preserve.
                self.prev_max = Some(rtt);
                self.max = Some(rtt);
            }
            Some(max) if rtt > max => {
                self.prev_max = Some(max);
                self.max = Some(rtt);
            }
            Some(_) => {}
        }

        trace!(
            min_rtt = ?self.min,
            max_rtt = ?self.max,
            cur_rtt = ?self.cur,
            "rtt tracker updated"
        );
    }

    /// Returns the smallest RTT seen, or `None` if no samples yet.
    pub fn min(&self) -> Option<Duration> {
        self.min
    }

    /// Returns the largest RTT seen, or `None` if no samples yet.
    pub fn max(&self) -> Option<Duration> {
        self.max
    }

    /// Returns the latest RTT, or `None` if no samples yet.
    pub fn current(&self) -> Option<Duration> {
        self.cur
    }

    /// Returns the maximum in force before the last increase, or `None` if no samples yet.
    pub fn prev_max(&self) -> Option<Duration> {
        self.prev_max
    }

    /// Whether at least one sample has been observed.
    pub fn has_samples(&self) -> bool {
        self.cur.is_some()
    }
}
