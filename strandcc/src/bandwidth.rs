//! Bandwidth sampling: ack aggregation and the Tustin smoothing filter.
//!
//! A raw sample is `acked_segments * segment_size / rtt` in bytes per second.
//! With smoothing enabled the published estimate is
//!
//!   bw = ALPHA * bw_prev + (1 - ALPHA) * (sample + sample_prev) / 2
//!
//! which is the bilinear (Tustin) discretization of a first-order low-pass.

use std::time::Duration;

use tracing::debug;

use crate::config::FilterMode;

/// Pole of the smoothing filter.
pub const FILTER_ALPHA: f64 = 0.9;

/// Segments acknowledged since the last bandwidth estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleAggregator {
    acked: u64,
}

impl SampleAggregator {
    /// Create an aggregator with nothing acknowledged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `segments` to the running count.
    pub fn record_ack(&mut self, segments: u32) {
        self.acked = self.acked.saturating_add(u64::from(segments));
    }

    /// Take the running count, leaving zero behind.
    pub fn drain(&mut self) -> u64 {
        std::mem::take(&mut self.acked)
    }

    /// Segments acknowledged since the last drain.
    pub fn pending(&self) -> u64 {
        self.acked
    }
}

/// Convert an acked-segment count over one RTT into bytes per second.
pub fn raw_sample(acked_segments: u64, segment_size: u32, rtt: Duration) -> f64 {
    acked_segments as f64 * f64::from(segment_size) / rtt.as_secs_f64()
}

/// Turns raw bandwidth samples into the published estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandwidthFilter {
    mode: FilterMode,
    /// Published estimate (bytes/sec).
    estimate: f64,
    /// Previous raw sample; only meaningful when smoothing.
    last_sample: f64,
    /// Previous filtered output; only meaningful when smoothing.
    last_filtered: f64,
}

impl BandwidthFilter {
    /// Create a filter with a zero estimate and no sample history.
    pub fn new(mode: FilterMode) -> Self {
        Self {
            mode,
            estimate: 0.0,
            last_sample: 0.0,
            last_filtered: 0.0,
        }
    }

    /// Feed a raw sample and return the new published estimate.
    pub fn apply(&mut self, sample: f64) -> f64 {
        match self.mode {
            FilterMode::None => {
                self.estimate = sample;
            }
            FilterMode::Smoothed => {
                let filtered = FILTER_ALPHA * self.last_filtered
                    + (1.0 - FILTER_ALPHA) * ((sample + self.last_sample) / 2.0);
                self.last_sample = sample;
                self.last_filtered = filtered;
                self.estimate = filtered;
            }
        }
        debug!(raw = sample, filtered = self.estimate, "bandwidth sample");
        self.estimate
    }

    /// Current published estimate in bytes per second.
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Previous raw sample fed through the smoother.
    pub fn last_sample(&self) -> f64 {
        self.last_sample
    }
}
