//! TCP Westwood / Westwood+ bandwidth estimation.
//!
//! Each accepted acknowledgment adds to an acked-segment counter and updates
//! the RTT tracker. The counter is turned into a bandwidth sample either right
//! away (Westwood) or once per RTT by a one-shot timer (Westwood+). After a
//! loss the transport asks for a new slow-start threshold, computed from the
//! bandwidth estimate and RTT history by [`compute_ssthresh`].
//!
//! Westwood+ timers run on the tokio runtime captured at construction. At most
//! one timer is armed per instance; it is aborted when the instance drops.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::bandwidth::{raw_sample, BandwidthFilter, SampleAggregator};
use crate::config::{SamplingMode, WestwoodConfig};
use crate::congestion::{CongestionOps, ConnectionSnapshot};
use crate::error::{Result, StrandCcError};
use crate::rtt::RttTracker;
use crate::threshold::compute_ssthresh;

/// Mutable estimator state, shared with the armed timer task.
#[derive(Debug)]
struct EstimatorState {
    aggregator: SampleAggregator,
    rtt: RttTracker,
    filter: BandwidthFilter,
    /// A delayed estimate is armed and has not fired yet.
    estimate_pending: bool,
    /// Published bandwidth estimate for telemetry.
    published: watch::Sender<f64>,
}

impl EstimatorState {
    fn new(filter: BandwidthFilter) -> Self {
        let (published, _) = watch::channel(filter.estimate());
        Self {
            aggregator: SampleAggregator::new(),
            rtt: RttTracker::new(),
            filter,
            estimate_pending: false,
            published,
        }
    }

    fn estimate_bw(&mut self, rtt: Duration, snapshot: &ConnectionSnapshot) {
        debug_assert!(!rtt.is_zero(), "bandwidth estimate over a zero RTT");

        let acked = self.aggregator.drain();
        let sample = raw_sample(acked, snapshot.segment_size, rtt);
        // Only ever set under delayed sampling.
        self.estimate_pending = false;

        let bw = self.filter.apply(sample);
        self.published.send_replace(bw);
    }
}

/// Owned by an armed timer task. Releases the pending flag if the task is
/// dropped before it fires (aborted, or its runtime shut down).
struct ArmedEstimate {
    state: Arc<Mutex<EstimatorState>>,
    fired: bool,
}

impl Drop for ArmedEstimate {
    fn drop(&mut self) {
        if !self.fired {
            self.state.lock().estimate_pending = false;
        }
    }
}

/// How bandwidth samples are triggered.
#[derive(Debug)]
enum Sampler {
    Immediate,
    Delayed {
        runtime: Handle,
        timer: Option<JoinHandle<()>>,
    },
}

/// Westwood / Westwood+ slow-start threshold controller.
#[derive(Debug)]
pub struct Westwood {
    config: WestwoodConfig,
    state: Arc<Mutex<EstimatorState>>,
    sampler: Sampler,
}

impl Westwood {
    /// Create a controller.
    ///
    /// Delayed sampling captures the current tokio runtime and fails with
    /// [`StrandCcError::NoRuntime`] when called outside of one.
    pub fn new(config: WestwoodConfig) -> Result<Self> {
        match config.sampling {
            SamplingMode::Immediate => Ok(Self::build(config, Sampler::Immediate)),
            SamplingMode::Delayed => {
                let runtime = Handle::try_current().map_err(|_| StrandCcError::NoRuntime)?;
                Ok(Self::with_runtime(config, runtime))
            }
        }
    }

    /// Create a controller that arms delayed estimates on `runtime`.
    ///
    /// The handle is ignored under immediate sampling.
    pub fn with_runtime(config: WestwoodConfig, runtime: Handle) -> Self {
        let sampler = match config.sampling {
            SamplingMode::Immediate => Sampler::Immediate,
            SamplingMode::Delayed => Sampler::Delayed {
                runtime,
                timer: None,
            },
        };
        Self::build(config, sampler)
    }

    fn build(config: WestwoodConfig, sampler: Sampler) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(EstimatorState::new(BandwidthFilter::new(
                config.filter,
            )))),
            sampler,
        }
    }

    /// Process an acknowledgment of `segments_acked` segments measured at `rtt`.
    ///
    /// A zero RTT is not a usable measurement: the whole event is dropped,
    /// including its segment count.
    pub fn process_ack(&mut self, segments_acked: u32, rtt: Duration, snapshot: &ConnectionSnapshot) {
        if rtt.is_zero() {
            warn!(segments_acked, "RTT measured is zero, ack event discarded");
            return;
        }

        let mut state = self.state.lock();
        state.aggregator.record_ack(segments_acked);
        state.rtt.observe(rtt);

        match &mut self.sampler {
            Sampler::Immediate => state.estimate_bw(rtt, snapshot),
            Sampler::Delayed { runtime, timer } => {
                if state.estimate_pending {
                    return;
                }
                state.estimate_pending = true;
                drop(state);

                if let Some(stale) = timer.take() {
                    stale.abort();
                }

                let mut armed = ArmedEstimate {
                    state: Arc::clone(&self.state),
                    fired: false,
                };
                let snapshot = *snapshot;
                *timer = Some(runtime.spawn(async move {
                    tokio::time::sleep(rtt).await;
                    armed.state.lock().estimate_bw(rtt, &snapshot);
                    armed.fired = true;
                }));
                debug!(?rtt, "delayed bandwidth estimate armed");
            }
        }
    }

    /// Slow-start threshold for the current bandwidth and RTT history.
    pub fn ssthresh(&self, snapshot: &ConnectionSnapshot) -> u32 {
        let state = self.state.lock();
        compute_ssthresh(state.filter.estimate(), &state.rtt, snapshot)
    }

    /// Independent controller for a derived connection.
    ///
    /// Inherits the bandwidth belief and configuration; RTT history, the ack
    /// counter and any armed timer are not carried over.
    pub fn fork(&self) -> Self {
        let filter = self.state.lock().filter;
        let sampler = match &self.sampler {
            Sampler::Immediate => Sampler::Immediate,
            Sampler::Delayed { runtime, .. } => Sampler::Delayed {
                runtime: runtime.clone(),
                timer: None,
            },
        };
        Self {
            config: self.config,
            state: Arc::new(Mutex::new(EstimatorState::new(filter))),
            sampler,
        }
    }

    /// Subscribe to published bandwidth estimates (bytes/sec).
    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.state.lock().published.subscribe()
    }

    /// Returns the configuration this controller was built with.
    pub fn config(&self) -> WestwoodConfig {
        self.config
    }

    /// Returns the current bandwidth estimate in bytes per second.
    pub fn bandwidth_estimate(&self) -> f64 {
        self.state.lock().filter.estimate()
    }

    /// Returns the previous raw sample fed through the smoothing filter.
    pub fn last_sample(&self) -> f64 {
        self.state.lock().filter.last_sample()
    }

    /// Returns segments acknowledged since the last estimate.
    pub fn acked_since_estimate(&self) -> u64 {
        self.state.lock().aggregator.pending()
    }

    /// Returns a copy of the RTT history.
    pub fn rtt_stats(&self) -> RttTracker {
        self.state.lock().rtt.clone()
    }

    /// Whether a delayed estimate is armed and has not fired yet.
    pub fn is_estimate_pending(&self) -> bool {
        self.state.lock().estimate_pending
    }
}

impl Drop for Westwood {
    fn drop(&mut self) {
        if let Sampler::Delayed {
            timer: Some(timer), ..
        } = &self.sampler
        {
            timer.abort();
        }
    }
}

impl CongestionOps for Westwood {
    fn name(&self) -> &'static str {
        match self.config.sampling {
            SamplingMode::Immediate => "Westwood",
            SamplingMode::Delayed => "WestwoodPlus",
        }
    }

    fn pkts_acked(&mut self, segments_acked: u32, rtt: Duration, snapshot: &ConnectionSnapshot) {
        self.process_ack(segments_acked, rtt, snapshot);
    }

    fn ssthresh(&self, snapshot: &ConnectionSnapshot) -> u32 {
        Westwood::ssthresh(self, snapshot)
    }

    fn fork(&self) -> Box<dyn CongestionOps> {
        Box::new(Westwood::fork(self))
    }
}
