//! Congestion control module.
//!
//! Defines the `CongestionOps` trait implemented by every slow-start threshold
//! algorithm, and the read-only connection view they are handed.

pub mod new_reno;
pub mod westwood;

use std::time::Duration;

use crate::config::{SamplingMode, WestwoodConfig};
use crate::error::{Result, StrandCcError};

/// Read-only view of the owning connection at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionSnapshot {
    /// Segment size in bytes.
    pub segment_size: u32,
    /// Current congestion window in bytes.
    pub cwnd: u32,
    /// Bytes sent but not yet acknowledged.
    pub bytes_in_flight: u32,
}

impl ConnectionSnapshot {
    /// Create a snapshot from the connection's current sizes, all in bytes.
    pub fn new(segment_size: u32, cwnd: u32, bytes_in_flight: u32) -> Self {
        Self {
            segment_size,
            cwnd,
            bytes_in_flight,
        }
    }
}

/// Trait for pluggable slow-start threshold algorithms.
///
/// The transport owns window growth and loss detection; implementations only
/// observe acknowledgments and answer threshold queries after a loss.
pub trait CongestionOps: Send {
    /// Algorithm name, as accepted by [`by_name`].
    fn name(&self) -> &'static str;

    /// Notify the algorithm that `segments_acked` segments were acknowledged
    /// with round-trip time `rtt`.
    fn pkts_acked(&mut self, segments_acked: u32, rtt: Duration, snapshot: &ConnectionSnapshot);

    /// Returns the slow-start threshold to adopt after a loss event.
    fn ssthresh(&self, snapshot: &ConnectionSnapshot) -> u32;

    /// Create independent state for a connection derived from this one.
    fn fork(&self) -> Box<dyn CongestionOps>;
}

/// Build an algorithm by name: `"NewReno"`, `"Westwood"` or `"WestwoodPlus"`.
///
/// `"WestwoodPlus"` arms timers on the current tokio runtime and fails with
/// [`StrandCcError::NoRuntime`] outside of one.
pub fn by_name(name: &str) -> Result<Box<dyn CongestionOps>> {
    if name == new_reno::NewReno::NAME {
        return Ok(Box::new(new_reno::NewReno::new()));
    }
    let sampling: SamplingMode = name
        .parse()
        .map_err(|_| StrandCcError::UnknownAlgorithm(name.to_string()))?;
    let config = WestwoodConfig::default().with_sampling(sampling);
    Ok(Box::new(westwood::Westwood::new(config)?))
}
