//! NewReno slow-start threshold (RFC 6582).
//!
//! On loss: ssthresh = max(2 * MSS, bytes_in_flight / 2). Keeps no per-ack state.

use std::time::Duration;

use crate::congestion::{CongestionOps, ConnectionSnapshot};

/// Half-of-flight threshold controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewReno;

impl NewReno {
    pub const NAME: &'static str = "NewReno";

    pub fn new() -> Self {
        Self
    }
}

impl CongestionOps for NewReno {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn pkts_acked(&mut self, _segments_acked: u32, _rtt: Duration, _snapshot: &ConnectionSnapshot) {}

    fn ssthresh(&self, snapshot: &ConnectionSnapshot) -> u32 {
        snapshot
            .segment_size
            .saturating_mul(2)
            .max(snapshot.bytes_in_flight / 2)
    }

    fn fork(&self) -> Box<dyn CongestionOps> {
        Box::new(*self)
    }
}
