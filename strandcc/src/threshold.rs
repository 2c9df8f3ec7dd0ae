//! Slow-start threshold from bandwidth and RTT (Westwood BBE).
//!
//! ```text
//! max_rtt' = BETA * max_rtt + (1 - BETA) * prev_max_rtt
//! d_max    = max_rtt' - min_rtt
//! d        = cur_rtt - min_rtt
//! u        = 1                        if d_max == 0
//!          = E ^ -(ALPHA * d / d_max) otherwise
//! ere      = u * bw + (1 - u) * cwnd / cur_rtt
//! ssthresh = cur_rtt * d_max / (d + d_max) * ere
//! ```
//!
//! Near `min_rtt` the measured bandwidth dominates; as queueing delay grows
//! toward the weighted maximum, the window-derived rate takes over. A result
//! that is zero, not below cwnd, or undefined falls back to
//! `max(2 * MSS, bw * min_rtt)`.

use std::time::Duration;

use tracing::debug;

use crate::congestion::ConnectionSnapshot;
use crate::rtt::RttTracker;

/// Steepness of the decay weight.
pub const ALPHA: f64 = 10.0;
/// Weight of the current maximum RTT against the previous one.
pub const BETA: f64 = 0.25;
/// Decay base. Deliberately coarse; kept for numerical compatibility.
pub const E: f64 = 2.71;

fn secs(rtt: Option<Duration>) -> f64 {
    rtt.map_or(0.0, |d| d.as_secs_f64())
}

/// Compute a new slow-start threshold in bytes.
///
/// `bandwidth` is the published estimate in bytes per second. Reads only; never
/// mutates estimator state. `snapshot.bytes_in_flight` does not affect the result.
pub fn compute_ssthresh(bandwidth: f64, rtt: &RttTracker, snapshot: &ConnectionSnapshot) -> u32 {
    let current_rtt = secs(rtt.current());
    let min_rtt = secs(rtt.min());
    let max_rtt = BETA * secs(rtt.max()) + (1.0 - BETA) * secs(rtt.prev_max());

    let d_max = max_rtt - min_rtt;
    let d = current_rtt - min_rtt;

    let fallback = || {
        let floor = snapshot.segment_size.saturating_mul(2);
        floor.max((bandwidth * min_rtt) as u32)
    };

    if d + d_max == 0.0 {
        let ssthresh = fallback();
        debug!(bandwidth, min_rtt, ssthresh, "degenerate rtt spread, using fallback");
        return ssthresh;
    }

    let u = if d_max != 0.0 {
        1.0 / E.powf((d / d_max) * ALPHA)
    } else {
        1.0
    };

    let ere = u * bandwidth + (1.0 - u) * (f64::from(snapshot.cwnd) / current_rtt);
    let raw = current_rtt * (d_max / (d + d_max)) * ere;

    if raw.is_finite() {
        let candidate = raw as u32;
        if snapshot.cwnd > candidate && candidate != 0 {
            debug!(u, ere, ssthresh = candidate, "threshold from eligible rate estimate");
            return candidate;
        }
    }

    let ssthresh = fallback();
    debug!(raw, bandwidth, min_rtt, ssthresh, "threshold fallback");
    ssthresh
}
