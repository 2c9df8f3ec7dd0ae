//! StrandCC -- bandwidth-estimating congestion control for the Strand Protocol stack.
//!
//! Provides the Westwood / Westwood+ family of slow-start threshold controllers:
//! - **Westwood**: bandwidth re-estimated on every acknowledgment
//! - **Westwood+**: bandwidth re-estimated once per RTT via a one-shot timer
//! - **NewReno**: the classic half-of-flight threshold, as a baseline
//!
//! The transport drives a controller through [`CongestionOps`]; window growth,
//! loss detection and RTT sampling stay with the transport.

pub mod bandwidth;
pub mod config;
pub mod congestion;
pub mod error;
pub mod rtt;
pub mod threshold;

// Re-export key public types at crate root.
pub use config::{FilterMode, SamplingMode, WestwoodConfig};
pub use congestion::new_reno::NewReno;
pub use congestion::westwood::Westwood;
pub use congestion::{by_name, CongestionOps, ConnectionSnapshot};
pub use error::{Result, StrandCcError};
pub use rtt::RttTracker;
