//! Slow-start threshold tests through the `CongestionOps` interface.

use std::time::Duration;

use strandcc::{by_name, ConnectionSnapshot, FilterMode, Westwood, WestwoodConfig};

const MSS: u32 = 1460;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn unfiltered() -> Westwood {
    Westwood::new(WestwoodConfig::default().with_filter(FilterMode::None)).unwrap()
}

#[test]
fn fallback_uses_bandwidth_times_min_rtt() {
    let mut w = unfiltered();
    // 10 * 1000 B over 100ms = 100_000 B/s; single sample => degenerate spread.
    let snap = ConnectionSnapshot::new(1000, 1_000_000, 0);
    w.process_ack(10, ms(100), &snap);
    assert_eq!(w.ssthresh(&snap), 10_000);
}

#[test]
fn fallback_floor_is_two_segments() {
    let mut w = unfiltered();
    let snap = ConnectionSnapshot::new(MSS, 1_000_000, 0);
    w.process_ack(1, ms(100), &snap);
    // bw * min_rtt = 1460 < 2 * MSS.
    assert_eq!(w.ssthresh(&snap), 2 * MSS);
}

#[test]
fn threshold_without_samples_is_floor() {
    let w = unfiltered();
    assert_eq!(w.ssthresh(&ConnectionSnapshot::new(MSS, 64 * MSS, 0)), 2 * MSS);
}

#[test]
fn threshold_query_does_not_mutate() {
    let mut w = unfiltered();
    let snap = ConnectionSnapshot::new(MSS, 200 * MSS, 0);
    w.process_ack(20, ms(40), &snap);
    w.process_ack(20, ms(90), &snap);
    w.process_ack(20, ms(50), &snap);

    let rtt = w.rtt_stats();
    let bw = w.bandwidth_estimate();
    let first = w.ssthresh(&snap);
    assert_eq!(w.ssthresh(&snap), first);
    assert_eq!(w.rtt_stats(), rtt);
    assert_eq!(w.bandwidth_estimate(), bw);
}

#[test]
fn queueing_threshold_below_cwnd() {
    let mut w = unfiltered();
    let snap = ConnectionSnapshot::new(MSS, 200 * MSS, 0);
    w.process_ack(20, ms(40), &snap);
    w.process_ack(20, ms(90), &snap);
    w.process_ack(20, ms(50), &snap);

    let ssthresh = w.ssthresh(&snap);
    assert!(ssthresh > 0);
    assert!(ssthresh < snap.cwnd, "ssthresh {ssthresh} >= cwnd {}", snap.cwnd);
}

#[test]
fn new_reno_and_westwood_share_interface() {
    let snap = ConnectionSnapshot::new(MSS, 100 * MSS, 30 * MSS);
    for name in ["NewReno", "Westwood"] {
        let mut ops = by_name(name).unwrap();
        ops.pkts_acked(4, ms(30), &snap);
        let child = ops.fork();
        assert_eq!(child.name(), name);
        assert!(ops.ssthresh(&snap) >= 2 * MSS);
    }
}
