// StrandCC estimator benchmarks using criterion.
//
// Measures:
//   - Per-ack bandwidth estimation (Westwood, both filters)
//   - Slow-start threshold computation
//   - Fork of a warmed-up controller

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use strandcc::{ConnectionSnapshot, FilterMode, Westwood, WestwoodConfig};

const MSS: u32 = 1460;

fn warmed(filter: FilterMode, acks: usize) -> Westwood {
    let mut w = Westwood::new(WestwoodConfig::default().with_filter(filter)).unwrap();
    let snap = ConnectionSnapshot::new(MSS, 100 * MSS, 0);
    for i in 0..acks {
        let rtt = Duration::from_micros(20_000 + (i as u64 * 7_919) % 30_000);
        w.process_ack(2, rtt, &snap);
    }
    w
}

// ---------------------------------------------------------------------------
// Ack path
// ---------------------------------------------------------------------------

fn bench_process_ack(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_ack");
    for filter in [FilterMode::None, FilterMode::Smoothed] {
        group.bench_with_input(
            BenchmarkId::from_parameter(filter),
            &filter,
            |b, &filter| {
                let mut w = warmed(filter, 0);
                let snap = ConnectionSnapshot::new(MSS, 100 * MSS, 0);
                let mut i = 0u64;
                b.iter(|| {
                    i = i.wrapping_add(1);
                    let rtt = Duration::from_micros(20_000 + (i * 7_919) % 30_000);
                    w.process_ack(black_box(2), rtt, &snap);
                });
                black_box(w.bandwidth_estimate());
            },
        );
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Threshold and fork
// ---------------------------------------------------------------------------

fn bench_ssthresh(c: &mut Criterion) {
    let w = warmed(FilterMode::Smoothed, 1_000);
    let snap = ConnectionSnapshot::new(MSS, 100 * MSS, 50 * MSS);
    c.bench_function("ssthresh_warmed", |b| {
        b.iter(|| black_box(w.ssthresh(black_box(&snap))));
    });
}

fn bench_fork(c: &mut Criterion) {
    let w = warmed(FilterMode::Smoothed, 1_000);
    c.bench_function("fork_warmed", |b| {
        b.iter(|| black_box(w.fork()));
    });
}

criterion_group!(benches, bench_process_ack, bench_ssthresh, bench_fork);
criterion_main!(benches);
