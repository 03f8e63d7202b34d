//! Micro-operation benchmarks for the history ring.
//!
//! Run with: `cargo bench --bench history`
//!
//! Measures push (with and without eviction), navigation, and a mixed
//! editor-like workload across a few capacities.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use retreat::ds::HistoryRing;

const CAPACITIES: [usize; 3] = [16, 256, 4096];
const OPS: u64 = 4096;

fn filled(capacity: usize) -> HistoryRing<Arc<u64>> {
    let mut history = HistoryRing::new(capacity);
    for i in 0..capacity as u64 {
        history.push(Arc::new(i));
    }
    history
}

// ============================================================================
// Push
// ============================================================================

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");
    group.throughput(Throughput::Elements(OPS));

    for capacity in CAPACITIES {
        group.bench_function(format!("fill_{capacity}"), |b| {
            b.iter_batched(
                || HistoryRing::new(capacity),
                |mut history| {
                    for i in 0..OPS {
                        history.push(black_box(Arc::new(i)));
                    }
                    history
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("evicting_{capacity}"), |b| {
            b.iter_batched(
                || filled(capacity),
                |mut history| {
                    for i in 0..OPS {
                        history.push(black_box(Arc::new(i)));
                    }
                    history
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// Navigation
// ============================================================================

fn bench_undo_redo(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigate");

    for capacity in CAPACITIES {
        group.throughput(Throughput::Elements(2 * capacity as u64));
        group.bench_function(format!("undo_redo_sweep_{capacity}"), |b| {
            b.iter_batched(
                || filled(capacity),
                |mut history| {
                    while history.undo() {
                        black_box(history.get());
                    }
                    while history.redo() {
                        black_box(history.get());
                    }
                    history
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// Mixed workload
// ============================================================================

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.throughput(Throughput::Elements(OPS));

    for capacity in CAPACITIES {
        group.bench_function(format!("edit_session_{capacity}"), |b| {
            b.iter_batched(
                || (filled(capacity), SmallRng::seed_from_u64(42)),
                |(mut history, mut rng)| {
                    for i in 0..OPS {
                        let roll: f64 = rng.random();
                        if roll < 0.6 {
                            history.push(Arc::new(i));
                        } else if roll < 0.85 {
                            black_box(history.undo());
                        } else {
                            black_box(history.redo());
                        }
                        black_box(history.get());
                    }
                    history
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_clear(c: &mut Criterion) {
    let mut group = c.benchmark_group("clear");

    for capacity in CAPACITIES {
        group.throughput(Throughput::Elements(capacity as u64));
        group.bench_function(format!("full_{capacity}"), |b| {
            b.iter_batched(
                || filled(capacity),
                |mut history| {
                    history.clear();
                    history
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_push, bench_undo_redo, bench_mixed, bench_clear);
criterion_main!(benches);
