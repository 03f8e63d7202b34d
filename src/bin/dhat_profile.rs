//! DHAT heap profiler for retreat.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::sync::Arc;

use retreat::ds::HistoryRing;
use retreat::traits::{CleanupHook, UndoHistory};

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}

/// Counts released values without keeping them alive.
#[derive(Default)]
struct ReleaseCounter {
    released: usize,
}

impl<T> CleanupHook<T> for ReleaseCounter {
    fn cleanup(&mut self, value: T) {
        self.released += 1;
        drop(value);
    }
}

/// Editor-like session: mostly pushes, with bursts of undo and redo.
fn editing_workload<H: UndoHistory<Arc<Vec<u8>>>>(history: &mut H, operations: usize, seed: u64) {
    let mut rng = XorShift64::new(seed);

    for i in 0..operations {
        let roll = rng.next_f64();
        if roll < 0.7 {
            let len = 16 + (rng.next_u64() % 240) as usize;
            history.push(Arc::new(vec![i as u8; len]));
        } else if roll < 0.9 {
            history.undo();
        } else {
            history.redo();
        }
    }
}

/// Pushes only, so every write past capacity evicts.
fn eviction_churn<H: UndoHistory<Arc<Vec<u8>>>>(history: &mut H, operations: usize) {
    for i in 0..operations {
        history.push(Arc::new(vec![i as u8; 64]));
    }
}

/// Undo to the oldest value, then branch repeatedly from there.
fn branch_churn<H: UndoHistory<Arc<Vec<u8>>>>(history: &mut H, rounds: usize) {
    for round in 0..rounds {
        while history.undo() {}
        history.push(Arc::new(vec![round as u8; 32]));
        for _ in 0..history.capacity() / 2 {
            history.push(Arc::new(vec![round as u8; 32]));
        }
    }
}

fn profile_small_ring() {
    println!("=== Profiling capacity 16 ===");
    let operations = 100_000;

    let mut history = HistoryRing::with_cleanup(16, ReleaseCounter::default());

    editing_workload(&mut history, operations, 42);
    eviction_churn(&mut history, operations / 4);
    branch_churn(&mut history, 1_000);

    println!("  Final size: {}", history.len());
    println!("  Released: {}", history.hook().released);
}

fn profile_large_ring() {
    println!("=== Profiling capacity 4096 ===");
    let operations = 100_000;

    let mut history = HistoryRing::with_cleanup(4096, ReleaseCounter::default());

    editing_workload(&mut history, operations, 7);
    eviction_churn(&mut history, operations / 4);
    branch_churn(&mut history, 50);

    println!("  Final size: {}", history.len());
    println!("  Released: {}", history.hook().released);

    history.clear();
    println!("  Released after clear: {}", history.hook().released);
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("retreat DHAT Heap Profiling");
    println!("===========================\n");

    profile_small_ring();
    profile_large_ring();

    println!("\n===========================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
