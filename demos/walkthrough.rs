//! Walkthrough of the history ring.
//!
//! Run with: `RUST_LOG=retreat=trace cargo run --example walkthrough`
//!
//! Three sessions: branching on the default capacity, a capacity-3 ring that
//! forgets its oldest values, and a capacity-2 ring with a cleanup hook that
//! prints what it releases.

use retreat::builder::HistoryBuilder;
use retreat::ds::HistoryRing;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

fn show<T: std::fmt::Debug, H>(label: &str, history: &HistoryRing<T, H>) {
    println!(
        "  {label:<14} get={:?} len={} undo={} redo={}",
        history.get(),
        history.len(),
        history.can_undo(),
        history.can_redo(),
    );
}

fn branching_session() {
    info!("session: branching on default capacity");
    println!("=== Default capacity ===");
    let mut history = HistoryRing::default();
    for v in 1..=5 {
        history.push(v);
    }
    show("push 1..=5", &history);

    history.undo();
    history.undo();
    show("undo x2", &history);

    history.push(99);
    show("push 99", &history);

    let redone = history.redo();
    println!("  redo -> {redone}");
}

fn bounded_session() {
    info!("session: capacity 3");
    println!("=== Capacity 3 ===");
    let mut history = HistoryRing::new(3);
    for v in [10, 20, 30, 40, 50] {
        history.push(v);
    }
    show("push 10..50", &history);

    while history.undo() {
        show("undo", &history);
    }
    println!("  undo -> false (oldest retained value reached)");
}

fn cleanup_session() {
    info!("session: capacity 2 with cleanup hook");
    println!("=== Capacity 2 with cleanup ===");
    let mut history = HistoryBuilder::new()
        .capacity(2)
        .cleanup(|v: i32| println!("  cleanup({v})"))
        .build();

    history.push(100);
    history.push(200);
    show("push 100, 200", &history);

    history.push(300);
    show("push 300", &history);

    history.undo();
    show("undo", &history);

    history.push(400);
    show("push 400", &history);

    history.clear();
    show("clear", &history);
}

fn main() {
    init_tracing();

    branching_session();
    bounded_session();
    cleanup_session();
}
