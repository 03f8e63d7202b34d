// ==============================================
// METRICS TESTS (integration)
// ==============================================
//
// Requires `--features metrics`.

#![cfg(feature = "metrics")]

use retreat::prelude::*;

#[test]
fn counters_follow_a_session() {
    let mut history = HistoryRing::new(2);
    history.push(1);
    history.push(2);
    history.push(3);
    assert!(history.undo());
    assert!(!history.undo());
    history.push(4);
    assert!(!history.redo());
    let _ = history.get();

    let snap = history.metrics_snapshot();
    assert_eq!(snap.push_calls, 4);
    assert_eq!(snap.evictions, 2);
    assert_eq!(snap.abandoned_entries, 1);
    assert_eq!(snap.undo_calls, 2);
    assert_eq!(snap.undo_applied, 1);
    assert_eq!(snap.redo_calls, 1);
    assert_eq!(snap.redo_applied, 0);
    assert_eq!(snap.get_calls, 1);
    assert_eq!(snap.get_hits, 1);
    assert_eq!(snap.len, 2);
    assert_eq!(snap.capacity, 2);
    assert_eq!(snap.undo_depth, 1);
    assert_eq!(snap.redo_depth, 0);
    assert_eq!(snap.undo_success_ratio(), 0.5);
}

#[test]
fn clear_counts_released_entries() {
    let mut history = HistoryRing::new(4);
    for v in 0..3 {
        history.push(v);
    }
    history.clear();

    let snap = history.metrics_snapshot();
    assert_eq!(snap.clear_calls, 1);
    assert_eq!(snap.cleared_entries, 3);
    assert_eq!(snap.len, 0);

    history.reset_metrics();
    assert_eq!(history.metrics_snapshot().push_calls, 0);
}

#[test]
fn exporter_writes_snapshot() {
    let mut history = HistoryRing::new(3);
    history.push("a");
    history.push("b");

    let exporter = PrometheusTextExporter::new("doc_history", Vec::new());
    exporter.export(&history.snapshot());

    let text = String::from_utf8(exporter.into_inner()).unwrap();
    assert!(text.contains("doc_history_push_calls_total 2\n"));
    assert!(text.contains("doc_history_len 2\n"));
    assert!(text.contains("doc_history_undo_depth 1\n"));
}
