//! # Metrics Trait Hierarchy
//!
//! Separates *recording*, *snapshotting* and *export* so that the history
//! buffer only writes counters and never knows who reads them.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │   HistoryMetricsRecorder     │    │  HistoryMetricsReadRecorder  │
//!   │  push/evict/abandon          │    │  get call/hit (&self)        │
//!   │  undo/redo/clear             │    │                              │
//!   └──────────────┬───────────────┘    └──────────────┬───────────────┘
//!                  └───────────────┬───────────────────┘
//!                                  ▼
//!                        ┌───────────────────┐
//!                        │  HistoryMetrics   │  (stored in HistoryRing)
//!                        └─────────┬─────────┘
//!                                  │ snapshot()
//!                                  ▼
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │───▶│ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters bumped by mutating history operations.
pub trait HistoryMetricsRecorder {
    fn record_push(&mut self);
    fn record_eviction(&mut self);
    /// `count` redo-able entries were cut off by a push.
    fn record_abandoned(&mut self, count: u64);
    fn record_undo_call(&mut self);
    fn record_undo_applied(&mut self);
    fn record_redo_call(&mut self);
    fn record_redo_applied(&mut self);
    /// A clear released `released` stored values.
    fn record_clear(&mut self, released: u64);
}

/// Counters bumped by `&self` reads (interior mutability).
pub trait HistoryMetricsReadRecorder {
    fn record_get_call(&self);
    fn record_get_hit(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
