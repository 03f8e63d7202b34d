//! Operation counters for history buffers (`metrics` feature).
//!
//! Recording, snapshotting and export are split across small traits so the
//! history only ever writes counters:
//!
//! - [`traits::HistoryMetricsRecorder`]: counters bumped by `&mut self` operations.
//! - [`traits::HistoryMetricsReadRecorder`]: counters bumped by `&self` reads.
//! - [`traits::MetricsSnapshotProvider`]: copy counters plus gauges out for tests/benches.
//! - [`traits::MetricsExporter`]: publish a snapshot to a monitoring backend.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::HistoryMetrics;
pub use snapshot::HistoryMetricsSnapshot;
