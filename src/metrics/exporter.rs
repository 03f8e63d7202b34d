use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::HistoryMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for history metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// or forwarded to an OpenTelemetry collector. Write errors are ignored.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn write_gauge(&self, suffix: &str, value: usize) {
        self.write_metric("gauge", suffix, value as u64);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<HistoryMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &HistoryMetricsSnapshot) {
        self.write_counter("push_calls_total", snapshot.push_calls);
        self.write_counter("evictions_total", snapshot.evictions);
        self.write_counter("abandoned_entries_total", snapshot.abandoned_entries);
        self.write_counter("undo_calls_total", snapshot.undo_calls);
        self.write_counter("undo_applied_total", snapshot.undo_applied);
        self.write_counter("redo_calls_total", snapshot.redo_calls);
        self.write_counter("redo_applied_total", snapshot.redo_applied);
        self.write_counter("get_calls_total", snapshot.get_calls);
        self.write_counter("get_hits_total", snapshot.get_hits);
        self.write_counter("clear_calls_total", snapshot.clear_calls);
        self.write_counter("cleared_entries_total", snapshot.cleared_entries);
        self.write_gauge("len", snapshot.len);
        self.write_gauge("capacity", snapshot.capacity);
        self.write_gauge("undo_depth", snapshot.undo_depth);
        self.write_gauge("redo_depth", snapshot.redo_depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_prefixed_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("editor_history", Vec::new());
        exporter.export(&HistoryMetricsSnapshot {
            push_calls: 7,
            evictions: 2,
            len: 5,
            capacity: 5,
            ..Default::default()
        });

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE editor_history_push_calls_total counter\n"));
        assert!(text.contains("editor_history_push_calls_total 7\n"));
        assert!(text.contains("editor_history_evictions_total 2\n"));
        assert!(text.contains("# TYPE editor_history_len gauge\n"));
        assert!(text.contains("editor_history_capacity 5\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&HistoryMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("\nredo_depth 0\n"));
    }
}
