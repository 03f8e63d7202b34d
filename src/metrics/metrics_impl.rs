use std::fmt;

use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{HistoryMetricsReadRecorder, HistoryMetricsRecorder};

/// Counters kept by a [`HistoryRing`](crate::ds::HistoryRing).
#[derive(Debug, Default)]
pub struct HistoryMetrics {
    pub push_calls: u64,
    /// Slot overwrites on push (retained or abandoned values).
    pub evictions: u64,
    /// Redo-able entries cut off by a push.
    pub abandoned_entries: u64,
    pub undo_calls: u64,
    pub undo_applied: u64,
    pub redo_calls: u64,
    pub redo_applied: u64,
    pub clear_calls: u64,
    pub cleared_entries: u64,
    pub get_calls: MetricsCell,
    pub get_hits: MetricsCell,
}

impl HistoryMetricsRecorder for HistoryMetrics {
    fn record_push(&mut self) {
        self.push_calls += 1;
    }

    fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    fn record_abandoned(&mut self, count: u64) {
        self.abandoned_entries += count;
    }

    fn record_undo_call(&mut self) {
        self.undo_calls += 1;
    }

    fn record_undo_applied(&mut self) {
        self.undo_applied += 1;
    }

    fn record_redo_call(&mut self) {
        self.redo_calls += 1;
    }

    fn record_redo_applied(&mut self) {
        self.redo_applied += 1;
    }

    fn record_clear(&mut self, released: u64) {
        self.clear_calls += 1;
        self.cleared_entries += released;
    }
}

impl HistoryMetricsReadRecorder for HistoryMetrics {
    fn record_get_call(&self) {
        self.get_calls.incr();
    }

    fn record_get_hit(&self) {
        self.get_hits.incr();
    }
}

impl fmt::Display for HistoryMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let undo_rate = if self.undo_calls > 0 {
            (self.undo_applied as f64 / self.undo_calls as f64) * 100.0
        } else {
            0.0
        };

        write!(
            f,
            "HistoryMetrics {{ pushes: {}, evictions: {}, abandoned: {}, undo: {}/{} ({:.2}%), \
             redo: {}/{}, clears: {}, cleared_entries: {}, gets: {} ({} hits) }}",
            self.push_calls,
            self.evictions,
            self.abandoned_entries,
            self.undo_applied,
            self.undo_calls,
            undo_rate,
            self.redo_applied,
            self.redo_calls,
            self.clear_calls,
            self.cleared_entries,
            self.get_calls.get(),
            self.get_hits.get(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_accumulates() {
        let mut m = HistoryMetrics::default();
        m.record_push();
        m.record_push();
        m.record_eviction();
        m.record_abandoned(3);
        m.record_undo_call();
        m.record_undo_applied();
        m.record_redo_call();
        m.record_clear(2);
        m.record_get_call();
        m.record_get_hit();

        assert_eq!(m.push_calls, 2);
        assert_eq!(m.evictions, 1);
        assert_eq!(m.abandoned_entries, 3);
        assert_eq!((m.undo_calls, m.undo_applied), (1, 1));
        assert_eq!((m.redo_calls, m.redo_applied), (1, 0));
        assert_eq!((m.clear_calls, m.cleared_entries), (1, 2));
        assert_eq!((m.get_calls.get(), m.get_hits.get()), (1, 1));
    }

    #[test]
    fn display_reports_undo_rate() {
        let mut m = HistoryMetrics::default();
        m.record_undo_call();
        m.record_undo_call();
        m.record_undo_applied();
        let text = m.to_string();
        assert!(text.contains("undo: 1/2 (50.00%)"), "{}", text);
    }
}
