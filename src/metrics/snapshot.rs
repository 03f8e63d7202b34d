/// Point-in-time copy of a history's counters and gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HistoryMetricsSnapshot {
    pub push_calls: u64,
    pub evictions: u64,
    pub abandoned_entries: u64,

    pub undo_calls: u64,
    pub undo_applied: u64,
    pub redo_calls: u64,
    pub redo_applied: u64,

    pub get_calls: u64,
    pub get_hits: u64,

    pub clear_calls: u64,
    pub cleared_entries: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
    pub undo_depth: usize,
    pub redo_depth: usize,
}

impl HistoryMetricsSnapshot {
    /// Share of undo calls that actually moved the cursor.
    pub fn undo_success_ratio(&self) -> f64 {
        if self.undo_calls == 0 {
            0.0
        } else {
            self.undo_applied as f64 / self.undo_calls as f64
        }
    }

    /// Share of the ring in use.
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.len as f64 / self.capacity as f64
        }
    }
}
