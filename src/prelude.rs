pub use crate::builder::HistoryBuilder;
pub use crate::ds::{DEFAULT_CAPACITY, HistoryRing};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{HistoryMetricsSnapshot, PrometheusTextExporter};
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
pub use crate::traits::{CleanupHook, NoCleanup, UndoHistory};
