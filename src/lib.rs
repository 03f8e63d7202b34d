//! retreat: fixed-capacity undo/redo history over a ring buffer.
//!
//! See [`ds::HistoryRing`] for the cursor model and its invariants.

pub mod builder;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
