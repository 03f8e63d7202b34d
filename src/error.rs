//! Error types for the retreat library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a history is configured with invalid
//!   parameters (a zero capacity).
//! - [`InvariantError`]: Returned by
//!   [`HistoryRing::check_invariants`](crate::ds::HistoryRing::check_invariants)
//!   when the cursor/slot bookkeeping is inconsistent.
//!
//! Every other history operation is total: `undo`/`redo` report a no-op with
//! `false` and `get` reports "nothing in view" with `None`.
//!
//! ## Example Usage
//!
//! ```
//! use retreat::ds::HistoryRing;
//! use retreat::error::ConfigError;
//!
//! let history: Result<HistoryRing<String>, ConfigError> = HistoryRing::try_new(16);
//! assert!(history.is_ok());
//!
//! // A zero-length ring is rejected up front
//! let bad = HistoryRing::<String>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when history configuration parameters are invalid.
///
/// Produced by [`HistoryRing::try_new`](crate::ds::HistoryRing::try_new),
/// [`HistoryRing::try_with_cleanup`](crate::ds::HistoryRing::try_with_cleanup)
/// and [`HistoryBuilder::try_build`](crate::builder::HistoryBuilder::try_build).
///
/// # Example
///
/// ```
/// use retreat::ds::HistoryRing;
///
/// let err = HistoryRing::<u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when a history's cursors and slots disagree.
///
/// Carries a human-readable description of the first invariant that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
