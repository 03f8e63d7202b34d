//! Builder for configuring a history ring.
//!
//! Collects capacity and cleanup hook in one place so configuration can be
//! assembled from settings before the value type is known.
//!
//! ## Example
//!
//! ```rust
//! use retreat::builder::HistoryBuilder;
//!
//! let mut history = HistoryBuilder::new().capacity(3).build::<String>();
//! history.push("draft".to_string());
//! assert_eq!(history.get(), Some(&"draft".to_string()));
//! assert_eq!(history.capacity(), 3);
//! ```
//!
//! ## Example: Fallible Configuration
//!
//! ```rust
//! use retreat::builder::HistoryBuilder;
//!
//! let released = std::cell::RefCell::new(Vec::new());
//! let history = HistoryBuilder::new()
//!     .capacity(0)
//!     .cleanup(|v: u32| released.borrow_mut().push(v))
//!     .try_build::<u32>();
//! assert!(history.is_err());
//! ```

use tracing::debug;

use crate::ds::history_ring::{DEFAULT_CAPACITY, HistoryRing};
use crate::error::ConfigError;
use crate::traits::{CleanupHook, NoCleanup};

/// Configures and builds a [`HistoryRing`].
#[derive(Debug, Clone)]
pub struct HistoryBuilder<H = NoCleanup> {
    capacity: usize,
    hook: H,
}

impl HistoryBuilder<NoCleanup> {
    /// Starts from [`DEFAULT_CAPACITY`] with no cleanup hook.
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            hook: NoCleanup,
        }
    }
}

impl Default for HistoryBuilder<NoCleanup> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> HistoryBuilder<H> {
    /// Sets the maximum number of retained values.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the hook that receives evicted and cleared values.
    pub fn cleanup<H2>(self, hook: H2) -> HistoryBuilder<H2> {
        HistoryBuilder {
            capacity: self.capacity,
            hook,
        }
    }

    /// Builds the history.
    ///
    /// # Panics
    ///
    /// Panics if the configured capacity is zero. For a non-panicking
    /// alternative, use [`try_build`](Self::try_build).
    pub fn build<T>(self) -> HistoryRing<T, H>
    where
        H: CleanupHook<T>,
    {
        match self.try_build() {
            Ok(history) => history,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds the history, returning an error on invalid configuration
    /// instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured capacity is zero.
    pub fn try_build<T>(self) -> Result<HistoryRing<T, H>, ConfigError>
    where
        H: CleanupHook<T>,
    {
        let capacity = self.capacity;
        HistoryRing::try_with_cleanup(capacity, self.hook).inspect_err(|e| {
            debug!(capacity, error = %e, "rejected history configuration");
        })
    }
}
