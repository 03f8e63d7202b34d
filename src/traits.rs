//! # History Traits
//!
//! Seams between the history buffer and the code that uses it.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            UndoHistory<T>               │
//!   │                                         │
//!   │  push(&mut, T)                          │
//!   │  get(&) → Option<&T>                    │
//!   │  undo(&mut) → bool                      │
//!   │  redo(&mut) → bool                      │
//!   │  can_undo(&) / can_redo(&) → bool       │
//!   │  len(&) / capacity(&) → usize           │
//!   │  clear(&mut)                            │
//!   └──────────────────┬──────────────────────┘
//!                      │ implemented by
//!                      ▼
//!   ┌─────────────────────────────────────────┐      ┌──────────────────────────┐
//!   │          HistoryRing<T, H>              │─────▶│     CleanupHook<T>       │
//!   │   fixed ring + three cursors            │ owns │  cleanup(&mut, T)        │
//!   └─────────────────────────────────────────┘      │                          │
//!                                                    │  impls: NoCleanup,       │
//!                                                    │         FnMut(T)         │
//!                                                    └──────────────────────────┘
//! ```
//!
//! ## Cleanup Contract
//!
//! A hook receives ownership of every value the history lets go of: values
//! overwritten by [`UndoHistory::push`] and values discarded by
//! [`UndoHistory::clear`]. Values that undo/redo merely step over are never
//! passed to the hook. Dropping a history drops its remaining values without
//! running the hook.
//!
//! The hook is owned by the history and runs while the history is mutably
//! borrowed, so it cannot call back into the same instance.
//!
//! ## Thread Safety
//!
//! Histories are single-threaded. Wrap one in a `Mutex` when it must be
//! shared; every call then runs under the caller's lock.

/// Receives values released by a history buffer.
///
/// Implemented for every `FnMut(T)`, so closures work directly:
///
/// ```
/// use retreat::ds::HistoryRing;
///
/// let mut released = Vec::new();
/// {
///     let mut history = HistoryRing::with_cleanup(1, |v: u32| released.push(v));
///     history.push(1);
///     history.push(2);
/// }
/// assert_eq!(released, vec![1]);
/// ```
pub trait CleanupHook<T> {
    /// Takes ownership of a value that left the history.
    fn cleanup(&mut self, value: T);
}

impl<T, F> CleanupHook<T> for F
where
    F: FnMut(T),
{
    #[inline]
    fn cleanup(&mut self, value: T) {
        self(value)
    }
}

/// Default hook: released values are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoCleanup;

impl<T> CleanupHook<T> for NoCleanup {
    #[inline]
    fn cleanup(&mut self, value: T) {
        drop(value);
    }
}

/// Linear undo/redo history over a single current value.
///
/// # Example
///
/// ```
/// use retreat::ds::HistoryRing;
/// use retreat::traits::UndoHistory;
///
/// fn replay<H: UndoHistory<&'static str>>(history: &mut H, edits: &[&'static str]) {
///     for edit in edits {
///         history.push(edit);
///     }
/// }
///
/// let mut history = HistoryRing::new(8);
/// replay(&mut history, &["a", "ab", "abc"]);
/// assert!(history.undo());
/// assert_eq!(history.get(), Some(&"ab"));
/// ```
pub trait UndoHistory<T> {
    /// Makes `value` the current value, discarding any redo-able future.
    fn push(&mut self, value: T);

    /// Returns the current value, or `None` if nothing is in view.
    fn get(&self) -> Option<&T>;

    /// Steps back one value. Returns `false` if already at the oldest retained value.
    fn undo(&mut self) -> bool;

    /// Steps forward one value. Returns `false` if already at the newest value.
    fn redo(&mut self) -> bool;

    /// Returns `true` if [`undo`](Self::undo) would succeed.
    fn can_undo(&self) -> bool;

    /// Returns `true` if [`redo`](Self::redo) would succeed.
    fn can_redo(&self) -> bool;

    /// Number of retained values, including the redo-able future.
    fn len(&self) -> usize;

    /// Returns `true` if no value has been pushed since construction or the last clear.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of retained values.
    fn capacity(&self) -> usize;

    /// Releases every stored value and returns to the empty state.
    fn clear(&mut self);
}
