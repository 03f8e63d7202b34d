//! Fixed-capacity undo/redo history ring.
//!
//! Keeps the last `C` values of a linear edit history in a ring of slots and
//! walks it with three cursors: the write frontier (`max`), the value in view
//! (`current`) and the oldest value still retrievable (`oldest`). Every
//! operation except [`clear`](HistoryRing::clear) is O(1) cursor/slot work.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                      HistoryRing<T> (capacity = 3)                          │
//! │                                                                             │
//! │   slots: Vec<Option<T>>        logical index i lives in slot i % 3         │
//! │   cursors: Option<Cursors>     None = empty history                        │
//! │                                                                             │
//! │   After push(10, 20, 30, 40, 50):                                           │
//! │                                                                             │
//! │   slot:        0      1      2                                              │
//! │            ┌──────┬──────┬──────┐                                           │
//! │   value:   │  40  │  50  │  30  │                                           │
//! │            └──────┴──────┴──────┘                                           │
//! │   logical:    3      4      2                                               │
//! │                      ▲      ▲                                               │
//! │          max/current ┘      └ oldest                                        │
//! │                                                                             │
//! │   undo():  current 4 → 3 (get = 40)                                         │
//! │   undo():  current 3 → 2 (get = 30)                                         │
//! │   undo():  current == oldest → false                                        │
//! │                                                                             │
//! │   Push Flow                                                                 │
//! │   ─────────                                                                 │
//! │                                                                             │
//! │   push(v):                                                                  │
//! │     1. next = current + 1          (drops any redo-able future)             │
//! │     2. displaced = slots[next % C].replace(v)                               │
//! │     3. max = current = next                                                 │
//! │     4. oldest = max(oldest, next + 1 - C)                                   │
//! │     5. displaced → cleanup hook                                             │
//! │                                                                             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Branching
//!
//! Pushing after an undo starts a new branch: the redo-able entries beyond
//! the current position are cut off at once, but their values stay in their
//! slots until a later write lands there (or [`clear`](HistoryRing::clear)
//! runs). Only then does the cleanup hook see them.
//!
//! ## Operations
//!
//! | Operation            | Description                                | Complexity |
//! |----------------------|--------------------------------------------|------------|
//! | [`push`]             | Make a value current, may evict one value  | O(1)       |
//! | [`get`]              | Current value                              | O(1)       |
//! | [`undo`] / [`redo`]  | Move the current position                  | O(1)       |
//! | [`len`]              | Retained values                            | O(1)       |
//! | [`clear`]            | Release every stored value                 | O(C)       |
//! | [`iter`]             | Retained values, oldest first              | O(len)     |
//!
//! [`push`]: HistoryRing::push
//! [`get`]: HistoryRing::get
//! [`undo`]: HistoryRing::undo
//! [`redo`]: HistoryRing::redo
//! [`len`]: HistoryRing::len
//! [`clear`]: HistoryRing::clear
//! [`iter`]: HistoryRing::iter
//!
//! ## Example Usage
//!
//! ```
//! use retreat::ds::HistoryRing;
//!
//! let mut history = HistoryRing::new(3);
//! for v in [10, 20, 30, 40, 50] {
//!     history.push(v);
//! }
//!
//! assert_eq!(history.get(), Some(&50));
//! assert_eq!(history.len(), 3);
//!
//! assert!(history.undo());
//! assert!(history.undo());
//! assert_eq!(history.get(), Some(&30));
//! assert!(!history.undo()); // 10 and 20 were evicted
//! ```
//!
//! ## Thread Safety
//!
//! `HistoryRing` has no internal locking. It is `Send` when `T` and the hook
//! are; share it across threads behind the caller's own `Mutex`.
//!
//! ## Implementation Notes
//!
//! - Empty slots are `None`, so any `T` can be stored.
//! - Logical indices are `u64` and only ever grow until `clear`.
//! - `debug_validate_invariants()` is available in debug/test builds.

use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::HistoryMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::HistoryMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    HistoryMetricsReadRecorder, HistoryMetricsRecorder, MetricsSnapshotProvider,
};
use crate::traits::{CleanupHook, NoCleanup, UndoHistory};

/// Capacity used by [`HistoryRing::default`] and
/// [`HistoryBuilder::new`](crate::builder::HistoryBuilder::new).
pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursors {
    /// Highest logical index written on the current branch.
    max: u64,
    /// Logical index of the value in view.
    current: u64,
    /// Oldest logical index still retrievable.
    oldest: u64,
}

/// Fixed-capacity linear undo/redo history.
///
/// `H` receives every value the history lets go of; see
/// [`CleanupHook`](crate::traits::CleanupHook). With the default
/// [`NoCleanup`] released values are dropped.
///
/// # Example
///
/// ```
/// use retreat::ds::HistoryRing;
///
/// let mut history = HistoryRing::default();
/// for v in 1..=5 {
///     history.push(v);
/// }
///
/// history.undo();
/// history.undo();
/// assert_eq!(history.get(), Some(&3));
///
/// // Pushing from the middle drops the redo branch (4, 5)
/// history.push(99);
/// assert_eq!(history.get(), Some(&99));
/// assert_eq!(history.len(), 4);
/// assert!(!history.redo());
/// ```
///
/// # Example: Releasing Resources
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use retreat::ds::HistoryRing;
///
/// let released = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&released);
/// let mut history = HistoryRing::with_cleanup(2, move |v: u32| sink.borrow_mut().push(v));
///
/// history.push(100);
/// history.push(200);
/// history.push(300); // slot of 100 is reused
/// assert_eq!(*released.borrow(), vec![100]);
///
/// history.clear();
/// assert_eq!(*released.borrow(), vec![100, 300, 200]);
/// ```
pub struct HistoryRing<T, H = NoCleanup> {
    slots: Vec<Option<T>>,
    cursors: Option<Cursors>,
    hook: H,
    #[cfg(feature = "metrics")]
    metrics: HistoryMetrics,
}

impl<T> HistoryRing<T, NoCleanup> {
    /// Creates an empty history retaining at most `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(history) => history,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates an empty history, returning an error on a zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use retreat::ds::HistoryRing;
    ///
    /// assert!(HistoryRing::<i32>::try_new(4).is_ok());
    /// assert!(HistoryRing::<i32>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_cleanup(capacity, NoCleanup)
    }
}

impl<T, H> HistoryRing<T, H>
where
    H: CleanupHook<T>,
{
    /// Creates an empty history that hands released values to `hook`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_with_cleanup`](Self::try_with_cleanup).
    pub fn with_cleanup(capacity: usize, hook: H) -> Self {
        match Self::try_with_cleanup(capacity, hook) {
            Ok(history) => history,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates an empty history with a cleanup hook, returning an error on a
    /// zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_with_cleanup(capacity: usize, hook: H) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new(
                "history capacity must be greater than zero",
            ));
        }
        Ok(Self {
            slots: empty_slots(capacity),
            cursors: None,
            hook,
            #[cfg(feature = "metrics")]
            metrics: HistoryMetrics::default(),
        })
    }

    /// Makes `value` the current value.
    ///
    /// Any redo-able future is cut off. If the slot the value lands in still
    /// holds an older value (evicted history, or an abandoned branch), that
    /// value goes to the cleanup hook.
    ///
    /// The hook runs after the history is updated; if it panics the panic
    /// propagates and the history stays consistent.
    ///
    /// # Example
    ///
    /// ```
    /// use retreat::ds::HistoryRing;
    ///
    /// let mut history = HistoryRing::new(2);
    /// history.push("a");
    /// history.push("b");
    /// history.push("c"); // evicts "a"
    ///
    /// assert_eq!(history.get(), Some(&"c"));
    /// assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec!["b", "c"]);
    /// ```
    pub fn push(&mut self, value: T) {
        if let Some(displaced) = self.push_evict(value) {
            self.hook.cleanup(displaced);
        }
    }

    /// Releases every stored value to the cleanup hook, in slot order, and
    /// returns to the empty state.
    ///
    /// Capacity and hook are kept. Values of an abandoned branch that were
    /// never overwritten are released here too.
    ///
    /// The history is emptied before the hook runs. If the hook panics the
    /// panic propagates and the values not yet released are dropped without
    /// reaching the hook.
    ///
    /// # Example
    ///
    /// ```
    /// use retreat::ds::HistoryRing;
    ///
    /// let mut history = HistoryRing::new(5);
    /// history.push(1);
    /// history.push(2);
    ///
    /// history.clear();
    /// assert!(history.is_empty());
    /// assert_eq!(history.get(), None);
    /// assert!(!history.can_undo());
    /// assert_eq!(history.capacity(), 5);
    /// ```
    pub fn clear(&mut self) {
        let capacity = self.capacity();
        let stored = std::mem::replace(&mut self.slots, empty_slots(capacity));
        self.cursors = None;

        let released = stored.iter().filter(|slot| slot.is_some()).count();
        debug!(released, capacity = stored.len(), "clearing history");
        #[cfg(feature = "metrics")]
        self.metrics.record_clear(released as u64);

        for value in stored.into_iter().flatten() {
            self.hook.cleanup(value);
        }
    }
}

impl<T, H> HistoryRing<T, H> {
    /// Returns the maximum number of retained values.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of retained values, redo-able future included.
    ///
    /// Never exceeds [`capacity`](Self::capacity).
    #[inline]
    pub fn len(&self) -> usize {
        match self.cursors {
            Some(c) => (c.max - c.oldest + 1) as usize,
            None => 0,
        }
    }

    /// Returns `true` if nothing has been pushed since construction or the
    /// last [`clear`](HistoryRing::clear).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursors.is_none()
    }

    /// Returns the current value.
    ///
    /// # Example
    ///
    /// ```
    /// use retreat::ds::HistoryRing;
    ///
    /// let mut history = HistoryRing::new(3);
    /// assert_eq!(history.get(), None);
    ///
    /// history.push('x');
    /// assert_eq!(history.get(), Some(&'x'));
    /// ```
    pub fn get(&self) -> Option<&T> {
        #[cfg(feature = "metrics")]
        self.metrics.record_get_call();

        let current = self.cursors?.current;
        let value = self.slots[self.slot_of(current)].as_ref();

        #[cfg(feature = "metrics")]
        if value.is_some() {
            self.metrics.record_get_hit();
        }
        value
    }

    /// Returns the current value mutably.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        let slot = self.slot_of(self.cursors?.current);
        self.slots[slot].as_mut()
    }

    /// Steps back to the previous value.
    ///
    /// Returns `false`, leaving the history unchanged, when the current value
    /// is the oldest one retained or the history is empty.
    pub fn undo(&mut self) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_undo_call();

        match self.cursors.as_mut() {
            Some(c) if c.current > c.oldest => {
                c.current -= 1;
                #[cfg(feature = "metrics")]
                self.metrics.record_undo_applied();
                true
            }
            _ => false,
        }
    }

    /// Steps forward to the next value of the current branch.
    ///
    /// Returns `false`, leaving the history unchanged, when there is nothing
    /// to redo.
    pub fn redo(&mut self) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_redo_call();

        match self.cursors.as_mut() {
            Some(c) if c.current < c.max => {
                c.current += 1;
                #[cfg(feature = "metrics")]
                self.metrics.record_redo_applied();
                true
            }
            _ => false,
        }
    }

    /// Returns `true` if [`undo`](Self::undo) would succeed.
    #[inline]
    pub fn can_undo(&self) -> bool {
        self.cursors.is_some_and(|c| c.current > c.oldest)
    }

    /// Returns `true` if [`redo`](Self::redo) would succeed.
    #[inline]
    pub fn can_redo(&self) -> bool {
        self.cursors.is_some_and(|c| c.current < c.max)
    }

    /// Number of successful undos available from the current position.
    #[inline]
    pub fn undo_depth(&self) -> usize {
        self.cursors.map_or(0, |c| (c.current - c.oldest) as usize)
    }

    /// Number of successful redos available from the current position.
    #[inline]
    pub fn redo_depth(&self) -> usize {
        self.cursors.map_or(0, |c| (c.max - c.current) as usize)
    }

    /// Same state change as [`push`](HistoryRing::push), but the displaced
    /// slot value is returned instead of going to the cleanup hook.
    ///
    /// # Example
    ///
    /// ```
    /// use retreat::ds::HistoryRing;
    ///
    /// let mut history = HistoryRing::new(1);
    /// assert_eq!(history.push_evict(String::from("first")), None);
    /// assert_eq!(history.push_evict(String::from("second")), Some(String::from("first")));
    /// ```
    pub fn push_evict(&mut self, value: T) -> Option<T> {
        #[cfg(feature = "metrics")]
        self.metrics.record_push();

        let capacity = self.capacity() as u64;
        let (next, oldest) = match self.cursors {
            Some(c) => {
                if c.max > c.current {
                    trace!(abandoned = c.max - c.current, "push cuts off redo branch");
                    #[cfg(feature = "metrics")]
                    self.metrics.record_abandoned(c.max - c.current);
                }
                (c.current + 1, c.oldest)
            }
            None => (0, 0),
        };

        let slot = self.slot_of(next);
        let displaced = self.slots[slot].replace(value);
        self.cursors = Some(Cursors {
            max: next,
            current: next,
            oldest: oldest.max((next + 1).saturating_sub(capacity)),
        });

        if displaced.is_some() {
            trace!(index = next, slot, "push evicts stored value");
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();
        }
        displaced
    }

    /// Returns an iterator over retained values, oldest first.
    ///
    /// Includes the redo-able future; excludes values of abandoned branches.
    ///
    /// # Example
    ///
    /// ```
    /// use retreat::ds::HistoryRing;
    ///
    /// let mut history = HistoryRing::new(4);
    /// for v in [1, 2, 3] {
    ///     history.push(v);
    /// }
    /// history.undo();
    ///
    /// let all: Vec<_> = history.iter().copied().collect();
    /// assert_eq!(all, vec![1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T, H> {
        let (next, end) = match self.cursors {
            Some(c) => (c.oldest, c.max + 1),
            None => (0, 0),
        };
        Iter {
            history: self,
            next,
            end,
        }
    }

    /// Returns the cleanup hook.
    #[inline]
    pub fn hook(&self) -> &H {
        &self.hook
    }

    /// Returns the cleanup hook mutably.
    #[inline]
    pub fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }

    /// Returns an approximate memory footprint in bytes.
    ///
    /// Counts the slot array, not heap memory owned by the values.
    pub fn approx_bytes(&self) -> usize {
        std::mem::size_of::<Self>() + self.slots.capacity() * std::mem::size_of::<Option<T>>()
    }

    /// Returns the counters recorded so far.
    #[cfg(feature = "metrics")]
    #[inline]
    pub fn metrics(&self) -> &HistoryMetrics {
        &self.metrics
    }

    /// Resets all counters to zero.
    #[cfg(feature = "metrics")]
    #[inline]
    pub fn reset_metrics(&mut self) {
        self.metrics = HistoryMetrics::default();
    }

    /// Copies counters and current gauges into a snapshot.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> HistoryMetricsSnapshot {
        HistoryMetricsSnapshot {
            push_calls: self.metrics.push_calls,
            evictions: self.metrics.evictions,
            abandoned_entries: self.metrics.abandoned_entries,
            undo_calls: self.metrics.undo_calls,
            undo_applied: self.metrics.undo_applied,
            redo_calls: self.metrics.redo_calls,
            redo_applied: self.metrics.redo_applied,
            get_calls: self.metrics.get_calls.get(),
            get_hits: self.metrics.get_hits.get(),
            clear_calls: self.metrics.clear_calls,
            cleared_entries: self.metrics.cleared_entries,
            len: self.len(),
            capacity: self.capacity(),
            undo_depth: self.undo_depth(),
            redo_depth: self.redo_depth(),
        }
    }

    /// Verifies cursor ordering, the capacity bound and slot occupancy.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let capacity = self.capacity();
        if capacity == 0 {
            return Err(InvariantError::new("history has no slots"));
        }

        let Some(c) = self.cursors else {
            return match self.slots.iter().position(Option::is_some) {
                Some(slot) => Err(InvariantError::new(format!(
                    "empty history still stores a value in slot {}",
                    slot
                ))),
                None => Ok(()),
            };
        };

        if c.oldest > c.current || c.current > c.max {
            return Err(InvariantError::new(format!(
                "cursor order violated: oldest {} current {} max {}",
                c.oldest, c.current, c.max
            )));
        }
        let live = c.max - c.oldest + 1;
        if live > capacity as u64 {
            return Err(InvariantError::new(format!(
                "{} live entries exceed capacity {}",
                live, capacity
            )));
        }
        for index in c.oldest..=c.max {
            let slot = self.slot_of(index);
            if self.slots[slot].is_none() {
                return Err(InvariantError::new(format!(
                    "live index {} maps to empty slot {}",
                    index, slot
                )));
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(e) = self.check_invariants() {
            panic!("{}", e);
        }
    }

    /// Maps a logical index to its ring slot.
    #[inline]
    fn slot_of(&self, index: u64) -> usize {
        (index % self.slots.len() as u64) as usize
    }
}

fn empty_slots<T>(capacity: usize) -> Vec<Option<T>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}

impl<T> Default for HistoryRing<T, NoCleanup> {
    /// Creates an empty history with [`DEFAULT_CAPACITY`].
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T, H> fmt::Debug for HistoryRing<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryRing")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("cursors", &self.cursors)
            .finish_non_exhaustive()
    }
}

impl<T, H> UndoHistory<T> for HistoryRing<T, H>
where
    H: CleanupHook<T>,
{
    fn push(&mut self, value: T) {
        HistoryRing::push(self, value)
    }

    fn get(&self) -> Option<&T> {
        HistoryRing::get(self)
    }

    fn undo(&mut self) -> bool {
        HistoryRing::undo(self)
    }

    fn redo(&mut self) -> bool {
        HistoryRing::redo(self)
    }

    fn can_undo(&self) -> bool {
        HistoryRing::can_undo(self)
    }

    fn can_redo(&self) -> bool {
        HistoryRing::can_redo(self)
    }

    fn len(&self) -> usize {
        HistoryRing::len(self)
    }

    fn is_empty(&self) -> bool {
        HistoryRing::is_empty(self)
    }

    fn capacity(&self) -> usize {
        HistoryRing::capacity(self)
    }

    fn clear(&mut self) {
        HistoryRing::clear(self)
    }
}

#[cfg(feature = "metrics")]
impl<T, H> MetricsSnapshotProvider<HistoryMetricsSnapshot> for HistoryRing<T, H> {
    fn snapshot(&self) -> HistoryMetricsSnapshot {
        self.metrics_snapshot()
    }
}

// ---------------------------------------------------------------------------
// Iterator types
// ---------------------------------------------------------------------------

/// Borrowed iterator over the retained values of a [`HistoryRing`], oldest first.
///
/// Created by [`HistoryRing::iter`].
pub struct Iter<'a, T, H> {
    history: &'a HistoryRing<T, H>,
    next: u64,
    end: u64, // exclusive
}

impl<'a, T, H> Iterator for Iter<'a, T, H> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let history = self.history;
        let value = history.slots[history.slot_of(self.next)]
            .as_ref()
            .expect("live index maps to an occupied slot");
        self.next += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next.min(self.end)) as usize;
        (remaining, Some(remaining))
    }
}

impl<T, H> DoubleEndedIterator for Iter<'_, T, H> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let history = self.history;
        let value = history.slots[history.slot_of(self.end - 1)]
            .as_ref()
            .expect("live index maps to an occupied slot");
        self.end -= 1;
        Some(value)
    }
}

impl<T, H> ExactSizeIterator for Iter<'_, T, H> {}

impl<T, H> FusedIterator for Iter<'_, T, H> {}

impl<T, H> Clone for Iter<'_, T, H> {
    fn clone(&self) -> Self {
        Self {
            history: self.history,
            next: self.next,
            end: self.end,
        }
    }
}

impl<T, H> fmt::Debug for Iter<'_, T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("next", &self.next)
            .field("end", &self.end)
            .finish()
    }
}

impl<'a, T, H> IntoIterator for &'a HistoryRing<T, H> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
