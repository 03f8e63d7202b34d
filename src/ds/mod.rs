pub mod history_ring;

pub use history_ring::{DEFAULT_CAPACITY, HistoryRing, Iter};
