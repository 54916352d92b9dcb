//! Fine-grained sets: one lock per node.
//!
//! All three share `LockedWindow` for taking locks, so every one of them
//! acquires node locks in ascending list order.

pub mod hand_over_hand_set;
pub mod lazy_set;
pub mod optimistic_set;

pub use hand_over_hand_set::HandOverHandSet;
pub use lazy_set::LazySet;
pub use optimistic_set::OptimisticSet;
