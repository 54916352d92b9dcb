//! Non-blocking set.

pub mod lock_free_set;

pub use lock_free_set::LockFreeSet;
