//! Coarse-grained sets: the whole list sits behind one lock.

pub mod global_lock_set;
pub mod global_rw_lock_set;

pub use global_lock_set::GlobalLockSet;
pub use global_rw_lock_set::GlobalRwLockSet;
