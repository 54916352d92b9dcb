//! Concurrent integer sets.
//!
//! # Organization
//!
//! - [`coarse`] - One lock for the whole list (GlobalLockSet, GlobalRwLockSet)
//! - [`fine`] - One lock per node (HandOverHandSet, OptimisticSet, LazySet)
//! - [`lock_free`] - CAS on marked pointers (LockFreeSet)
//! - [`int_set`] - The `IntSet` trait and run-time variant selection
//! - `internal` - Node layout, marked pointers, lock windows, audits (pub(crate))

// Submodules
pub mod coarse;
pub mod fine;
pub(crate) mod internal;
pub mod lock_free;

// Top-level public modules
pub mod int_set;

pub use coarse::{GlobalLockSet, GlobalRwLockSet};
pub use fine::{HandOverHandSet, LazySet, OptimisticSet};
pub use int_set::{IntSet, Progress, SetKind};
pub use lock_free::LockFreeSet;

// MarkedPtr stays pub(crate) - truly internal implementation detail
pub(crate) use internal::MarkedPtr;
pub use internal::node::{HEAD_VALUE, TAIL_VALUE, is_sentinel_value};
