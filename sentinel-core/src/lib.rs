//! Six concurrent sets of `i32` over one sentinel-bounded sorted list.
//!
//! Every set implements [`IntSet`]; pick one by type, or at run time with
//! [`SetKind::build`]. Sets that let readers walk nodes without locking them
//! are generic over a reclamation [`Guard`]: use [`DeferredGuard`] in tests
//! and `sentinel_crossbeam::EpochGuard` everywhere else.
//!
//! ```
//! use sentinel_core::{DeferredGuard, IntSet, LockFreeSet};
//!
//! let set: LockFreeSet<DeferredGuard> = LockFreeSet::new();
//! assert!(set.add(5));
//! assert!(!set.add(5));
//! assert!(set.contains(5));
//! assert!(set.remove(5));
//! set.validate();
//! ```

pub mod common_tests;
pub mod data_structures;
pub mod error;
pub mod guard;

// Re-export the everyday types for convenience
pub use data_structures::{
    GlobalLockSet, GlobalRwLockSet, HandOverHandSet, IntSet, LazySet, LockFreeSet, OptimisticSet,
    Progress, SetKind,
};
pub use error::{InvariantViolation, UnknownSetKind};
pub use guard::{DeferredGuard, Guard};
