//! Epoch-based guard implementation using crossbeam-epoch.
//!
//! `EpochGuard` plugs the global crossbeam collector into the sets that
//! walk the list without locks:
//!
//! ```text
//! LockFreeSet<EpochGuard>
//!     │
//!     ├── pin()            every add/remove/contains pins the thread
//!     └── defer_destroy()  unlinked nodes wait for all pins to move on
//! ```
//!
//! # Example
//!
//! ```
//! use sentinel_core::{IntSet, LazySet};
//! use sentinel_crossbeam::EpochGuard;
//!
//! let set: LazySet<EpochGuard> = LazySet::new();
//! set.add(42);
//! set.add(17);
//! assert!(set.remove(42));
//! assert!(set.contains(17));
//! ```

use crossbeam_epoch::{self as epoch, Guard as CrossbeamGuard};
use sentinel_core::guard::Guard;

/// Epoch-based memory reclamation guard.
///
/// Nodes handed to `defer_destroy` are not freed until every thread that
/// was pinned at that moment has unpinned. A thread walking the list holds
/// a pin for the whole operation, so any node it can still see stays valid.
///
/// Zero-sized: all state lives in the global epoch collector, so storing it
/// in a set costs nothing and keeps the set `Send + Sync`.
///
/// When `defer_destroy` is called, it:
/// 1. Pins the current thread (re-entrant if the operation is already pinned)
/// 2. Schedules the destruction to run after all threads have advanced
/// 3. Unpins
///
#[derive(Debug, Clone, Copy, Default)]
pub struct EpochGuard {
    // Zero-sized - all state is in the global epoch collector
}

impl EpochGuard {
    pub fn new() -> Self {
        EpochGuard {}
    }
}

// EpochGuard is Send and Sync since it's stateless (zero-sized)
unsafe impl Send for EpochGuard {}
unsafe impl Sync for EpochGuard {}

impl Guard for EpochGuard {
    /// A pinned crossbeam guard held for the duration of one set operation.
    type ReadGuard = CrossbeamGuard;

    fn pin() -> Self::ReadGuard {
        epoch::pin()
    }

    unsafe fn defer_destroy<N>(&self, node: *mut N, dealloc: unsafe fn(*mut N)) {
        let guard = epoch::pin();
        unsafe {
            guard.defer_unchecked(move || {
                dealloc(node);
            });
        }
    }

    fn name() -> &'static str {
        "epoch"
    }
}
