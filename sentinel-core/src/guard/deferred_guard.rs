//! Deferred guard implementation for testing.
//!
//! `DeferredGuard` keeps every retired node alive until the guard itself is
//! dropped, which happens when the owning set is dropped.

use std::collections::HashSet;

use parking_lot::Mutex;

use super::Guard;

/// A simple guard that defers all node destruction until the guard is dropped.
///
/// Predictable destruction timing makes it the guard of choice for tests.
/// Not suitable for long-running use: retired nodes accumulate until drop.
///
/// Retiring the same pointer twice is always a bug in the set (two threads
/// both believed they unlinked it), so it panics immediately.
///
pub struct DeferredGuard {
    deferred: Mutex<Vec<DeferredNode>>,
    seen: Mutex<HashSet<usize>>,
}

struct DeferredNode {
    ptr: *mut (),
    dealloc: unsafe fn(*mut ()),
}

// Safety: the pointer is only dereferenced by `dealloc` on drop, with
// exclusive access to the guard.
unsafe impl Send for DeferredNode {}

impl DeferredGuard {
    pub fn new() -> Self {
        DeferredGuard {
            deferred: Mutex::new(Vec::new()),
            seen: Mutex::new(HashSet::new()),
        }
    }

    /// Number of nodes retired so far.
    pub fn retired(&self) -> usize {
        self.deferred.lock().len()
    }
}

impl Default for DeferredGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DeferredGuard {
    fn drop(&mut self) {
        for node in self.deferred.get_mut().drain(..) {
            unsafe {
                (node.dealloc)(node.ptr);
            }
        }
    }
}

impl Guard for DeferredGuard {
    type ReadGuard = ();

    fn pin() -> Self::ReadGuard {
        // Protection comes from the stored guard outliving every reader.
    }

    unsafe fn defer_destroy<N>(&self, node: *mut N, dealloc: unsafe fn(*mut N)) {
        let addr = node as usize;
        if !self.seen.lock().insert(addr) {
            panic!("duplicate defer_destroy at {:#x}", addr);
        }

        let node = DeferredNode {
            ptr: node as *mut (),
            dealloc: unsafe {
                std::mem::transmute::<unsafe fn(*mut N), unsafe fn(*mut ())>(dealloc)
            },
        };
        self.deferred.lock().push(node);
    }

    fn name() -> &'static str {
        "deferred"
    }
}
