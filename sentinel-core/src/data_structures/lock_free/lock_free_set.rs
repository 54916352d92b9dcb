use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::data_structures::internal::node::is_sentinel_value;
use crate::data_structures::internal::{ListAudit, MarkedPtr, Node, NodePtr};
use crate::data_structures::{IntSet, SetKind};
use crate::error::InvariantViolation;
use crate::guard::Guard;

type LfNode = Node<()>;

///
/// Non-blocking sorted set after Harris's 'A Pragmatic Implementation of
/// Non-Blocking Linked-Lists', with Michael's retire-on-unlink reclamation.
///
// =============================================================================
// MARKED POINTERS
// =============================================================================
//
// The mark bit on node.next says the NODE ITSELF is logically deleted:
//
//          pred ──────► curr ──╳───► next
//                              │
//                     (curr.next marked: curr is deleted)
//
// A marked next word is frozen: every CAS on it expects an unmarked value, so
// nothing can be linked after a deleted node.
//
// INVARIANTS:
// 1. List is always sorted by value (ascending), bounded by HEAD/TAIL
// 2. No two unmarked nodes hold the same value
// 3. HEAD and TAIL are never marked or removed
// 4. A node is retired exactly once, by the thread whose unlink CAS succeeds
//
// =============================================================================
// REMOVE (Two-Phase Delete)
// =============================================================================
//
// Phase 1: LOGICAL DELETE - CAS curr.next from (succ, 0) to (succ, 1).
//          This is the linearization point. Retry from find() on failure.
// Phase 2: PHYSICAL UNLINK - one attempt at CAS pred.next from curr to succ.
//          If it fails (pred got marked, or a node was inserted between
//          pred and curr), some later find() finishes the job.
//
// =============================================================================
// FIND (cooperative cleanup)
// =============================================================================
//
// find() walks from HEAD. Whenever curr is marked it tries to snip it:
//
// Before:  pred ──────► curr ──╳───► succ
// After:   pred ─────────────────────► succ      (curr retired)
//
// If that CAS fails, pred.next changed under us (pred was marked, or someone
// else snipped curr, or a node was inserted): restart from HEAD. Concurrent
// snips of one node race on the same word; exactly one wins.
//
// =============================================================================
//
pub struct LockFreeSet<G: Guard> {
    head: NodePtr<()>,
    adds: AtomicUsize,
    removes: AtomicUsize,
    /// Shared guard instance for deferred destruction.
    guard: G,
}

// Represents the window found for a value: `curr` is the first unmarked node
// whose value is not less than the search value, `pred` the node before it.
#[derive(Debug, Copy, Clone)]
struct Window {
    pred: NodePtr<()>,
    curr: NodePtr<()>,
}

// Safety: all shared mutation is by CAS on node links; reclamation through G.
unsafe impl<G: Guard> Send for LockFreeSet<G> {}
unsafe impl<G: Guard> Sync for LockFreeSet<G> {}

impl<G: Guard> LockFreeSet<G> {
    pub fn new() -> Self {
        LockFreeSet {
            head: LfNode::alloc_bounded_list(),
            adds: AtomicUsize::new(0),
            removes: AtomicUsize::new(0),
            guard: G::default(),
        }
    }

    /// Get the shared guard instance for this set.
    pub fn guard(&self) -> &G {
        &self.guard
    }

    // Core operation: find with cleanup. Caller must be pinned.
    //
    fn find(&self, value: i32) -> Window {
        'retry: loop {
            let mut pred = self.head;
            let mut curr = unsafe { MarkedPtr::unmask((*pred).get_next()) };

            loop {
                let mut succ = MarkedPtr::new(unsafe { (*curr).get_next() });

                while succ.is_marked() {
                    let snip = unsafe { (*pred).cas_next(curr, succ.as_ptr()) };
                    if snip.is_err() {
                        tracing::trace!(value, "snip failed, restarting find");
                        continue 'retry;
                    }

                    // We unlinked it, we retire it.
                    unsafe {
                        self.guard.defer_destroy(curr, LfNode::dealloc_ptr);
                    }

                    curr = succ.as_ptr();
                    succ = MarkedPtr::new(unsafe { (*curr).get_next() });
                }

                // TAIL is never marked and stops every search.
                if unsafe { (*curr).value() } >= value {
                    return Window { pred, curr };
                }

                pred = curr;
                curr = succ.as_ptr();
            }
        }
    }

    fn audit(&self) -> ListAudit {
        let _guard = G::pin();
        let mut audit = ListAudit::new();
        audit.record_counters(
            self.adds.load(Ordering::Acquire),
            self.removes.load(Ordering::Acquire),
        );

        let mut node = self.head;
        while !node.is_null() {
            unsafe {
                let next = MarkedPtr::new((*node).get_next());
                if !next.is_marked() {
                    audit.visit((*node).value());
                }
                node = next.as_ptr();
            }
        }

        audit
    }
}

impl<G: Guard> Default for LockFreeSet<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Guard> IntSet for LockFreeSet<G> {
    fn add(&self, value: i32) -> bool {
        if is_sentinel_value(value) {
            return false;
        }

        let _guard = G::pin();
        let new_node = LfNode::alloc(value, ptr::null_mut());

        loop {
            let Window { pred, curr } = self.find(value);

            unsafe {
                if (*curr).value() == value {
                    // Never published, free right away.
                    LfNode::dealloc_ptr(new_node);
                    return false;
                }

                (*new_node).set_next(curr);

                // Expecting an unmarked curr also fails if pred got marked.
                if (*pred).cas_next(curr, new_node).is_ok() {
                    self.adds.fetch_add(1, Ordering::Relaxed);
                    return true;
                }
            }

            tracing::trace!(value, "link CAS failed, retrying add");
        }
    }

    fn remove(&self, value: i32) -> bool {
        if is_sentinel_value(value) {
            return false;
        }

        let _guard = G::pin();

        loop {
            let Window { pred, curr } = self.find(value);

            unsafe {
                if (*curr).value() != value {
                    return false;
                }

                let succ = MarkedPtr::new((*curr).get_next());
                if succ.is_marked() {
                    // Another remover won; find() will clean up and report.
                    continue;
                }

                // LINEARIZATION POINT: logical delete.
                let marked = succ.with_mark(true);
                if (*curr).cas_next(succ.as_raw(), marked.as_raw()).is_err() {
                    tracing::trace!(value, "mark CAS failed, retrying remove");
                    continue;
                }
                self.removes.fetch_add(1, Ordering::Relaxed);

                // Best-effort physical unlink.
                if (*pred).cas_next(curr, succ.as_ptr()).is_ok() {
                    self.guard.defer_destroy(curr, LfNode::dealloc_ptr);
                } else {
                    tracing::trace!(value, "unlink deferred to a later find");
                }
                return true;
            }
        }
    }

    /// Read-only walk: no CAS, no helping, no restart.
    fn contains(&self, value: i32) -> bool {
        if is_sentinel_value(value) {
            return false;
        }

        let _guard = G::pin();
        let mut curr = self.head;

        unsafe {
            while (*curr).value() < value {
                curr = MarkedPtr::unmask((*curr).get_next());
            }
            (*curr).value() == value && !MarkedPtr::new((*curr).get_next()).is_marked()
        }
    }

    fn check(&self) -> Result<(), InvariantViolation> {
        self.audit().finish()
    }

    fn len(&self) -> usize {
        self.audit().members()
    }

    fn kind(&self) -> SetKind {
        SetKind::LockFree
    }
}

impl<G: Guard> Drop for LockFreeSet<G> {
    fn drop(&mut self) {
        // Marked nodes still linked are ours to free; unlinked ones were
        // retired to the guard.
        unsafe { LfNode::free_list(self.head) };
    }
}

// ============================================================================
// Tests - Unique to LockFreeSet
// ============================================================================
// Note: Common tests are in tests/int_set_tests.rs
