use std::ptr;

use crate::data_structures::internal::node::is_sentinel_value;
use crate::data_structures::internal::{ListAudit, LockedNode, LockedWindow, NodeLock, NodePtr};
use crate::data_structures::{IntSet, SetKind};
use crate::error::InvariantViolation;
use crate::guard::Guard;

///
/// Sorted list with per-node locks and lock-free searches.
///
/// 1. Search without locks for `pred`/`curr`.
/// 2. Lock `pred`, then `curr`.
/// 3. Validate: walk from head again and make sure `pred` is still
///    reachable and still links to `curr`.
/// 4. On success act and unlock; on failure unlock and restart from head.
///
/// Retries are unbounded. Under pathological contention a thread can keep
/// failing validation; nothing here backs off.
///
/// Unlinked nodes are retired to the guard `G`: another thread may still be
/// searching through them, or waiting on their lock.
///
pub struct OptimisticSet<G: Guard> {
    head: NodePtr<NodeLock>,
    guard: G,
}

// Safety: shared mutation goes through node locks; reclamation through G.
unsafe impl<G: Guard> Send for OptimisticSet<G> {}
unsafe impl<G: Guard> Sync for OptimisticSet<G> {}

impl<G: Guard> OptimisticSet<G> {
    pub fn new() -> Self {
        OptimisticSet {
            head: LockedNode::alloc_bounded_list(),
            guard: G::default(),
        }
    }

    pub fn guard(&self) -> &G {
        &self.guard
    }

    /// Unlocked search. The result may be stale by the time it is used.
    ///
    /// Caller must be pinned.
    fn search(&self, value: i32) -> (&LockedNode, &LockedNode) {
        unsafe {
            let mut pred: &LockedNode = &*self.head;
            let mut curr: &LockedNode = &*pred.get_next();
            while curr.value() < value {
                pred = curr;
                curr = &*curr.get_next();
            }
            (pred, curr)
        }
    }

    /// `pred` is reachable from head and links to `curr`.
    ///
    /// Caller holds both locks and is pinned.
    fn validate_window(&self, window: &LockedWindow<'_>) -> bool {
        let pred = window.pred();
        let mut node: &LockedNode = unsafe { &*self.head };

        while node.value() <= pred.value() {
            if ptr::eq(node, pred) {
                return window.is_linked();
            }
            if node.is_tail() {
                return false;
            }
            node = unsafe { &*node.get_next() };
        }
        false
    }

    /// Search, lock and validate until a consistent window is held.
    fn locate(&self, value: i32) -> LockedWindow<'_> {
        loop {
            let (pred, curr) = self.search(value);
            let window = LockedWindow::lock_pair(pred, curr);
            if self.validate_window(&window) {
                return window;
            }
            tracing::trace!(value, "optimistic validation failed, retrying");
        }
    }

    fn audit(&self) -> ListAudit {
        let _guard = G::pin();
        let mut audit = ListAudit::new();
        let mut node = self.head;

        while !node.is_null() {
            unsafe {
                let counters = (*node).counters();
                audit.visit((*node).value());
                audit.record_counters(counters.adds, counters.removes);
                node = (*node).get_next();
            }
        }

        audit
    }
}

impl<G: Guard> Default for OptimisticSet<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Guard> IntSet for OptimisticSet<G> {
    fn add(&self, value: i32) -> bool {
        if is_sentinel_value(value) {
            return false;
        }

        let _guard = G::pin();
        let mut window = self.locate(value);
        if window.curr().value() == value {
            return false;
        }
        window.insert(value);
        true
    }

    fn remove(&self, value: i32) -> bool {
        if is_sentinel_value(value) {
            return false;
        }

        let _guard = G::pin();
        let window = self.locate(value);
        if window.curr().value() != value {
            return false;
        }

        let removed = window.unlink();
        unsafe {
            self.guard.defer_destroy(removed, LockedNode::dealloc_ptr);
        }
        true
    }

    /// Validated like the mutators: locks the window too.
    fn contains(&self, value: i32) -> bool {
        if is_sentinel_value(value) {
            return false;
        }

        let _guard = G::pin();
        self.locate(value).curr().value() == value
    }

    fn check(&self) -> Result<(), InvariantViolation> {
        self.audit().finish()
    }

    fn len(&self) -> usize {
        self.audit().members()
    }

    fn kind(&self) -> SetKind {
        SetKind::Optimistic
    }
}

impl<G: Guard> Drop for OptimisticSet<G> {
    fn drop(&mut self) {
        // Retired nodes are no longer reachable and belong to the guard.
        unsafe { LockedNode::free_list(self.head) };
    }
}
