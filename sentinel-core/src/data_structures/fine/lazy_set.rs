use crate::data_structures::internal::node::is_sentinel_value;
use crate::data_structures::internal::{ListAudit, LockedNode, LockedWindow, NodeLock, NodePtr};
use crate::data_structures::{IntSet, SetKind};
use crate::error::InvariantViolation;
use crate::guard::Guard;

///
/// Optimistic locking with lazy (two-phase) deletion.
///
/// Remove, holding both window locks:
///
/// ```text
/// Step 1 - mark curr (logical delete, linearization point):
///          pred ──────► curr(marked) ──────► next
///
/// Step 2 - unlink:
///          pred ─────────────────────────────► next
/// ```
///
/// Because a node is marked before it becomes unreachable, a window can be
/// validated locally: neither node marked and `pred.next == curr`. No walk
/// from head is needed.
///
/// `contains` takes no lock and never retries: it walks from head and
/// reports the target as present only if it is not marked. A node that is
/// marked but not yet unlinked reads as absent.
///
pub struct LazySet<G: Guard> {
    head: NodePtr<NodeLock>,
    guard: G,
}

// Safety: shared mutation goes through node locks; reclamation through G.
unsafe impl<G: Guard> Send for LazySet<G> {}
unsafe impl<G: Guard> Sync for LazySet<G> {}

impl<G: Guard> LazySet<G> {
    pub fn new() -> Self {
        LazySet {
            head: LockedNode::alloc_bounded_list(),
            guard: G::default(),
        }
    }

    pub fn guard(&self) -> &G {
        &self.guard
    }

    /// Unlocked search. Caller must be pinned.
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

    fn validate_window(window: &LockedWindow<'_>) -> bool {
        !window.pred().is_marked() && !window.curr().is_marked() && window.is_linked()
    }

    fn locate(&self, value: i32) -> LockedWindow<'_> {
        loop {
            let (pred, curr) = self.search(value);
            let window = LockedWindow::lock_pair(pred, curr);
            if Self::validate_window(&window) {
                return window;
            }
            tracing::trace!(value, "lazy validation failed, retrying");
        }
    }

    /// Marked nodes are skipped as members; their counters still count, so
    /// a marked node left linked shows up as a size mismatch.
    fn audit(&self) -> ListAudit {
        let _guard = G::pin();
        let mut audit = ListAudit::new();
        let mut node = self.head;

        while !node.is_null() {
            unsafe {
                let counters = (*node).counters();
                audit.record_counters(counters.adds, counters.removes);
                if !(*node).is_marked() {
                    audit.visit((*node).value());
                }
                node = (*node).get_next();
            }
        }

        audit
    }
}

impl<G: Guard> Default for LazySet<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Guard> IntSet for LazySet<G> {
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

        window.curr().mark();
        let removed = window.unlink();
        unsafe {
            self.guard.defer_destroy(removed, LockedNode::dealloc_ptr);
        }
        true
    }

    fn contains(&self, value: i32) -> bool {
        if is_sentinel_value(value) {
            return false;
        }

        let _guard = G::pin();
        let (_, curr) = self.search(value);
        curr.value() == value && !curr.is_marked()
    }

    fn check(&self) -> Result<(), InvariantViolation> {
        self.audit().finish()
    }

    fn len(&self) -> usize {
        self.audit().members()
    }

    fn kind(&self) -> SetKind {
        SetKind::Lazy
    }
}

impl<G: Guard> Drop for LazySet<G> {
    fn drop(&mut self) {
        unsafe { LockedNode::free_list(self.head) };
    }
}
