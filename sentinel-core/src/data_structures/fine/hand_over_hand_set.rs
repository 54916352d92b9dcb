use crate::data_structures::internal::node::is_sentinel_value;
use crate::data_structures::internal::{ListAudit, LockedNode, LockedWindow, NodePtr, NodeLock};
use crate::data_structures::{IntSet, SetKind};
use crate::error::InvariantViolation;

///
/// Sorted list with one lock per node, traversed by lock coupling.
///
/// ```text
///  locked     locked
/// ┌──────┐   ┌──────┐   ┌──────┐
/// │ pred │──►│ curr │──►│ next │   advance(): unlock pred, lock next
/// └──────┘   └──────┘   └──────┘
/// ```
///
/// Every operation walks a [`LockedWindow`] from the head until `curr` is the
/// first node not less than the key, then acts while both locks are held.
/// All threads acquire locks in list order, so there is no deadlock, and a
/// window never observes a half-done change, so there are no retries.
///
/// Reclamation needs no guard: to reach a node a thread must first hold its
/// predecessor's lock, which the remover holds while unlinking. Once both
/// locks are released nobody can still reference the node, and it is freed
/// on the spot.
///
pub struct HandOverHandSet {
    head: NodePtr<NodeLock>,
}

// Safety: nodes are only reached through their predecessor's lock.
unsafe impl Send for HandOverHandSet {}
unsafe impl Sync for HandOverHandSet {}

impl HandOverHandSet {
    pub fn new() -> Self {
        HandOverHandSet {
            head: LockedNode::alloc_bounded_list(),
        }
    }

    /// Walk to the window whose `curr` is the first node >= `value`.
    fn locate(&self, value: i32) -> LockedWindow<'_> {
        // Safety: head lives as long as the set.
        let mut window = unsafe { LockedWindow::from_head(self.head) };
        while window.curr().value() < value {
            window = window.advance();
        }
        window
    }

    fn audit(&self) -> ListAudit {
        let mut audit = ListAudit::new();

        // Safety: head lives as long as the set.
        let mut window = unsafe { LockedWindow::from_head(self.head) };
        audit.visit(window.pred().value());
        let counters = window.pred_counters();
        audit.record_counters(counters.adds, counters.removes);

        loop {
            audit.visit(window.curr().value());
            let counters = window.curr_counters();
            audit.record_counters(counters.adds, counters.removes);

            if window.curr().is_tail() {
                break;
            }
            window = window.advance();
        }

        audit
    }
}

impl Default for HandOverHandSet {
    fn default() -> Self {
        Self::new()
    }
}

impl IntSet for HandOverHandSet {
    fn add(&self, value: i32) -> bool {
        if is_sentinel_value(value) {
            return false;
        }

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

        let window = self.locate(value);
        if window.curr().value() != value {
            return false;
        }

        let removed = window.unlink();
        // Safety: unlinked under both locks, both released, unreachable.
        unsafe { LockedNode::dealloc_ptr(removed) };
        true
    }

    fn contains(&self, value: i32) -> bool {
        if is_sentinel_value(value) {
            return false;
        }
        self.locate(value).curr().value() == value
    }

    fn check(&self) -> Result<(), InvariantViolation> {
        self.audit().finish()
    }

    fn len(&self) -> usize {
        self.audit().members()
    }

    fn kind(&self) -> SetKind {
        SetKind::HandOverHand
    }
}

impl Drop for HandOverHandSet {
    fn drop(&mut self) {
        unsafe { LockedNode::free_list(self.head) };
    }
}
