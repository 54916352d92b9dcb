use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, MutexGuard};

use crate::data_structures::internal::node::{Node, NodePtr};

/// Mutation counters owned by one node.
///
/// `adds` counts nodes linked right after this node, `removes` counts nodes
/// unlinked from right after it. When this node is itself unlinked, both are
/// folded into the predecessor so the totals survive.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Counters {
    pub(crate) adds: usize,
    pub(crate) removes: usize,
}

/// Per-node synchronization state of the fine-grained sets.
///
/// The lock guards the counters and serializes changes to `next`. The mark is
/// only ever set by `LazySet`, and only while both window locks are held.
#[derive(Debug, Default)]
pub(crate) struct NodeLock {
    counters: Mutex<Counters>,
    marked: AtomicBool,
}

pub(crate) type LockedNode = Node<NodeLock>;

impl Node<NodeLock> {
    #[inline]
    pub(crate) fn is_marked(&self) -> bool {
        self.sync.marked.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn mark(&self) {
        self.sync.marked.store(true, Ordering::Release)
    }

    /// Snapshot the counters under the node's lock.
    pub(crate) fn counters(&self) -> Counters {
        *self.sync.counters.lock()
    }

    fn lock_counters(&self) -> MutexGuard<'_, Counters> {
        self.sync.counters.lock()
    }
}

///
/// Two adjacent nodes, both locked: `pred` and its successor `curr`.
///
/// This is the only way the fine-grained sets take node locks, which pins
/// down the ordering contract:
///
/// - a window always locks `pred` before `curr`, and `curr` always holds a
///   greater value than `pred`, so locks are taken in ascending list order
/// - [`LockedWindow::advance`] releases `pred` before locking the next node,
///   so at most two locks are held, and the new lock is only taken while its
///   immediate predecessor is held
/// - dropping the window releases `curr` first, then `pred`
///
// Field order matters: fields drop in declaration order.
pub(crate) struct LockedWindow<'a> {
    curr_counters: MutexGuard<'a, Counters>,
    pred_counters: MutexGuard<'a, Counters>,
    pred: &'a LockedNode,
    curr: &'a LockedNode,
}

impl<'a> LockedWindow<'a> {
    /// Lock `head` and its successor.
    ///
    /// # Safety
    /// `head` must be a live head sentinel valid for `'a`.
    pub(crate) unsafe fn from_head(head: NodePtr<NodeLock>) -> Self {
        let pred: &'a LockedNode = unsafe { &*head };
        let pred_counters = pred.lock_counters();
        // Read under pred's lock: nobody can swap it out from under us.
        let curr: &'a LockedNode = unsafe { &*pred.get_next() };
        let curr_counters = curr.lock_counters();
        LockedWindow {
            curr_counters,
            pred_counters,
            pred,
            curr,
        }
    }

    /// Lock a pair found by an unlocked traversal. The pair may be stale;
    /// callers validate it before trusting it.
    pub(crate) fn lock_pair(pred: &'a LockedNode, curr: &'a LockedNode) -> Self {
        debug_assert!(pred.value() < curr.value());
        let pred_counters = pred.lock_counters();
        let curr_counters = curr.lock_counters();
        LockedWindow {
            curr_counters,
            pred_counters,
            pred,
            curr,
        }
    }

    /// Slide one node forward: release `pred`, lock `curr.next`.
    ///
    /// Must not be called when `curr` is the tail.
    pub(crate) fn advance(self) -> Self {
        let LockedWindow {
            curr_counters,
            pred_counters,
            curr,
            ..
        } = self;
        drop(pred_counters);

        // Safety: we hold curr's lock, so curr.next cannot be unlinked (let
        // alone freed) until we lock it and move on.
        let next: &'a LockedNode = unsafe { &*curr.get_next() };
        let next_counters = next.lock_counters();

        LockedWindow {
            curr_counters: next_counters,
            pred_counters: curr_counters,
            pred: curr,
            curr: next,
        }
    }

    #[inline]
    pub(crate) fn pred(&self) -> &'a LockedNode {
        self.pred
    }

    #[inline]
    pub(crate) fn curr(&self) -> &'a LockedNode {
        self.curr
    }

    /// Counters of `curr`, read under its lock.
    pub(crate) fn curr_counters(&self) -> Counters {
        *self.curr_counters
    }

    /// Counters of `pred`, read under its lock.
    pub(crate) fn pred_counters(&self) -> Counters {
        *self.pred_counters
    }

    /// Whether `pred` still links straight to `curr`.
    pub(crate) fn is_linked(&self) -> bool {
        std::ptr::eq(self.pred.get_next(), self.curr)
    }

    /// Link a new node holding `value` between `pred` and `curr`.
    pub(crate) fn insert(&mut self, value: i32) {
        let curr_ptr = self.curr as *const LockedNode as NodePtr<NodeLock>;
        let new_node = LockedNode::alloc(value, curr_ptr);
        self.pred.set_next(new_node);
        self.pred_counters.adds += 1;
    }

    /// Unlink `curr`, folding its counters into `pred`, and release both
    /// locks. Returns the unlinked node, which the caller now owns.
    pub(crate) fn unlink(self) -> NodePtr<NodeLock> {
        let LockedWindow {
            curr_counters,
            mut pred_counters,
            pred,
            curr,
        } = self;

        pred_counters.adds += curr_counters.adds;
        pred_counters.removes += curr_counters.removes + 1;
        pred.set_next(curr.get_next());

        drop(curr_counters);
        drop(pred_counters);
        curr as *const LockedNode as NodePtr<NodeLock>
    }
}
