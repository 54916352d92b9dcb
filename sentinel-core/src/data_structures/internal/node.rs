use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

use crate::data_structures::MarkedPtr;

/// Value held by the head sentinel.
pub const HEAD_VALUE: i32 = i32::MIN;
/// Value held by the tail sentinel.
pub const TAIL_VALUE: i32 = i32::MAX;

/// Sentinel values are never members of a set.
#[inline]
pub fn is_sentinel_value(value: i32) -> bool {
    value == HEAD_VALUE || value == TAIL_VALUE
}

pub(crate) type NodePtr<S> = *mut Node<S>;

///
/// One node layout shared by every set. The list is always bounded:
///
/// ```text
/// ┌──────────┐    ┌──────┐    ┌──────┐    ┌──────────┐
/// │ HEAD MIN │───►│  10  │───►│  20  │───►│ TAIL MAX │───► null
/// └──────────┘    └──────┘    └──────┘    └──────────┘
/// ```
///
/// What varies between sets is `S`, the per-node synchronization state:
///
/// - `()` for the coarse sets (the whole list sits behind one lock) and for
///   the lock-free set (the mark lives in the low bit of `next`)
/// - `NodeLock` for the fine-grained sets (private lock, counters, mark flag)
///
/// `next` is always atomic, even for sets that only touch it under a lock,
/// so that optimistic traversals can read it without a data race.
///
/// Every `next` points to a node with a strictly greater value, at all times,
/// even after the owning node was unlinked. Lock acquisition in ascending
/// value order follows from this.
///
pub(crate) struct Node<S> {
    value: i32,
    next: AtomicPtr<Node<S>>,
    pub(crate) sync: S,
}

impl<S: Default> Node<S> {
    /// Allocate a node on the heap and leak it as a raw pointer.
    pub(crate) fn alloc(value: i32, next: NodePtr<S>) -> NodePtr<S> {
        Box::into_raw(Box::new(Node {
            value,
            next: AtomicPtr::new(next),
            sync: S::default(),
        }))
    }

    /// Allocate the two sentinels, linked head -> tail. Returns the head.
    pub(crate) fn alloc_bounded_list() -> NodePtr<S> {
        let tail = Self::alloc(TAIL_VALUE, ptr::null_mut());
        Self::alloc(HEAD_VALUE, tail)
    }
}

impl<S> Node<S> {
    #[inline]
    pub(crate) fn value(&self) -> i32 {
        self.value
    }

    #[inline]
    pub(crate) fn is_tail(&self) -> bool {
        self.get_next().is_null()
    }

    // =========================================================================
    // Next pointer accessors
    // =========================================================================

    /// Load next pointer (Acquire ordering). May carry a mark bit.
    #[inline]
    pub(crate) fn get_next(&self) -> NodePtr<S> {
        self.next.load(Ordering::Acquire)
    }

    /// Store next pointer (Release ordering)
    #[inline]
    pub(crate) fn set_next(&self, ptr: NodePtr<S>) {
        self.next.store(ptr, Ordering::Release)
    }

    /// CAS next pointer (AcqRel/Acquire ordering)
    #[inline]
    pub(crate) fn cas_next(
        &self,
        expected: NodePtr<S>,
        new: NodePtr<S>,
    ) -> Result<NodePtr<S>, NodePtr<S>> {
        self.next
            .compare_exchange(expected, new, Ordering::AcqRel, Ordering::Acquire)
    }

    /// Deallocate a node created by [`Node::alloc`].
    ///
    /// # Safety
    /// - `ptr` must come from `Node::alloc` and be freed only once
    /// - no thread may access the node afterwards
    pub(crate) unsafe fn dealloc_ptr(ptr: NodePtr<S>) {
        unsafe { drop(Box::from_raw(ptr)) };
    }

    /// Free every node reachable from `head`, sentinels included. Mark bits
    /// are ignored, so logically deleted but still linked nodes go too.
    ///
    /// # Safety
    /// Caller has exclusive access to the list (used from `Drop`).
    pub(crate) unsafe fn free_list(head: NodePtr<S>) {
        let mut curr = head;
        while !curr.is_null() {
            unsafe {
                let next = MarkedPtr::unmask((*curr).get_next());
                Self::dealloc_ptr(curr);
                curr = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_list_shape() {
        let head = Node::<()>::alloc_bounded_list();
        unsafe {
            assert_eq!((*head).value(), HEAD_VALUE);
            assert!(!(*head).is_tail());
            let tail = (*head).get_next();
            assert_eq!((*tail).value(), TAIL_VALUE);
            assert!((*tail).is_tail());
            Node::free_list(head);
        }
    }

    #[test]
    fn test_nodes_leave_room_for_mark_bit() {
        assert!(std::mem::align_of::<Node<()>>() >= 2);
    }

    #[test]
    fn test_sentinel_values() {
        assert!(is_sentinel_value(i32::MIN));
        assert!(is_sentinel_value(i32::MAX));
        assert!(!is_sentinel_value(0));
        assert!(!is_sentinel_value(-1));
    }
}
