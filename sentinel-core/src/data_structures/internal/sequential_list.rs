use crate::data_structures::internal::node::{Node, NodePtr, is_sentinel_value};
use crate::data_structures::internal::validation::ListAudit;

type SeqNode = Node<()>;

/// The bare sentinel-bounded list, with no synchronization of its own.
///
/// Coarse-grained sets keep one of these behind a single lock; every method
/// assumes the caller holds that lock (shared for `&self`, exclusive for
/// `&mut self`). Unlinked nodes are freed immediately since no other thread
/// can observe the list.
///
pub(crate) struct SequentialList {
    head: NodePtr<()>,
    adds: usize,
    removes: usize,
}

// Safety: the list exclusively owns its nodes; shared access only reads.
unsafe impl Send for SequentialList {}
unsafe impl Sync for SequentialList {}

impl SequentialList {
    pub(crate) fn new() -> Self {
        SequentialList {
            head: SeqNode::alloc_bounded_list(),
            adds: 0,
            removes: 0,
        }
    }

    /// Returns `(previous, current)` where `current` is the first node whose
    /// value is not less than `value`. The tail stops every search.
    fn locate(&self, value: i32) -> (NodePtr<()>, NodePtr<()>) {
        debug_assert!(!is_sentinel_value(value));
        let mut previous = self.head;
        let mut current = unsafe { (*previous).get_next() };

        unsafe {
            while (*current).value() < value {
                previous = current;
                current = (*current).get_next();
            }
        }

        (previous, current)
    }

    pub(crate) fn add(&mut self, value: i32) -> bool {
        let (previous, current) = self.locate(value);

        unsafe {
            if (*current).value() == value {
                return false;
            }
            (*previous).set_next(SeqNode::alloc(value, current));
        }

        self.adds += 1;
        true
    }

    pub(crate) fn remove(&mut self, value: i32) -> bool {
        let (previous, current) = self.locate(value);

        unsafe {
            if (*current).value() != value {
                return false;
            }
            (*previous).set_next((*current).get_next());
            SeqNode::dealloc_ptr(current);
        }

        self.removes += 1;
        true
    }

    pub(crate) fn contains(&self, value: i32) -> bool {
        let (_, current) = self.locate(value);
        unsafe { (*current).value() == value }
    }

    pub(crate) fn audit(&self) -> ListAudit {
        let mut audit = ListAudit::new();
        audit.record_counters(self.adds, self.removes);

        let mut node = self.head;
        while !node.is_null() {
            unsafe {
                audit.visit((*node).value());
                node = (*node).get_next();
            }
        }

        audit
    }
}

impl Drop for SequentialList {
    fn drop(&mut self) {
        unsafe { SeqNode::free_list(self.head) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_list_operations() {
        let mut list = SequentialList::new();
        assert!(list.add(5));
        assert!(list.add(3));
        assert!(!list.add(5));
        assert!(list.contains(3));
        assert!(list.remove(3));
        assert!(!list.contains(3));
        assert!(!list.remove(3));

        let audit = list.audit();
        assert_eq!(audit.members(), 1);
        assert_eq!(audit.finish(), Ok(()));
    }

    #[test]
    fn test_audit_catches_lost_counter() {
        let mut list = SequentialList::new();
        list.add(1);
        list.add(2);
        list.adds -= 1;

        assert!(list.audit().finish().is_err());
    }
}
