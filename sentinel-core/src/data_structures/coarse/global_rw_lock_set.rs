use parking_lot::RwLock;

use crate::data_structures::internal::SequentialList;
use crate::data_structures::internal::node::is_sentinel_value;
use crate::data_structures::{IntSet, SetKind};
use crate::error::InvariantViolation;

/// A sorted list behind one reader/writer lock.
///
/// `contains` calls share the read lock and run in parallel; `add` and
/// `remove` take the write lock and exclude everything else.
pub struct GlobalRwLockSet {
    list: RwLock<SequentialList>,
}

impl GlobalRwLockSet {
    pub fn new() -> Self {
        GlobalRwLockSet {
            list: RwLock::new(SequentialList::new()),
        }
    }
}

impl Default for GlobalRwLockSet {
    fn default() -> Self {
        Self::new()
    }
}

impl IntSet for GlobalRwLockSet {
    fn add(&self, value: i32) -> bool {
        if is_sentinel_value(value) {
            return false;
        }
        self.list.write().add(value)
    }

    fn remove(&self, value: i32) -> bool {
        if is_sentinel_value(value) {
            return false;
        }
        self.list.write().remove(value)
    }

    fn contains(&self, value: i32) -> bool {
        if is_sentinel_value(value) {
            return false;
        }
        self.list.read().contains(value)
    }

    fn check(&self) -> Result<(), InvariantViolation> {
        self.list.read().audit().finish()
    }

    fn len(&self) -> usize {
        self.list.read().audit().members()
    }

    fn kind(&self) -> SetKind {
        SetKind::GlobalRwLock
    }
}
