use parking_lot::Mutex;

use crate::data_structures::internal::SequentialList;
use crate::data_structures::internal::node::is_sentinel_value;
use crate::data_structures::{IntSet, SetKind};
use crate::error::InvariantViolation;

/// A sorted list serialized by one mutex.
///
/// At most one operation runs at a time, system-wide. Simplest correctness
/// argument, worst throughput under contention.
pub struct GlobalLockSet {
    list: Mutex<SequentialList>,
}

impl GlobalLockSet {
    pub fn new() -> Self {
        GlobalLockSet {
            list: Mutex::new(SequentialList::new()),
        }
    }
}

impl Default for GlobalLockSet {
    fn default() -> Self {
        Self::new()
    }
}

impl IntSet for GlobalLockSet {
    fn add(&self, value: i32) -> bool {
        if is_sentinel_value(value) {
            return false;
        }
        self.list.lock().add(value)
    }

    fn remove(&self, value: i32) -> bool {
        if is_sentinel_value(value) {
            return false;
        }
        self.list.lock().remove(value)
    }

    fn contains(&self, value: i32) -> bool {
        if is_sentinel_value(value) {
            return false;
        }
        self.list.lock().contains(value)
    }

    fn check(&self) -> Result<(), InvariantViolation> {
        self.list.lock().audit().finish()
    }

    fn len(&self) -> usize {
        self.list.lock().audit().members()
    }

    fn kind(&self) -> SetKind {
        SetKind::GlobalLock
    }
}
