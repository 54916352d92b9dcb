//! Internal implementation details.
//!
//! These are pub(crate) and not intended for external use, apart from the
//! sentinel constants re-exported by the parent module.

pub mod marked_ptr;
pub mod node;
pub mod node_lock;
pub mod sequential_list;
pub mod validation;

pub(crate) use marked_ptr::MarkedPtr;
pub(crate) use node::{Node, NodePtr};
pub(crate) use node_lock::{LockedNode, LockedWindow, NodeLock};
pub(crate) use sequential_list::SequentialList;
pub(crate) use validation::ListAudit;
