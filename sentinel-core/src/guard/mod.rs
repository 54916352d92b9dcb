//! Guard trait for memory reclamation strategies.
//!
//! Sets whose readers walk the list without holding the node's lock
//! (`OptimisticSet`, `LazySet`, `LockFreeSet`) cannot free an unlinked node
//! right away: another thread may still be standing on it. They are generic
//! over a `Guard` that decides when a retired node is actually released:
//!
//! ```text
//! LockFreeSet<G: Guard>
//!     │
//!     ├── LockFreeSet<EpochGuard>      (production, sentinel-crossbeam)
//!     └── LockFreeSet<DeferredGuard>   (testing)
//! ```
//!
//! The blocking sets never need a guard: under the global locks nothing is
//! shared, and hand-over-hand traversal guarantees nobody can reach a node
//! whose predecessor lock the remover holds.

mod deferred_guard;

pub use deferred_guard::DeferredGuard;

/// A memory reclamation guard that protects concurrent access to nodes.
///
/// # Safety Contract
///
/// Implementations must ensure that nodes passed to `defer_destroy` are not
/// freed while any thread that pinned before the call is still pinned.
///
/// # Design Note
///
/// Guards are stored in sets and must be `Send + Sync`. The stored guard is
/// used for destruction scheduling; thread pinning happens per-operation
/// through [`Guard::pin`].
///
pub trait Guard: Sized + Default + Send + Sync {
    /// An active guard that protects reads for its lifetime.
    ///
    /// For epoch-based guards this is a pinned `crossbeam_epoch::Guard`.
    /// For deferred guards it is `()` since nothing is freed before the set
    /// itself is dropped.
    ///
    type ReadGuard: Sized;

    /// Pin an active read guard covering one whole set operation.
    fn pin() -> Self::ReadGuard;

    /// Schedule a node for deferred destruction.
    ///
    /// # Safety
    ///
    /// - `node` must be a valid pointer previously allocated by the set
    /// - `node` must be unlinked (not reachable by a fresh traversal)
    /// - `node` must be retired exactly once
    /// - `dealloc` must be the correct deallocation function for `node`
    ///
    unsafe fn defer_destroy<N>(&self, node: *mut N, dealloc: unsafe fn(*mut N));

    /// Short name used in logs and benchmark ids.
    fn name() -> &'static str;
}
