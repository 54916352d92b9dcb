use std::fmt;
use std::str::FromStr;

use crate::data_structures::{
    GlobalLockSet, GlobalRwLockSet, HandOverHandSet, LazySet, LockFreeSet, OptimisticSet,
};
use crate::error::{InvariantViolation, UnknownSetKind};
use crate::guard::Guard;

/// A concurrent set of `i32`, shared by reference across threads.
///
/// `i32::MIN` and `i32::MAX` are reserved for the sentinels and are never
/// members: `add`, `remove` and `contains` all return `false` for them.
///
/// # Design
///
/// Every implementation is a sorted singly-linked list between two sentinel
/// nodes; they differ only in how they synchronize:
///
/// ```text
/// GlobalLockSet        one mutex around everything
/// GlobalRwLockSet      one rw lock, contains() shares it
/// HandOverHandSet      per-node locks, lock coupling down the list
/// OptimisticSet<G>     unlocked search, lock pair, re-validate, retry
/// LazySet<G>           optimistic + mark before unlink, lock-free contains()
/// LockFreeSet<G>       CAS on (next, mark) words, cooperative unlinking
/// ```
///
pub trait IntSet: Send + Sync {
    /// Insert `value`. Returns `true` if it was absent.
    fn add(&self, value: i32) -> bool;

    /// Remove `value`. Returns `true` if it was present.
    fn remove(&self, value: i32) -> bool;

    /// Returns `true` iff `value` is currently a member.
    fn contains(&self, value: i32) -> bool;

    /// Audit the structural invariants.
    ///
    /// Memory-safe at any time, but only meaningful when no mutator runs
    /// concurrently: a racing `add` or `remove` can produce a spurious
    /// size mismatch.
    fn check(&self) -> Result<(), InvariantViolation>;

    /// Number of members. Exact only with no concurrent mutators.
    fn len(&self) -> usize;

    /// Which algorithm this is.
    fn kind(&self) -> SetKind;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fail fast on a broken invariant.
    ///
    /// # Panics
    /// Panics when [`IntSet::check`] reports a violation. Call it only with
    /// no concurrent mutators.
    fn validate(&self) {
        if let Err(violation) = self.check() {
            tracing::error!(kind = %self.kind(), %violation, "set invariant violated");
            panic!("{} set invariant violated: {}", self.kind(), violation);
        }
    }
}

/// Progress guarantee offered by a set variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Every operation may wait on a lock.
    Blocking,
    /// `contains` never waits or retries; mutators take locks.
    LockFreeReads,
    /// No operation ever waits on another thread.
    LockFree,
}

/// The six synchronization disciplines, selectable at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetKind {
    GlobalLock,
    GlobalRwLock,
    HandOverHand,
    Optimistic,
    Lazy,
    LockFree,
}

impl SetKind {
    pub const ALL: [SetKind; 6] = [
        SetKind::GlobalLock,
        SetKind::GlobalRwLock,
        SetKind::HandOverHand,
        SetKind::Optimistic,
        SetKind::Lazy,
        SetKind::LockFree,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SetKind::GlobalLock => "global-lock",
            SetKind::GlobalRwLock => "global-rw-lock",
            SetKind::HandOverHand => "hand-over-hand",
            SetKind::Optimistic => "optimistic",
            SetKind::Lazy => "lazy",
            SetKind::LockFree => "lock-free",
        }
    }

    pub fn progress(self) -> Progress {
        match self {
            SetKind::GlobalLock
            | SetKind::GlobalRwLock
            | SetKind::HandOverHand
            | SetKind::Optimistic => Progress::Blocking,
            SetKind::Lazy => Progress::LockFreeReads,
            SetKind::LockFree => Progress::LockFree,
        }
    }

    /// Construct an empty set of this kind. `G` is only used by the variants
    /// that need deferred reclamation.
    pub fn build<G: Guard + 'static>(self) -> Box<dyn IntSet> {
        tracing::debug!(kind = self.name(), guard = G::name(), "building int set");
        match self {
            SetKind::GlobalLock => Box::new(GlobalLockSet::new()),
            SetKind::GlobalRwLock => Box::new(GlobalRwLockSet::new()),
            SetKind::HandOverHand => Box::new(HandOverHandSet::new()),
            SetKind::Optimistic => Box::new(OptimisticSet::<G>::new()),
            SetKind::Lazy => Box::new(LazySet::<G>::new()),
            SetKind::LockFree => Box::new(LockFreeSet::<G>::new()),
        }
    }
}

impl fmt::Display for SetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SetKind {
    type Err = UnknownSetKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        SetKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| UnknownSetKind(s.to_string()))
    }
}
