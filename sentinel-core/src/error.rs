//! Error types.
//!
//! Set operations never fail; these only describe broken invariants found by
//! an audit, and configuration that names no known variant.

use thiserror::Error;

/// A structural invariant found broken by [`IntSet::check`].
///
/// Any of these means an algorithm bug, never a runtime condition.
///
/// [`IntSet::check`]: crate::data_structures::IntSet::check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("list is unordered: {previous} before {value}")]
    Unordered { previous: i32, value: i32 },

    #[error("list has duplicates: {0}")]
    Duplicate(i32),

    #[error("list starts at {0} instead of the head sentinel")]
    HeadSentinel(i32),

    #[error("list ends at {0} instead of the tail sentinel")]
    TailSentinel(i32),

    #[error("list has a total size of {actual} but it should be {expected}")]
    SizeMismatch { actual: i64, expected: i64 },
}

/// A set variant name that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown set kind `{0}`, expected one of: global-lock, global-rw-lock, hand-over-hand, optimistic, lazy, lock-free")]
pub struct UnknownSetKind(pub String);
