//! Crossbeam-based reclamation for sentinel-core sets.
//!
//! This crate provides `EpochGuard`, an implementation of the `Guard` trait
//! using crossbeam-epoch. It is the guard to use outside of tests.
//!
//! # Usage
//!
//! ```
//! use sentinel_core::{IntSet, LockFreeSet, SetKind};
//! use sentinel_crossbeam::EpochGuard;
//!
//! let set: LockFreeSet<EpochGuard> = LockFreeSet::new();
//! set.add(42);
//!
//! // Or pick the algorithm at run time.
//! let any = SetKind::Optimistic.build::<EpochGuard>();
//! any.add(42);
//! assert_eq!(set.contains(42), any.contains(42));
//! ```

pub mod epoch_guard;

pub use epoch_guard::EpochGuard;
