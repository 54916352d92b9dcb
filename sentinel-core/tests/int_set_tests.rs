use std::sync::Arc;

use rstest::rstest;
use sentinel_core::common_tests::int_set_core_tests::*;
use sentinel_core::{DeferredGuard, IntSet, SetKind};

fn deferred_set(kind: SetKind) -> Arc<dyn IntSet> {
    Arc::from(kind.build::<DeferredGuard>())
}

#[rstest]
#[case::global_lock(SetKind::GlobalLock)]
#[case::global_rw_lock(SetKind::GlobalRwLock)]
#[case::hand_over_hand(SetKind::HandOverHand)]
#[case::optimistic(SetKind::Optimistic)]
#[case::lazy(SetKind::Lazy)]
#[case::lock_free(SetKind::LockFree)]
fn test_end_to_end(#[case] kind: SetKind) {
    test_end_to_end_example(&*deferred_set(kind));
}

#[rstest]
#[case::global_lock(SetKind::GlobalLock)]
#[case::global_rw_lock(SetKind::GlobalRwLock)]
#[case::hand_over_hand(SetKind::HandOverHand)]
#[case::optimistic(SetKind::Optimistic)]
#[case::lazy(SetKind::Lazy)]
#[case::lock_free(SetKind::LockFree)]
fn test_basic(#[case] kind: SetKind) {
    test_basic_operations(&*deferred_set(kind));
}

#[rstest]
#[case::global_lock(SetKind::GlobalLock)]
#[case::global_rw_lock(SetKind::GlobalRwLock)]
#[case::hand_over_hand(SetKind::HandOverHand)]
#[case::optimistic(SetKind::Optimistic)]
#[case::lazy(SetKind::Lazy)]
#[case::lock_free(SetKind::LockFree)]
fn test_duplicate(#[case] kind: SetKind) {
    test_duplicate_add(&*deferred_set(kind));
}

#[rstest]
#[case::global_lock(SetKind::GlobalLock)]
#[case::global_rw_lock(SetKind::GlobalRwLock)]
#[case::hand_over_hand(SetKind::HandOverHand)]
#[case::optimistic(SetKind::Optimistic)]
#[case::lazy(SetKind::Lazy)]
#[case::lock_free(SetKind::LockFree)]
fn test_remove_missing(#[case] kind: SetKind) {
    test_remove_absent(&*deferred_set(kind));
}

#[rstest]
#[case::global_lock(SetKind::GlobalLock)]
#[case::global_rw_lock(SetKind::GlobalRwLock)]
#[case::hand_over_hand(SetKind::HandOverHand)]
#[case::optimistic(SetKind::Optimistic)]
#[case::lazy(SetKind::Lazy)]
#[case::lock_free(SetKind::LockFree)]
fn test_sentinels(#[case] kind: SetKind) {
    test_sentinel_values_rejected(&*deferred_set(kind));
}

#[rstest]
#[case::global_lock(SetKind::GlobalLock)]
#[case::global_rw_lock(SetKind::GlobalRwLock)]
#[case::hand_over_hand(SetKind::HandOverHand)]
#[case::optimistic(SetKind::Optimistic)]
#[case::lazy(SetKind::Lazy)]
#[case::lock_free(SetKind::LockFree)]
fn test_negative(#[case] kind: SetKind) {
    test_negative_values(&*deferred_set(kind));
}

#[rstest]
#[case::global_lock(SetKind::GlobalLock)]
#[case::global_rw_lock(SetKind::GlobalRwLock)]
#[case::hand_over_hand(SetKind::HandOverHand)]
#[case::optimistic(SetKind::Optimistic)]
#[case::lazy(SetKind::Lazy)]
#[case::lock_free(SetKind::LockFree)]
fn test_count(#[case] kind: SetKind) {
    test_linearizable_count(&*deferred_set(kind));
}

#[rstest]
#[case::global_lock(SetKind::GlobalLock)]
#[case::global_rw_lock(SetKind::GlobalRwLock)]
#[case::hand_over_hand(SetKind::HandOverHand)]
#[case::optimistic(SetKind::Optimistic)]
#[case::lazy(SetKind::Lazy)]
#[case::lock_free(SetKind::LockFree)]
fn test_sequential(#[case] kind: SetKind) {
    test_sequential_operations(&*deferred_set(kind));
}

#[rstest]
#[case::global_lock(SetKind::GlobalLock)]
#[case::global_rw_lock(SetKind::GlobalRwLock)]
#[case::hand_over_hand(SetKind::HandOverHand)]
#[case::optimistic(SetKind::Optimistic)]
#[case::lazy(SetKind::Lazy)]
#[case::lock_free(SetKind::LockFree)]
fn test_concurrent_disjoint(#[case] kind: SetKind) {
    test_concurrent_disjoint_adds(deferred_set(kind));
}

#[rstest]
#[case::global_lock(SetKind::GlobalLock)]
#[case::global_rw_lock(SetKind::GlobalRwLock)]
#[case::hand_over_hand(SetKind::HandOverHand)]
#[case::optimistic(SetKind::Optimistic)]
#[case::lazy(SetKind::Lazy)]
#[case::lock_free(SetKind::LockFree)]
fn test_concurrent_mixed(#[case] kind: SetKind) {
    test_concurrent_mixed_operations(deferred_set(kind));
}

#[rstest]
#[case::global_lock(SetKind::GlobalLock)]
#[case::global_rw_lock(SetKind::GlobalRwLock)]
#[case::hand_over_hand(SetKind::HandOverHand)]
#[case::optimistic(SetKind::Optimistic)]
#[case::lazy(SetKind::Lazy)]
#[case::lock_free(SetKind::LockFree)]
fn test_reports_kind(#[case] kind: SetKind) {
    let set = deferred_set(kind);
    assert_eq!(set.kind(), kind);
    assert!(set.is_empty());
    assert_eq!(set.check(), Ok(()));
}
