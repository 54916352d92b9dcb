//! Test bodies shared by every `IntSet` implementation.
//!
//! Each function takes the set under test so the integration tests can run
//! them across all variants and both reclamation guards.

pub mod int_set_stress_tests;
pub mod workload;
