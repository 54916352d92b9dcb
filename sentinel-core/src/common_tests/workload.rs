//! Randomized multi-threaded workload over an `IntSet`.
//!
//! Every worker issues a mix of `add`/`remove`/`contains` on keys drawn
//! uniformly from a small range, so that threads keep colliding on the same
//! nodes. Used by stress tests and by the benchmark.

use std::sync::{Arc, Barrier};
use std::thread;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::data_structures::IntSet;

/// Shape of a workload.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Worker threads.
    pub threads: usize,
    /// Operations issued by each worker.
    pub operations_per_thread: usize,
    /// Keys are drawn from `0..key_range`.
    pub key_range: i32,
    /// Percentage of operations that mutate, split evenly between add and
    /// remove. The rest are `contains`.
    pub update_percent: u32,
    /// Distinct keys inserted before the workers start.
    pub initial_size: usize,
    /// Base seed; worker `t` uses `seed + t + 1`, wrapping.
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        WorkloadConfig {
            threads: 8,
            operations_per_thread: 10_000,
            key_range: 256,
            update_percent: 20,
            initial_size: 128,
            seed: 0x5eed,
        }
    }
}

/// Operation counts of a finished workload.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadStats {
    pub adds: usize,
    pub successful_adds: usize,
    pub removes: usize,
    pub successful_removes: usize,
    pub contains: usize,
    pub successful_contains: usize,
}

impl WorkloadStats {
    pub fn merge(&mut self, other: &WorkloadStats) {
        self.adds += other.adds;
        self.successful_adds += other.successful_adds;
        self.removes += other.removes;
        self.successful_removes += other.successful_removes;
        self.contains += other.contains;
        self.successful_contains += other.successful_contains;
    }

    pub fn operations(&self) -> usize {
        self.adds + self.removes + self.contains
    }

    /// Change in membership caused by the workload.
    pub fn net_growth(&self) -> i64 {
        self.successful_adds as i64 - self.successful_removes as i64
    }
}

/// Insert `config.initial_size` distinct random keys, capped by the room
/// the key range has left next to the current members. Returns how many
/// were inserted.
pub fn prefill<C>(set: &C, config: &WorkloadConfig) -> usize
where
    C: IntSet + ?Sized,
{
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let room = (config.key_range.max(0) as usize).saturating_sub(set.len());
    let target = config.initial_size.min(room);
    let mut inserted = 0;

    while inserted < target {
        if set.add(rng.gen_range(0..config.key_range)) {
            inserted += 1;
        }
    }

    inserted
}

/// Run the workload on `config.threads` threads and merge their stats.
///
/// All workers start together behind a barrier. Returns once every worker
/// has joined, so the set is quiescent afterwards.
pub fn run_workload<C>(set: Arc<C>, config: &WorkloadConfig) -> WorkloadStats
where
    C: IntSet + ?Sized + 'static,
{
    assert!(config.key_range > 0, "key range must not be empty");
    assert!(config.update_percent <= 100, "update percent above 100");

    let barrier = Arc::new(Barrier::new(config.threads));

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let set = Arc::clone(&set);
            let barrier = Arc::clone(&barrier);
            let config = config.clone();
            thread::spawn(move || {
                let mut rng = SmallRng::seed_from_u64(config.seed.wrapping_add(t as u64 + 1));
                let mut stats = WorkloadStats::default();
                barrier.wait();

                for _ in 0..config.operations_per_thread {
                    let key = rng.gen_range(0..config.key_range);
                    if rng.gen_range(0..100) < config.update_percent {
                        if rng.gen_bool(0.5) {
                            stats.adds += 1;
                            stats.successful_adds += set.add(key) as usize;
                        } else {
                            stats.removes += 1;
                            stats.successful_removes += set.remove(key) as usize;
                        }
                    } else {
                        stats.contains += 1;
                        stats.successful_contains += set.contains(key) as usize;
                    }
                }

                stats
            })
        })
        .collect();

    let mut total = WorkloadStats::default();
    for handle in handles {
        match handle.join() {
            Ok(stats) => total.merge(&stats),
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    tracing::debug!(
        kind = %set.kind(),
        operations = total.operations(),
        net_growth = total.net_growth(),
        "workload finished"
    );
    total
}
