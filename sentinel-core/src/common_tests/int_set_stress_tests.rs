use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use crate::common_tests::workload::{WorkloadConfig, prefill, run_workload};
use crate::data_structures::IntSet;

/// Many threads remove the same value; exactly one wins
pub fn test_concurrent_remove_same_value<C>(set: Arc<C>)
where
    C: IntSet + ?Sized + 'static,
{
    let num_threads = 8;
    let rounds = 200;

    for round in 0..rounds {
        assert!(set.add(round));

        let barrier = Arc::new(Barrier::new(num_threads));
        let winners = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                let set = Arc::clone(&set);
                let barrier = Arc::clone(&barrier);
                let winners = Arc::clone(&winners);
                thread::spawn(move || {
                    barrier.wait();
                    if set.remove(round) {
                        winners.fetch_add(1, Ordering::Relaxed);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(
            winners.load(Ordering::Relaxed),
            1,
            "round {}: value removed more than once",
            round
        );
        assert!(!set.contains(round));
    }

    assert!(set.is_empty());
    set.validate();
}

/// Many threads add the same value; exactly one wins
pub fn test_concurrent_add_same_value<C>(set: Arc<C>)
where
    C: IntSet + ?Sized + 'static,
{
    let num_threads = 8;
    let rounds = 200;

    for round in 0..rounds {
        let barrier = Arc::new(Barrier::new(num_threads));
        let winners = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                let set = Arc::clone(&set);
                let barrier = Arc::clone(&barrier);
                let winners = Arc::clone(&winners);
                thread::spawn(move || {
                    barrier.wait();
                    if set.add(round) {
                        winners.fetch_add(1, Ordering::Relaxed);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(
            winners.load(Ordering::Relaxed),
            1,
            "round {}: value added more than once",
            round
        );
    }

    assert_eq!(set.len(), rounds as usize);
    set.validate();
}

/// Random workload, then the structure must validate and the operation
/// counts must reconcile with the final size
pub fn test_random_workload_validates<C>(set: Arc<C>)
where
    C: IntSet + ?Sized + 'static,
{
    let config = WorkloadConfig {
        threads: 8,
        operations_per_thread: 20_000,
        key_range: 512,
        update_percent: 50,
        initial_size: 256,
        seed: 0xc0ffee,
    };

    let prefilled = prefill(&*set, &config);
    assert_eq!(prefilled, 256);

    let stats = run_workload(Arc::clone(&set), &config);

    assert_eq!(stats.operations(), config.threads * config.operations_per_thread);
    assert_eq!(
        prefilled as i64 + stats.net_growth(),
        set.len() as i64,
        "successful adds/removes do not account for the final size"
    );
    assert!(set.len() <= config.key_range as usize);
    set.validate();
}

/// Read-mostly workload: readers dominate, as in the lookup-heavy benchmarks
pub fn test_read_mostly_workload<C>(set: Arc<C>)
where
    C: IntSet + ?Sized + 'static,
{
    let config = WorkloadConfig {
        threads: 8,
        operations_per_thread: 20_000,
        key_range: 1024,
        update_percent: 2,
        initial_size: 512,
        seed: 7,
    };

    let prefilled = prefill(&*set, &config);
    let stats = run_workload(Arc::clone(&set), &config);

    assert!(stats.contains > stats.adds + stats.removes);
    assert_eq!(prefilled as i64 + stats.net_growth(), set.len() as i64);
    set.validate();
}

/// Values nobody removes are always found, while neighbours churn
pub fn test_contains_during_modifications<C>(set: Arc<C>)
where
    C: IntSet + ?Sized + 'static,
{
    // Stable keys are multiples of 10; writers churn the rest.
    let stable: Vec<i32> = (0..1000).step_by(10).collect();
    for &key in &stable {
        set.add(key);
    }

    let stop = Arc::new(AtomicBool::new(false));
    let num_writers = 4;
    let num_readers = 4;

    let writers: Vec<_> = (0..num_writers)
        .map(|t| {
            let set = Arc::clone(&set);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut i = 0;
                while !stop.load(Ordering::Relaxed) {
                    let key = (i * num_writers + t) % 1000;
                    if key % 10 != 0 {
                        set.add(key);
                        set.remove(key);
                    }
                    i += 1;
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..num_readers)
        .map(|_| {
            let set = Arc::clone(&set);
            let stable = stable.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    for &key in &stable {
                        assert!(set.contains(key), "Stable key {} not found", key);
                    }
                }
            })
        })
        .collect();

    for reader in readers {
        reader.join().unwrap();
    }
    stop.store(true, Ordering::Relaxed);
    for writer in writers {
        writer.join().unwrap();
    }

    for &key in &stable {
        assert!(set.contains(key));
    }
    set.validate();
}

/// A value added before a flag is published is visible to whoever sees the
/// flag
pub fn test_memory_ordering<C>(set: Arc<C>)
where
    C: IntSet + ?Sized + 'static,
{
    let rounds = 500;
    let published = Arc::new(AtomicUsize::new(0));

    let producer = {
        let set = Arc::clone(&set);
        let published = Arc::clone(&published);
        thread::spawn(move || {
            for i in 0..rounds {
                assert!(set.add(i as i32));
                published.store(i + 1, Ordering::Release);
            }
        })
    };

    let consumer = {
        let set = Arc::clone(&set);
        let published = Arc::clone(&published);
        thread::spawn(move || {
            let mut seen = 0;
            while seen < rounds {
                let upto = published.load(Ordering::Acquire);
                for i in seen..upto {
                    assert!(set.contains(i as i32), "published value {} missing", i);
                }
                seen = upto;
                thread::yield_now();
            }
        })
    };

    producer.join().unwrap();
    consumer.join().unwrap();

    assert_eq!(set.len(), rounds);
    set.validate();
}

/// Every thread fights over a handful of keys
pub fn test_high_contention<C>(set: Arc<C>)
where
    C: IntSet + ?Sized + 'static,
{
    let config = WorkloadConfig {
        threads: 16,
        operations_per_thread: 10_000,
        key_range: 4,
        update_percent: 90,
        initial_size: 2,
        seed: 42,
    };

    let prefilled = prefill(&*set, &config);
    let stats = run_workload(Arc::clone(&set), &config);

    assert_eq!(prefilled as i64 + stats.net_growth(), set.len() as i64);
    assert!(set.len() <= 4);
    set.validate();
}

/// Each thread owns a disjoint slice of keys and replays a random history on
/// it, tracking the expected membership locally. Since nobody else touches
/// those keys, every single result must match the sequential model.
pub fn test_per_key_linearizability<C>(set: Arc<C>)
where
    C: IntSet + ?Sized + 'static,
{
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    let num_threads = 8;
    let keys_per_thread = 32;
    let operations = 5_000;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let set = Arc::clone(&set);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut rng = SmallRng::seed_from_u64(t as u64);
                let mut model = HashSet::new();
                barrier.wait();

                for step in 0..operations {
                    // Interleave owners key by key so neighbouring nodes
                    // belong to different threads.
                    let key = (rng.gen_range(0..keys_per_thread) * num_threads + t) as i32;
                    match rng.gen_range(0..3) {
                        0 => assert_eq!(set.add(key), model.insert(key), "add {} at {}", key, step),
                        1 => assert_eq!(
                            set.remove(key),
                            model.remove(&key),
                            "remove {} at {}",
                            key,
                            step
                        ),
                        _ => assert_eq!(
                            set.contains(key),
                            model.contains(&key),
                            "contains {} at {}",
                            key,
                            step
                        ),
                    }
                }

                model.len()
            })
        })
        .collect();

    let expected: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert_eq!(set.len(), expected);
    set.validate();
}
