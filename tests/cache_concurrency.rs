// ==============================================
// CACHE CONCURRENCY TESTS (integration)
// ==============================================
//
// Many threads hammer one Cache instance. Every operation runs under the
// cache's single lock, so the capacity bound and the store/policy agreement
// must hold at every observable point.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use policy_cache::builder::CacheBuilder;
use policy_cache::cache::Cache;
use policy_cache::policy::PolicyKind;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const KINDS: [PolicyKind; 3] = [PolicyKind::Lru, PolicyKind::Fifo, PolicyKind::Lifo];

fn shared_cache(kind: PolicyKind, capacity: usize) -> Arc<Cache<u64, u64>> {
    Arc::new(
        CacheBuilder::new()
            .capacity(capacity)
            .policy(kind)
            .build()
            .unwrap(),
    )
}

// ==============================================
// Capacity Bound
// ==============================================

mod capacity_bound {
    use super::*;

    #[test]
    fn concurrent_inserts_respect_capacity() {
        let capacity = 10;
        let num_threads = 16;
        let inserts_per_thread = 50;

        for kind in KINDS {
            let cache = shared_cache(kind, capacity);
            let barrier = Arc::new(Barrier::new(num_threads));

            let handles: Vec<_> = (0..num_threads)
                .map(|tid| {
                    let cache = Arc::clone(&cache);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        for i in 0..inserts_per_thread {
                            let key = (tid * inserts_per_thread + i) as u64;
                            cache.put(key, key).unwrap();
                            assert!(cache.len() <= capacity);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(cache.len(), capacity, "{kind}");
            cache.check_invariants().unwrap();
        }
    }

    #[test]
    fn observer_never_sees_overflow() {
        let capacity = 8;
        let cache = shared_cache(PolicyKind::Lru, capacity);
        let done = Arc::new(AtomicBool::new(false));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let observer = {
            let cache = Arc::clone(&cache);
            let done = Arc::clone(&done);
            let max_seen = Arc::clone(&max_seen);
            thread::spawn(move || {
                while !done.load(Ordering::Acquire) {
                    max_seen.fetch_max(cache.len(), Ordering::Relaxed);
                    thread::yield_now();
                }
            })
        };

        let writers: Vec<_> = (0..4u64)
            .map(|tid| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..2_000u64 {
                        cache.put(tid * 10_000 + i, i).unwrap();
                    }
                })
            })
            .collect();

        for writer in writers {
            writer.join().unwrap();
        }
        done.store(true, Ordering::Release);
        observer.join().unwrap();

        assert!(max_seen.load(Ordering::Relaxed) <= capacity);
    }
}

// ==============================================
// Mixed Workload Consistency
// ==============================================

mod mixed_workload {
    use super::*;

    #[test]
    fn random_ops_keep_store_and_policy_in_sync() {
        let capacity = 32;
        let num_threads = 8;
        let ops_per_thread = 5_000;

        for kind in KINDS {
            let cache = shared_cache(kind, capacity);
            let barrier = Arc::new(Barrier::new(num_threads));

            let handles: Vec<_> = (0..num_threads)
                .map(|tid| {
                    let cache = Arc::clone(&cache);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        let mut rng = SmallRng::seed_from_u64(tid as u64);
                        barrier.wait();
                        for _ in 0..ops_per_thread {
                            let key = rng.random::<u64>() % 128;
                            match rng.random::<u8>() % 10 {
                                0..=4 => {
                                    cache.put(key, key * 2).unwrap();
                                },
                                5..=7 => {
                                    if let Some(v) = cache.get(&key) {
                                        assert_eq!(*v, key * 2);
                                    }
                                },
                                8 => {
                                    cache.remove(&key);
                                },
                                _ => {
                                    assert!(cache.len() <= capacity);
                                },
                            }
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            assert!(cache.len() <= capacity, "{kind}");
            cache.check_invariants().unwrap();
        }
    }

    #[test]
    fn clear_races_with_writers() {
        let capacity = 16;
        let cache = shared_cache(PolicyKind::Fifo, capacity);
        let barrier = Arc::new(Barrier::new(5));

        let mut handles: Vec<_> = (0..4u64)
            .map(|tid| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..1_000u64 {
                        cache.put(tid * 1_000 + i, i).unwrap();
                    }
                })
            })
            .collect();

        handles.push({
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..200 {
                    cache.clear();
                    thread::yield_now();
                }
            })
        });

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(cache.len() <= capacity);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn same_key_updates_never_grow_cache() {
        let cache = shared_cache(PolicyKind::Lru, 4);
        cache.put(1, 0).unwrap();

        let handles: Vec<_> = (0..8u64)
            .map(|tid| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..500u64 {
                        cache.put(1, tid * 1_000 + i).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 1);
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Shared Handles
// ==============================================

mod shared_handles {
    use super::*;

    #[test]
    fn cloned_handles_see_each_others_writes() {
        let cache: Cache<u64, u64> = CacheBuilder::new()
            .capacity(64)
            .policy(PolicyKind::Lru)
            .build()
            .unwrap();

        let handles: Vec<_> = (0..4u64)
            .map(|tid| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..16u64 {
                        cache.put(tid * 16 + i, tid).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 64);
        for tid in 0..4u64 {
            assert_eq!(cache.get(&(tid * 16)).as_deref(), Some(&tid));
        }
    }

    #[test]
    fn panicking_thread_does_not_wedge_the_lock() {
        let cache = shared_cache(PolicyKind::Lru, 4);
        cache.put(1, 1).unwrap();

        let result = {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let _ = cache.get(&1);
                panic!("worker failed after reading");
            })
            .join()
        };
        assert!(result.is_err());

        cache.put(2, 2).unwrap();
        assert_eq!(cache.len(), 2);
    }
}
