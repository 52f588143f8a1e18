//! Example demonstrating the CacheBuilder API with each built-in policy.
//!
//! Run with: cargo run --example basic_builder

use policy_cache::builder::CacheBuilder;
use policy_cache::policy::PolicyKind;

fn main() {
    println!("=== CacheBuilder Examples ===\n");

    // Example 1: LRU Cache
    println!("1. LRU Cache");
    let lru = CacheBuilder::new()
        .capacity(3)
        .policy(PolicyKind::Lru)
        .build()
        .expect("valid configuration");

    lru.put(1u64, "one".to_string()).expect("consistent cache");
    lru.put(2, "two".to_string()).expect("consistent cache");
    lru.put(3, "three".to_string()).expect("consistent cache");

    // Reading key 1 makes it most recently used
    lru.get(&1);

    // Key 2 is now the least recently used and gets evicted
    lru.put(4, "four".to_string()).expect("consistent cache");

    println!("   contains 1? {} (was accessed)", lru.contains(&1));
    println!("   contains 2? {} (evicted as LRU)", lru.contains(&2));
    println!("   contains 4? {} (just inserted)", lru.contains(&4));
    println!();

    // Example 2: FIFO Cache
    println!("2. FIFO Cache");
    let fifo = CacheBuilder::new()
        .capacity(3)
        .policy(PolicyKind::Fifo)
        .build()
        .expect("valid configuration");

    fifo.put(1u64, "one".to_string()).expect("consistent cache");
    fifo.put(2, "two".to_string()).expect("consistent cache");
    fifo.put(3, "three".to_string()).expect("consistent cache");

    // Reads do not affect FIFO order
    fifo.get(&1);

    // Key 1 is the oldest insertion and gets evicted
    fifo.put(4, "four".to_string()).expect("consistent cache");

    println!("   contains 1? {} (evicted as oldest)", fifo.contains(&1));
    println!("   contains 2? {} (still present)", fifo.contains(&2));
    println!();

    // Example 3: LIFO Cache
    println!("3. LIFO Cache");
    let lifo = CacheBuilder::new()
        .capacity(3)
        .policy(PolicyKind::Lifo)
        .build()
        .expect("valid configuration");

    lifo.put(1u64, "one".to_string()).expect("consistent cache");
    lifo.put(2, "two".to_string()).expect("consistent cache");
    lifo.put(3, "three".to_string()).expect("consistent cache");

    println!("   next victim: {:?} (newest insertion)", lifo.peek_victim());

    // Key 3 is the newest insertion and gets evicted
    lifo.put(4, "four".to_string()).expect("consistent cache");

    println!("   contains 3? {} (evicted as newest)", lifo.contains(&3));
    println!("   contains 1? {} (still present)", lifo.contains(&1));
    println!();

    // Example 4: Rejected configuration
    println!("4. Configuration errors");
    let err = CacheBuilder::<u64, String>::new()
        .capacity(0)
        .policy(PolicyKind::Lru)
        .build()
        .unwrap_err();
    println!("   capacity 0 -> {err}");

    let err = CacheBuilder::<u64, String>::new()
        .capacity(8)
        .build()
        .unwrap_err();
    println!("   no policy  -> {err}");
    println!();

    #[cfg(feature = "metrics")]
    {
        println!("5. Metrics");
        let snapshot = lru.metrics_snapshot();
        println!("   {snapshot:?}");
        println!("   hit ratio: {:.2}", snapshot.hit_ratio());
    }
}
