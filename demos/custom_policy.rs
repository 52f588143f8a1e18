//! Example plugging a user-defined eviction policy into the cache.
//!
//! The policy evicts a uniformly random key. Keys live in a dense `Vec`
//! with a key -> index map, so insert, removal and eviction are all O(1)
//! through swap-remove.
//!
//! Run with: cargo run --example custom_policy

use std::hash::Hash;

use policy_cache::builder::CacheBuilder;
use policy_cache::traits::EvictionPolicy;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

struct RandomPolicy<K> {
    keys: Vec<K>,
    index: FxHashMap<K, usize>,
    rng: SmallRng,
    // Pre-rolled so peek_victim and evict agree.
    roll: usize,
}

impl<K: Clone + Eq + Hash> RandomPolicy<K> {
    fn with_seed(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let roll = rng.random::<u32>() as usize;
        Self {
            keys: Vec::new(),
            index: FxHashMap::default(),
            rng,
            roll,
        }
    }

    fn victim_index(&self) -> Option<usize> {
        (!self.keys.is_empty()).then(|| self.roll % self.keys.len())
    }

    fn swap_remove_at(&mut self, idx: usize) -> K {
        let key = self.keys.swap_remove(idx);
        self.index.remove(&key);
        if let Some(moved) = self.keys.get(idx) {
            self.index.insert(moved.clone(), idx);
        }
        key
    }
}

impl<K: Clone + Eq + Hash> EvictionPolicy<K> for RandomPolicy<K> {
    fn track_insertion(&mut self, key: K) {
        if self.index.contains_key(&key) {
            return;
        }
        self.index.insert(key.clone(), self.keys.len());
        self.keys.push(key);
    }

    fn track_access(&mut self, _key: &K) {}

    fn track_removal(&mut self, key: &K) {
        if let Some(&idx) = self.index.get(key) {
            self.swap_remove_at(idx);
        }
    }

    fn evict(&mut self) -> Option<K> {
        let idx = self.victim_index()?;
        let victim = self.swap_remove_at(idx);
        self.roll = self.rng.random::<u32>() as usize;
        Some(victim)
    }

    fn peek_victim(&self) -> Option<&K> {
        self.victim_index().map(|idx| &self.keys[idx])
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn clear(&mut self) {
        self.keys.clear();
        self.index.clear();
    }
}

fn main() {
    println!("=== Custom Policy Example ===\n");

    let cache = CacheBuilder::new()
        .capacity(4)
        .custom_policy(RandomPolicy::with_seed(7))
        .build()
        .expect("valid configuration");

    for key in 0..4u32 {
        cache.put(key, key * 100).expect("consistent cache");
    }
    println!("filled: len = {}", cache.len());

    for key in 4..10u32 {
        let victim = cache.peek_victim();
        cache.put(key, key * 100).expect("consistent cache");
        println!("insert {key}: evicted {victim:?}, len = {}", cache.len());
    }

    cache
        .check_invariants()
        .expect("store and policy agree");
    println!("\ninvariants hold; surviving keys:");
    for key in 0..10u32 {
        if let Some(value) = cache.peek(&key) {
            println!("   {key} -> {value}");
        }
    }
}
