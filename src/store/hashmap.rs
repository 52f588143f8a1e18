//! HashMap-backed store.
//!
//! ## Architecture
//! - Keys map to `Arc<V>` in a `HashMap` for O(1) average lookup.
//! - No capacity of its own: the cache enforces the entry bound.
//! - Defaults to `FxBuildHasher`; any `BuildHasher` can be plugged in.
//!
//! ## Example Usage
//! ```rust
//! use std::sync::Arc;
//!
//! use policy_cache::store::hashmap::HashMapStore;
//! use policy_cache::store::traits::{StoreCore, StoreMut};
//!
//! let mut store: HashMapStore<u64, String> = HashMapStore::new();
//! store.insert(1, Arc::new("a".to_string()));
//! assert!(store.contains(&1));
//! assert_eq!(store.len(), 1);
//! ```
//!
//! ## Thread Safety
//! - Not synchronized. Used from behind the cache's mutex.

use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use rustc_hash::FxBuildHasher;

use crate::store::traits::{StoreCore, StoreMut};

/// Single-threaded HashMap-backed store. The default backend of [`Cache`](crate::cache::Cache).
#[derive(Debug)]
pub struct HashMapStore<K, V, S = FxBuildHasher> {
    map: HashMap<K, Arc<V>, S>,
}

impl<K, V> HashMapStore<K, V, FxBuildHasher>
where
    K: Eq + Hash,
{
    /// Create an empty store with the default hasher.
    pub fn new() -> Self {
        Self::with_hasher(FxBuildHasher)
    }

    /// Create an empty store with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }
}

impl<K, V, S> HashMapStore<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Create an empty store with a custom hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            map: HashMap::with_hasher(hasher),
        }
    }
}

impl<K, V> Default for HashMapStore<K, V, FxBuildHasher>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> StoreCore<K, V> for HashMapStore<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn get(&self, key: &K) -> Option<Arc<V>> {
        self.map.get(key).cloned()
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &K> + '_> {
        Box::new(self.map.keys())
    }
}

impl<K, V, S> StoreMut<K, V> for HashMapStore<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn insert(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.map.insert(key, value)
    }

    fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        self.map.remove(key)
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}
