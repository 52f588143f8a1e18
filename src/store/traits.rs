//! Storage backends for the cache.
//!
//! A store owns keys and values and answers lookups. It knows nothing about
//! eviction order or capacity: the orchestrator decides what to evict and
//! pairs every store mutation with the matching policy callback. Stores are
//! not required to be thread-safe; the cache serializes access under its lock.
//!
//! Values are held as `Arc<V>` so a lookup can hand a value out after the
//! cache lock has been released.

use std::sync::Arc;

/// Read-side store operations.
pub trait StoreCore<K, V> {
    /// Fetch a value by key.
    fn get(&self, key: &K) -> Option<Arc<V>>;

    /// Check if a key exists.
    fn contains(&self, key: &K) -> bool;

    /// Current number of entries.
    fn len(&self) -> usize;

    /// Every stored key, in unspecified order.
    fn keys(&self) -> Box<dyn Iterator<Item = &K> + '_>;

    /// Check if the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mutable store operations for single-threaded backends.
///
/// All operations should be amortized O(1); the cache's own complexity
/// guarantees assume it.
pub trait StoreMut<K, V>: StoreCore<K, V> {
    /// Insert or overwrite a value. Returns the previous value if present.
    fn insert(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>>;

    /// Remove a value by key.
    fn remove(&mut self, key: &K) -> Option<Arc<V>>;

    /// Remove all entries.
    fn clear(&mut self);
}
