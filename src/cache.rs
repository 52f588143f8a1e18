//! Thread-safe bounded cache: a store and an eviction policy behind one lock.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                       Cache<K, V, P, S>                              │
//!   │                                                                      │
//!   │   capacity: usize                                                    │
//!   │   inner: Arc<Mutex<CacheState>>                                      │
//!   │            ┌──────────────────────────────────────────────────────┐  │
//!   │            │ store:   S  (StoreMut<K, V>)   key → Arc<V>          │  │
//!   │            │ policy:  P  (EvictionPolicy<K>) eviction order       │  │
//!   │            │ metrics: CacheMetrics           (feature "metrics")  │  │
//!   │            └──────────────────────────────────────────────────────┘  │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guard hands out the store and the policy together, so there is no way
//! to mutate one without holding the lock that protects the other. Every key
//! in the store has exactly one node in the policy and vice versa.
//!
//! ## Put Flow
//!
//! ```text
//!   put(key, value):
//!     1. existed = store.contains(key)
//!     2. if !existed && store.len() >= capacity:
//!          victim = policy.evict()        ── None → InvariantError, nothing changed
//!          store.remove(victim)
//!          policy.track_removal(victim)
//!     3. store.insert(key, value)
//!     4. existed ? policy.track_access(key) : policy.track_insertion(key)
//! ```
//!
//! ## Operations
//!
//! | Operation          | Lock held | Policy callback                  |
//! |--------------------|-----------|----------------------------------|
//! | `get`              | yes       | `track_access` on hit            |
//! | `put` / `put_arc`  | yes       | `evict`, `track_*`               |
//! | `remove`           | yes       | `track_removal` if removed       |
//! | `peek` / `contains`| yes       | none                             |
//! | `clear`            | yes       | `clear`                          |
//!
//! All of them are O(1) for the built-in store and policies.
//!
//! ## Example Usage
//!
//! ```
//! use policy_cache::cache::Cache;
//! use policy_cache::policy::LinkedPolicy;
//!
//! let cache = Cache::new(2, LinkedPolicy::lru()).unwrap();
//! cache.put("a", 1).unwrap();
//! cache.put("b", 2).unwrap();
//! cache.get(&"a");
//! cache.put("c", 3).unwrap(); // evicts "b"
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! assert_eq!(cache.len(), 2);
//! ```
//!
//! ## Thread Safety
//!
//! `Cache` is `Send + Sync` when `P` and `S` are `Send`. The default
//! `HashMapStore` holds keys and `Arc<V>` values, so with it that means
//! `K: Send` and `V: Send + Sync`. Cloning
//! is cheap and clones share state. The lock is a `parking_lot::Mutex`, which
//! is released on every exit path and never poisons.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, trace};

use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CacheMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::policy::LinkedPolicy;
use crate::store::hashmap::HashMapStore;
use crate::store::traits::StoreMut;
use crate::traits::EvictionPolicy;

/// Everything the lock protects.
struct CacheState<P, S> {
    store: S,
    policy: P,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

/// Bounded, thread-safe key-value cache with a pluggable eviction policy.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`
/// - `V`: Value type; stored and returned as `Arc<V>`
/// - `P`: Eviction policy, defaults to [`LinkedPolicy<K>`]
/// - `S`: Store, defaults to [`HashMapStore<K, V>`]
///
/// # Example
///
/// ```
/// use policy_cache::cache::Cache;
/// use policy_cache::policy::{LinkedPolicy, PolicyKind};
///
/// let cache = Cache::new(3, LinkedPolicy::new(PolicyKind::Fifo)).unwrap();
/// for (k, v) in [("a", 1), ("b", 2), ("c", 3)] {
///     cache.put(k, v).unwrap();
/// }
/// cache.get(&"a"); // FIFO ignores reads
/// cache.put("d", 4).unwrap();
///
/// assert!(cache.get(&"a").is_none());
/// assert_eq!(cache.get(&"b").as_deref(), Some(&2));
/// ```
pub struct Cache<K, V, P = LinkedPolicy<K>, S = HashMapStore<K, V>> {
    inner: Arc<Mutex<CacheState<P, S>>>,
    capacity: usize,
    _marker: PhantomData<fn(K) -> V>,
}

impl<K, V, P> Cache<K, V, P, HashMapStore<K, V>>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy<K>,
{
    /// Creates a cache over the default in-memory store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero or `policy` already
    /// tracks keys.
    ///
    /// # Example
    ///
    /// ```
    /// use policy_cache::cache::Cache;
    /// use policy_cache::policy::LinkedPolicy;
    ///
    /// let cache: Cache<u32, String> = Cache::new(100, LinkedPolicy::lru()).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    ///
    /// assert!(Cache::<u32, String>::new(0, LinkedPolicy::lru()).is_err());
    /// ```
    pub fn new(capacity: usize, policy: P) -> Result<Self, ConfigError> {
        Self::with_store(capacity, policy, HashMapStore::new())
    }
}

impl<K, V, P, S> Cache<K, V, P, S>
where
    K: Clone + Eq + Hash,
    P: EvictionPolicy<K>,
    S: StoreMut<K, V>,
{
    /// Creates a cache over a caller-supplied store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero, or if `store` or
    /// `policy` is not empty: entries they already hold would not be
    /// tracked by the other half.
    pub fn with_store(capacity: usize, policy: P, store: S) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity());
        }
        if !store.is_empty() {
            return Err(ConfigError::store_not_empty(store.len()));
        }
        if !policy.is_empty() {
            return Err(ConfigError::policy_not_empty(policy.len()));
        }

        debug!(capacity, "cache constructed");
        Ok(Self {
            inner: Arc::new(Mutex::new(CacheState {
                store,
                policy,
                #[cfg(feature = "metrics")]
                metrics: CacheMetrics::default(),
            })),
            capacity,
            _marker: PhantomData,
        })
    }

    /// Gets a value by key, reporting the access to the policy on a hit.
    ///
    /// Under LRU this refreshes the key's recency; FIFO and LIFO ignore it.
    ///
    /// # Example
    ///
    /// ```
    /// use policy_cache::cache::Cache;
    /// use policy_cache::policy::LinkedPolicy;
    ///
    /// let cache = Cache::new(10, LinkedPolicy::lru()).unwrap();
    /// cache.put(1, "one".to_string()).unwrap();
    ///
    /// assert_eq!(cache.get(&1).as_deref().map(String::as_str), Some("one"));
    /// assert!(cache.get(&2).is_none());
    /// ```
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut guard = self.inner.lock();
        let state = &mut *guard;
        match state.store.get(key) {
            Some(value) => {
                state.policy.track_access(key);
                #[cfg(feature = "metrics")]
                state.metrics.record_get_hit();
                Some(value)
            },
            None => {
                #[cfg(feature = "metrics")]
                state.metrics.record_get_miss();
                None
            },
        }
    }

    /// Gets a value without touching eviction order.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.inner.lock().store.get(key)
    }

    /// Returns `true` if `key` is cached. Does not touch eviction order.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().store.contains(key)
    }

    /// Inserts or overwrites `key`, evicting one entry first if a new key
    /// would exceed capacity. Returns the previous value on overwrite.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] when an eviction is required but the policy
    /// has no candidate, or names a key the store does not hold. The new
    /// entry is not inserted and the store is unchanged. In the second case
    /// the policy has already dropped the key it named.
    ///
    /// # Example
    ///
    /// ```
    /// use policy_cache::cache::Cache;
    /// use policy_cache::policy::LinkedPolicy;
    ///
    /// let cache = Cache::new(2, LinkedPolicy::lru()).unwrap();
    /// assert!(cache.put("k", 1).unwrap().is_none());
    ///
    /// let previous = cache.put("k", 2).unwrap();
    /// assert_eq!(previous.as_deref(), Some(&1));
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn put(&self, key: K, value: V) -> Result<Option<Arc<V>>, InvariantError> {
        self.put_arc(key, Arc::new(value))
    }

    /// Same as [`put`](Self::put) for a value that is already shared.
    pub fn put_arc(&self, key: K, value: Arc<V>) -> Result<Option<Arc<V>>, InvariantError> {
        let mut guard = self.inner.lock();
        let state = &mut *guard;
        #[cfg(feature = "metrics")]
        state.metrics.record_insert_call();

        let existed = state.store.contains(&key);
        if !existed && state.store.len() >= self.capacity {
            self.evict_one(state)?;
        }

        let previous = state.store.insert(key.clone(), value);
        if existed {
            state.policy.track_access(&key);
            #[cfg(feature = "metrics")]
            state.metrics.record_insert_update();
        } else {
            state.policy.track_insertion(key);
            #[cfg(feature = "metrics")]
            state.metrics.record_insert_new();
        }
        Ok(previous)
    }

    /// Removes `key`, returning its value. Unknown keys are a no-op.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut guard = self.inner.lock();
        let state = &mut *guard;
        let removed = state.store.remove(key);
        if removed.is_some() {
            state.policy.track_removal(key);
        }
        #[cfg(feature = "metrics")]
        state.metrics.record_remove(removed.is_some());
        removed
    }

    /// Returns the key the next eviction would remove, without removing it.
    pub fn peek_victim(&self) -> Option<K> {
        self.inner.lock().policy.peek_victim().cloned()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every entry from the store and the policy in one step.
    pub fn clear(&self) {
        let mut guard = self.inner.lock();
        let state = &mut *guard;
        let dropped = state.store.len();
        state.store.clear();
        state.policy.clear();
        #[cfg(feature = "metrics")]
        state.metrics.record_clear();
        trace!(dropped, "cache cleared");
    }

    /// Verifies that the store and the policy agree.
    ///
    /// Checks that both hold the same number of keys, that the store is
    /// within capacity, that every stored key is tracked by the policy and
    /// that the policy's next victim is actually stored. Equal counts plus
    /// full coverage of the store leave no room for orphaned policy keys.
    ///
    /// O(n) in the number of entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let guard = self.inner.lock();
        let store_len = guard.store.len();
        let policy_len = guard.policy.len();

        if store_len != policy_len {
            return Err(InvariantError::len_mismatch(store_len, policy_len));
        }
        if store_len > self.capacity {
            return Err(InvariantError::over_capacity(store_len, self.capacity));
        }
        let untracked = guard
            .store
            .keys()
            .filter(|key| !guard.policy.contains(key))
            .count();
        if untracked > 0 {
            return Err(InvariantError::untracked_keys(untracked));
        }
        if let Some(victim) = guard.policy.peek_victim() {
            if !guard.store.contains(victim) {
                return Err(InvariantError::victim_not_stored());
            }
        }
        Ok(())
    }

    fn evict_one(&self, state: &mut CacheState<P, S>) -> Result<(), InvariantError> {
        #[cfg(feature = "metrics")]
        state.metrics.record_evict_call();

        let store_len = state.store.len();
        let Some(victim) = state.policy.evict() else {
            error!(
                store_len,
                capacity = self.capacity,
                "eviction policy returned no candidate at capacity; rejecting insert"
            );
            #[cfg(feature = "metrics")]
            state.metrics.record_invariant_fault();
            return Err(InvariantError::no_victim(store_len, self.capacity));
        };

        if state.store.remove(&victim).is_none() {
            error!(
                store_len,
                capacity = self.capacity,
                "eviction policy returned a key missing from the store; rejecting insert"
            );
            #[cfg(feature = "metrics")]
            state.metrics.record_invariant_fault();
            return Err(InvariantError::victim_not_stored());
        }
        state.policy.track_removal(&victim);

        #[cfg(feature = "metrics")]
        state.metrics.record_evicted_entry();
        trace!(capacity = self.capacity, "evicted entry to make room");
        Ok(())
    }
}

#[cfg(feature = "metrics")]
impl<K, V, P, S> Cache<K, V, P, S>
where
    S: StoreMut<K, V>,
{
    /// Snapshot of the operation counters plus current length and capacity.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        let guard = self.inner.lock();
        guard.metrics.snapshot(guard.store.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V, P, S> MetricsSnapshotProvider<CacheMetricsSnapshot> for Cache<K, V, P, S>
where
    S: StoreMut<K, V>,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V, P, S> Clone for Cache<K, V, P, S> {
    /// Returns a handle to the same cache.
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            capacity: self.capacity,
            _marker: PhantomData,
        }
    }
}

impl<K, V, P, S> fmt::Debug for Cache<K, V, P, S>
where
    S: StoreMut<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.inner.lock();
        f.debug_struct("Cache")
            .field("len", &guard.store.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
