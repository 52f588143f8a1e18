//! Cache builder: validates configuration and assembles a [`Cache`].
//!
//! Capacity and policy are required; the store defaults to
//! [`HashMapStore`]. Invalid configuration fails in [`CacheBuilder::build`]
//! with a [`ConfigError`], never at first use.
//!
//! ## Example
//!
//! ```rust
//! use policy_cache::builder::CacheBuilder;
//! use policy_cache::policy::PolicyKind;
//!
//! let cache = CacheBuilder::new()
//!     .capacity(100)
//!     .policy(PolicyKind::Lru)
//!     .build()
//!     .unwrap();
//! cache.put(1u64, "hello".to_string()).unwrap();
//! assert_eq!(cache.get(&1).as_deref().map(String::as_str), Some("hello"));
//! ```

use std::hash::Hash;
use std::marker::PhantomData;

use crate::cache::Cache;
use crate::error::ConfigError;
use crate::policy::{LinkedPolicy, PolicyKind};
use crate::store::hashmap::HashMapStore;
use crate::store::traits::StoreMut;
use crate::traits::EvictionPolicy;

/// Builder for [`Cache`] instances.
///
/// `P` and `S` change as the policy and store are chosen, so the built cache
/// is fully typed with no boxing.
pub struct CacheBuilder<K, V, P = LinkedPolicy<K>, S = HashMapStore<K, V>> {
    capacity: Option<usize>,
    policy: Option<P>,
    store: S,
    _marker: PhantomData<fn(K) -> V>,
}

impl<K, V> CacheBuilder<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Starts with no capacity, no policy and the default store.
    pub fn new() -> Self {
        Self {
            capacity: None,
            policy: None,
            store: HashMapStore::new(),
            _marker: PhantomData,
        }
    }
}

impl<K, V> Default for CacheBuilder<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, P, S> CacheBuilder<K, V, P, S>
where
    K: Clone + Eq + Hash,
{
    /// Sets the maximum number of entries. Required, must be positive.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Selects one of the built-in linked policies.
    ///
    /// # Example
    ///
    /// ```rust
    /// use policy_cache::builder::CacheBuilder;
    /// use policy_cache::policy::PolicyKind;
    ///
    /// for kind in [PolicyKind::Lru, PolicyKind::Fifo, PolicyKind::Lifo] {
    ///     let cache = CacheBuilder::<u64, String>::new()
    ///         .capacity(8)
    ///         .policy(kind)
    ///         .build()
    ///         .unwrap();
    ///     assert_eq!(cache.capacity(), 8);
    /// }
    /// ```
    pub fn policy(self, kind: PolicyKind) -> CacheBuilder<K, V, LinkedPolicy<K>, S> {
        self.custom_policy(LinkedPolicy::new(kind))
    }

    /// Uses a caller-supplied policy. It must not track any keys yet.
    pub fn custom_policy<Q>(self, policy: Q) -> CacheBuilder<K, V, Q, S>
    where
        Q: EvictionPolicy<K>,
    {
        CacheBuilder {
            capacity: self.capacity,
            policy: Some(policy),
            store: self.store,
            _marker: PhantomData,
        }
    }

    /// Replaces the default store. It must be empty.
    pub fn store<T>(self, store: T) -> CacheBuilder<K, V, P, T>
    where
        T: StoreMut<K, V>,
    {
        CacheBuilder {
            capacity: self.capacity,
            policy: self.policy,
            store,
            _marker: PhantomData,
        }
    }

    /// Validates the configuration and builds the cache.
    ///
    /// # Errors
    ///
    /// - capacity not set, or zero
    /// - no policy chosen
    /// - store or policy already holding entries
    pub fn build(self) -> Result<Cache<K, V, P, S>, ConfigError>
    where
        P: EvictionPolicy<K>,
        S: StoreMut<K, V>,
    {
        let capacity = self.capacity.ok_or_else(ConfigError::missing_capacity)?;
        let policy = self.policy.ok_or_else(ConfigError::missing_policy)?;
        Cache::with_store(capacity, policy, self.store)
    }
}
