//! # Eviction Policy Trait
//!
//! The seam between the cache orchestrator and whatever decides eviction
//! order. A policy only ever sees keys; values stay in the store.
//!
//! ## Architecture
//!
//! ```text
//!                 ┌────────────────────────────────────────┐
//!                 │         Cache<K, V, P, S>              │
//!                 │   Mutex<CacheState { store, policy }>  │
//!                 └──────────┬──────────────────┬──────────┘
//!                            │                  │
//!                            ▼                  ▼
//!           ┌───────────────────────┐  ┌───────────────────────────┐
//!           │   StoreMut<K, V>      │  │   EvictionPolicy<K>       │
//!           │                       │  │                           │
//!           │  get / insert         │  │  track_insertion(K)       │
//!           │  remove / contains    │  │  track_access(&K)         │
//!           │  len / clear          │  │  track_removal(&K)        │
//!           └───────────────────────┘  │  evict() → Option<K>      │
//!                                      │  peek_victim() → &K       │
//!                                      │  contains(&K)             │
//!                                      │  len / clear              │
//!                                      └─────────────┬─────────────┘
//!                                                    │
//!                                   ┌────────────────┴───────────────┐
//!                                   ▼                                ▼
//!                      ┌──────────────────────────┐      ┌─────────────────────┐
//!                      │  LinkedPolicy<K>         │      │  user policies      │
//!                      │  PolicyKind::{Lru,       │      │  (custom_policy)    │
//!                      │      Fifo, Lifo}         │      └─────────────────────┘
//!                      └──────────────────────────┘
//! ```
//!
//! ## Contract
//!
//! | Callback            | Called by the cache when                        |
//! |---------------------|-------------------------------------------------|
//! | `track_insertion`   | a new key was written to the store              |
//! | `track_access`      | `get` hit, or `put` overwrote an existing key   |
//! | `track_removal`     | `remove` deleted a key, or after an eviction    |
//! | `evict`             | a new key arrives and the store is at capacity  |
//! | `clear`             | the cache is cleared                            |
//! | `contains`          | `check_invariants` audits every stored key      |
//!
//! A policy must track exactly the keys present in the store. `evict` returning
//! `None` while the store is non-empty is reported by the cache as an
//! [`InvariantError`](crate::error::InvariantError).
//!
//! Policies are never shared between threads directly. The cache serializes
//! every call under its lock, so implementations need no interior
//! synchronization.

/// Tracks key lifecycle events and selects eviction victims.
///
/// # Example
///
/// ```
/// use policy_cache::policy::LinkedPolicy;
/// use policy_cache::traits::EvictionPolicy;
///
/// let mut policy = LinkedPolicy::lru();
/// policy.track_insertion("a");
/// policy.track_insertion("b");
/// policy.track_access(&"a");
///
/// assert_eq!(policy.evict(), Some("b"));
/// assert_eq!(policy.len(), 1);
/// ```
pub trait EvictionPolicy<K> {
    /// Records that `key` was inserted into the store.
    ///
    /// Called with a key that is already tracked only by misbehaving callers;
    /// built-in policies treat that case per their decision table.
    fn track_insertion(&mut self, key: K);

    /// Records a read hit or an overwrite of `key`.
    fn track_access(&mut self, key: &K);

    /// Stops tracking `key`. Must be a no-op for unknown keys.
    fn track_removal(&mut self, key: &K);

    /// Removes and returns the next victim, or `None` if nothing is tracked.
    fn evict(&mut self) -> Option<K>;

    /// Returns the key [`evict`](Self::evict) would return, without removing it.
    fn peek_victim(&self) -> Option<&K>;

    /// Returns `true` if `key` is tracked.
    fn contains(&self, key: &K) -> bool;

    /// Number of tracked keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every tracked key.
    fn clear(&mut self);
}
