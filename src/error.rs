//! Error types for the policy-cache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: the cache could not be constructed (missing or zero
//!   capacity, missing policy, pre-populated store or policy).
//! - [`InvariantError`]: the store and the policy disagree about which keys
//!   exist. Only reachable through a misbehaving custom policy or store.
//!
//! Lookup misses are not errors; `get` and `remove` return `None`.
//!
//! ## Example Usage
//!
//! ```
//! use policy_cache::builder::CacheBuilder;
//! use policy_cache::error::ConfigError;
//! use policy_cache::policy::PolicyKind;
//!
//! let err: ConfigError = CacheBuilder::<u64, u64>::new()
//!     .capacity(0)
//!     .policy(PolicyKind::Lru)
//!     .build()
//!     .unwrap_err();
//! assert!(err.to_string().contains("capacity"));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when a cache configuration is rejected at construction.
///
/// Produced by [`CacheBuilder::build`](crate::builder::CacheBuilder::build),
/// [`Cache::new`](crate::cache::Cache::new) and
/// [`Cache::with_store`](crate::cache::Cache::with_store). Nothing is ever
/// defaulted silently except the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub(crate) fn missing_capacity() -> Self {
        Self::new("capacity is required")
    }

    pub(crate) fn zero_capacity() -> Self {
        Self::new("capacity must be greater than zero")
    }

    pub(crate) fn missing_policy() -> Self {
        Self::new("eviction policy is required")
    }

    pub(crate) fn store_not_empty(len: usize) -> Self {
        Self(format!("store must be empty at construction (holds {len} entries)"))
    }

    pub(crate) fn policy_not_empty(len: usize) -> Self {
        Self(format!(
            "policy must not track any keys at construction (tracks {len})"
        ))
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when the store and the eviction policy have diverged.
///
/// The cache never repairs this state. A `put` that hits it is rejected
/// without touching the store, though the policy may already have given up
/// the victim it named. [`Cache::check_invariants`](crate::cache::Cache::check_invariants)
/// reports divergence on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub(crate) fn no_victim(store_len: usize, capacity: usize) -> Self {
        Self(format!(
            "policy has no eviction candidate while store holds {store_len} of {capacity} entries"
        ))
    }

    pub(crate) fn len_mismatch(store_len: usize, policy_len: usize) -> Self {
        Self(format!(
            "store holds {store_len} entries but policy tracks {policy_len} keys"
        ))
    }

    pub(crate) fn over_capacity(store_len: usize, capacity: usize) -> Self {
        Self(format!(
            "store holds {store_len} entries, above capacity {capacity}"
        ))
    }

    pub(crate) fn untracked_keys(count: usize) -> Self {
        Self(format!(
            "{count} stored key(s) are not tracked by the eviction policy"
        ))
    }

    pub(crate) fn victim_not_stored() -> Self {
        Self::new("policy eviction candidate is not present in the store")
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
