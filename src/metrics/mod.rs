//! Operation counters for [`Cache`](crate::cache::Cache), compiled in with the
//! `metrics` feature.
//!
//! Counters live inside the cache's guarded state and are bumped while the
//! lock is held, so they are plain `u64`s and a snapshot is always consistent
//! with the entry count captured alongside it.

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
