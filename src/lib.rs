//! policy-cache: a thread-safe bounded key-value cache with pluggable
//! LRU / FIFO / LIFO eviction.
//!
//! - [`cache::Cache`]: the orchestrator. A store and a policy behind one lock.
//! - [`policy::LinkedPolicy`]: the O(1) linked eviction engine shared by the
//!   built-in policies.
//! - [`builder::CacheBuilder`]: validated construction.
//!
//! Enable the `metrics` feature (on by default) for operation counters.

pub mod builder;
pub mod cache;
pub mod ds;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod store;
pub mod traits;

pub use crate::builder::CacheBuilder;
pub use crate::cache::Cache;
pub use crate::ds::{IntrusiveList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CacheMetricsSnapshot;
pub use crate::policy::{LinkedPolicy, PolicyKind};
