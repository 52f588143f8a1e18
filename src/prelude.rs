pub use crate::builder::CacheBuilder;
pub use crate::cache::Cache;
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::{LinkedPolicy, PolicyKind};
pub use crate::store::hashmap::HashMapStore;
pub use crate::store::traits::{StoreCore, StoreMut};
pub use crate::traits::EvictionPolicy;
