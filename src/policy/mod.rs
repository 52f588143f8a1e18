//! Built-in eviction policies.

pub mod linked;

pub use linked::{LinkedPolicy, PolicyKind};
