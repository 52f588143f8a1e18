//! Node and list primitives shared by the linked eviction policies.

pub mod intrusive_list;
pub mod slot_arena;

pub use intrusive_list::IntrusiveList;
pub use slot_arena::{SlotArena, SlotId};
