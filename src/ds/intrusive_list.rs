//! Sentinel-bounded doubly linked list backed by `SlotArena`.
//!
//! Nodes live in a `SlotArena` and link to each other by `SlotId`. Two
//! permanent sentinel slots bound the chain: slot 0 is the head sentinel and
//! slot 1 is the tail sentinel. Every real node therefore has both a `prev`
//! and a `next`, and splicing never has to special-case the ends.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬──────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                   │
//!   ├────────┼──────────────────────────────────────────────┤
//!   │ 0 HEAD │ { value: None,    prev: HEAD, next: 2 }      │
//!   │ 1 TAIL │ { value: None,    prev: 3,    next: TAIL }   │
//!   │ 2      │ { value: Some(A), prev: HEAD, next: 3 }      │
//!   │ 3      │ { value: Some(B), prev: 2,    next: TAIL }   │
//!   └────────┴──────────────────────────────────────────────┘
//!
//!   [HEAD] ◄──► [A] ◄──► [B] ◄──► [TAIL]
//!    front ─────────────────────► back
//! ```
//!
//! ## Operations
//! - `push_front(v)`: link a new node right after HEAD
//! - `push_back(v)`: link a new node right before TAIL
//! - `move_to_front(id)`: unlink + relink after HEAD
//! - `remove(id)`: unlink + free the slot
//! - `clear()`: drop all nodes and relink HEAD ◄──► TAIL
//!
//! ## Performance
//! - push / move / remove: O(1)
//! - `clear`: O(1) relinking; dropping values is the only per-node cost
//! - `iter`: O(n), double-ended
//!
//! Sentinel handles are never returned to callers and can't be removed.
//! `debug_validate_invariants()` is available in debug/test builds.

use crate::ds::slot_arena::{SlotArena, SlotId};

const HEAD: SlotId = SlotId(0);
const TAIL: SlotId = SlotId(1);

#[derive(Debug)]
struct Node<T> {
    // `None` only for the two sentinels.
    value: Option<T>,
    prev: SlotId,
    next: SlotId,
}

/// Doubly linked list whose nodes are stored in a `SlotArena` and linked via `SlotId`.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
}

impl<T> IntrusiveList<T> {
    /// Creates an empty list (just the two sentinels).
    pub fn new() -> Self {
        let mut arena = SlotArena::new();
        install_sentinels(&mut arena);
        Self { arena }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut arena = SlotArena::with_capacity(capacity.saturating_add(2));
        install_sentinels(&mut arena);
        Self { arena }
    }

    /// Returns the number of real nodes in the list.
    pub fn len(&self) -> usize {
        self.arena.len() - 2
    }

    /// Returns `true` if only the sentinels remain.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `id` is a live, non-sentinel node.
    pub fn contains(&self, id: SlotId) -> bool {
        !is_sentinel(id) && self.arena.contains(id)
    }

    /// Handle of the node adjacent to the head sentinel.
    pub fn front_id(&self) -> Option<SlotId> {
        self.next_of(HEAD).filter(|&id| id != TAIL)
    }

    /// Handle of the node adjacent to the tail sentinel.
    pub fn back_id(&self) -> Option<SlotId> {
        self.prev_of(TAIL).filter(|&id| id != HEAD)
    }

    /// Returns the value stored at `id`, if it is a live node.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        if is_sentinel(id) {
            return None;
        }
        self.arena.get(id).and_then(|node| node.value.as_ref())
    }

    /// Inserts `value` right after the head sentinel and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.alloc(value);
        self.link_after(id, HEAD);
        id
    }

    /// Inserts `value` right before the tail sentinel and returns its handle.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.alloc(value);
        self.link_before(id, TAIL);
        id
    }

    /// Unlinks `id`, frees its slot and returns the value.
    ///
    /// Returns `None` for sentinels and for handles that are not live.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        self.unlink(id)?;
        self.arena.remove(id).and_then(|node| node.value)
    }

    /// Moves an existing node next to the head sentinel; `false` if `id` is not live.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.front_id() != Some(id) {
            self.unlink(id);
            self.link_after(id, HEAD);
        }
        true
    }

    /// Drops every node and points the sentinels back at each other.
    pub fn clear(&mut self) {
        self.arena.clear();
        install_sentinels(&mut self.arena);
    }

    /// Iterates values from front to back. Use `.rev()` for back to front.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.iter_entries().map(|(_, value)| value)
    }

    /// Iterates `(SlotId, &T)` pairs from front to back.
    pub fn iter_entries(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.next_of(HEAD).unwrap_or(TAIL),
            back: self.prev_of(TAIL).unwrap_or(HEAD),
            remaining: self.len(),
        }
    }

    #[cfg(any(test, debug_assertions))]
    /// Returns the list order as SlotIds from front to back.
    pub fn debug_snapshot_ids(&self) -> Vec<SlotId> {
        self.iter_entries().map(|(id, _)| id).collect()
    }

    fn alloc(&mut self, value: T) -> SlotId {
        // Links are filled in by `link_after`.
        self.arena.insert(Node {
            value: Some(value),
            prev: HEAD,
            next: TAIL,
        })
    }

    fn next_of(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id).map(|node| node.next)
    }

    fn prev_of(&self, id: SlotId) -> Option<SlotId> {
        self.arena.get(id).map(|node| node.prev)
    }

    fn link_after(&mut self, id: SlotId, anchor: SlotId) -> Option<()> {
        let next = self.next_of(anchor)?;
        {
            let node = self.arena.get_mut(id)?;
            node.prev = anchor;
            node.next = next;
        }
        self.arena.get_mut(anchor)?.next = id;
        self.arena.get_mut(next)?.prev = id;
        Some(())
    }

    fn link_before(&mut self, id: SlotId, anchor: SlotId) -> Option<()> {
        let prev = self.prev_of(anchor)?;
        self.link_after(id, prev)
    }

    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };
        self.arena.get_mut(prev)?.next = next;
        self.arena.get_mut(next)?.prev = prev;

        let node = self.arena.get_mut(id)?;
        node.prev = id;
        node.next = id;
        Some(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let head = self.arena.get(HEAD).expect("head sentinel missing");
        let tail = self.arena.get(TAIL).expect("tail sentinel missing");
        assert!(head.value.is_none());
        assert!(tail.value.is_none());

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut prev = HEAD;
        let mut current = head.next;

        while current != TAIL {
            assert!(seen.insert(current), "cycle at slot {}", current.index());
            let node = self.arena.get(current).expect("linked node missing");
            assert!(node.value.is_some(), "sentinel linked mid-list");
            assert_eq!(node.prev, prev);

            prev = current;
            current = node.next;
            count += 1;
            assert!(count <= self.len());
        }

        assert_eq!(tail.prev, prev);
        assert_eq!(count, self.len());
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn is_sentinel(id: SlotId) -> bool {
    id == HEAD || id == TAIL
}

fn install_sentinels<T>(arena: &mut SlotArena<Node<T>>) {
    let head = arena.insert(Node {
        value: None,
        prev: HEAD,
        next: TAIL,
    });
    let tail = arena.insert(Node {
        value: None,
        prev: HEAD,
        next: TAIL,
    });
    debug_assert_eq!((head, tail), (HEAD, TAIL));
}

/// Double-ended iterator over `(SlotId, &T)` pairs.
pub struct Iter<'a, T> {
    list: &'a IntrusiveList<T>,
    front: SlotId,
    back: SlotId,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front;
        let node = self.list.arena.get(id)?;
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref().map(|value| (id, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back;
        let node = self.list.arena.get(id)?;
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_ref().map(|value| (id, value))
    }
}
