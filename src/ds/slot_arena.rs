//! Slot arena with stable handles.
//!
//! Each slot is either occupied or vacant. Vacant slots form a singly linked
//! free chain threaded through the slots themselves, so recycling a slot
//! needs no side allocation. A handle stays valid until its value is removed;
//! after that the index may be reissued by a later insert.
//!
//! The arena is the node store behind [`IntrusiveList`](crate::ds::IntrusiveList):
//! links are plain indices, which keeps the list free of cyclic ownership.

/// Handle to a slot in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

/// Vec-backed arena addressed by [`SlotId`].
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    occupied: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Preallocates room for `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            occupied: 0,
        }
    }

    /// Stores `value`, reusing the most recently freed slot if there is one.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.occupied += 1;
        if let Some(idx) = self.free_head {
            if let Slot::Vacant { next_free } = self.slots[idx] {
                self.free_head = next_free;
            }
            self.slots[idx] = Slot::Occupied(value);
            return SlotId(idx);
        }
        self.slots.push(Slot::Occupied(value));
        SlotId(self.slots.len() - 1)
    }

    /// Takes the value out of `id` and pushes the slot onto the free chain.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        let Slot::Occupied(value) = std::mem::replace(slot, vacant) else {
            return None;
        };
        self.free_head = Some(id.0);
        self.occupied -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Drops every value and forgets all handles. The allocation is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.occupied = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
