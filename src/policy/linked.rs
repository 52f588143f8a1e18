//! Linked eviction policies: LRU, FIFO and LIFO on one shared structure.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                        LinkedPolicy<K> Layout                            │
//! │                                                                          │
//! │   index: FxHashMap<K, SlotId>        list: IntrusiveList<K>              │
//! │   ┌──────────┬────────┐                                                  │
//! │   │   Key    │ SlotId │     [HEAD] ◄─► [k3] ◄─► [k2] ◄─► [k1] ◄─► [TAIL] │
//! │   ├──────────┼────────┤              front                  back         │
//! │   │   k1     │  id_1  │──────────────────────────────────┘               │
//! │   │   k2     │  id_2  │                                                  │
//! │   │   k3     │  id_3  │                                                  │
//! │   └──────────┴────────┘                                                  │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list owns the nodes (through its arena); the index only stores
//! handles. A key is in the index iff exactly one live node holds it.
//!
//! ## Decision Table
//!
//! | Kind | `track_access` | insert (new)  | insert (existing) | `evict` takes   |
//! |------|----------------|---------------|-------------------|-----------------|
//! | LRU  | move to front  | push front    | move to front     | back (LRU)      |
//! | FIFO | no-op          | push back     | no-op             | front (oldest)  |
//! | LIFO | no-op          | push front    | no-op             | front (newest)  |
//!
//! Eviction and `track_removal` share one unlink+erase path, so the index and
//! the list can't drift apart.
//!
//! ## Example Usage
//!
//! ```
//! use policy_cache::policy::{LinkedPolicy, PolicyKind};
//! use policy_cache::traits::EvictionPolicy;
//!
//! let mut fifo = LinkedPolicy::new(PolicyKind::Fifo);
//! for key in ["a", "b", "c"] {
//!     fifo.track_insertion(key);
//! }
//! fifo.track_access(&"a"); // ignored by FIFO
//! assert_eq!(fifo.evict(), Some("a"));
//!
//! let mut lifo = LinkedPolicy::lifo();
//! for key in ["a", "b", "c"] {
//!     lifo.track_insertion(key);
//! }
//! assert_eq!(lifo.evict(), Some("c"));
//! ```
//!
//! ## Thread Safety
//!
//! Not synchronized. [`Cache`](crate::cache::Cache) wraps it in a mutex.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::traits::EvictionPolicy;

/// Selects which built-in decision table a [`LinkedPolicy`] follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// Least Recently Used: accesses refresh recency, the stalest key goes first.
    Lru,
    /// First In, First Out: the oldest insertion goes first, accesses are ignored.
    Fifo,
    /// Last In, First Out: the newest insertion goes first, accesses are ignored.
    Lifo,
}

impl PolicyKind {
    /// Short lowercase name, used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Lru => "lru",
            PolicyKind::Fifo => "fifo",
            PolicyKind::Lifo => "lifo",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-only eviction tracker shared by LRU, FIFO and LIFO.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`. Each tracked key is held
///   twice (index and list node), so cheap clones are preferable.
///
/// # Example
///
/// ```
/// use policy_cache::policy::LinkedPolicy;
/// use policy_cache::traits::EvictionPolicy;
///
/// let mut lru = LinkedPolicy::lru();
/// lru.track_insertion(1);
/// lru.track_insertion(2);
/// lru.track_insertion(3);
/// lru.track_access(&1);
///
/// // Victims in order: 2, 3, 1
/// let order: Vec<_> = lru.iter().copied().collect();
/// assert_eq!(order, vec![2, 3, 1]);
/// ```
pub struct LinkedPolicy<K> {
    kind: PolicyKind,
    index: FxHashMap<K, SlotId>,
    list: IntrusiveList<K>,
}

impl<K> LinkedPolicy<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty policy following `kind`'s decision table.
    pub fn new(kind: PolicyKind) -> Self {
        Self {
            kind,
            index: FxHashMap::default(),
            list: IntrusiveList::new(),
        }
    }

    /// Creates an empty policy with room for `capacity` keys.
    pub fn with_capacity(kind: PolicyKind, capacity: usize) -> Self {
        Self {
            kind,
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: IntrusiveList::with_capacity(capacity),
        }
    }

    pub fn lru() -> Self {
        Self::new(PolicyKind::Lru)
    }

    pub fn fifo() -> Self {
        Self::new(PolicyKind::Fifo)
    }

    pub fn lifo() -> Self {
        Self::new(PolicyKind::Lifo)
    }

    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    /// Iterates tracked keys in eviction order: the next victim comes first.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &K> + '_> {
        match self.kind {
            PolicyKind::Lru => Box::new(self.list.iter().rev()),
            PolicyKind::Fifo | PolicyKind::Lifo => Box::new(self.list.iter()),
        }
    }

    fn victim_id(&self) -> Option<SlotId> {
        match self.kind {
            PolicyKind::Lru => self.list.back_id(),
            PolicyKind::Fifo | PolicyKind::Lifo => self.list.front_id(),
        }
    }

    fn link_new(&mut self, key: K) {
        let id = match self.kind {
            PolicyKind::Lru | PolicyKind::Lifo => self.list.push_front(key.clone()),
            PolicyKind::Fifo => self.list.push_back(key.clone()),
        };
        self.index.insert(key, id);
    }

    #[cfg(any(test, debug_assertions))]
    /// Asserts that the list is well formed and agrees with the index.
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert_eq!(self.index.len(), self.list.len());
        for (id, key) in self.list.iter_entries() {
            assert_eq!(self.index.get(key), Some(&id), "index points elsewhere");
        }
    }
}

impl<K> EvictionPolicy<K> for LinkedPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn track_insertion(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&id) => {
                if self.kind == PolicyKind::Lru {
                    self.list.move_to_front(id);
                }
            },
            None => self.link_new(key),
        }
    }

    fn track_access(&mut self, key: &K) {
        if self.kind != PolicyKind::Lru {
            return;
        }
        if let Some(&id) = self.index.get(key) {
            self.list.move_to_front(id);
        }
    }

    fn track_removal(&mut self, key: &K) {
        if let Some(id) = self.index.remove(key) {
            self.list.remove(id);
        }
    }

    fn evict(&mut self) -> Option<K> {
        let id = self.victim_id()?;
        let key = self.list.remove(id)?;
        self.index.remove(&key);
        Some(key)
    }

    fn peek_victim(&self) -> Option<&K> {
        self.victim_id().and_then(|id| self.list.get(id))
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }
}

impl<K> fmt::Debug for LinkedPolicy<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedPolicy")
            .field("kind", &self.kind)
            .field("len", &self.index.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(kind: PolicyKind, keys: &[&'static str]) -> LinkedPolicy<&'static str> {
        let mut policy = LinkedPolicy::new(kind);
        for &key in keys {
            policy.track_insertion(key);
        }
        policy
    }

    fn order(policy: &LinkedPolicy<&'static str>) -> Vec<&'static str> {
        policy.iter().copied().collect()
    }

    // ==============================================
    // Decision table
    // ==============================================

    mod lru {
        use super::*;

        #[test]
        fn evicts_least_recently_used() {
            let mut policy = filled(PolicyKind::Lru, &["a", "b", "c"]);
            policy.track_access(&"a");
            assert_eq!(order(&policy), vec!["b", "c", "a"]);
            assert_eq!(policy.evict(), Some("b"));
            assert_eq!(policy.evict(), Some("c"));
            assert_eq!(policy.evict(), Some("a"));
            assert_eq!(policy.evict(), None);
            policy.debug_validate_invariants();
        }

        #[test]
        fn reinsertion_counts_as_access() {
            let mut policy = filled(PolicyKind::Lru, &["a", "b", "c"]);
            policy.track_insertion("a");
            assert_eq!(policy.len(), 3);
            assert_eq!(policy.peek_victim(), Some(&"b"));
            policy.debug_validate_invariants();
        }

        #[test]
        fn access_to_front_is_stable() {
            let mut policy = filled(PolicyKind::Lru, &["a", "b"]);
            policy.track_access(&"b");
            policy.track_access(&"b");
            assert_eq!(order(&policy), vec!["a", "b"]);
        }
    }

    mod fifo {
        use super::*;

        #[test]
        fn evicts_oldest_insertion() {
            let mut policy = filled(PolicyKind::Fifo, &["a", "b", "c"]);
            policy.track_access(&"a");
            assert_eq!(order(&policy), vec!["a", "b", "c"]);
            assert_eq!(policy.evict(), Some("a"));
            assert_eq!(policy.peek_victim(), Some(&"b"));
            policy.debug_validate_invariants();
        }

        #[test]
        fn reinsertion_keeps_position() {
            let mut policy = filled(PolicyKind::Fifo, &["a", "b", "c"]);
            policy.track_insertion("a");
            assert_eq!(order(&policy), vec!["a", "b", "c"]);
            assert_eq!(policy.len(), 3);
        }
    }

    mod lifo {
        use super::*;

        #[test]
        fn evicts_newest_insertion() {
            let mut policy = filled(PolicyKind::Lifo, &["a", "b", "c"]);
            policy.track_access(&"a");
            assert_eq!(order(&policy), vec!["c", "b", "a"]);
            assert_eq!(policy.evict(), Some("c"));
            policy.track_insertion("d");
            assert_eq!(policy.evict(), Some("d"));
            assert_eq!(policy.evict(), Some("b"));
            policy.debug_validate_invariants();
        }

        #[test]
        fn reinsertion_keeps_position() {
            let mut policy = filled(PolicyKind::Lifo, &["a", "b", "c"]);
            policy.track_insertion("a");
            assert_eq!(order(&policy), vec!["c", "b", "a"]);
        }
    }

    // ==============================================
    // Shared bookkeeping
    // ==============================================

    #[test]
    fn removal_is_idempotent_for_every_kind() {
        for kind in [PolicyKind::Lru, PolicyKind::Fifo, PolicyKind::Lifo] {
            let mut policy = filled(kind, &["a", "b", "c"]);
            policy.track_removal(&"b");
            policy.track_removal(&"b");
            policy.track_removal(&"zzz");
            assert_eq!(policy.len(), 2);
            assert!(!policy.contains(&"b"));
            policy.debug_validate_invariants();
        }
    }

    #[test]
    fn access_to_unknown_key_is_ignored() {
        let mut policy = filled(PolicyKind::Lru, &["a"]);
        policy.track_access(&"missing");
        assert_eq!(policy.len(), 1);
        assert!(!policy.contains(&"missing"));
    }

    #[test]
    fn evict_on_empty_is_none() {
        for kind in [PolicyKind::Lru, PolicyKind::Fifo, PolicyKind::Lifo] {
            let mut policy: LinkedPolicy<u8> = LinkedPolicy::new(kind);
            assert_eq!(policy.evict(), None);
            assert_eq!(policy.peek_victim(), None);
            assert!(policy.is_empty());
        }
    }

    #[test]
    fn clear_resets_everything() {
        let mut policy = LinkedPolicy::with_capacity(PolicyKind::Fifo, 4);
        for i in 0..4 {
            policy.track_insertion(i);
        }
        policy.clear();
        assert!(policy.is_empty());
        assert_eq!(policy.evict(), None);
        policy.debug_validate_invariants();

        policy.track_insertion(9);
        assert_eq!(policy.evict(), Some(9));
    }

    #[test]
    fn evicted_key_can_be_reinserted() {
        let mut policy = filled(PolicyKind::Lru, &["a", "b"]);
        assert_eq!(policy.evict(), Some("a"));
        policy.track_insertion("a");
        assert_eq!(order(&policy), vec!["b", "a"]);
        policy.debug_validate_invariants();
    }

    #[test]
    fn kind_and_display() {
        assert_eq!(LinkedPolicy::<u8>::lru().kind(), PolicyKind::Lru);
        assert_eq!(LinkedPolicy::<u8>::fifo().kind(), PolicyKind::Fifo);
        assert_eq!(LinkedPolicy::<u8>::lifo().kind(), PolicyKind::Lifo);
        assert_eq!(PolicyKind::Lifo.to_string(), "lifo");
        let dbg = format!("{:?}", filled(PolicyKind::Lru, &["a"]));
        assert!(dbg.contains("Lru"));
    }

    // ==============================================
    // Property tests against a VecDeque model
    // ==============================================

    mod property_tests {
        use std::collections::VecDeque;

        use proptest::prelude::*;

        use super::*;

        #[derive(Debug, Clone)]
        enum Op {
            Insert(u8),
            Access(u8),
            Remove(u8),
            Evict,
            Clear,
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                6 => (0u8..16).prop_map(Op::Insert),
                4 => (0u8..16).prop_map(Op::Access),
                2 => (0u8..16).prop_map(Op::Remove),
                2 => Just(Op::Evict),
                1 => Just(Op::Clear),
            ]
        }

        fn kind_strategy() -> impl Strategy<Value = PolicyKind> {
            prop_oneof![
                Just(PolicyKind::Lru),
                Just(PolicyKind::Fifo),
                Just(PolicyKind::Lifo),
            ]
        }

        /// Reference model: front of the deque is the next victim.
        fn model_apply(kind: PolicyKind, model: &mut VecDeque<u8>, op: &Op) -> Option<u8> {
            match *op {
                Op::Insert(k) => {
                    if let Some(pos) = model.iter().position(|&x| x == k) {
                        if kind == PolicyKind::Lru {
                            model.remove(pos);
                            model.push_back(k);
                        }
                    } else {
                        match kind {
                            PolicyKind::Lru | PolicyKind::Fifo => model.push_back(k),
                            PolicyKind::Lifo => model.push_front(k),
                        }
                    }
                    None
                },
                Op::Access(k) => {
                    if kind == PolicyKind::Lru {
                        if let Some(pos) = model.iter().position(|&x| x == k) {
                            model.remove(pos);
                            model.push_back(k);
                        }
                    }
                    None
                },
                Op::Remove(k) => {
                    model.retain(|&x| x != k);
                    None
                },
                Op::Evict => model.pop_front(),
                Op::Clear => {
                    model.clear();
                    None
                },
            }
        }

        proptest! {
            /// Property: eviction order matches the reference model for every kind
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_matches_reference_model(
                kind in kind_strategy(),
                ops in prop::collection::vec(op_strategy(), 0..200)
            ) {
                let mut policy = LinkedPolicy::new(kind);
                let mut model = VecDeque::new();

                for op in &ops {
                    let expected = model_apply(kind, &mut model, op);
                    match *op {
                        Op::Insert(k) => policy.track_insertion(k),
                        Op::Access(k) => policy.track_access(&k),
                        Op::Remove(k) => policy.track_removal(&k),
                        Op::Evict => prop_assert_eq!(policy.evict(), expected),
                        Op::Clear => policy.clear(),
                    }
                    prop_assert_eq!(policy.len(), model.len());
                    prop_assert_eq!(policy.peek_victim(), model.front());
                }

                let actual: Vec<u8> = policy.iter().copied().collect();
                let expected: Vec<u8> = model.iter().copied().collect();
                prop_assert_eq!(actual, expected);
                policy.debug_validate_invariants();
            }

            /// Property: every tracked key is evicted exactly once
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_drain_yields_each_key_once(
                kind in kind_strategy(),
                keys in prop::collection::vec(any::<u16>(), 0..100)
            ) {
                let mut policy = LinkedPolicy::new(kind);
                for &k in &keys {
                    policy.track_insertion(k);
                }
                let mut drained = Vec::new();
                while let Some(k) = policy.evict() {
                    drained.push(k);
                }
                let mut unique = keys.clone();
                unique.sort_unstable();
                unique.dedup();
                drained.sort_unstable();
                prop_assert_eq!(drained, unique);
                prop_assert!(policy.is_empty());
            }
        }
    }
}
