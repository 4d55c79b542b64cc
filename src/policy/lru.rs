//! # Recency (LRU) Cache
//!
//! Fixed-capacity cache that evicts the least recently used entry.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                      RecencyCache<K, V>                          │
//!   │                                                                  │
//!   │   index: FxHashMap<K, SlotId>                                    │
//!   │   ┌─────────┬────────┐                                           │
//!   │   │ "f1"    │  id_1  │──┐                                        │
//!   │   │ "f2"    │  id_2  │──┼──┐                                     │
//!   │   │ "f3"    │  id_3  │──┼──┼──┐                                  │
//!   │   └─────────┴────────┘  │  │  │                                  │
//!   │                         ▼  ▼  ▼                                  │
//!   │   order: IntrusiveList<Entry<K, V>>                              │
//!   │   head ──► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail               │
//!   │            MRU                       LRU (next victim)           │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list owns the entries; the index only stores handles. `get` and
//! `put` on a present key move its node to the head, a new key is pushed at
//! the head, and eviction pops the tail. All of it is O(1).
//!
//! ## Zero capacity
//!
//! A capacity-0 cache never retains anything: `put` immediately returns the
//! offered entry as evicted, so the cache behaves as a pass-through.
//!
//! ## Example
//!
//! ```
//! use cachefront::policy::RecencyCache;
//! use cachefront::traits::{CachePolicy, RecencyPolicy};
//!
//! let mut cache = RecencyCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//!
//! // "b" is now least recently used
//! assert_eq!(cache.put("c", 3), Some(("b", 2)));
//! assert_eq!(cache.peek_lru(), Some((&"a", &1)));
//! ```
//!
//! ## Thread Safety
//!
//! Not synchronized. Wrap the owning store in
//! `ConcurrentCacheStore` (feature `concurrency`) for shared access.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::InvariantError;
use crate::traits::{CachePolicy, RecencyPolicy};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Least-recently-used cache with O(1) get/put/remove.
#[derive(Debug)]
pub struct RecencyCache<K, V> {
    index: FxHashMap<K, SlotId>,
    order: IntrusiveList<Entry<K, V>>,
    capacity: usize,
}

impl<K, V> RecencyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: IntrusiveList::with_capacity(capacity),
            capacity,
        }
    }

    /// Keys from most to least recently used. O(n), for inspection only.
    pub fn keys_mru(&self) -> impl Iterator<Item = &K> {
        self.order.iter().map(|entry| &entry.key)
    }

    /// Checks that the index and the recency list describe the same entries
    /// within the capacity bound.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.order.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.order.len(),
                self.capacity
            )));
        }
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index size {} != list length {}",
                self.index.len(),
                self.order.len()
            )));
        }
        let listed = self
            .order
            .iter()
            .filter(|entry| self.index.contains_key(&entry.key))
            .count();
        if listed != self.order.len() {
            return Err(InvariantError::new(format!(
                "{} listed entries are not indexed",
                self.order.len() - listed
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.len() <= self.capacity);
        assert_eq!(self.index.len(), self.order.len());
        self.order.debug_validate_invariants();
        for (key, &id) in &self.index {
            let entry = self.order.get(id).expect("indexed slot missing");
            assert!(entry.key == *key);
        }
    }
}

impl<K, V> CachePolicy<K, V> for RecencyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn policy_name(&self) -> &'static str {
        "recency"
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    #[inline]
    fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.order.get(id).map(|entry| &entry.value)
    }

    #[inline]
    fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(id) {
                entry.value = value;
            }
            self.order.move_to_front(id);
            return None;
        }

        if self.capacity == 0 {
            return Some((key, value));
        }

        let evicted = if self.index.len() >= self.capacity {
            self.pop_lru()
        } else {
            None
        };

        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        evicted
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.order.remove(id).map(|entry| entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }
}

impl<K, V> RecencyPolicy<K, V> for RecencyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.back().map(|entry| (&entry.key, &entry.value))
    }

    fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => self.order.move_to_front(id),
            None => false,
        }
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        self.order.iter().position(|entry| entry.key == *key)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    /// Reference model: keys in MRU → LRU order.
    fn model_touch(model: &mut VecDeque<(u8, u32)>, key: u8) -> Option<u32> {
        let pos = model.iter().position(|(k, _)| *k == key)?;
        let item = model.remove(pos)?;
        model.push_front(item);
        Some(item.1)
    }

    proptest! {
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_reference_model(
            capacity in 0usize..6,
            ops in prop::collection::vec((0u8..3, 0u8..10, any::<u32>()), 0..200)
        ) {
            let mut cache = RecencyCache::new(capacity);
            let mut model: VecDeque<(u8, u32)> = VecDeque::new();

            for (op, key, value) in ops {
                match op {
                    0 => {
                        let expected = model_touch(&mut model, key);
                        prop_assert_eq!(cache.get(&key).copied(), expected);
                    }
                    1 => {
                        let evicted = cache.put(key, value);
                        if model_touch(&mut model, key).is_some() {
                            model[0].1 = value;
                            prop_assert_eq!(evicted, None);
                        } else if capacity == 0 {
                            prop_assert_eq!(evicted, Some((key, value)));
                        } else {
                            let expected = if model.len() >= capacity { model.pop_back() } else { None };
                            model.push_front((key, value));
                            prop_assert_eq!(evicted, expected);
                        }
                    }
                    _ => {
                        let expected = model
                            .iter()
                            .position(|(k, _)| *k == key)
                            .and_then(|pos| model.remove(pos))
                            .map(|(_, v)| v);
                        prop_assert_eq!(cache.remove(&key), expected);
                    }
                }
                prop_assert!(cache.len() <= capacity);
                prop_assert_eq!(cache.check_invariants(), Ok(()));
                cache.debug_validate_invariants();
            }

            let keys: Vec<u8> = cache.keys_mru().copied().collect();
            let expected: Vec<u8> = model.iter().map(|(k, _)| *k).collect();
            prop_assert_eq!(keys, expected);
        }
    }
}
