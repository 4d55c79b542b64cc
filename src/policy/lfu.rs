//! # Frequency (LFU) Cache
//!
//! Fixed-capacity cache that evicts the least frequently used entry. Ties
//! between equal frequencies go to the entry that reached that frequency
//! first.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                        FrequencyCache<K, V>                          │
//!   │                                                                      │
//!   │   FrequencyBuckets<K, V>                                             │
//!   │     index:   K → SlotId                                              │
//!   │     slots:   (key, value, freq, prev/next)                           │
//!   │     buckets: freq → list, chained in ascending frequency order       │
//!   │                                                                      │
//!   │   min_freq ──► freq=1: [newest] ◄──► ... ◄──► [oldest] ← victim      │
//!   │                   │ next                                             │
//!   │                   ▼                                                  │
//!   │                freq=3: [..]                                          │
//!   │                                                                      │
//!   │   capacity: usize                                                    │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Frequency lifecycle
//!
//! ```text
//!   put(new key)          → freq = 1, min_freq = 1
//!   get(key) / put(key)   → freq += 1, appended behind older peers at freq+1
//!   remove(key)           → slot unlinked; if its bucket was the minimum
//!                           and is now empty, min_freq moves to the next
//!                           bucket in the chain
//!   eviction              → oldest entry of the min_freq bucket
//! ```
//!
//! `min_freq` is repaired on every path that can empty a bucket, including an
//! explicit `remove`, so eviction after arbitrary removals still picks a
//! genuine minimum-frequency entry.
//!
//! ## Example
//!
//! ```
//! use cachefront::policy::FrequencyCache;
//! use cachefront::traits::{CachePolicy, FrequencyPolicy};
//!
//! let mut cache = FrequencyCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.get(&"a");
//!
//! assert_eq!(cache.frequency(&"a"), Some(3));
//! assert_eq!(cache.put("c", 3), Some(("b", 2)));
//! ```
//!
//! ## Implementation Notes
//!
//! - **Zero capacity**: `put` of a new key retains nothing and hands the entry
//!   straight back.
//! - **Overflow**: frequencies saturate at `u64::MAX`.

use std::hash::Hash;

use crate::ds::FrequencyBuckets;
use crate::error::InvariantError;
use crate::traits::{CachePolicy, FrequencyPolicy};

/// Least-frequently-used cache with O(1) get/put/remove.
#[derive(Debug)]
pub struct FrequencyCache<K, V> {
    buckets: FrequencyBuckets<K, V>,
    capacity: usize,
}

impl<K, V> FrequencyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            buckets: FrequencyBuckets::with_capacity(capacity),
            capacity,
        }
    }

    /// Keys at `freq`, next eviction candidate first.
    pub fn keys_at_frequency(&self, freq: u64) -> Vec<&K> {
        self.buckets.bucket_keys(freq)
    }

    /// Validates the capacity bound and the bucket chain.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.buckets.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.buckets.len(),
                self.capacity
            )));
        }
        self.buckets.check_invariants()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.buckets.len() <= self.capacity);
        self.buckets.debug_validate_invariants();
    }
}

impl<K, V> CachePolicy<K, V> for FrequencyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn policy_name(&self) -> &'static str {
        "frequency"
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        self.buckets.touch_value(key)
    }

    #[inline]
    fn peek(&self, key: &K) -> Option<&V> {
        self.buckets.get(key)
    }

    fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(slot) = self.buckets.get_mut(&key) {
            *slot = value;
            self.buckets.touch(&key);
            return None;
        }

        if self.capacity == 0 {
            return Some((key, value));
        }

        let evicted = if self.buckets.len() >= self.capacity {
            self.buckets.pop_min()
        } else {
            None
        };
        self.buckets.insert(key, value);
        evicted
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        self.buckets.remove(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.buckets.contains(key)
    }

    fn len(&self) -> usize {
        self.buckets.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.buckets.clear();
    }
}

impl<K, V> FrequencyPolicy<K, V> for FrequencyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_lfu(&self) -> Option<(&K, &V)> {
        self.buckets.peek_min_entry()
    }

    fn pop_lfu(&mut self) -> Option<(K, V)> {
        self.buckets.pop_min()
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        self.buckets.frequency(key)
    }

    fn min_frequency(&self) -> Option<u64> {
        self.buckets.min_freq()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    proptest! {
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_capacity_bound_and_invariants(
            capacity in 0usize..6,
            ops in prop::collection::vec((0u8..3, 0u8..10), 0..200)
        ) {
            let mut cache = FrequencyCache::new(capacity);
            for (op, key) in ops {
                match op {
                    0 => { cache.get(&key); }
                    1 => { cache.put(key, u32::from(key)); }
                    _ => { cache.remove(&key); }
                }
                prop_assert!(cache.len() <= capacity);
                prop_assert_eq!(cache.check_invariants(), Ok(()));
                cache.debug_validate_invariants();
            }
        }

        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_victim_is_oldest_at_minimum_frequency(
            capacity in 1usize..5,
            ops in prop::collection::vec((0u8..3, 0u8..8), 0..200)
        ) {
            let mut cache = FrequencyCache::new(capacity);
            // key -> (frequency, stamp of last insert or bump)
            let mut model: HashMap<u8, (u64, u64)> = HashMap::new();
            let mut clock = 0u64;
            for (op, key) in ops {
                clock += 1;
                match op {
                    0 => {
                        if cache.get(&key).is_some() {
                            let entry = model.get_mut(&key).unwrap();
                            *entry = (entry.0 + 1, clock);
                        }
                    }
                    1 => {
                        let expected_victim = if model.contains_key(&key) || model.len() < capacity {
                            None
                        } else {
                            model
                                .iter()
                                .min_by_key(|&(_, &(freq, stamp))| (freq, stamp))
                                .map(|(&victim, _)| victim)
                        };
                        let evicted = cache.put(key, ()).map(|(victim, ())| victim);
                        prop_assert_eq!(evicted, expected_victim);
                        if let Some(victim) = evicted {
                            model.remove(&victim);
                        }
                        let entry = model.entry(key).or_insert((0, clock));
                        *entry = (entry.0 + 1, clock);
                    }
                    _ => {
                        cache.remove(&key);
                        model.remove(&key);
                    }
                }
                prop_assert_eq!(
                    cache.min_frequency(),
                    model.values().map(|&(freq, _)| freq).min()
                );
            }
        }
    }
}
