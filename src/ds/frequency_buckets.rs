//! Frequency buckets for O(1) LFU bookkeeping.
//!
//! Every entry lives in a [`SlotArena`] slot holding its key, value and
//! access count. Entries with the same count form a doubly linked bucket, and
//! the buckets themselves are chained in ascending frequency order. Because
//! each bucket knows its neighbours, `min_freq` is repaired in O(1) whenever
//! the minimum bucket empties, whether that happens through a touch, an
//! explicit remove or an eviction. No operation scans for the minimum.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>          entries: SlotArena<Entry<K, V>>
//!   ┌──────────┬────────┐                ┌──────┬──────────────────────────┐
//!   │ "page_a" │  id_0  │ ─────────────► │ id_0 │ value, freq:2, prev/next │
//!   │ "page_b" │  id_1  │ ─────────────► │ id_1 │ value, freq:1, prev/next │
//!   │ "page_c" │  id_2  │ ─────────────► │ id_2 │ value, freq:1, prev/next │
//!   └──────────┴────────┘                └──────┴──────────────────────────┘
//!
//!   buckets: FxHashMap<u64, Bucket>
//!
//!   min_freq = 1
//!        │
//!        ▼
//!   freq=1: head ──► [id_2] ◄──► [id_1] ◄── tail   (tail is evicted first)
//!              │
//!            next
//!              ▼
//!   freq=2: head ──► [id_0] ◄── tail
//! ```
//!
//! ## Ordering within a bucket
//!
//! New and bumped entries are pushed at the head; eviction pops the tail. The
//! tail is therefore the entry that reached this frequency longest ago, which
//! gives strict FIFO tie-breaking among equal frequencies.
//!
//! ## Operations
//!
//! | Operation   | Time | Notes                                  |
//! |-------------|------|----------------------------------------|
//! | `insert`    | O(1) | New key starts at freq=1               |
//! | `touch`     | O(1) | freq += 1, moves to head of next bucket |
//! | `remove`    | O(1) | Repairs `min_freq` if its bucket empties |
//! | `pop_min`   | O(1) | Tail of the `min_freq` bucket          |
//! | `peek_min`  | O(1) |                                        |
//!
//! ## Example Usage
//!
//! ```
//! use cachefront::ds::FrequencyBuckets;
//!
//! let mut freq = FrequencyBuckets::new();
//! freq.insert("page_a", 1);
//! freq.insert("page_b", 2);
//! freq.touch(&"page_a");
//!
//! assert_eq!(freq.frequency(&"page_a"), Some(2));
//! assert_eq!(freq.pop_min(), Some(("page_b", 2)));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Link fields first: they are touched on every bucket move.
#[derive(Debug)]
#[repr(C)]
struct Entry<K, V> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    freq: u64,
    key: K,
    value: V,
}

#[derive(Debug, Default)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    prev: Option<u64>,
    next: Option<u64>,
}

/// Key/value entries grouped by access frequency, FIFO within a frequency.
#[derive(Debug)]
pub struct FrequencyBuckets<K, V> {
    entries: SlotArena<Entry<K, V>>,
    index: FxHashMap<K, SlotId>,
    buckets: FxHashMap<u64, Bucket>,
    /// 0 when empty.
    min_freq: u64,
}

/// Bucket map pre-allocation; most entries sit at low frequencies.
pub const DEFAULT_BUCKET_PREALLOC: usize = 32;

impl<K, V> FrequencyBuckets<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            entries: SlotArena::new(),
            index: FxHashMap::default(),
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::with_capacity_and_hasher(
                DEFAULT_BUCKET_PREALLOC,
                Default::default(),
            ),
            min_freq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the current frequency for `key`, if present.
    #[inline]
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| entry.freq)
    }

    /// Smallest frequency with a non-empty bucket, `None` when empty.
    pub fn min_freq(&self) -> Option<u64> {
        (self.min_freq != 0).then_some(self.min_freq)
    }

    /// Value for `key` without changing its frequency.
    pub fn get(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Mutable value for `key` without changing its frequency.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = *self.index.get(key)?;
        self.entries.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Peeks the eviction candidate `(key, freq)`.
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        let id = self.peek_min_id()?;
        let entry = self.entries.get(id)?;
        Some((&entry.key, entry.freq))
    }

    /// Peeks the eviction candidate's key and value.
    pub fn peek_min_entry(&self) -> Option<(&K, &V)> {
        let id = self.peek_min_id()?;
        let entry = self.entries.get(id)?;
        Some((&entry.key, &entry.value))
    }

    fn peek_min_id(&self) -> Option<SlotId> {
        if self.min_freq == 0 {
            return None;
        }
        self.buckets.get(&self.min_freq)?.tail
    }

    /// Keys at `freq` from the next eviction candidate to the newest arrival.
    pub fn bucket_keys(&self, freq: u64) -> Vec<&K> {
        let mut keys = Vec::new();
        let mut current = self.buckets.get(&freq).and_then(|bucket| bucket.tail);
        while let Some(id) = current {
            let Some(entry) = self.entries.get(id) else {
                break;
            };
            keys.push(&entry.key);
            current = entry.prev;
        }
        keys
    }

    /// Inserts `key` at frequency 1. Returns `false` (and drops `value`) if
    /// the key is already tracked.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        let id = self.entries.insert(Entry {
            prev: None,
            next: None,
            freq: 1,
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        if !self.buckets.contains_key(&1) {
            let next = self.min_freq();
            self.insert_bucket(1, None, next);
        }
        self.list_push_front(1, id);
        self.min_freq = 1;
        true
    }

    /// Increments the frequency of `key` and returns the new count.
    ///
    /// The entry moves to the head of the next bucket, i.e. it becomes the
    /// newest arrival at that frequency. Saturates at `u64::MAX`, where the
    /// entry is only refreshed within its bucket.
    #[inline]
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.touch_id(id)
    }

    /// Touches `key` and returns its value.
    pub fn touch_value(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.touch_id(id)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    fn touch_id(&mut self, id: SlotId) -> Option<u64> {
        let current_freq = self.entries.get(id)?.freq;
        if current_freq == u64::MAX {
            self.list_remove(current_freq, id)?;
            self.list_push_front(current_freq, id);
            return Some(current_freq);
        }
        let next_freq = current_freq + 1;

        let (prev_freq, next_existing) = {
            let bucket = self.buckets.get(&current_freq)?;
            (bucket.prev, bucket.next)
        };

        self.list_remove(current_freq, id)?;
        let bucket_empty = self.bucket_is_empty(current_freq);
        if bucket_empty {
            self.remove_bucket(current_freq, prev_freq, next_existing);
            if self.min_freq == current_freq {
                self.min_freq = next_existing.unwrap_or(0);
            }
        }

        if !self.buckets.contains_key(&next_freq) {
            let prev = if bucket_empty {
                prev_freq
            } else {
                Some(current_freq)
            };
            self.insert_bucket(next_freq, prev, next_existing);
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.freq = next_freq;
        }
        self.list_push_front(next_freq, id);
        if self.min_freq == 0 || next_freq < self.min_freq {
            self.min_freq = next_freq;
        }
        Some(next_freq)
    }

    /// Removes `key` and returns its value.
    ///
    /// If this empties the minimum bucket, `min_freq` moves to the next
    /// non-empty bucket (or 0 when nothing is left).
    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = *self.index.get(key)?;
        self.unlink(id).map(|(_, value)| value)
    }

    /// Removes and returns the eviction candidate: the oldest entry in the
    /// lowest-frequency bucket.
    #[inline]
    pub fn pop_min(&mut self) -> Option<(K, V)> {
        let id = self.peek_min_id()?;
        self.unlink(id)
    }

    fn unlink(&mut self, id: SlotId) -> Option<(K, V)> {
        let freq = self.entries.get(id)?.freq;
        let (prev, next) = {
            let bucket = self.buckets.get(&freq)?;
            (bucket.prev, bucket.next)
        };

        self.list_remove(freq, id)?;
        if self.bucket_is_empty(freq) {
            self.remove_bucket(freq, prev, next);
            if self.min_freq == freq {
                self.min_freq = next.unwrap_or(0);
            }
        }

        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }

    fn bucket_is_empty(&self, freq: u64) -> bool {
        self.buckets
            .get(&freq)
            .is_none_or(|bucket| bucket.head.is_none())
    }

    fn insert_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        self.buckets.insert(
            freq,
            Bucket {
                head: None,
                tail: None,
                prev,
                next,
            },
        );
        if let Some(prev) = prev
            && let Some(bucket) = self.buckets.get_mut(&prev)
        {
            bucket.next = Some(freq);
        }
        if let Some(next) = next
            && let Some(bucket) = self.buckets.get_mut(&next)
        {
            bucket.prev = Some(freq);
        }
    }

    fn remove_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        if let Some(prev) = prev
            && let Some(bucket) = self.buckets.get_mut(&prev)
        {
            bucket.next = next;
        }
        if let Some(next) = next
            && let Some(bucket) = self.buckets.get_mut(&next)
        {
            bucket.prev = prev;
        }
        self.buckets.remove(&freq);
    }

    fn list_push_front(&mut self, freq: u64, id: SlotId) {
        let Some(bucket) = self.buckets.get_mut(&freq) else {
            return;
        };
        let old_head = bucket.head;
        match old_head {
            Some(old_head) => {
                if let Some(entry) = self.entries.get_mut(old_head) {
                    entry.prev = Some(id);
                }
            },
            None => bucket.tail = Some(id),
        }
        bucket.head = Some(id);
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }
    }

    fn list_remove(&mut self, freq: u64, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let entry = self.entries.get(id)?;
            (entry.prev, entry.next)
        };

        let bucket = self.buckets.get_mut(&freq)?;
        match prev {
            Some(prev) => {
                if let Some(entry) = self.entries.get_mut(prev) {
                    entry.next = next;
                }
            },
            None => bucket.head = next,
        }
        match next {
            Some(next) => {
                if let Some(entry) = self.entries.get_mut(next) {
                    entry.prev = prev;
                }
            },
            None => bucket.tail = prev,
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = None;
        }
        Some(())
    }

    /// Walks the bucket chain from `min_freq` upward and checks that it
    /// accounts for every entry with matching frequencies.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "index size {} != entry count {}",
                self.index.len(),
                self.entries.len()
            )));
        }
        if self.is_empty() {
            if self.min_freq != 0 || !self.buckets.is_empty() {
                return Err(InvariantError::new(format!(
                    "empty structure keeps min_freq={} and {} buckets",
                    self.min_freq,
                    self.buckets.len()
                )));
            }
            return Ok(());
        }

        let mut seen = 0usize;
        let mut chained = 0usize;
        let mut prev_freq = None;
        let mut freq = Some(self.min_freq);
        while let Some(f) = freq {
            let bucket = self.buckets.get(&f).ok_or_else(|| {
                InvariantError::new(format!("bucket chain points at missing bucket {f}"))
            })?;
            if bucket.prev != prev_freq {
                return Err(InvariantError::new(format!(
                    "bucket {f} prev link {:?} != {:?}",
                    bucket.prev, prev_freq
                )));
            }
            if bucket.head.is_none() {
                return Err(InvariantError::new(format!("bucket {f} is empty")));
            }
            let mut current = bucket.head;
            while let Some(id) = current {
                let entry = self.entries.get(id).ok_or_else(|| {
                    InvariantError::new(format!("bucket {f}: stale SlotId {id:?}"))
                })?;
                if entry.freq != f {
                    return Err(InvariantError::new(format!(
                        "entry with freq {} linked into bucket {f}",
                        entry.freq
                    )));
                }
                seen += 1;
                if seen > self.len() {
                    return Err(InvariantError::new("cycle in bucket list"));
                }
                current = entry.next;
            }
            chained += 1;
            prev_freq = Some(f);
            freq = bucket.next;
        }

        if chained != self.buckets.len() {
            return Err(InvariantError::new(format!(
                "{} buckets reachable from min_freq, {} allocated",
                chained,
                self.buckets.len()
            )));
        }
        if seen != self.len() {
            return Err(InvariantError::new(format!(
                "{seen} entries reachable, {} stored",
                self.len()
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.len(), self.index.len());

        if self.is_empty() {
            assert!(self.buckets.is_empty());
            assert_eq!(self.min_freq, 0);
            return;
        }

        assert!(self.min_freq > 0);
        assert!(self.buckets.contains_key(&self.min_freq));

        let mut total = 0usize;
        for (&freq, bucket) in &self.buckets {
            assert!(bucket.head.is_some(), "empty bucket {freq} left behind");
            assert!(freq >= self.min_freq);
            match bucket.prev {
                Some(prev) => {
                    assert!(prev < freq);
                    assert_eq!(self.buckets[&prev].next, Some(freq));
                },
                None => assert_eq!(self.min_freq, freq),
            }
            if let Some(next) = bucket.next {
                assert!(next > freq);
                assert_eq!(self.buckets[&next].prev, Some(freq));
            }

            let mut current = bucket.head;
            let mut last = None;
            while let Some(id) = current {
                let entry = self.entries.get(id).expect("bucket entry missing");
                assert_eq!(entry.freq, freq);
                assert_eq!(entry.prev, last);
                assert_eq!(self.index.get(&entry.key), Some(&id));
                last = Some(id);
                current = entry.next;
                total += 1;
            }
            assert_eq!(bucket.tail, last);
        }
        assert_eq!(total, self.len());
    }
}

impl<K, V> Default for FrequencyBuckets<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
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
        fn prop_invariants_always_hold(
            ops in prop::collection::vec((0u8..4, 0u32..16), 0..200)
        ) {
            let mut buckets: FrequencyBuckets<u32, u32> = FrequencyBuckets::new();
            for (op, key) in ops {
                match op {
                    0 => { buckets.insert(key, key); }
                    1 => { buckets.touch(&key); }
                    2 => { buckets.remove(&key); }
                    _ => { buckets.pop_min(); }
                }
                buckets.debug_validate_invariants();
            }
        }

        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_min_freq_matches_model(
            ops in prop::collection::vec((0u8..4, 0u32..12), 0..150)
        ) {
            let mut buckets: FrequencyBuckets<u32, ()> = FrequencyBuckets::new();
            let mut model: HashMap<u32, u64> = HashMap::new();
            for (op, key) in ops {
                match op {
                    0 => {
                        if buckets.insert(key, ()) {
                            model.insert(key, 1);
                        }
                    }
                    1 => {
                        if let Some(freq) = buckets.touch(&key) {
                            model.insert(key, freq);
                        }
                    }
                    2 => {
                        buckets.remove(&key);
                        model.remove(&key);
                    }
                    _ => {
                        let expected_min = model.values().copied().min();
                        if let Some((victim, ())) = buckets.pop_min() {
                            prop_assert_eq!(model.remove(&victim), expected_min);
                        }
                    }
                }
                prop_assert_eq!(buckets.min_freq(), model.values().copied().min());
                prop_assert_eq!(buckets.len(), model.len());
            }
        }
    }
}
