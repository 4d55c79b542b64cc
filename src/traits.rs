//! # Cache Policy Traits
//!
//! Every eviction policy exposes the same capability set so that the
//! [`CacheAddressedStore`](crate::store::cached::CacheAddressedStore) can hold
//! a list of heterogeneous policies and drive them uniformly.
//!
//! ```text
//!                  ┌─────────────────────────────────────────┐
//!                  │           CachePolicy<K, V>             │
//!                  │                                         │
//!                  │  get(&mut, &K)    → Option<&V>          │
//!                  │  put(&mut, K, V)  → Option<(K, V)>      │
//!                  │  remove(&mut, &K) → Option<V>           │
//!                  │  peek / contains / len / capacity       │
//!                  └───────────────────┬─────────────────────┘
//!                                      │
//!                ┌─────────────────────┴─────────────────────┐
//!                ▼                                           ▼
//!   ┌────────────────────────────┐            ┌────────────────────────────┐
//!   │   RecencyPolicy<K, V>      │            │   FrequencyPolicy<K, V>    │
//!   │                            │            │                            │
//!   │  peek_lru() → (&K, &V)     │            │  peek_lfu() → (&K, &V)     │
//!   │  pop_lru()  → (K, V)       │            │  pop_lfu()  → (K, V)       │
//!   │  touch(&K)  → bool         │            │  frequency(&K) → u64       │
//!   │  recency_rank(&K) → usize  │            │  min_frequency() → u64     │
//!   └────────────────────────────┘            └────────────────────────────┘
//! ```
//!
//! ## Miss semantics
//!
//! A miss is `None`, never an error: `get` and `remove` on an absent key are
//! total and leave the cache untouched.
//!
//! ## Eviction reporting
//!
//! `put` hands back whatever left the cache to make room, so callers can
//! observe evictions without a callback inside the hot path. A capacity-0
//! cache hands back the entry it was just offered.

/// Operations every cache policy supports.
///
/// # Example
///
/// ```
/// use cachefront::policy::{FrequencyCache, RecencyCache};
/// use cachefront::traits::CachePolicy;
///
/// fn warm(cache: &mut dyn CachePolicy<u64, String>, data: &[(u64, &str)]) {
///     for (key, value) in data {
///         cache.put(*key, value.to_string());
///     }
/// }
///
/// let mut lru = RecencyCache::new(8);
/// let mut lfu = FrequencyCache::new(8);
/// warm(&mut lru, &[(1, "one"), (2, "two")]);
/// warm(&mut lfu, &[(1, "one"), (2, "two")]);
/// assert_eq!(lru.get(&1), lfu.get(&1));
/// ```
pub trait CachePolicy<K, V> {
    /// Short stable identifier of the policy (`"recency"`, `"frequency"`, ...).
    fn policy_name(&self) -> &'static str;

    /// Looks up `key`, refreshing its position according to the policy.
    ///
    /// Returns `None` on a miss, without mutating anything.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Looks up `key` without touching recency or frequency bookkeeping.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Inserts or overwrites `key`.
    ///
    /// An existing key is refreshed as if it had been read. A new key may
    /// force out the policy's victim, which is returned.
    fn put(&mut self, key: K, value: V) -> Option<(K, V)>;

    /// Drops `key` from the cache; a no-op returning `None` if it is absent.
    fn remove(&mut self, key: &K) -> Option<V>;

    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries retained.
    fn capacity(&self) -> usize;

    fn clear(&mut self);
}

/// Recency-ordered caches (least recently used goes first).
pub trait RecencyPolicy<K, V>: CachePolicy<K, V> {
    /// Next eviction candidate.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Marks `key` as most recently used without reading it.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` counted from the MRU end (0 = most recent). O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Frequency-ordered caches (least frequently used goes first, FIFO among
/// equal frequencies).
pub trait FrequencyPolicy<K, V>: CachePolicy<K, V> {
    /// Next eviction candidate.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    fn pop_lfu(&mut self) -> Option<(K, V)>;

    fn frequency(&self, key: &K) -> Option<u64>;

    /// Lowest access count currently held, `None` when empty.
    fn min_frequency(&self) -> Option<u64>;
}
