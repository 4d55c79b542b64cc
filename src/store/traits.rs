//! The authoritative key-value store that caches sit in front of.
//!
//! A backing store owns existence and listing; caches only hold copies of
//! values. Every mutating call reports whether it applied instead of
//! returning an error, so the caller decides how to surface a refusal.

/// Flat name-to-content store.
pub trait BackingStore<K, V> {
    fn exists(&self, key: &K) -> bool;

    /// Adds a new entry. Returns `false` and leaves the store unchanged if
    /// `key` already exists.
    fn create(&mut self, key: K, value: V) -> bool;

    fn read(&self, key: &K) -> Option<&V>;

    /// Overwrites an existing entry. Returns `false` if `key` is absent;
    /// never creates.
    fn write(&mut self, key: &K, value: V) -> bool;

    /// Returns `false` if `key` is absent.
    fn delete(&mut self, key: &K) -> bool;

    /// Every stored key, in no particular order.
    fn list(&self) -> Vec<K>;
}
