//! In-memory [`BackingStore`] backed by an `FxHashMap`.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::store::traits::BackingStore;

/// Named flat map of entries.
///
/// # Example
///
/// ```
/// use cachefront::store::{BackingStore, MemoryStore};
///
/// let mut root = MemoryStore::new("root");
/// assert!(root.create("f1", "content1"));
/// assert!(!root.create("f1", "again"));
/// assert_eq!(root.read(&"f1"), Some(&"content1"));
/// assert_eq!(root.name(), "root");
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore<K, V> {
    name: String,
    entries: FxHashMap<K, V>,
}

impl<K, V> MemoryStore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> BackingStore<K, V> for MemoryStore<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn exists(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    fn create(&mut self, key: K, value: V) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, value);
        true
    }

    #[inline]
    fn read(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    fn write(&mut self, key: &K, value: V) -> bool {
        match self.entries.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            },
            None => false,
        }
    }

    fn delete(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    fn list(&self) -> Vec<K> {
        self.entries.keys().cloned().collect()
    }
}
