//! # Cache-Addressed Store
//!
//! Composes one or more named cache policies in front of a [`BackingStore`].
//! Reads are served from the caches when possible; creates, writes and
//! deletes go to the backing store first and are then mirrored into every
//! cache, so a cache never serves content the store no longer agrees with.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌───────────────────────────────────────────┐
//!   create/write ───►│ backing.create / backing.write            │
//!                    │   then put(key, value) into every cache   │
//!                    ├───────────────────────────────────────────┤
//!   read ───────────►│ caches[0].get ─hit─► sync other caches    │
//!                    │ caches[1].get ─hit─► sync other caches    │
//!                    │      ...                                  │
//!                    │ all miss ──► backing.read ─► put into all │
//!                    ├───────────────────────────────────────────┤
//!   delete ─────────►│ backing.delete then remove from all       │
//!                    ├───────────────────────────────────────────┤
//!   list ───────────►│ backing.list (caches never consulted)     │
//!                    └───────────────────────────────────────────┘
//! ```
//!
//! ## Read-hit synchronization
//!
//! Caches are probed in configuration order. On a hit in cache *i*, every
//! other cache *j* is asked for the same key with `get`, which refreshes its
//! recency or frequency bookkeeping. If cache *j* had already evicted the key
//! it is repopulated with `put`, using the value in hand; the backing store is
//! not read again.
//!
//! ## Example
//!
//! ```
//! use cachefront::error::StoreError;
//! use cachefront::store::{CacheAddressedStore, MemoryStore};
//!
//! let mut fs = CacheAddressedStore::new(MemoryStore::new("root"), 3);
//! fs.create("f1", "content1".to_string()).unwrap();
//! fs.write(&"f1", "new_content1".to_string()).unwrap();
//! assert_eq!(fs.read(&"f1").unwrap(), "new_content1");
//!
//! fs.delete(&"f1").unwrap();
//! assert_eq!(fs.read(&"f1"), Err(StoreError::not_found(&"f1")));
//! ```

use std::fmt::{self, Debug};
use std::hash::Hash;

use crate::error::StoreError;
use crate::observe::{NoopObserver, Operation, Outcome, StoreEvent, StoreObserver};
use crate::policy::{FrequencyCache, RecencyCache};
use crate::store::traits::BackingStore;
use crate::traits::CachePolicy;

/// Capacity of each default cache when the host does not choose one.
pub const DEFAULT_CACHE_CAPACITY: usize = 10;

/// A cache policy usable inside the store.
pub type DynPolicy<K, V> = dyn CachePolicy<K, V> + Send;

/// Owned, type-erased cache policy.
pub type BoxedPolicy<K, V> = Box<DynPolicy<K, V>>;

struct NamedCache<K, V> {
    name: String,
    policy: BoxedPolicy<K, V>,
}

/// Backing store fronted by a list of heterogeneous caches.
pub struct CacheAddressedStore<K, V, S> {
    backing: S,
    caches: Vec<NamedCache<K, V>>,
    observer: Box<dyn StoreObserver<K>>,
}

impl<K, V, S> CacheAddressedStore<K, V, S>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    V: Clone + Send + 'static,
    S: BackingStore<K, V>,
{
    /// Fronts `backing` with a `"recency"` cache followed by a `"frequency"`
    /// cache, each holding up to `capacity` entries.
    pub fn new(backing: S, capacity: usize) -> Self {
        let caches = vec![
            (
                "recency".to_string(),
                Box::new(RecencyCache::new(capacity)) as BoxedPolicy<K, V>,
            ),
            (
                "frequency".to_string(),
                Box::new(FrequencyCache::new(capacity)) as BoxedPolicy<K, V>,
            ),
        ];
        Self::from_parts(backing, caches, Box::new(NoopObserver))
    }

    pub(crate) fn from_parts(
        backing: S,
        caches: Vec<(String, BoxedPolicy<K, V>)>,
        observer: Box<dyn StoreObserver<K>>,
    ) -> Self {
        Self {
            backing,
            caches: caches
                .into_iter()
                .map(|(name, policy)| NamedCache { name, policy })
                .collect(),
            observer,
        }
    }

    /// Creates `key` in the backing store and writes it through to every
    /// cache.
    pub fn create(&mut self, key: K, value: V) -> Result<(), StoreError> {
        if !self.backing.create(key.clone(), value.clone()) {
            self.emit(Operation::Create, &key, Outcome::AlreadyExists);
            return Err(StoreError::already_exists(&key));
        }
        self.put_all(Operation::Create, &key, &value);
        self.emit(Operation::Create, &key, Outcome::Success);
        Ok(())
    }

    /// Returns the content of `key`, from the first cache that holds it or
    /// else from the backing store.
    pub fn read(&mut self, key: &K) -> Result<V, StoreError> {
        let hit = self
            .caches
            .iter_mut()
            .enumerate()
            .find_map(|(idx, cache)| cache.policy.get(key).map(|value| (idx, value.clone())));

        if let Some((hit_idx, value)) = hit {
            self.observer.on_event(&StoreEvent {
                operation: Operation::Read,
                key,
                outcome: Outcome::CacheHit {
                    cache: &self.caches[hit_idx].name,
                },
            });
            for (idx, cache) in self.caches.iter_mut().enumerate() {
                if idx == hit_idx || cache.policy.get(key).is_some() {
                    continue;
                }
                if let Some((victim, _)) = cache.policy.put(key.clone(), value.clone()) {
                    self.observer.on_event(&StoreEvent {
                        operation: Operation::Read,
                        key: &victim,
                        outcome: Outcome::Evicted { cache: &cache.name },
                    });
                }
            }
            return Ok(value);
        }

        let Some(value) = self.backing.read(key).cloned() else {
            self.emit(Operation::Read, key, Outcome::NotFound);
            return Err(StoreError::not_found(key));
        };
        self.emit(Operation::Read, key, Outcome::StoreHit);
        self.put_all(Operation::Read, key, &value);
        Ok(value)
    }

    /// Overwrites an existing `key` in the backing store and every cache.
    pub fn write(&mut self, key: &K, value: V) -> Result<(), StoreError> {
        if !self.backing.write(key, value.clone()) {
            self.emit(Operation::Write, key, Outcome::NotFound);
            return Err(StoreError::not_found(key));
        }
        self.put_all(Operation::Write, key, &value);
        self.emit(Operation::Write, key, Outcome::Success);
        Ok(())
    }

    /// Deletes `key` from the backing store and invalidates it in every cache.
    pub fn delete(&mut self, key: &K) -> Result<(), StoreError> {
        if !self.backing.delete(key) {
            self.emit(Operation::Delete, key, Outcome::NotFound);
            return Err(StoreError::not_found(key));
        }
        for cache in &mut self.caches {
            cache.policy.remove(key);
        }
        self.emit(Operation::Delete, key, Outcome::Success);
        Ok(())
    }

    /// Keys held by the backing store, in its order.
    pub fn list(&self) -> Vec<K> {
        self.backing.list()
    }

    /// Composed caches in probe order.
    pub fn caches(&self) -> impl Iterator<Item = (&str, &DynPolicy<K, V>)> {
        self.caches
            .iter()
            .map(|cache| (cache.name.as_str(), cache.policy.as_ref()))
    }

    pub fn cache(&self, name: &str) -> Option<&DynPolicy<K, V>> {
        self.caches
            .iter()
            .find(|cache| cache.name == name)
            .map(|cache| cache.policy.as_ref())
    }

    pub fn backing(&self) -> &S {
        &self.backing
    }

    pub fn into_backing(self) -> S {
        self.backing
    }

    fn put_all(&mut self, operation: Operation, key: &K, value: &V) {
        for cache in &mut self.caches {
            if let Some((victim, _)) = cache.policy.put(key.clone(), value.clone()) {
                self.observer.on_event(&StoreEvent {
                    operation,
                    key: &victim,
                    outcome: Outcome::Evicted { cache: &cache.name },
                });
            }
        }
    }

    #[inline]
    fn emit(&self, operation: Operation, key: &K, outcome: Outcome<'_>) {
        self.observer.on_event(&StoreEvent {
            operation,
            key,
            outcome,
        });
    }
}

impl<K, V, S: Debug> Debug for CacheAddressedStore<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let caches: Vec<_> = self
            .caches
            .iter()
            .map(|cache| (cache.name.as_str(), cache.policy.len(), cache.policy.capacity()))
            .collect();
        f.debug_struct("CacheAddressedStore")
            .field("backing", &self.backing)
            .field("caches", &caches)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::{Arc, Mutex};

    type TestStore = CacheAddressedStore<&'static str, String, MemoryStore<&'static str, String>>;
    type Events = Arc<Mutex<Vec<(Operation, &'static str, String)>>>;

    fn recording_store(capacity: usize) -> (TestStore, Events) {
        let events: Events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let observer = move |event: &StoreEvent<'_, &'static str>| {
            sink.lock()
                .unwrap()
                .push((event.operation, *event.key, format!("{:?}", event.outcome)));
        };
        let store = CacheAddressedStore::new(MemoryStore::new("root"), capacity);
        let store = CacheAddressedStore {
            observer: Box::new(observer),
            ..store
        };
        (store, events)
    }

    fn cached_value<'a>(store: &'a TestStore, cache: &str, key: &'static str) -> Option<&'a String> {
        store.cache(cache).and_then(|policy| policy.peek(&key))
    }

    mod operations {
        use super::*;

        #[test]
        fn create_populates_every_cache() {
            let (mut store, _) = recording_store(3);
            store.create("f1", "content1".to_string()).unwrap();

            assert!(store.backing().exists(&"f1"));
            assert_eq!(cached_value(&store, "recency", "f1"), Some(&"content1".to_string()));
            assert_eq!(cached_value(&store, "frequency", "f1"), Some(&"content1".to_string()));
        }

        #[test]
        fn create_existing_fails_and_leaves_content() {
            let (mut store, _) = recording_store(3);
            store.create("f1", "content1".to_string()).unwrap();
            assert_eq!(
                store.create("f1", "other".to_string()),
                Err(StoreError::already_exists(&"f1"))
            );
            assert_eq!(store.read(&"f1").unwrap(), "content1");
        }

        #[test]
        fn write_absent_is_not_found_and_creates_nothing() {
            let (mut store, _) = recording_store(3);
            assert_eq!(
                store.write(&"ghost", "x".to_string()),
                Err(StoreError::not_found(&"ghost"))
            );
            assert!(store.list().is_empty());
            assert!(store.caches().all(|(_, cache)| cache.is_empty()));
        }

        #[test]
        fn delete_invalidates_every_cache() {
            let (mut store, _) = recording_store(3);
            store.create("f1", "content1".to_string()).unwrap();
            store.delete(&"f1").unwrap();

            assert!(store.caches().all(|(_, cache)| !cache.contains(&"f1")));
            assert_eq!(store.read(&"f1"), Err(StoreError::not_found(&"f1")));
            assert_eq!(store.delete(&"f1"), Err(StoreError::not_found(&"f1")));
        }

        #[test]
        fn default_composition_order() {
            let store: CacheAddressedStore<u32, u32, MemoryStore<u32, u32>> =
                CacheAddressedStore::new(MemoryStore::new("root"), DEFAULT_CACHE_CAPACITY);
            let names: Vec<_> = store
                .caches()
                .map(|(name, cache)| (name, cache.policy_name()))
                .collect();
            assert_eq!(names, vec![("recency", "recency"), ("frequency", "frequency")]);
            assert!(store.caches().all(|(_, cache)| cache.capacity() == 10));
            assert!(store.cache("missing").is_none());
        }

        #[test]
        fn into_backing_keeps_store_contents() {
            let (mut store, _) = recording_store(2);
            store.create("f1", "content1".to_string()).unwrap();
            let backing = store.into_backing();
            assert_eq!(backing.read(&"f1"), Some(&"content1".to_string()));
            assert_eq!(backing.name(), "root");
        }
    }

    mod read_path {
        use super::*;

        #[test]
        fn full_miss_reads_backing_store_and_populates() {
            let mut backing = MemoryStore::new("root");
            backing.create("f1", "content1".to_string());
            let mut store = CacheAddressedStore::new(backing, 2);

            assert_eq!(store.read(&"f1").unwrap(), "content1");
            assert!(store.caches().all(|(_, cache)| cache.contains(&"f1")));
        }

        #[test]
        fn hit_refreshes_bookkeeping_in_every_cache() {
            let (mut store, _) = recording_store(2);
            store.create("a", "A".to_string()).unwrap();
            store.create("b", "B".to_string()).unwrap();

            // served by "recency"; "frequency" must see the access as well
            store.read(&"a").unwrap();
            store.create("c", "C".to_string()).unwrap();

            let lfu = store.cache("frequency").unwrap();
            assert!(lfu.contains(&"a"));
            assert!(!lfu.contains(&"b"));
            assert!(lfu.contains(&"c"));
        }

        #[test]
        fn hit_repopulates_cache_that_evicted_the_key() {
            let mut backing = MemoryStore::new("root");
            backing.create("a", "A".to_string());
            backing.create("b", "B".to_string());
            let caches = vec![
                ("big".to_string(), Box::new(RecencyCache::new(2)) as BoxedPolicy<&str, String>),
                ("small".to_string(), Box::new(RecencyCache::new(1)) as BoxedPolicy<&str, String>),
            ];
            let mut store = CacheAddressedStore::from_parts(backing, caches, Box::new(NoopObserver));

            store.read(&"a").unwrap();
            store.read(&"b").unwrap();
            // "small" only kept "b"; "big" still has "a"
            assert!(!store.cache("small").unwrap().contains(&"a"));

            assert_eq!(store.read(&"a").unwrap(), "A");
            assert!(store.cache("small").unwrap().contains(&"a"));
        }

        #[test]
        fn events_describe_hits_misses_and_evictions() {
            let (mut store, events) = recording_store(1);
            store.create("f1", "1".to_string()).unwrap();
            store.read(&"f1").unwrap();
            store.create("f2", "2".to_string()).unwrap();
            let _ = store.read(&"nope");

            let events = events.lock().unwrap();
            assert_eq!(
                *events,
                vec![
                    (Operation::Create, "f1", "Success".to_string()),
                    (Operation::Read, "f1", "CacheHit { cache: \"recency\" }".to_string()),
                    (Operation::Create, "f1", "Evicted { cache: \"recency\" }".to_string()),
                    (Operation::Create, "f1", "Evicted { cache: \"frequency\" }".to_string()),
                    (Operation::Create, "f2", "Success".to_string()),
                    (Operation::Read, "nope", "NotFound".to_string()),
                ]
            );
        }
    }
}
