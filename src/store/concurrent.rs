//! Thread-safe wrapper around [`CacheAddressedStore`].
//!
//! The backing store and all caches sit behind one `parking_lot::Mutex`, so
//! every logical operation runs as a single critical section: no thread can
//! observe a state where the store and a cache disagree about an entry. A
//! `Mutex` rather than an `RwLock` because even a read mutates cache
//! bookkeeping.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use cachefront::store::{CacheAddressedStore, ConcurrentCacheStore, MemoryStore};
//!
//! let store = Arc::new(ConcurrentCacheStore::new(CacheAddressedStore::new(
//!     MemoryStore::new("root"),
//!     8,
//! )));
//! store.create(0u32, 0u64).unwrap();
//!
//! let handles: Vec<_> = (1..4u32)
//!     .map(|t| {
//!         let store = Arc::clone(&store);
//!         thread::spawn(move || store.create(t, u64::from(t)).unwrap())
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(store.list().len(), 4);
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use parking_lot::Mutex;

use crate::error::StoreError;
use crate::store::cached::CacheAddressedStore;
use crate::store::traits::BackingStore;

/// [`CacheAddressedStore`] shared across threads.
#[derive(Debug)]
pub struct ConcurrentCacheStore<K, V, S> {
    inner: Mutex<CacheAddressedStore<K, V, S>>,
}

impl<K, V, S> ConcurrentCacheStore<K, V, S>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    V: Clone + Send + 'static,
    S: BackingStore<K, V>,
{
    pub fn new(store: CacheAddressedStore<K, V, S>) -> Self {
        Self {
            inner: Mutex::new(store),
        }
    }

    pub fn create(&self, key: K, value: V) -> Result<(), StoreError> {
        self.inner.lock().create(key, value)
    }

    pub fn read(&self, key: &K) -> Result<V, StoreError> {
        self.inner.lock().read(key)
    }

    /// Reads without blocking; `None` if another thread holds the lock.
    pub fn try_read(&self, key: &K) -> Option<Result<V, StoreError>> {
        let mut store = self.inner.try_lock()?;
        Some(store.read(key))
    }

    pub fn write(&self, key: &K, value: V) -> Result<(), StoreError> {
        self.inner.lock().write(key, value)
    }

    pub fn delete(&self, key: &K) -> Result<(), StoreError> {
        self.inner.lock().delete(key)
    }

    pub fn list(&self) -> Vec<K> {
        self.inner.lock().list()
    }

    /// Runs `f` with exclusive access, for multi-step operations that must
    /// not interleave with other threads.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut CacheAddressedStore<K, V, S>) -> R) -> R {
        let mut store = self.inner.lock();
        f(&mut store)
    }

    pub fn into_inner(self) -> CacheAddressedStore<K, V, S> {
        self.inner.into_inner()
    }
}
