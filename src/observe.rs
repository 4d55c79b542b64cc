//! Structured operation events emitted by
//! [`CacheAddressedStore`](crate::store::CacheAddressedStore).
//!
//! Every store operation reports what happened through a [`StoreObserver`].
//! Observers only watch: they receive borrowed events after the state change
//! is done and cannot alter the result of the operation.
//!
//! ```text
//!   store.read(&"f1")
//!        │
//!        ├── cache "recency" hit ─► on_event { Read, "f1", CacheHit { cache: "recency" } }
//!        │
//!        └── put into "frequency" evicts "f3"
//!                               ─► on_event { Read, "f3", Evicted { cache: "frequency" } }
//! ```
//!
//! ## Built-in observers
//!
//! | Observer           | Behavior                                  |
//! |--------------------|-------------------------------------------|
//! | [`NoopObserver`]   | Drops every event (store default)         |
//! | [`TracingObserver`]| Forwards events to `tracing`              |
//! | any `Fn(&StoreEvent<K>)` | Custom callback                     |
//!
//! ## Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use cachefront::builder::StoreBuilder;
//! use cachefront::observe::{Operation, Outcome, StoreEvent};
//! use cachefront::store::MemoryStore;
//!
//! let hits = Arc::new(Mutex::new(0usize));
//! let counter = Arc::clone(&hits);
//! let mut store = StoreBuilder::<&str, String>::new(4)
//!     .observer(move |event: &StoreEvent<'_, &str>| {
//!         if matches!(event.outcome, Outcome::CacheHit { .. }) {
//!             *counter.lock().unwrap() += 1;
//!         }
//!     })
//!     .build(MemoryStore::new("root"));
//!
//! store.create("f1", "content1".to_string()).unwrap();
//! store.read(&"f1").unwrap();
//! assert_eq!(*hits.lock().unwrap(), 1);
//! ```

use std::fmt::{self, Debug};

use tracing::{debug, trace};

/// Store operation that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Write,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// The operation completed against the backing store and every cache.
    Success,
    /// A read was served by the named cache.
    CacheHit { cache: &'a str },
    /// A read missed every cache and was served by the backing store.
    StoreHit,
    /// The named cache dropped the event's key to make room.
    Evicted { cache: &'a str },
    NotFound,
    AlreadyExists,
}

/// One observed step of a store operation.
///
/// For [`Outcome::Evicted`] the `key` is the victim, not the key the
/// operation was called with.
#[derive(Debug, Clone, Copy)]
pub struct StoreEvent<'a, K> {
    pub operation: Operation,
    pub key: &'a K,
    pub outcome: Outcome<'a>,
}

/// Receives store events.
pub trait StoreObserver<K>: Send + Sync {
    fn on_event(&self, event: &StoreEvent<'_, K>);
}

impl<K, F> StoreObserver<K> for F
where
    F: Fn(&StoreEvent<'_, K>) + Send + Sync,
{
    fn on_event(&self, event: &StoreEvent<'_, K>) {
        self(event)
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<K> StoreObserver<K> for NoopObserver {
    #[inline]
    fn on_event(&self, _event: &StoreEvent<'_, K>) {}
}

/// Observer that logs events through `tracing`.
///
/// Successful operations and hits go to `debug!`, evictions to `trace!`.
/// `NotFound` and `AlreadyExists` are caller errors that are already returned
/// as `Err`, so they are logged at `debug!` too.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl<K: Debug> StoreObserver<K> for TracingObserver {
    fn on_event(&self, event: &StoreEvent<'_, K>) {
        let op = event.operation.as_str();
        let key = event.key;
        match event.outcome {
            Outcome::Success => debug!(op, ?key, "store operation completed"),
            Outcome::CacheHit { cache } => debug!(op, ?key, cache, "cache hit"),
            Outcome::StoreHit => debug!(op, ?key, "cache miss, served by backing store"),
            Outcome::Evicted { cache } => trace!(op, ?key, cache, "cache eviction"),
            Outcome::NotFound => debug!(op, ?key, "entry not found"),
            Outcome::AlreadyExists => debug!(op, ?key, "entry already exists"),
        }
    }
}
