//! Builder for [`CacheAddressedStore`] compositions.
//!
//! Picks which caches front the backing store, in which probe order, and who
//! observes the store's events.
//!
//! ## Example
//!
//! ```rust
//! use cachefront::builder::{PolicyKind, StoreBuilder};
//! use cachefront::observe::TracingObserver;
//! use cachefront::store::MemoryStore;
//!
//! let mut store = StoreBuilder::new(100)
//!     .policy(PolicyKind::Frequency)
//!     .policy(PolicyKind::Recency)
//!     .observer(TracingObserver)
//!     .try_build(MemoryStore::new("root"))
//!     .unwrap();
//!
//! store.create(1u64, "hello".to_string()).unwrap();
//! assert_eq!(store.read(&1).unwrap(), "hello");
//! let order: Vec<_> = store.caches().map(|(name, _)| name).collect();
//! assert_eq!(order, ["frequency", "recency"]);
//! ```

use std::fmt::{self, Debug};
use std::hash::Hash;
use std::str::FromStr;

use rustc_hash::FxHashSet;

use crate::error::ConfigError;
use crate::observe::{NoopObserver, StoreObserver};
use crate::policy::{FrequencyCache, RecencyCache};
use crate::store::{BackingStore, BoxedPolicy, CacheAddressedStore};

/// Built-in cache policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// Least recently used eviction.
    Recency,
    /// Least frequently used eviction, FIFO among equal frequencies.
    Frequency,
}

impl PolicyKind {
    /// Name the cache is registered under.
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Recency => "recency",
            PolicyKind::Frequency => "frequency",
        }
    }

    pub fn instantiate<K, V>(self, capacity: usize) -> BoxedPolicy<K, V>
    where
        K: Eq + Hash + Clone + Send + 'static,
        V: Send + 'static,
    {
        match self {
            PolicyKind::Recency => Box::new(RecencyCache::new(capacity)),
            PolicyKind::Frequency => Box::new(FrequencyCache::new(capacity)),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    /// Accepts the policy name or its classic acronym, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recency" | "lru" => Ok(PolicyKind::Recency),
            "frequency" | "lfu" => Ok(PolicyKind::Frequency),
            other => Err(ConfigError::new(format!(
                "unknown cache policy: {other:?} (expected recency, lru, frequency or lfu)"
            ))),
        }
    }
}

/// Assembles a [`CacheAddressedStore`].
pub struct StoreBuilder<K, V> {
    capacity: usize,
    policies: Vec<(String, BoxedPolicy<K, V>)>,
    observer: Option<Box<dyn StoreObserver<K>>>,
}

impl<K, V> StoreBuilder<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    V: Clone + Send + 'static,
{
    /// `capacity` applies to every built-in policy added afterwards.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            policies: Vec::new(),
            observer: None,
        }
    }

    /// Appends a built-in policy; caches are probed in the order added.
    pub fn policy(self, kind: PolicyKind) -> Self {
        let capacity = self.capacity;
        self.policy_with_capacity(kind, capacity)
    }

    pub fn policy_with_capacity(mut self, kind: PolicyKind, capacity: usize) -> Self {
        self.policies
            .push((kind.name().to_string(), kind.instantiate(capacity)));
        self
    }

    /// Appends any [`CachePolicy`](crate::traits::CachePolicy) under `name`.
    pub fn custom_policy(mut self, name: impl Into<String>, policy: BoxedPolicy<K, V>) -> Self {
        self.policies.push((name.into(), policy));
        self
    }

    pub fn observer(mut self, observer: impl StoreObserver<K> + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Builds the store, using a recency cache followed by a frequency cache
    /// when no policy was added.
    pub fn build<S: BackingStore<K, V>>(mut self, backing: S) -> CacheAddressedStore<K, V, S> {
        if self.policies.is_empty() {
            self = self.policy(PolicyKind::Recency).policy(PolicyKind::Frequency);
        }
        self.assemble(backing)
    }

    /// Like [`build`](Self::build) but rejects an empty policy list and
    /// duplicate cache names instead of filling in defaults.
    pub fn try_build<S: BackingStore<K, V>>(
        self,
        backing: S,
    ) -> Result<CacheAddressedStore<K, V, S>, ConfigError> {
        if self.policies.is_empty() {
            return Err(ConfigError::new("at least one cache policy is required"));
        }
        let mut seen = FxHashSet::default();
        for (name, _) in &self.policies {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::new(format!(
                    "duplicate cache policy name: {name:?}"
                )));
            }
        }
        Ok(self.assemble(backing))
    }

    fn assemble<S: BackingStore<K, V>>(self, backing: S) -> CacheAddressedStore<K, V, S> {
        let observer = self
            .observer
            .unwrap_or_else(|| Box::new(NoopObserver));
        CacheAddressedStore::from_parts(backing, self.policies, observer)
    }
}

impl<K, V> Debug for StoreBuilder<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.policies.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("StoreBuilder")
            .field("capacity", &self.capacity)
            .field("policies", &names)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
