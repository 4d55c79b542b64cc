pub use crate::builder::{PolicyKind, StoreBuilder};
pub use crate::error::{ConfigError, InvariantError, StoreError};
pub use crate::observe::{NoopObserver, Operation, Outcome, StoreEvent, StoreObserver, TracingObserver};
pub use crate::policy::{FrequencyCache, RecencyCache};
pub use crate::store::{BackingStore, BoxedPolicy, CacheAddressedStore, MemoryStore};
pub use crate::traits::{CachePolicy, FrequencyPolicy, RecencyPolicy};

#[cfg(feature = "concurrency")]
pub use crate::store::ConcurrentCacheStore;
