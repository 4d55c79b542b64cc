//! Backing stores and the cache layer that fronts them.
//!
//! - [`BackingStore`]: authoritative key-value store (existence, listing).
//! - [`MemoryStore`]: in-memory `BackingStore`.
//! - [`CacheAddressedStore`]: read-through, write-through cache composition.
//! - `ConcurrentCacheStore` (feature `concurrency`): single-lock shared store.

pub mod cached;
#[cfg(feature = "concurrency")]
pub mod concurrent;
pub mod memory;
pub mod traits;

pub use cached::{BoxedPolicy, CacheAddressedStore, DEFAULT_CACHE_CAPACITY, DynPolicy};
#[cfg(feature = "concurrency")]
pub use concurrent::ConcurrentCacheStore;
pub use memory::MemoryStore;
pub use traits::BackingStore;
