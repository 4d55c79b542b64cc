//! Eviction policies.
//!
//! | Policy             | Evicts                                   | Module  |
//! |--------------------|------------------------------------------|---------|
//! | [`RecencyCache`]   | least recently used                      | `lru`   |
//! | [`FrequencyCache`] | least frequently used, FIFO among ties   | `lfu`   |
//!
//! Both implement [`CachePolicy`](crate::traits::CachePolicy) and can be mixed
//! freely inside a [`CacheAddressedStore`](crate::store::CacheAddressedStore).

pub mod lfu;
pub mod lru;

pub use lfu::FrequencyCache;
pub use lru::RecencyCache;
