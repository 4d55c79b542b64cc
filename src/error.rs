//! Error types for the cachefront library.
//!
//! ## Key Components
//!
//! - [`StoreError`]: Returned by [`CacheAddressedStore`](crate::store::CacheAddressedStore)
//!   operations when the backing store disagrees with the request (missing
//!   entry on read/write/delete, existing entry on create).
//! - [`ConfigError`]: Returned by [`StoreBuilder::try_build`](crate::builder::StoreBuilder::try_build)
//!   when the policy set is unusable.
//! - [`InvariantError`]: Returned by debug-only invariant checks.
//!
//! Cache misses are never errors: every policy reports a miss as `None`.
//!
//! ## Example Usage
//!
//! ```
//! use cachefront::error::StoreError;
//! use cachefront::store::{CacheAddressedStore, MemoryStore};
//!
//! let mut store = CacheAddressedStore::new(MemoryStore::new("root"), 4);
//! store.create("notes.txt", "hello".to_string()).unwrap();
//!
//! let err = store.create("notes.txt", "again".to_string()).unwrap_err();
//! assert!(matches!(err, StoreError::AlreadyExists(_)));
//! assert!(err.to_string().contains("notes.txt"));
//! ```

use std::fmt::Debug;

use thiserror::Error;

/// Failure of a store-level operation.
///
/// The payload is the offending key rendered with `Debug`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("entry not found: {0}")]
    NotFound(String),

    #[error("entry already exists: {0}")]
    AlreadyExists(String),
}

impl StoreError {
    pub fn not_found<K: Debug + ?Sized>(key: &K) -> Self {
        Self::NotFound(format!("{key:?}"))
    }

    pub fn already_exists<K: Debug + ?Sized>(key: &K) -> Self {
        Self::AlreadyExists(format!("{key:?}"))
    }

    /// Returns `true` for [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Error returned when store configuration is invalid.
///
/// # Example
///
/// ```
/// use cachefront::builder::StoreBuilder;
/// use cachefront::store::MemoryStore;
///
/// let err = StoreBuilder::<&str, String>::new(4)
///     .try_build(MemoryStore::new("root"))
///     .unwrap_err();
/// assert!(err.to_string().contains("policy"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Error returned when internal cache invariants are violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}
