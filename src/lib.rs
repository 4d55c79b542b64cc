//! cachefront: recency and frequency caches composed in front of a
//! key-value store.
//!
//! ```
//! use cachefront::prelude::*;
//!
//! let mut fs = CacheAddressedStore::new(MemoryStore::new("root"), 3);
//! fs.create("f1", "content1".to_string()).unwrap();
//! assert_eq!(fs.read(&"f1").unwrap(), "content1");
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod observe;
pub mod policy;
pub mod prelude;
pub mod store;
pub mod traits;
