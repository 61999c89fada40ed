//! Key-value byte stores with typed JSON caching for the storefront.
//!
//! A [`KeyValueStore`] is the raw persistence facility (a browser-storage
//! analogue: string keys, byte values). [`Cache`] layers automatic JSON
//! serialization on top of any store.
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::{cache_key, Cache};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Badge {
//!     count: u32,
//! }
//!
//! let cache = Cache::memory();
//! let key = cache_key!("badge", "guest");
//!
//! cache.set(&key, &Badge { count: 3 }).unwrap();
//! let badge: Option<Badge> = cache.get(&key).unwrap();
//! assert_eq!(badge, Some(Badge { count: 3 }));
//!
//! cache.delete(&key).unwrap();
//! assert!(!cache.exists(&key).unwrap());
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
