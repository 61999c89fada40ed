//! Key-value store trait and the typed JSON cache built on it.

use std::fmt;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::{CacheError, FileStore, MemoryStore};

/// A byte-oriented key-value store.
///
/// Implementations must be safe to share across threads; the cart engine
/// itself is single-writer but hosts may move it between threads.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether `key` holds a value.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }

    /// List every key in the store.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// Type-safe cache over any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
pub struct Cache {
    store: Box<dyn KeyValueStore>,
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Wrap an existing store.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Open a fresh in-memory cache.
    pub fn memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Open a file-backed cache rooted at `dir`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_dir(".cart")?;
    /// ```
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        Ok(Self::new(FileStore::open(dir)?))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist. Bytes that are not valid JSON
    /// for `T` produce [`CacheError::SerializeError`].
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Get the raw stored bytes without decoding.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.store.get(key)
    }

    /// Store raw bytes without encoding.
    pub fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.store.set(key, value)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// use storefront_cache::cache_key;
///
/// let key = cache_key!("cart", "guest", 42);
/// assert_eq!(key, "cart:guest:42");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
