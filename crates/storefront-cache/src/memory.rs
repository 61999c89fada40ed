//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{CacheError, KeyValueStore};

/// Process-local store backed by a shared map.
///
/// Clones share the same map, so a store handed to two caches behaves like
/// one browser storage seen from two page loads.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total number of stored value bytes.
    ///
    /// A write that would push the total over `bytes` fails with
    /// [`CacheError::QuotaExceeded`] and leaves the previous value in place.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Total bytes currently stored across all values.
    pub fn used_bytes(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let mut entries = self.lock();

        if let Some(quota) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            let needed = others + value.len();
            if needed > quota {
                return Err(CacheError::QuotaExceeded { needed, quota });
            }
        }

        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.lock().remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.lock().contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys: Vec<String> = self.lock().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
