//! Persistence of the cart's line items.
//!
//! The whole collection lives under one key as a JSON array. Storage is a
//! convenience for reload continuity, so every failure here is logged and
//! swallowed: the in-memory cart stays authoritative.

use crate::cart::CartLineItem;
use crate::error::CartError;
use serde_json::Value;
use storefront_cache::Cache;

/// Key the cart is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Fail-soft JSON persistence for a cart.
#[derive(Debug)]
pub struct CartStorage {
    cache: Option<Cache>,
    key: String,
}

impl CartStorage {
    /// Persist through `cache` under the default key.
    pub fn new(cache: Cache) -> Self {
        Self {
            cache: Some(cache),
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Storage for environments with no persistent facility.
    ///
    /// Loads are empty and writes do nothing.
    pub fn unavailable() -> Self {
        Self {
            cache: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Use a different storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// The key the cart is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether a storage facility is attached.
    pub fn is_available(&self) -> bool {
        self.cache.is_some()
    }

    /// Load the saved line items.
    ///
    /// Returns an empty collection when nothing was saved, the store cannot
    /// be read, the value is not JSON, or it is not an array. Array elements
    /// that are not valid line items are skipped.
    pub fn load(&self) -> Vec<CartLineItem> {
        let Some(cache) = &self.cache else {
            return Vec::new();
        };

        match self.try_load(cache) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to load cart, starting empty");
                Vec::new()
            }
        }
    }

    fn try_load(&self, cache: &Cache) -> Result<Vec<CartLineItem>, CartError> {
        let Some(value) = cache.get::<Value>(&self.key)? else {
            return Ok(Vec::new());
        };

        let Value::Array(entries) = value else {
            tracing::warn!(key = %self.key, "stored cart is not an array, ignoring it");
            return Ok(Vec::new());
        };

        let mut items = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<CartLineItem>(entry) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!(key = %self.key, index, error = %e, "skipping malformed cart line");
                }
            }
        }
        Ok(items)
    }

    /// Save the full collection, replacing what was stored.
    pub fn save(&self, items: &[CartLineItem]) {
        let Some(cache) = &self.cache else {
            return;
        };

        if let Err(e) = cache.set(&self.key, items) {
            tracing::warn!(
                key = %self.key,
                lines = items.len(),
                error = %e,
                "failed to persist cart, keeping in-memory state"
            );
        }
    }

    /// Erase the stored cart.
    pub fn clear(&self) {
        let Some(cache) = &self.cache else {
            return;
        };

        if let Err(e) = cache.delete(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "failed to erase stored cart");
        }
    }
}
