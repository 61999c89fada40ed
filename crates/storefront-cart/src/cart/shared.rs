//! Thread-safe handle to a cart engine.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cart::{CartEngine, CartLineItem, CartTotals, NewLineItem};
use crate::ids::ProductId;

/// A [`CartEngine`] behind a mutex, for hosts that reach one cart from
/// several threads.
///
/// Clones share the same engine. Each call holds the lock for exactly one
/// engine operation, so operations never interleave.
#[derive(Debug, Clone)]
pub struct SharedCart {
    inner: Arc<Mutex<CartEngine>>,
}

impl SharedCart {
    /// Wrap an engine.
    pub fn new(engine: CartEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut CartEngine) -> R) -> R {
        f(&mut self.lock())
    }

    /// See [`CartEngine::add_item`].
    pub fn add_item(&self, item: NewLineItem, quantity: i64) -> u32 {
        self.lock().add_item(item, quantity)
    }

    /// See [`CartEngine::remove_item`].
    pub fn remove_item(&self, product_id: ProductId, size: Option<&str>, color: Option<&str>) -> bool {
        self.lock().remove_item(product_id, size, color)
    }

    /// See [`CartEngine::update_quantity`].
    pub fn update_quantity(
        &self,
        product_id: ProductId,
        quantity: i64,
        size: Option<&str>,
        color: Option<&str>,
    ) -> bool {
        self.lock().update_quantity(product_id, quantity, size, color)
    }

    /// See [`CartEngine::clear_cart`].
    pub fn clear_cart(&self) {
        self.lock().clear_cart();
    }

    /// See [`CartEngine::get_item_quantity`].
    pub fn get_item_quantity(&self, product_id: ProductId, size: Option<&str>, color: Option<&str>) -> u32 {
        self.lock().get_item_quantity(product_id, size, color)
    }

    /// See [`CartEngine::is_in_cart`].
    pub fn is_in_cart(&self, product_id: ProductId, size: Option<&str>, color: Option<&str>) -> bool {
        self.lock().is_in_cart(product_id, size, color)
    }

    /// Snapshot of the current totals.
    pub fn totals(&self) -> CartTotals {
        *self.lock().totals()
    }

    /// Snapshot of the current lines.
    pub fn items(&self) -> Vec<CartLineItem> {
        self.lock().items().to_vec()
    }

    // Every engine operation is total, so a panic in another holder cannot
    // leave the engine half-updated.
    fn lock(&self) -> MutexGuard<'_, CartEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
