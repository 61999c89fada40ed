//! The cart engine: line-item state transitions plus persistence.

use crate::cart::{CartLineItem, CartStorage, CartTotals, NewLineItem};
use crate::config::CartConfig;
use crate::ids::ProductId;
use crate::money::Currency;

/// A shopping cart for one session.
///
/// Owns the ordered line items and their derived totals. Every write
/// recomputes the totals in full and saves the collection through the
/// [`CartStorage`]. No operation fails; storage problems are logged by the
/// adapter and the in-memory state stays authoritative.
///
/// Lines are identified by product ID plus selected size and color; the
/// collection never holds two lines with the same identity.
#[derive(Debug)]
pub struct CartEngine {
    items: Vec<CartLineItem>,
    totals: CartTotals,
    storage: CartStorage,
    config: CartConfig,
}

impl CartEngine {
    /// Create an empty cart without reading storage.
    ///
    /// The storage is keyed by `config.storage_key`.
    pub fn new(storage: CartStorage, config: CartConfig) -> Self {
        Self {
            items: Vec::new(),
            totals: CartTotals::zero(config.currency),
            storage: storage.with_key(config.storage_key.as_str()),
            config,
        }
    }

    /// Create a cart hydrated from whatever `storage` holds.
    ///
    /// The loaded lines are normalized: zero quantities and lines whose
    /// total overflows are dropped, lines sharing an identity are merged into
    /// the first occurrence, and quantities are capped at the configured
    /// maximum. A normalized
    /// collection that differs from what was stored is written back.
    pub fn restore(storage: CartStorage, config: CartConfig) -> Self {
        let mut engine = Self::new(storage, config);
        let loaded = engine.storage.load();

        let mut changed = false;
        for line in loaded {
            changed |= engine.absorb(line);
        }

        engine.totals = CartTotals::calculate(&engine.items, engine.config.currency);
        if changed {
            engine.storage.save(&engine.items);
        }

        tracing::info!(
            key = engine.storage.key(),
            lines = engine.items.len(),
            items = engine.totals.total_items,
            normalized = changed,
            "restored cart"
        );
        engine
    }

    /// Add `quantity` of a product variant.
    ///
    /// Merges into the existing line for the same variant or appends a new
    /// line. Non-positive quantities change nothing. Quantities saturate at
    /// the configured maximum. An add that would make the line's total
    /// overflow is refused. Returns the line's resulting quantity, or 0 if
    /// nothing was added.
    pub fn add_item(&mut self, item: NewLineItem, quantity: i64) -> u32 {
        if quantity <= 0 {
            tracing::debug!(product_id = %item.product_id, quantity, "ignoring non-positive add");
            return 0;
        }

        let quantity = self.clamp(quantity);
        let max = self.config.max_quantity_per_item;
        let size = item.selected_size.as_deref();
        let color = item.selected_color.as_deref();

        let resulting = if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.matches(item.product_id, size, color))
        {
            let merged = line.quantity.saturating_add(quantity).min(max);
            if !line.is_priceable_at(merged) {
                tracing::warn!(product_id = %line.product_id, quantity = merged, "line total would overflow, add refused");
                return 0;
            }
            line.quantity = merged;
            tracing::debug!(
                product_id = %line.product_id,
                added = quantity,
                quantity = line.quantity,
                "merged into existing line"
            );
            line.quantity
        } else {
            let line = item.with_quantity(quantity);
            if !line.is_priceable() {
                tracing::warn!(product_id = %line.product_id, quantity, "line total would overflow, add refused");
                return 0;
            }
            tracing::debug!(
                product_id = %line.product_id,
                size = ?line.selected_size,
                color = ?line.selected_color,
                quantity,
                "added line"
            );
            self.items.push(line);
            quantity
        };

        self.commit();
        resulting
    }

    /// Remove the line for a product variant.
    ///
    /// Variant fields must match exactly, absent matching absent. Returns
    /// whether a line was removed; a missing line is a no-op.
    pub fn remove_item(
        &mut self,
        product_id: ProductId,
        size: Option<&str>,
        color: Option<&str>,
    ) -> bool {
        let before = self.items.len();
        self.items.retain(|line| !line.matches(product_id, size, color));
        let removed = self.items.len() < before;

        tracing::debug!(%product_id, ?size, ?color, removed, "remove line");
        self.commit();
        removed
    }

    /// Remove every variant of a product. Returns how many lines went.
    pub fn remove_product(&mut self, product_id: ProductId) -> usize {
        let before = self.items.len();
        self.items.retain(|line| line.product_id != product_id);
        let removed = before - self.items.len();

        tracing::debug!(%product_id, removed, "remove product");
        self.commit();
        removed
    }

    /// Set the quantity of a product variant's line.
    ///
    /// A quantity of zero or less removes the line. A missing line is left
    /// missing, and a quantity that would make the line's total overflow
    /// leaves it unchanged. Returns whether a line matched.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        size: Option<&str>,
        color: Option<&str>,
    ) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id, size, color);
        }

        let quantity = self.clamp(quantity);
        let matched = match self
            .items
            .iter_mut()
            .find(|line| line.matches(product_id, size, color))
        {
            Some(line) => {
                if !line.is_priceable_at(quantity) {
                    tracing::warn!(%product_id, quantity, "line total would overflow, update refused");
                    return true;
                }
                line.quantity = quantity;
                true
            }
            None => false,
        };

        tracing::debug!(%product_id, ?size, ?color, quantity, matched, "update quantity");
        self.commit();
        matched
    }

    /// Empty the cart and erase its stored copy.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.totals = CartTotals::zero(self.config.currency);
        self.storage.clear();
        tracing::debug!(key = self.storage.key(), "cleared cart");
    }

    /// Fold other lines into this cart through the identity rule, e.g. a
    /// guest cart when the shopper signs in. Saves once at the end.
    pub fn merge_items(&mut self, items: impl IntoIterator<Item = CartLineItem>) {
        let mut merged = 0usize;
        for line in items {
            self.absorb(line);
            merged += 1;
        }

        tracing::debug!(merged, lines = self.items.len(), "merged lines");
        self.commit();
    }

    /// Quantity held for a product variant, 0 if absent.
    pub fn get_item_quantity(
        &self,
        product_id: ProductId,
        size: Option<&str>,
        color: Option<&str>,
    ) -> u32 {
        self.get_item(product_id, size, color)
            .map_or(0, |line| line.quantity)
    }

    /// Whether the cart holds a line for a product variant.
    pub fn is_in_cart(&self, product_id: ProductId, size: Option<&str>, color: Option<&str>) -> bool {
        self.get_item(product_id, size, color).is_some()
    }

    /// The line for a product variant.
    pub fn get_item(
        &self,
        product_id: ProductId,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Option<&CartLineItem> {
        self.items
            .iter()
            .find(|line| line.matches(product_id, size, color))
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Current totals.
    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.totals.total_items
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency totals are reported in.
    pub fn currency(&self) -> Currency {
        self.config.currency
    }

    /// Active configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// The storage adapter.
    pub fn storage(&self) -> &CartStorage {
        &self.storage
    }

    fn clamp(&self, quantity: i64) -> u32 {
        let max = self.config.max_quantity_per_item;
        u32::try_from(quantity).map_or(max, |q| q.min(max))
    }

    /// Merge one line into the collection without saving. Returns whether
    /// the line was changed on the way in (dropped, capped or merged).
    fn absorb(&mut self, mut line: CartLineItem) -> bool {
        if line.quantity == 0 {
            return true;
        }

        let max = self.config.max_quantity_per_item;
        match self.items.iter_mut().find(|existing| existing.same_line(&line)) {
            Some(existing) => {
                let merged = existing.quantity.saturating_add(line.quantity).min(max);
                if existing.is_priceable_at(merged) {
                    existing.quantity = merged;
                } else {
                    tracing::warn!(product_id = %line.product_id, "merged line total overflows, keeping existing quantity");
                }
                true
            }
            None => {
                let capped = line.quantity > max;
                line.quantity = line.quantity.min(max);
                if !line.is_priceable() {
                    tracing::warn!(product_id = %line.product_id, "line total overflows, dropping line");
                    return true;
                }
                self.items.push(line);
                capped
            }
        }
    }

    fn commit(&mut self) {
        self.totals = CartTotals::calculate(&self.items, self.config.currency);
        self.storage.save(&self.items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use storefront_cache::{Cache, KeyValueStore, MemoryStore};

    const TEE: ProductId = ProductId::new(1);
    const MUG: ProductId = ProductId::new(2);

    fn engine() -> CartEngine {
        CartEngine::new(CartStorage::unavailable(), CartConfig::default())
    }

    fn tee() -> NewLineItem {
        NewLineItem::new(TEE, "Tee", Decimal::from(20))
    }

    fn mug() -> NewLineItem {
        NewLineItem::new(MUG, "Mug", Decimal::from(8))
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = engine();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert!(cart.totals().total.is_zero());
    }

    #[test]
    fn test_add_item() {
        let mut cart = engine();
        assert_eq!(cart.add_item(tee(), 2), 2);

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.totals().subtotal.amount, Decimal::from(40));
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = engine();
        cart.add_item(tee(), 1);
        assert_eq!(cart.add_item(tee(), 2), 3);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_variants_are_separate_lines() {
        let mut cart = engine();
        cart.add_item(tee().with_size("M"), 1);
        cart.add_item(tee().with_size("L"), 1);
        cart.add_item(tee(), 1);

        assert_eq!(cart.line_count(), 3);
        assert_eq!(cart.get_item_quantity(TEE, Some("M"), None), 1);
        assert_eq!(cart.get_item_quantity(TEE, None, None), 1);
    }

    #[test]
    fn test_add_non_positive_is_noop() {
        let mut cart = engine();
        cart.add_item(tee(), 2);

        assert_eq!(cart.add_item(tee(), 0), 0);
        assert_eq!(cart.add_item(tee(), -3), 0);
        assert_eq!(cart.get_item_quantity(TEE, None, None), 2);
        assert_eq!(cart.add_item(mug(), 0), 0);
        assert!(!cart.is_in_cart(MUG, None, None));
    }

    #[test]
    fn test_quantity_saturates_at_limit() {
        let mut cart = CartEngine::new(
            CartStorage::unavailable(),
            CartConfig::default().with_max_quantity(10),
        );

        assert_eq!(cart.add_item(tee(), 7), 7);
        assert_eq!(cart.add_item(tee(), 7), 10);
        assert_eq!(cart.add_item(mug(), i64::MAX), 10);

        assert!(cart.update_quantity(TEE, 50, None, None));
        assert_eq!(cart.get_item_quantity(TEE, None, None), 10);
    }

    #[test]
    fn test_update_quantity_sets_absolute_value() {
        let mut cart = engine();
        cart.add_item(tee(), 1);

        assert!(cart.update_quantity(TEE, 5, None, None));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = engine();
        cart.add_item(tee(), 3);

        assert!(cart.update_quantity(TEE, 0, None, None));
        assert!(!cart.is_in_cart(TEE, None, None));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_missing_does_not_create() {
        let mut cart = engine();
        assert!(!cart.update_quantity(MUG, 4, None, None));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item_requires_exact_variant() {
        let mut cart = engine();
        cart.add_item(tee().with_size("M").with_color("red"), 1);

        assert!(!cart.remove_item(TEE, Some("M"), None));
        assert!(!cart.remove_item(TEE, None, None));
        assert!(cart.remove_item(TEE, Some("M"), Some("red")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = engine();
        assert!(!cart.remove_item(ProductId::new(999), None, None));
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_remove_product_drops_all_variants() {
        let mut cart = engine();
        cart.add_item(tee().with_size("M"), 1);
        cart.add_item(tee().with_size("L"), 2);
        cart.add_item(mug(), 1);

        assert_eq!(cart.remove_product(TEE), 2);
        assert_eq!(cart.line_count(), 1);
        assert!(cart.is_in_cart(MUG, None, None));
    }

    #[test]
    fn test_insertion_order_is_stable() {
        let mut cart = engine();
        cart.add_item(mug(), 1);
        cart.add_item(tee(), 1);
        cart.add_item(mug(), 1);

        let ids: Vec<ProductId> = cart.items().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![MUG, TEE]);
    }

    #[test]
    fn test_clear_cart() {
        let mut cart = engine();
        cart.add_item(tee().with_discount(50), 2);
        cart.clear_cart();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert!(cart.totals().subtotal.is_zero());
        assert!(cart.totals().discount_amount.is_zero());
    }

    #[test]
    fn test_merge_items_uses_identity_rule() {
        let mut cart = engine();
        cart.add_item(tee(), 1);

        cart.merge_items(vec![
            tee().with_quantity(2),
            mug().with_quantity(1),
            tee().with_size("S").with_quantity(1),
        ]);

        assert_eq!(cart.line_count(), 3);
        assert_eq!(cart.get_item_quantity(TEE, None, None), 3);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_every_write_persists() {
        let store = MemoryStore::new();
        let storage = CartStorage::new(Cache::new(store.clone()));
        let mut cart = CartEngine::new(storage, CartConfig::default());

        cart.add_item(tee(), 2);
        let reloaded = CartStorage::new(Cache::new(store.clone())).load();
        assert_eq!(reloaded, cart.items());

        cart.update_quantity(TEE, 4, None, None);
        let reloaded = CartStorage::new(Cache::new(store)).load();
        assert_eq!(reloaded[0].quantity, 4);
    }

    #[test]
    fn test_restore_normalizes_stored_lines() {
        let store = MemoryStore::new();
        let storage = CartStorage::new(Cache::new(store.clone()));
        storage.save(&[
            tee().with_quantity(2),
            mug().with_quantity(0),
            tee().with_quantity(3),
            mug().with_size("XL").with_quantity(20_000),
        ]);

        let cart = CartEngine::restore(
            CartStorage::new(Cache::new(store.clone())),
            CartConfig::default().with_max_quantity(10_000),
        );

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.get_item_quantity(TEE, None, None), 5);
        assert_eq!(cart.get_item_quantity(MUG, Some("XL"), None), 10_000);
        assert!(!cart.is_in_cart(MUG, None, None));

        // Normalized state was written back.
        let stored = CartStorage::new(Cache::new(store)).load();
        assert_eq!(stored, cart.items());
    }

    #[test]
    fn test_storage_failure_keeps_memory_state() {
        let store = MemoryStore::new().with_quota(16);
        let storage = CartStorage::new(Cache::new(store));
        let mut cart = CartEngine::new(storage, CartConfig::default());

        cart.add_item(tee(), 2);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.totals().total.amount, Decimal::from(40));
    }

    #[test]
    fn test_large_adds_stay_exact_by_default() {
        let mut cart = engine();
        for _ in 0..3 {
            cart.add_item(tee(), 5000);
        }
        assert_eq!(cart.get_item_quantity(TEE, None, None), 15_000);

        assert_eq!(cart.add_item(mug(), i64::MAX), u32::MAX);
        assert_eq!(cart.item_count(), 15_000 + u64::from(u32::MAX));
    }

    #[test]
    fn test_overflowing_add_is_refused() {
        let mut cart = engine();
        let yacht = || NewLineItem::new(MUG, "Yacht", Decimal::MAX);

        assert_eq!(cart.add_item(yacht(), 2), 0);
        assert!(cart.is_empty());

        assert_eq!(cart.add_item(yacht(), 1), 1);
        assert_eq!(cart.add_item(yacht(), 1), 0);
        assert!(cart.update_quantity(MUG, 5, None, None));
        assert_eq!(cart.get_item_quantity(MUG, None, None), 1);
        assert_eq!(cart.totals().total.amount, Decimal::MAX);
    }

    #[test]
    fn test_restore_drops_overflowing_lines() {
        let store = MemoryStore::new();
        store
            .set(
                "cart",
                br#"[{"id":1,"title":"Tee","price":5e28,"image":"","quantity":2},{"id":2,"title":"Mug","price":8,"image":"","quantity":1}]"#,
            )
            .unwrap();

        let cart = CartEngine::restore(
            CartStorage::new(Cache::new(store.clone())),
            CartConfig::default(),
        );

        assert!(!cart.is_in_cart(TEE, None, None));
        assert_eq!(cart.get_item_quantity(MUG, None, None), 1);
        assert_eq!(cart.totals().total.amount, Decimal::from(8));
        assert_eq!(CartStorage::new(Cache::new(store)).load(), cart.items());
    }

    #[test]
    fn test_storage_uses_configured_key() {
        let store = MemoryStore::new();
        let config = CartConfig::default().with_storage_key("shop-cart");
        let mut cart = CartEngine::new(CartStorage::new(Cache::new(store.clone())), config);

        cart.add_item(tee(), 1);

        assert_eq!(cart.storage().key(), "shop-cart");
        assert!(store.exists("shop-cart").unwrap());
        assert!(!store.exists("cart").unwrap());
    }
}
