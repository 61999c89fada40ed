//! Shopping cart engine for the storefront.
//!
//! - **Line items**: products plus optional size/color variant; lines with
//!   the same product and variant always merge
//! - **Totals**: item count, subtotal, discount savings, recomputed after
//!   every change
//! - **Storage**: the cart is saved as a JSON array under one key after
//!   every change and restored on startup; storage failures never reach the
//!   caller
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use storefront_cache::Cache;
//! use storefront_cart::prelude::*;
//!
//! let storage = CartStorage::new(Cache::memory());
//! let mut cart = CartEngine::restore(storage, CartConfig::default());
//!
//! let jacket = NewLineItem::new(ProductId::new(1), "Jacket", Decimal::from(100))
//!     .with_size("M")
//!     .with_discount(10);
//! cart.add_item(jacket, 2);
//! cart.add_item(NewLineItem::new(ProductId::new(2), "Socks", Decimal::from(50)), 1);
//!
//! let totals = cart.totals();
//! assert_eq!(totals.total_items, 3);
//! assert_eq!(totals.total.display(), "$230.00");
//! assert_eq!(totals.discount_amount.display(), "$20.00");
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod ids;
pub mod money;

pub use cart::{CartEngine, CartLineItem, CartStorage, CartTotals, NewLineItem, SharedCart};
pub use config::CartConfig;
pub use error::CartError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{
        CartEngine, CartLineItem, CartStorage, CartTotals, NewLineItem, SharedCart,
    };
    pub use crate::config::CartConfig;
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};
}
