//! Shopping cart module.
//!
//! Contains the cart engine, line items, totals, and the storage adapter.

mod engine;
mod line_item;
mod pricing;
mod shared;
mod storage;

pub use engine::CartEngine;
pub use line_item::{CartLineItem, NewLineItem, MAX_DISCOUNT_PERCENT};
pub use pricing::CartTotals;
pub use shared::SharedCart;
pub use storage::{CartStorage, DEFAULT_STORAGE_KEY};
