//! Cart line items and the identity rule that decides when two merge.

use crate::ids::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest discount percentage that has any effect.
pub const MAX_DISCOUNT_PERCENT: u8 = 100;

/// A product selection about to be added to the cart.
///
/// Everything a [`CartLineItem`] carries except the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLineItem {
    /// Product being added.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Product title (denormalized for display).
    #[serde(default)]
    pub title: String,
    /// Price per unit at the time of adding.
    #[serde(rename = "price", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Product image URL.
    #[serde(rename = "image", default)]
    pub image_url: String,
    /// Selected size variant.
    #[serde(rename = "selectedSize", default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    /// Selected color variant.
    #[serde(rename = "selectedColor", default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    /// Discount percentage, 0-100.
    #[serde(rename = "discount", default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u8>,
}

impl NewLineItem {
    /// Create a selection with no variant and no discount.
    pub fn new(product_id: ProductId, title: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            product_id,
            title: title.into(),
            unit_price,
            image_url: String::new(),
            selected_size: None,
            selected_color: None,
            discount_percent: None,
        }
    }

    /// Set the image URL.
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Select a size variant.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.selected_size = Some(size.into());
        self
    }

    /// Select a color variant.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.selected_color = Some(color.into());
        self
    }

    /// Apply a percentage discount.
    pub fn with_discount(mut self, percent: u8) -> Self {
        self.discount_percent = Some(percent);
        self
    }

    /// Turn the selection into a line item.
    pub fn with_quantity(self, quantity: u32) -> CartLineItem {
        CartLineItem {
            product_id: self.product_id,
            title: self.title,
            unit_price: self.unit_price,
            image_url: self.image_url,
            quantity,
            selected_size: self.selected_size,
            selected_color: self.selected_color,
            discount_percent: self.discount_percent,
        }
    }
}

/// A line in the cart: one product variant and how many of it.
///
/// Serialized field names match the persisted cart layout (`id`, `title`,
/// `price`, `image`, `quantity`, `selectedSize`, `selectedColor`, `discount`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product ID.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Product title.
    #[serde(default)]
    pub title: String,
    /// Price per unit at the time of adding.
    ///
    /// Persisted as a JSON (f64) number, so a save and load keeps about 15
    /// significant digits.
    #[serde(rename = "price", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Product image URL.
    #[serde(rename = "image", default)]
    pub image_url: String,
    /// Quantity, at least 1 for any line held by the cart.
    pub quantity: u32,
    /// Selected size variant.
    #[serde(rename = "selectedSize", default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    /// Selected color variant.
    #[serde(rename = "selectedColor", default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    /// Discount percentage, 0-100.
    #[serde(rename = "discount", default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u8>,
}

impl CartLineItem {
    /// Whether this line is the given product variant.
    ///
    /// Variant fields compare as options: an absent size only matches an
    /// absent size.
    pub fn matches(&self, product_id: ProductId, size: Option<&str>, color: Option<&str>) -> bool {
        self.product_id == product_id
            && self.selected_size.as_deref() == size
            && self.selected_color.as_deref() == color
    }

    /// Whether two lines share an identity and must be merged.
    pub fn same_line(&self, other: &CartLineItem) -> bool {
        self.matches(
            other.product_id,
            other.selected_size.as_deref(),
            other.selected_color.as_deref(),
        )
    }

    /// Unit price after the line's discount.
    pub fn effective_unit_price(&self) -> Decimal {
        match self.discount_percent {
            Some(percent) => {
                // The factor never exceeds one, so this cannot overflow.
                let percent = Decimal::from(percent.min(MAX_DISCOUNT_PERCENT));
                let factor = (Decimal::ONE_HUNDRED - percent) / Decimal::ONE_HUNDRED;
                self.unit_price * factor
            }
            None => self.unit_price,
        }
    }

    /// Effective unit price times quantity, or `None` if it overflows.
    pub fn line_total(&self) -> Option<Decimal> {
        self.effective_unit_price()
            .checked_mul(Decimal::from(self.quantity))
    }

    /// Amount saved on this line by its discount, or `None` if it overflows.
    pub fn line_discount(&self) -> Option<Decimal> {
        (self.unit_price - self.effective_unit_price()).checked_mul(Decimal::from(self.quantity))
    }

    /// Whether the line's total and discount are representable.
    pub fn is_priceable(&self) -> bool {
        self.is_priceable_at(self.quantity)
    }

    /// Whether the line would stay priceable holding `quantity`.
    pub fn is_priceable_at(&self, quantity: u32) -> bool {
        let quantity = Decimal::from(quantity);
        let effective = self.effective_unit_price();
        effective.checked_mul(quantity).is_some()
            && (self.unit_price - effective).checked_mul(quantity).is_some()
    }
}
