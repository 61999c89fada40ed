//! Cart totals.

use crate::cart::CartLineItem;
use crate::money::{Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals derived from the cart's line items.
///
/// Always recomputed from scratch; never mutated on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of quantities over all lines.
    pub total_items: u64,
    /// Sum of effective unit price times quantity.
    pub subtotal: Money,
    /// Sum of per-line discount savings.
    pub discount_amount: Money,
    /// Amount due. Equal to the subtotal; tax and shipping are not applied.
    pub total: Money,
}

impl CartTotals {
    /// Totals of an empty cart.
    pub fn zero(currency: Currency) -> Self {
        Self {
            total_items: 0,
            subtotal: Money::zero(currency),
            discount_amount: Money::zero(currency),
            total: Money::zero(currency),
        }
    }

    /// Compute totals over `items` in full.
    ///
    /// Lines whose own total overflows are left out; sums that overflow
    /// saturate at the largest representable amount.
    pub fn calculate(items: &[CartLineItem], currency: Currency) -> Self {
        let mut total_items: u64 = 0;
        let mut subtotal = Decimal::ZERO;
        let mut discount_amount = Decimal::ZERO;

        for item in items {
            let (Some(line_total), Some(line_discount)) = (item.line_total(), item.line_discount())
            else {
                tracing::warn!(product_id = %item.product_id, "line total overflows, leaving it out");
                continue;
            };
            total_items = total_items.saturating_add(u64::from(item.quantity));
            subtotal = saturating_sum(subtotal, line_total);
            discount_amount = saturating_sum(discount_amount, line_discount);
        }

        Self {
            total_items,
            subtotal: Money::new(subtotal, currency),
            discount_amount: Money::new(discount_amount, currency),
            total: Money::new(subtotal, currency),
        }
    }

    /// Check if any discounts are applied.
    pub fn has_discounts(&self) -> bool {
        self.discount_amount.is_positive()
    }

    /// Savings as a percentage of the undiscounted price.
    pub fn savings_percentage(&self) -> Decimal {
        let discount = self.discount_amount.amount;
        let (discount, undiscounted) = match self.subtotal.amount.checked_add(discount) {
            Some(sum) => (discount, sum),
            None => {
                let half = discount / Decimal::TWO;
                let sum = (self.subtotal.amount / Decimal::TWO).checked_add(half);
                (half, sum.unwrap_or(Decimal::MAX))
            }
        };
        if undiscounted.is_zero() {
            return Decimal::ZERO;
        }
        discount
            .checked_div(undiscounted)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    }
}

fn saturating_sum(sum: Decimal, value: Decimal) -> Decimal {
    sum.checked_add(value).unwrap_or(if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::NewLineItem;
    use crate::ids::ProductId;

    #[test]
    fn test_totals_with_mixed_discounts() {
        let items = vec![
            NewLineItem::new(ProductId::new(1), "Jacket", Decimal::from(100))
                .with_discount(10)
                .with_quantity(2),
            NewLineItem::new(ProductId::new(2), "Socks", Decimal::from(50)).with_quantity(1),
        ];

        let totals = CartTotals::calculate(&items, Currency::USD);
        assert_eq!(totals.total_items, 3);
        assert_eq!(totals.subtotal.amount, Decimal::from(230));
        assert_eq!(totals.discount_amount.amount, Decimal::from(20));
        assert_eq!(totals.total.amount, Decimal::from(230));
        assert!(totals.has_discounts());
    }

    #[test]
    fn test_empty_totals_are_zero() {
        let totals = CartTotals::calculate(&[], Currency::EUR);
        assert_eq!(totals, CartTotals::zero(Currency::EUR));
        assert!(!totals.has_discounts());
        assert_eq!(totals.savings_percentage(), Decimal::ZERO);
    }

    #[test]
    fn test_savings_percentage() {
        let items = vec![NewLineItem::new(ProductId::new(1), "Lamp", Decimal::from(40))
            .with_discount(25)
            .with_quantity(1)];

        let totals = CartTotals::calculate(&items, Currency::USD);
        assert_eq!(totals.savings_percentage(), Decimal::from(25));
    }

    #[test]
    fn test_fractional_discount_stays_exact() {
        let items = vec![NewLineItem::new(ProductId::new(1), "Pen", Decimal::new(999, 2))
            .with_discount(15)
            .with_quantity(3)];

        let totals = CartTotals::calculate(&items, Currency::USD);
        // 9.99 * 0.85 = 8.4915 per unit
        assert_eq!(totals.subtotal.amount, Decimal::new(254745, 4));
        assert_eq!(totals.subtotal.display(), "$25.47");
        assert_eq!(totals.discount_amount.amount, Decimal::new(44955, 4));
    }

    #[test]
    fn test_overflowing_sums_saturate() {
        let half_max = Decimal::from_scientific("5e28").unwrap();
        let items = vec![
            NewLineItem::new(ProductId::new(1), "Ship", half_max).with_quantity(1),
            NewLineItem::new(ProductId::new(2), "Ship", half_max).with_quantity(1),
        ];

        let totals = CartTotals::calculate(&items, Currency::USD);
        assert_eq!(totals.total_items, 2);
        assert_eq!(totals.subtotal.amount, Decimal::MAX);
        assert_eq!(totals.total.amount, Decimal::MAX);
    }

    #[test]
    fn test_unpriceable_line_left_out() {
        let items = vec![
            NewLineItem::new(ProductId::new(1), "Ship", Decimal::MAX).with_quantity(3),
            NewLineItem::new(ProductId::new(2), "Oar", Decimal::from(40)).with_quantity(1),
        ];

        let totals = CartTotals::calculate(&items, Currency::USD);
        assert_eq!(totals.total_items, 1);
        assert_eq!(totals.subtotal.amount, Decimal::from(40));
    }
}
