//! Order total calculations.

use crate::cart::CartLineItem;
use crate::catalog::{PriceValue, ProductRecord};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Shown for prices that are missing or empty.
pub const CONTACT_FOR_PRICE: &str = "Liên hệ";

/// Sum of selling price × quantity.
///
/// Lines without a numeric selling price are "price on request" and
/// contribute nothing.
pub fn calculate_subtotal(items: &[CartLineItem]) -> Money {
    items.iter().filter_map(line_total).sum()
}

/// Selling price × quantity for one line, if the price is numeric.
pub fn line_total(item: &CartLineItem) -> Option<Money> {
    item.product.price().map(|p| p * item.quantity)
}

/// List price × quantity for one line, if the list price is numeric.
pub fn line_list_total(item: &CartLineItem) -> Option<Money> {
    item.product.list_price_money().map(|p| p * item.quantity)
}

/// True when the list price is present and strictly above the selling price.
///
/// Both prices must be numeric; a row with no selling price is never shown
/// as discounted.
pub fn has_discount(product: &ProductRecord) -> bool {
    match (product.list_price_money(), product.price()) {
        (Some(list), Some(selling)) => list.amount > selling.amount,
        _ => false,
    }
}

/// `subtotal + shipping_fee - discount`.
pub fn calculate_total(subtotal: Money, shipping_fee: Money, discount: Money) -> Money {
    subtotal + shipping_fee - discount
}

/// Format a price cell for display.
///
/// Numbers use the vi-VN currency format, non-empty text passes through
/// unchanged, and anything else reads "Liên hệ".
pub fn format_currency(value: Option<&PriceValue>) -> String {
    match value {
        Some(price @ PriceValue::Amount(_)) => match price.money() {
            Some(money) => money.display(),
            None => CONTACT_FOR_PRICE.to_string(),
        },
        Some(PriceValue::Text(text)) if !text.trim().is_empty() => text.clone(),
        _ => CONTACT_FOR_PRICE.to_string(),
    }
}

/// Totals for one checkout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping charge.
    pub shipping_fee: Money,
    /// Order-level discount.
    pub discount: Money,
    /// Amount payable.
    pub total: Money,
}

impl OrderTotals {
    /// Totals for a set of lines with no shipping fee and no discount.
    pub fn for_items(items: &[CartLineItem]) -> Self {
        let zero = Money::zero(Currency::default());
        Self::new(calculate_subtotal(items), zero, zero)
    }

    /// Totals from independent components.
    pub fn new(subtotal: Money, shipping_fee: Money, discount: Money) -> Self {
        Self {
            subtotal,
            shipping_fee,
            discount,
            total: calculate_total(subtotal, shipping_fee, discount),
        }
    }

    /// Replace the shipping fee, recomputing the total.
    pub fn with_shipping_fee(self, shipping_fee: Money) -> Self {
        Self::new(self.subtotal, shipping_fee, self.discount)
    }

    /// Replace the discount, recomputing the total.
    pub fn with_discount(self, discount: Money) -> Self {
        Self::new(self.subtotal, self.shipping_fee, discount)
    }

    /// Check if shipping is free.
    pub fn free_shipping(&self) -> bool {
        self.shipping_fee.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price: i64, quantity: i64) -> CartLineItem {
        CartLineItem {
            product: ProductRecord::new(id, id, price),
            quantity,
        }
    }

    #[test]
    fn test_empty_subtotal_is_zero() {
        assert_eq!(calculate_subtotal(&[]), Money::vnd(0));
    }

    #[test]
    fn test_subtotal() {
        let items = vec![line("A", 100_000, 2), line("B", 50_000, 1)];
        assert_eq!(calculate_subtotal(&items), Money::vnd(250_000));
    }

    #[test]
    fn test_subtotal_is_additive() {
        let left = vec![line("A", 100_000, 2), line("B", 35_000, 3)];
        let right = vec![line("C", 12_500, 4)];
        let all: Vec<_> = left.iter().chain(right.iter()).cloned().collect();

        assert_eq!(
            calculate_subtotal(&all),
            calculate_subtotal(&left) + calculate_subtotal(&right)
        );
    }

    #[test]
    fn test_price_on_request_contributes_zero() {
        let mut on_request = line("X", 0, 5);
        on_request.product.discounted_price = Some(PriceValue::text("Liên hệ"));
        let mut missing = line("Y", 0, 2);
        missing.product.discounted_price = None;

        let items = vec![line("A", 10_000, 1), on_request, missing];
        assert_eq!(calculate_subtotal(&items), Money::vnd(10_000));
    }

    #[test]
    fn test_has_discount() {
        let plain = ProductRecord::new("A", "A", 100);
        assert!(!has_discount(&plain));

        let discounted = ProductRecord::new("A", "A", 80).with_list_price(100);
        assert!(has_discount(&discounted));

        let equal = ProductRecord::new("A", "A", 100).with_list_price(100);
        assert!(!has_discount(&equal));

        let inverted = ProductRecord::new("A", "A", 120).with_list_price(100);
        assert!(!has_discount(&inverted));

        let mut text_list = ProductRecord::new("A", "A", 80);
        text_list.list_price = Some(PriceValue::text("n/a"));
        assert!(!has_discount(&text_list));

        let mut no_selling = ProductRecord::new("A", "A", 0).with_list_price(100);
        no_selling.discounted_price = None;
        assert!(!has_discount(&no_selling));
    }

    #[test]
    fn test_calculate_total() {
        let total = calculate_total(Money::vnd(200_000), Money::vnd(30_000), Money::vnd(10_000));
        assert_eq!(total, Money::vnd(220_000));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(
            format_currency(Some(&PriceValue::amount(100_000))),
            "100.000\u{a0}\u{20ab}"
        );
        assert_eq!(format_currency(Some(&PriceValue::text("Tặng kèm"))), "Tặng kèm");
        assert_eq!(format_currency(Some(&PriceValue::text(""))), CONTACT_FOR_PRICE);
        assert_eq!(format_currency(None), CONTACT_FOR_PRICE);
    }

    #[test]
    fn test_selected_scenario_totals() {
        let a = line("A", 100_000, 2);
        let totals = OrderTotals::for_items(&[a]);
        assert_eq!(totals.subtotal, Money::vnd(200_000));
        assert_eq!(totals.total, Money::vnd(200_000));
        assert!(totals.free_shipping());
    }

    #[test]
    fn test_totals_adjustments_are_independent() {
        let totals = OrderTotals::for_items(&[line("A", 100_000, 1)])
            .with_shipping_fee(Money::vnd(25_000))
            .with_discount(Money::vnd(5_000));
        assert_eq!(totals.total, Money::vnd(120_000));
        assert_eq!(totals.with_discount(Money::vnd(0)).total, Money::vnd(125_000));
    }

    #[test]
    fn test_line_totals() {
        let mut item = line("A", 80_000, 3);
        item.product = item.product.with_list_price(100_000);
        assert_eq!(line_total(&item), Some(Money::vnd(240_000)));
        assert_eq!(line_list_total(&item), Some(Money::vnd(300_000)));
    }
}
