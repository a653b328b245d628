//! Cart and line item types.

use crate::catalog::ProductRecord;
use crate::ids::ProductCode;
use serde::{Deserialize, Deserializer, Serialize};

/// A product and how many of it the shopper wants.
///
/// Stored flattened: the product's columns plus a `quantity` key, which is
/// the shape older snapshots already have on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// The product, as it was when added.
    #[serde(flatten)]
    pub product: ProductRecord,
    /// Always at least 1.
    #[serde(default = "default_quantity", deserialize_with = "quantity_or_one")]
    pub quantity: i64,
}

impl CartLineItem {
    /// A fresh line with quantity 1.
    pub fn new(product: ProductRecord) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Product code of this line.
    pub fn id(&self) -> &ProductCode {
        &self.product.id
    }
}

fn default_quantity() -> i64 {
    1
}

/// Snapshots written before quantities existed, or with a zero/null
/// quantity, restore as a single unit.
fn quantity_or_one<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let quantity = Option::<i64>::deserialize(deserializer)?;
    Ok(quantity.filter(|q| *q >= 1).unwrap_or(1))
}

/// An ordered list of line items, at most one per product code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from existing lines, folding duplicate codes into the
    /// first occurrence.
    pub fn from_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            match cart.position(item.id().as_str()) {
                Some(idx) => {
                    let existing = &mut cart.items[idx];
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Add one unit of a product.
    ///
    /// An existing line for the same code is incremented in place; otherwise
    /// a new line is appended. Returns the line's new quantity.
    pub fn add(&mut self, product: &ProductRecord) -> i64 {
        if let Some(idx) = self.position(product.id.as_str()) {
            let existing = &mut self.items[idx];
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.quantity;
        }

        self.items.push(CartLineItem::new(product.clone()));
        1
    }

    /// Remove the line for a product. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        self.items.len() < len_before
    }

    /// Set a line's quantity exactly.
    ///
    /// A quantity below 1 removes the line. Returns whether the cart changed.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity < 1 {
            return self.remove(product_id);
        }

        match self.items.iter_mut().find(|i| i.product.id == product_id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove every line. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();
        self.items.clear();
        had_items
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, product_id: &str) -> bool {
        self.position(product_id).is_some()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.product.id == product_id)
    }
}
