//! Which cart lines take part in the current checkout.

use crate::cart::{calculate_subtotal, Cart, CartLineItem, CartStore};
use crate::ids::ProductCode;
use crate::money::Money;
use lantern_cache::KeyValueStore;
use serde::{Deserialize, Serialize};

/// An ordered set of selected product codes. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSelection {
    ids: Vec<ProductCode>,
}

impl OrderSelection {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the given codes, ignoring repeats.
    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ProductCode>,
    {
        let mut selection = Self::new();
        for id in ids {
            selection.insert(id.into());
        }
        selection
    }

    /// Select every line currently in `cart`.
    pub fn all(cart: &Cart) -> Self {
        Self::from_ids(cart.items().iter().map(|i| i.id().clone()))
    }

    /// Add a code. Returns false if it was already selected.
    pub fn insert(&mut self, id: ProductCode) -> bool {
        if self.contains(id.as_str()) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Flip one code in or out. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.ids.retain(|i| i != id);
            false
        } else {
            self.ids.push(ProductCode::from(id));
            true
        }
    }

    /// Select everything in `cart`, or nothing if everything already is.
    pub fn toggle_all(&mut self, cart: &Cart) {
        if self.is_all_selected(cart) {
            self.clear();
        } else {
            *self = Self::all(cart);
        }
    }

    /// True when the cart is non-empty and every line is selected.
    pub fn is_all_selected(&self, cart: &Cart) -> bool {
        !cart.is_empty() && cart.items().iter().all(|i| self.contains(i.id().as_str()))
    }

    /// Drop codes whose lines are no longer in `cart`.
    pub fn prune(&mut self, cart: &Cart) {
        self.ids.retain(|id| cart.contains(id.as_str()));
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Check if a code is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    /// Selected codes in selection order.
    pub fn ids(&self) -> &[ProductCode] {
        &self.ids
    }

    /// Number of selected codes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The selected lines, in cart order.
    pub fn apply(&self, items: &[CartLineItem]) -> Vec<CartLineItem> {
        items
            .iter()
            .filter(|item| self.contains(item.id().as_str()))
            .cloned()
            .collect()
    }

    /// Subtotal of the selected lines only.
    pub fn subtotal(&self, items: &[CartLineItem]) -> Money {
        calculate_subtotal(&self.apply(items))
    }

    /// Remove every selected line from the store, then deselect all.
    pub fn remove_from<S: KeyValueStore>(&mut self, store: &mut CartStore<S>) {
        for id in &self.ids {
            store.remove_from_cart(id.as_str());
        }
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductRecord;
    use lantern_cache::MemoryStore;

    fn cart_of(entries: &[(&str, i64, i64)]) -> Cart {
        Cart::from_items(entries.iter().map(|(id, price, quantity)| CartLineItem {
            product: ProductRecord::new(*id, *id, *price),
            quantity: *quantity,
        }))
    }

    #[test]
    fn test_toggle() {
        let mut selection = OrderSelection::new();
        assert!(selection.toggle("A"));
        assert!(selection.contains("A"));
        assert!(!selection.toggle("A"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all() {
        let cart = cart_of(&[("A", 1, 1), ("B", 1, 1)]);
        let mut selection = OrderSelection::from_ids(["A"]);

        selection.toggle_all(&cart);
        assert!(selection.is_all_selected(&cart));
        assert_eq!(selection.len(), 2);

        selection.toggle_all(&cart);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_empty_cart_is_never_all_selected() {
        let cart = Cart::new();
        let mut selection = OrderSelection::new();
        assert!(!selection.is_all_selected(&cart));
        selection.toggle_all(&cart);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_apply_preserves_cart_order() {
        let cart = cart_of(&[("A", 1, 1), ("B", 1, 1), ("C", 1, 1)]);
        let selection = OrderSelection::from_ids(["C", "A", "Z"]);

        let picked: Vec<String> = selection
            .apply(cart.items())
            .iter()
            .map(|i| i.id().to_string())
            .collect();
        assert_eq!(picked, vec!["A", "C"]);
    }

    #[test]
    fn test_selected_subtotal_scenario() {
        let cart = cart_of(&[("A", 100_000, 2), ("B", 50_000, 1)]);
        let selection = OrderSelection::from_ids(["A"]);
        assert_eq!(selection.subtotal(cart.items()), Money::vnd(200_000));
    }

    #[test]
    fn test_prune() {
        let cart = cart_of(&[("A", 1, 1)]);
        let mut selection = OrderSelection::from_ids(["A", "B"]);
        selection.prune(&cart);
        assert_eq!(selection.ids(), &[ProductCode::new("A")]);
    }

    #[test]
    fn test_remove_selected_from_store() {
        let mut store = CartStore::open(MemoryStore::new());
        for id in ["A", "B", "C"] {
            store.add_to_cart(&ProductRecord::new(id, id, 1));
        }

        let mut selection = OrderSelection::from_ids(["A", "C"]);
        selection.remove_from(&mut store);

        assert!(selection.is_empty());
        assert_eq!(store.cart_items().len(), 1);
        assert_eq!(store.cart_items()[0].id(), &ProductCode::new("B"));
    }
}
