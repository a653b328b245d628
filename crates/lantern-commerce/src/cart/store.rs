//! Persistent, observable cart.

use crate::cart::{Cart, CartLineItem};
use crate::catalog::ProductRecord;
use lantern_cache::{Cache, KeyValueStore};
use tokio::sync::watch;

/// Storage key the cart snapshot lives under.
pub const CART_STORAGE_KEY: &str = "cartItems";

/// The single owner of cart state.
///
/// Every mutation writes the full snapshot to the backing store and then
/// notifies subscribers. Persistence is best-effort: a failed write is
/// logged and the in-memory cart stays authoritative.
pub struct CartStore<S> {
    cart: Cart,
    cache: Cache<S>,
    key: String,
    changes: watch::Sender<Vec<CartLineItem>>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Restore the cart from `store` under the default key.
    pub fn open(store: S) -> Self {
        Self::open_with_key(store, CART_STORAGE_KEY)
    }

    /// Restore the cart from `store` under `key`.
    ///
    /// A missing or unreadable snapshot yields an empty cart.
    pub fn open_with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cache = Cache::new(store);

        let cart = match cache.get::<Vec<CartLineItem>>(&key) {
            Ok(Some(items)) => {
                tracing::debug!(key = %key, lines = items.len(), "restored cart");
                Cart::from_items(items)
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "discarding unreadable cart snapshot");
                Cart::new()
            }
        };

        let (changes, _) = watch::channel(cart.items().to_vec());
        Self {
            cart,
            cache,
            key,
            changes,
        }
    }

    /// Add one unit of `product`, merging with an existing line.
    pub fn add_to_cart(&mut self, product: &ProductRecord) {
        let quantity = self.cart.add(product);
        tracing::debug!(product = %product.id, quantity, "add to cart");
        self.commit(true);
    }

    /// Remove the line for `product_id`, if any.
    pub fn remove_from_cart(&mut self, product_id: &str) {
        let changed = self.cart.remove(product_id);
        tracing::debug!(product = product_id, changed, "remove from cart");
        self.commit(changed);
    }

    /// Set the quantity of `product_id`; below 1 removes the line.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        let changed = self.cart.update_quantity(product_id, quantity);
        tracing::debug!(product = product_id, quantity, changed, "update quantity");
        self.commit(changed);
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        let changed = self.cart.clear();
        tracing::debug!(changed, "clear cart");
        self.commit(changed);
    }

    /// Current lines in insertion order.
    pub fn cart_items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    /// The cart itself, for counts and lookups.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Receive every snapshot published after a mutation.
    ///
    /// The receiver starts out holding the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartLineItem>> {
        self.changes.subscribe()
    }

    /// The storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    fn commit(&mut self, changed: bool) {
        if let Err(e) = self.cache.set(&self.key, self.cart.items()) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
        }
        if changed {
            self.changes.send_replace(self.cart.items().to_vec());
        }
    }
}
