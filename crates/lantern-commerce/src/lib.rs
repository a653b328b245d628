//! Storefront domain types and logic for Lantern.
//!
//! This crate holds everything the storefront decides on its own, with no
//! network access:
//!
//! - **Catalog**: Product records as published in the catalog file
//! - **Cart**: Line items, the persisted cart store, selection and totals
//! - **Checkout**: Shipping details, payment methods, drafts, submission flow
//!
//! # Example
//!
//! ```rust
//! use lantern_cache::MemoryStore;
//! use lantern_commerce::prelude::*;
//!
//! let mut store = CartStore::open(MemoryStore::new());
//! let tea = ProductRecord::new("A", "Trà sen", 100_000);
//! store.add_to_cart(&tea);
//! store.add_to_cart(&tea);
//!
//! let totals = OrderTotals::for_items(store.cart_items());
//! assert_eq!(totals.total, Money::vnd(200_000));
//! assert_eq!(totals.total.display(), "200.000\u{a0}\u{20ab}");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::ProductCode;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductCode;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, PriceValue, ProductRecord};

    // Cart
    pub use crate::cart::{
        calculate_subtotal, calculate_total, format_currency, has_discount, Cart, CartLineItem,
        CartStore, OrderSelection, OrderTotals,
    };

    // Checkout
    pub use crate::checkout::{
        build_order_draft, submit_order, CheckoutFlow, CheckoutOutcome, CheckoutSession,
        CheckoutState, OrderDraft, OrderForm, OrderIntake, PaymentMethod, Region,
        ShippingInfo, SubmissionError, SubmissionReceipt,
    };
}
