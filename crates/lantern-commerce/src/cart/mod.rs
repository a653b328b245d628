//! Shopping cart module.
//!
//! Contains the cart and its line items, the persistent store that owns the
//! cart, checkout selection, and total calculations.

mod cart;
mod pricing;
mod selection;
mod store;

pub use cart::{Cart, CartLineItem};
pub use pricing::{
    calculate_subtotal, calculate_total, format_currency, has_discount, line_list_total,
    line_total, OrderTotals, CONTACT_FOR_PRICE,
};
pub use selection::OrderSelection;
pub use store::{CartStore, CART_STORAGE_KEY};
