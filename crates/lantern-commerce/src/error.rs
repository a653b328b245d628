//! Commerce error types.

use thiserror::Error;

/// Message shown when required shipping details are missing.
pub const MISSING_SHIPPING_INFO_MESSAGE: &str = "Vui lòng điền đầy đủ thông tin giao hàng!";

/// Message shown when a checkout has nothing to pay for.
pub const EMPTY_SELECTION_MESSAGE: &str = "Vui lòng chọn sản phẩm để thanh toán!";

/// Errors that can occur in storefront operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Required shipping fields are blank.
    #[error("Missing shipping information: {}", .0.join(", "))]
    MissingShippingInfo(Vec<&'static str>),

    /// None of the selected lines are in the cart.
    #[error("No cart items selected for checkout")]
    EmptySelection,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Unrecognized payment method code.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),
}

impl CommerceError {
    /// Text to show the shopper.
    pub fn user_message(&self) -> String {
        match self {
            CommerceError::MissingShippingInfo(_) => MISSING_SHIPPING_INFO_MESSAGE.to_string(),
            CommerceError::EmptySelection => EMPTY_SELECTION_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// True for errors the shopper fixes by editing the form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CommerceError::MissingShippingInfo(_) | CommerceError::EmptySelection
        )
    }
}
