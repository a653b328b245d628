//! Checkout module.
//!
//! Shipping details, payment methods, order drafts, the checkout state
//! machine, and submission to the order intake endpoint.

mod address;
mod draft;
mod flow;
mod payment;
mod submit;

pub use address::{Region, ShippingInfo};
pub use draft::{build_order_draft, OrderDraft};
pub use flow::{CheckoutFlow, CheckoutState};
pub use payment::PaymentMethod;
pub use submit::{
    submit_order, CheckoutOutcome, CheckoutSession, IntakeError, IntakeField, OrderForm,
    OrderIntake, SubmissionError, SubmissionReceipt, SUBMIT_FAILURE_MESSAGE,
    SUBMIT_SUCCESS_MESSAGE,
};
