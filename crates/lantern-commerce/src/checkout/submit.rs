//! Order submission and the checkout session that drives it.

use crate::cart::{CartStore, OrderSelection};
use crate::checkout::{build_order_draft, CheckoutFlow, CheckoutState, OrderDraft, PaymentMethod, ShippingInfo};
use crate::money::Money;
use crate::CommerceError;
use async_trait::async_trait;
use lantern_cache::KeyValueStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown after an order is handed to the intake endpoint.
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Đặt hàng thành công! Chúng tôi sẽ liên hệ sớm.";

/// Shown when the order could not be sent.
pub const SUBMIT_FAILURE_MESSAGE: &str = "Có lỗi xảy ra, vui lòng thử lại!";

/// The seven values the intake form records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeField {
    ReceiverName,
    ReceiverPhone,
    Address,
    PaymentMethod,
    Products,
    Total,
    Note,
}

impl IntakeField {
    /// Every field, in form order.
    pub const ALL: [IntakeField; 7] = [
        IntakeField::ReceiverName,
        IntakeField::ReceiverPhone,
        IntakeField::Address,
        IntakeField::PaymentMethod,
        IntakeField::Products,
        IntakeField::Total,
        IntakeField::Note,
    ];
}

/// A draft flattened into the intake form's text values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    pub receiver_name: String,
    pub receiver_phone: String,
    pub address: String,
    pub payment_method: String,
    pub products: String,
    pub total: String,
    pub note: String,
}

impl OrderForm {
    /// Map a draft onto the form.
    pub fn from_draft(draft: &OrderDraft) -> Self {
        Self {
            receiver_name: draft.receiver_name.clone(),
            receiver_phone: draft.receiver_phone.clone(),
            address: draft.full_address.clone(),
            payment_method: draft.payment_method.label().to_string(),
            products: draft.product_summary(),
            total: draft.totals().total.display(),
            note: draft.note.clone(),
        }
    }

    /// Value for one field.
    pub fn value(&self, field: IntakeField) -> &str {
        match field {
            IntakeField::ReceiverName => &self.receiver_name,
            IntakeField::ReceiverPhone => &self.receiver_phone,
            IntakeField::Address => &self.address,
            IntakeField::PaymentMethod => &self.payment_method,
            IntakeField::Products => &self.products,
            IntakeField::Total => &self.total,
            IntakeField::Note => &self.note,
        }
    }

    /// All fields with their values, in form order.
    pub fn fields(&self) -> impl Iterator<Item = (IntakeField, &str)> + '_ {
        IntakeField::ALL.into_iter().map(move |f| (f, self.value(f)))
    }
}

/// The transport could not deliver the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Intake transport failed: {0}")]
pub struct IntakeError(pub String);

/// Where orders go.
///
/// The endpoint gives no usable acknowledgement, so `Ok` only means the
/// request went out and some response came back.
#[async_trait]
pub trait OrderIntake: Send + Sync {
    /// Send one order form. Called at most once per attempt.
    async fn submit(&self, form: &OrderForm) -> Result<(), IntakeError>;
}

/// A successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Message for the shopper.
    pub message: String,
    /// The form as sent.
    pub form: OrderForm,
    /// Amount payable.
    pub total: Money,
    /// Units ordered.
    pub item_count: i64,
    /// How the shopper pays.
    pub payment_method: PaymentMethod,
}

/// A failed submission. The cart is left as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SubmissionError {
    /// Message for the shopper.
    pub message: String,
    /// What went wrong underneath.
    #[source]
    pub cause: IntakeError,
}

/// Send `draft` once. On any response the whole cart is cleared.
pub async fn submit_order<S, I>(
    store: &mut CartStore<S>,
    draft: &OrderDraft,
    intake: &I,
) -> Result<SubmissionReceipt, SubmissionError>
where
    S: KeyValueStore,
    I: OrderIntake + ?Sized,
{
    let form = OrderForm::from_draft(draft);
    let total = draft.totals().total;

    if let Err(cause) = intake.submit(&form).await {
        tracing::warn!(error = %cause, payment = draft.payment_method.code(), "order submission failed");
        return Err(SubmissionError {
            message: SUBMIT_FAILURE_MESSAGE.to_string(),
            cause,
        });
    }

    tracing::info!(
        items = draft.items.len(),
        total = %total,
        payment = draft.payment_method.code(),
        "order submitted"
    );
    store.clear_cart();

    Ok(SubmissionReceipt {
        message: SUBMIT_SUCCESS_MESSAGE.to_string(),
        form,
        total,
        item_count: draft.item_count(),
        payment_method: draft.payment_method,
    })
}

/// Result of pressing "confirm" or acknowledging a payment reference.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// A payment reference must be shown and acknowledged first.
    AwaitingPaymentConfirmation,
    /// The order went out.
    Submitted(SubmissionReceipt),
    /// Sending failed; confirm again to retry.
    Failed(SubmissionError),
}

/// One checkout attempt: the form, the selection and the flow state.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    flow: CheckoutFlow,
    selection: OrderSelection,
    /// Form contents. Edit freely while drafting.
    pub shipping: ShippingInfo,
    payment_method: PaymentMethod,
    draft: Option<OrderDraft>,
}

impl CheckoutSession {
    /// Start a checkout for the selected lines.
    pub fn new(selection: OrderSelection) -> Self {
        Self {
            flow: CheckoutFlow::new(),
            selection,
            shipping: ShippingInfo::default(),
            payment_method: PaymentMethod::default(),
            draft: None,
        }
    }

    /// Current flow state.
    pub fn state(&self) -> CheckoutState {
        self.flow.state()
    }

    /// The flow, including its history.
    pub fn flow(&self) -> &CheckoutFlow {
        &self.flow
    }

    /// Lines chosen for this checkout.
    pub fn selection(&self) -> &OrderSelection {
        &self.selection
    }

    /// Chosen payment method.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// The last validated draft.
    pub fn draft(&self) -> Option<&OrderDraft> {
        self.draft.as_ref()
    }

    /// Change the payment method. Only allowed while the form is editable.
    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), CommerceError> {
        match self.flow.state() {
            CheckoutState::Drafting | CheckoutState::Invalid => {}
            CheckoutState::ReadyToPay | CheckoutState::SubmissionFailed => {
                if self.flow.state() == CheckoutState::SubmissionFailed {
                    self.flow.transition(CheckoutState::ReadyToPay)?;
                }
                self.flow.transition(CheckoutState::Drafting)?;
            }
            other => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: other.as_str().to_string(),
                    to: CheckoutState::Drafting.as_str().to_string(),
                })
            }
        }
        self.payment_method = method;
        Ok(())
    }

    /// Validate the form and continue.
    ///
    /// Cash on delivery is sent immediately. Transfer and QR stop in
    /// `AwaitingPaymentConfirmation` until [`acknowledge_payment`] is
    /// called. Also used to retry after a failed send.
    ///
    /// [`acknowledge_payment`]: CheckoutSession::acknowledge_payment
    pub async fn confirm<S, I>(
        &mut self,
        store: &mut CartStore<S>,
        intake: &I,
    ) -> Result<CheckoutOutcome, CommerceError>
    where
        S: KeyValueStore,
        I: OrderIntake + ?Sized,
    {
        if self.flow.state() == CheckoutState::SubmissionFailed {
            self.flow.transition(CheckoutState::ReadyToPay)?;
        }

        match build_order_draft(
            store.cart_items(),
            &self.selection,
            &self.shipping,
            self.payment_method,
        ) {
            Ok(draft) => {
                if self.flow.state() != CheckoutState::ReadyToPay {
                    self.flow.transition(CheckoutState::ReadyToPay)?;
                }
                self.draft = Some(draft);
            }
            Err(e) => {
                self.flow.transition(CheckoutState::Invalid)?;
                self.draft = None;
                return Err(e);
            }
        }

        if self.payment_method.requires_confirmation() {
            self.flow.transition(CheckoutState::AwaitingPaymentConfirmation)?;
            return Ok(CheckoutOutcome::AwaitingPaymentConfirmation);
        }

        self.send(store, intake).await
    }

    /// The shopper has paid against the displayed reference; send the order.
    pub async fn acknowledge_payment<S, I>(
        &mut self,
        store: &mut CartStore<S>,
        intake: &I,
    ) -> Result<CheckoutOutcome, CommerceError>
    where
        S: KeyValueStore,
        I: OrderIntake + ?Sized,
    {
        if self.flow.state() != CheckoutState::AwaitingPaymentConfirmation {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.flow.state().as_str().to_string(),
                to: CheckoutState::Submitting.as_str().to_string(),
            });
        }
        self.send(store, intake).await
    }

    /// Close the payment reference without paying.
    pub fn cancel_payment(&mut self) -> Result<(), CommerceError> {
        if self.flow.state() != CheckoutState::AwaitingPaymentConfirmation {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.flow.state().as_str().to_string(),
                to: CheckoutState::ReadyToPay.as_str().to_string(),
            });
        }
        self.flow.transition(CheckoutState::ReadyToPay)
    }

    /// Return to the form after a validation error.
    pub fn edit(&mut self) -> Result<(), CommerceError> {
        self.flow.transition(CheckoutState::Drafting)
    }

    async fn send<S, I>(
        &mut self,
        store: &mut CartStore<S>,
        intake: &I,
    ) -> Result<CheckoutOutcome, CommerceError>
    where
        S: KeyValueStore,
        I: OrderIntake + ?Sized,
    {
        self.flow.transition(CheckoutState::Submitting)?;
        let draft = match self.draft.as_ref() {
            Some(draft) => draft,
            None => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: CheckoutState::Submitting.as_str().to_string(),
                    to: CheckoutState::Submitted.as_str().to_string(),
                })
            }
        };

        match submit_order(store, draft, intake).await {
            Ok(receipt) => {
                self.flow.transition(CheckoutState::Submitted)?;
                Ok(CheckoutOutcome::Submitted(receipt))
            }
            Err(e) => {
                self.flow.transition(CheckoutState::SubmissionFailed)?;
                Ok(CheckoutOutcome::Failed(e))
            }
        }
    }
}
