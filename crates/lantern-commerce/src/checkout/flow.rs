//! Checkout flow state machine.

use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// States of one checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutState {
    /// Shopper is filling in the form.
    Drafting,
    /// Validation failed; the form needs correcting.
    Invalid,
    /// Validated and waiting to branch on the payment method.
    ReadyToPay,
    /// Payment reference shown; waiting for the shopper to confirm.
    AwaitingPaymentConfirmation,
    /// Order is in flight.
    Submitting,
    /// Order delivered to the intake endpoint.
    Submitted,
    /// Transport failed; the shopper may retry.
    SubmissionFailed,
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Drafting => "drafting",
            CheckoutState::Invalid => "invalid",
            CheckoutState::ReadyToPay => "ready_to_pay",
            CheckoutState::AwaitingPaymentConfirmation => "awaiting_payment_confirmation",
            CheckoutState::Submitting => "submitting",
            CheckoutState::Submitted => "submitted",
            CheckoutState::SubmissionFailed => "submission_failed",
        }
    }

    /// Check if `next` is a legal successor.
    pub fn can_transition_to(&self, next: CheckoutState) -> bool {
        use CheckoutState::*;

        matches!(
            (self, next),
            (Drafting, Invalid)
                | (Drafting, ReadyToPay)
                | (Invalid, Drafting)
                | (Invalid, Invalid)
                | (Invalid, ReadyToPay)
                | (ReadyToPay, Drafting)
                | (ReadyToPay, Invalid)
                | (ReadyToPay, Submitting)
                | (ReadyToPay, AwaitingPaymentConfirmation)
                | (AwaitingPaymentConfirmation, Submitting)
                | (AwaitingPaymentConfirmation, ReadyToPay)
                | (Submitting, Submitted)
                | (Submitting, SubmissionFailed)
                | (SubmissionFailed, ReadyToPay)
        )
    }

    /// Check if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutState::Submitted)
    }
}

/// Current state plus the path taken to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutFlow {
    state: CheckoutState,
    history: Vec<CheckoutState>,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    /// Start in `Drafting`.
    pub fn new() -> Self {
        Self {
            state: CheckoutState::Drafting,
            history: vec![CheckoutState::Drafting],
        }
    }

    /// Current state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Every state entered so far, oldest first.
    pub fn history(&self) -> &[CheckoutState] {
        &self.history
    }

    /// Check if a state has been entered at any point.
    pub fn visited(&self, state: CheckoutState) -> bool {
        self.history.contains(&state)
    }

    /// Move to `next` if the transition is legal.
    pub fn transition(&mut self, next: CheckoutState) -> Result<(), CommerceError> {
        if !self.state.can_transition_to(next) {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.state.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        tracing::debug!(from = self.state.as_str(), to = next.as_str(), "checkout transition");
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    /// Check if the order has been placed.
    pub fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_starts_drafting() {
        let flow = CheckoutFlow::new();
        assert_eq!(flow.state(), CheckoutState::Drafting);
        assert_eq!(flow.history(), &[CheckoutState::Drafting]);
    }

    #[test]
    fn test_cod_path() {
        let mut flow = CheckoutFlow::new();
        flow.transition(CheckoutState::ReadyToPay).unwrap();
        flow.transition(CheckoutState::Submitting).unwrap();
        flow.transition(CheckoutState::Submitted).unwrap();
        assert!(flow.is_complete());
        assert!(!flow.visited(CheckoutState::AwaitingPaymentConfirmation));
    }

    #[test]
    fn test_retry_after_failure() {
        let mut flow = CheckoutFlow::new();
        flow.transition(CheckoutState::ReadyToPay).unwrap();
        flow.transition(CheckoutState::Submitting).unwrap();
        flow.transition(CheckoutState::SubmissionFailed).unwrap();
        flow.transition(CheckoutState::ReadyToPay).unwrap();
        assert_eq!(flow.state(), CheckoutState::ReadyToPay);
    }

    #[test]
    fn test_illegal_transitions() {
        let mut flow = CheckoutFlow::new();
        assert!(flow.transition(CheckoutState::Submitting).is_err());
        assert!(flow.transition(CheckoutState::Submitted).is_err());

        flow.transition(CheckoutState::ReadyToPay).unwrap();
        flow.transition(CheckoutState::Submitting).unwrap();
        flow.transition(CheckoutState::Submitted).unwrap();
        let err = flow.transition(CheckoutState::Drafting).unwrap_err();
        assert_eq!(
            err,
            CommerceError::InvalidCheckoutTransition {
                from: "submitted".into(),
                to: "drafting".into(),
            }
        );
    }

    #[test]
    fn test_submitted_is_terminal() {
        use CheckoutState::*;
        for next in [
            Drafting,
            Invalid,
            ReadyToPay,
            AwaitingPaymentConfirmation,
            Submitting,
            Submitted,
            SubmissionFailed,
        ] {
            assert!(!Submitted.can_transition_to(next));
        }
    }
}
