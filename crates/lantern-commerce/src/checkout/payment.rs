//! Payment methods.

use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the shopper pays. Only the label reaches the intake form; no money
/// moves through the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    #[serde(rename = "COD")]
    Cod,
    /// Bank transfer against a displayed account reference.
    #[serde(rename = "TRANSFER")]
    Transfer,
    /// E-wallet or QR code.
    #[serde(rename = "QR")]
    Qr,
}

impl PaymentMethod {
    /// Every method, in the order the form lists them.
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cod, PaymentMethod::Transfer, PaymentMethod::Qr];

    /// Wire code.
    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "COD",
            PaymentMethod::Transfer => "TRANSFER",
            PaymentMethod::Qr => "QR",
        }
    }

    /// Human-readable label sent with the order.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "Thanh toán khi nhận hàng (COD)",
            PaymentMethod::Transfer => "Chuyển khoản ngân hàng",
            PaymentMethod::Qr => "Ví điện tử / QR Code",
        }
    }

    /// Whether the shopper must acknowledge a payment reference before the
    /// order is sent.
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, PaymentMethod::Transfer | PaymentMethod::Qr)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "COD" => Ok(PaymentMethod::Cod),
            "TRANSFER" => Ok(PaymentMethod::Transfer),
            "QR" => Ok(PaymentMethod::Qr),
            other => Err(CommerceError::UnknownPaymentMethod(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("cod".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cod);
        assert_eq!("TRANSFER".parse::<PaymentMethod>().unwrap(), PaymentMethod::Transfer);
        assert_eq!(" qr ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Qr);
        assert!("card".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_confirmation_required() {
        assert!(!PaymentMethod::Cod.requires_confirmation());
        assert!(PaymentMethod::Transfer.requires_confirmation());
        assert!(PaymentMethod::Qr.requires_confirmation());
    }

    #[test]
    fn test_serde_uses_wire_codes() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Transfer).unwrap(), r#""TRANSFER""#);
        for method in PaymentMethod::ALL {
            assert_eq!(format!("\"{}\"", method.code()), serde_json::to_string(&method).unwrap());
        }
    }
}
