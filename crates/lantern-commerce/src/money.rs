//! Money type for representing monetary values.
//!
//! Uses an integer count of the currency's smallest unit to avoid
//! floating-point drift in totals. The storefront sells in Vietnamese đồng,
//! which has no minor unit, so one unit is one đồng.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    VND,
}

impl Currency {
    /// Get the currency code (e.g., "VND").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::VND => "VND",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::VND => "\u{20ab}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::VND => 0,
        }
    }

    /// Digit group separator used by the vi-VN locale.
    pub fn group_separator(&self) -> char {
        match self {
            Currency::VND => '.',
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from smallest units.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Shorthand for an amount in đồng.
    pub fn vnd(amount: i64) -> Self {
        Self::new(amount, Currency::VND)
    }

    /// Create a Money value from a decimal amount, rounding to the
    /// currency's precision.
    ///
    /// ```
    /// use lantern_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(149_999.6, Currency::VND);
    /// assert_eq!(price.amount, 150_000);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let scaled = (amount * multiplier as f64).round();
        // `as` saturates at the i64 bounds and maps NaN to zero.
        Self::new(scaled as i64, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Format the way `Intl.NumberFormat('vi-VN', {style: 'currency'})`
    /// does: grouped digits, a non-breaking space, then the symbol.
    ///
    /// ```
    /// use lantern_commerce::money::Money;
    /// assert_eq!(Money::vnd(1_250_000).display(), "1.250.000\u{a0}\u{20ab}");
    /// ```
    pub fn display(&self) -> String {
        format!("{}\u{a0}{}", self.display_amount(), self.currency.symbol())
    }

    /// Format the grouped amount without the symbol (e.g., "1.250.000").
    pub fn display_amount(&self) -> String {
        let digits = self.amount.unsigned_abs().to_string();
        let separator = self.currency.group_separator();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if self.amount < 0 {
            grouped.push('-');
        }
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(separator);
            }
            grouped.push(ch);
        }
        grouped
    }

    /// Multiply by a quantity, clamping at the representable range.
    pub fn multiply(&self, factor: i64) -> Money {
        Money::new(self.amount.saturating_mul(factor), self.currency)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount.saturating_add(other.amount), self.currency)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount.saturating_sub(other.amount), self.currency)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.multiply(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(Currency::default()), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
