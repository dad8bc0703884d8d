//! Type-safe money representation using decimal arithmetic.
//!
//! Cart prices are carried as [`TaxedMoney`]: a tax-inclusive `gross` amount
//! and a `net` amount, both in the same currency. Views only ever display the
//! gross amount.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A monetary amount with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency: CurrencyCode,
}

impl Money {
    /// Create a new money value.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Create a money value from minor units (e.g., cents).
    #[must_use]
    pub fn from_cents(cents: i64, currency: CurrencyCode) -> Self {
        Self {
            amount: Decimal::new(cents, 2),
            currency,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Format for display (e.g., "$19.99", "-€5.00").
    #[must_use]
    pub fn display(&self) -> String {
        let amount = self.amount.round_dp(2);
        let sign = if amount.is_sign_negative() && !amount.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{sign}{}{:.2}", self.currency.symbol(), amount.abs())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// A tax-aware price: gross (tax inclusive) and net amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaxedMoney {
    /// Tax-inclusive amount. This is what customers see.
    pub gross: Money,
    /// Amount before tax. Defaults to zero when the source omits it.
    #[serde(default)]
    pub net: Money,
}

impl TaxedMoney {
    /// Create a taxed price with distinct gross and net amounts.
    #[must_use]
    pub const fn new(gross: Money, net: Money) -> Self {
        Self { gross, net }
    }

    /// Create a taxed price where gross and net are equal (tax-inclusive pricing).
    #[must_use]
    pub const fn untaxed(amount: Money) -> Self {
        Self {
            gross: amount,
            net: amount,
        }
    }

    /// Whether the gross amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.gross.is_zero()
    }

    /// Multiply both amounts by a quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        let factor = Decimal::from(quantity);
        Self {
            gross: Money::new(self.gross.amount * factor, self.gross.currency),
            net: Money::new(self.net.amount * factor, self.net.currency),
        }
    }

    /// Format the gross amount for display.
    #[must_use]
    pub fn display(&self) -> String {
        self.gross.display()
    }
}

/// Error parsing a currency code.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported currency code: {0}")]
pub struct CurrencyCodeError(pub String);

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    PLN,
}

impl CurrencyCode {
    /// Display symbol placed before the amount.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::PLN => "zł ",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            "PLN" => Ok(Self::PLN),
            _ => Err(CurrencyCodeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        let money = Money::new(Decimal::from(40), CurrencyCode::USD);
        assert_eq!(money.display(), "$40.00");
    }

    #[test]
    fn test_display_negative_amount() {
        let money = Money::from_cents(-550, CurrencyCode::EUR);
        assert_eq!(money.display(), "-€5.50");
    }

    #[test]
    fn test_display_rounds_sub_cent() {
        let money = Money::new(Decimal::new(19_999, 3), CurrencyCode::GBP);
        assert_eq!(money.display(), "£20.00");
    }

    #[test]
    fn test_taxed_money_zero_check_uses_gross() {
        let taxed = TaxedMoney::new(
            Money::zero(CurrencyCode::USD),
            Money::from_cents(100, CurrencyCode::USD),
        );
        assert!(taxed.is_zero());
        assert!(!TaxedMoney::untaxed(Money::from_cents(1, CurrencyCode::USD)).is_zero());
    }

    #[test]
    fn test_taxed_money_times() {
        let unit = TaxedMoney::new(
            Money::from_cents(1230, CurrencyCode::USD),
            Money::from_cents(1000, CurrencyCode::USD),
        );
        let total = unit.times(3);
        assert_eq!(total.gross, Money::from_cents(3690, CurrencyCode::USD));
        assert_eq!(total.net, Money::from_cents(3000, CurrencyCode::USD));
    }

    #[test]
    fn test_deserialize_gross_only() {
        let taxed: TaxedMoney =
            serde_json::from_str(r#"{"gross":{"amount":40}}"#).expect("valid json");
        assert_eq!(taxed.gross.amount, Decimal::from(40));
        assert_eq!(taxed.gross.currency, CurrencyCode::USD);
        assert!(taxed.net.is_zero());
    }

    #[test]
    fn test_currency_code_from_str() {
        assert_eq!("eur".parse::<CurrencyCode>(), Ok(CurrencyCode::EUR));
        assert_eq!(
            "XYZ".parse::<CurrencyCode>(),
            Err(CurrencyCodeError("XYZ".to_string()))
        );
    }
}
