//! Prices in minor currency units.
//!
//! The catalog and the payment processor both count money in the smallest
//! currency unit (cents). [`Price`] keeps that integer and only turns it into
//! a [`Decimal`] when formatting for humans.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount of money with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the smallest currency unit (e.g., cents).
    pub minor_units: i64,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a price from an amount in minor units.
    #[must_use]
    pub const fn from_minor_units(minor_units: i64, currency_code: CurrencyCode) -> Self {
        Self {
            minor_units,
            currency_code,
        }
    }

    /// Amount in the currency's standard unit (e.g., euros, not cents).
    #[must_use]
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.minor_units, 2)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    USD,
    GBP,
}

impl CurrencyCode {
    /// Lowercase code as the payment processor expects it (e.g., `eur`).
    #[must_use]
    pub const fn as_processor_code(self) -> &'static str {
        match self {
            Self::EUR => "eur",
            Self::USD => "usd",
            Self::GBP => "gbp",
        }
    }

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::EUR => "€",
            Self::USD => "$",
            Self::GBP => "£",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display() {
        let price = Price::from_minor_units(1099, CurrencyCode::EUR);
        assert_eq!(price.to_string(), "€10.99");

        let price = Price::from_minor_units(6000, CurrencyCode::USD);
        assert_eq!(price.to_string(), "$60.00");
    }

    #[test]
    fn test_price_amount() {
        let price = Price::from_minor_units(5, CurrencyCode::EUR);
        assert_eq!(price.amount(), Decimal::new(5, 2));
    }

    #[test]
    fn test_processor_code() {
        assert_eq!(CurrencyCode::default().as_processor_code(), "eur");
    }
}
