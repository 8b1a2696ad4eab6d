//! Money helpers
//!
//! Amounts are stored as `i64` minor units (cents). The API speaks
//! decimals, so conversions go through `rust_decimal` and never through
//! floating point.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::errors::DomainError;

/// Number of minor units per major unit (BRL, USD, EUR...).
const MINOR_UNITS: i64 = 100;

/// Convert a decimal price (e.g. `149.90`) into minor units.
///
/// Rejects negative values and anything with more than two decimal places.
pub fn to_minor_units(value: Decimal) -> Result<i64, DomainError> {
    if value.is_sign_negative() {
        return Err(DomainError::Validation(format!(
            "amount must not be negative: {}",
            value
        )));
    }
    if value.normalize().scale() > 2 {
        return Err(DomainError::Validation(format!(
            "amount has more than two decimal places: {}",
            value
        )));
    }
    (value * Decimal::from(MINOR_UNITS))
        .trunc()
        .to_i64()
        .ok_or_else(|| DomainError::Validation(format!("amount out of range: {}", value)))
}

/// Convert minor units back into a two-decimal amount.
pub fn from_minor_units(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// `price × quantity`, refusing to overflow.
pub fn line_total(unit_price: i64, quantity: i32) -> Result<i64, DomainError> {
    unit_price
        .checked_mul(i64::from(quantity))
        .ok_or_else(|| DomainError::Validation("reservation amount overflows".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn decimal_to_cents() {
        let price = Decimal::from_str("149.90").unwrap();
        assert_eq!(to_minor_units(price).unwrap(), 14990);
        assert_eq!(to_minor_units(Decimal::from(80)).unwrap(), 8000);
    }

    #[test]
    fn trailing_zeros_are_not_extra_precision() {
        let price = Decimal::from_str("10.500").unwrap();
        assert_eq!(to_minor_units(price).unwrap(), 1050);
    }

    #[test]
    fn rejects_sub_cent_precision() {
        let price = Decimal::from_str("10.555").unwrap();
        assert!(to_minor_units(price).is_err());
    }

    #[test]
    fn rejects_negative() {
        let price = Decimal::from_str("-1").unwrap();
        assert!(to_minor_units(price).is_err());
    }

    #[test]
    fn cents_back_to_decimal() {
        assert_eq!(from_minor_units(14990).to_string(), "149.90");
    }

    #[test]
    fn line_total_multiplies() {
        assert_eq!(line_total(14990, 3).unwrap(), 44970);
        assert!(line_total(i64::MAX, 2).is_err());
    }
}
