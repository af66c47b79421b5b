//! Fixed-point money amounts.
//!
//! Balances and amounts are stored as `DECIMAL(12, 2)`. Values are
//! validated here once so every comparison downstream is plain decimal
//! arithmetic; nothing is ever rounded silently.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use super::LedgerError;

/// Digits after the decimal point accepted for any amount.
pub const MAX_SCALE: u32 = 2;

/// Exclusive upper bound imposed by the column precision.
const LIMIT: i64 = 10_000_000_000;

/// A validated, strictly positive money amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, LedgerError> {
        if value <= Decimal::ZERO {
            return Err(LedgerError::InvalidInput(format!(
                "amount must be greater than 0, got {}",
                value
            )));
        }
        check_representable(value).map(Amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Validate a starting card balance; unlike [`Amount`] zero is allowed.
pub fn opening_balance(value: Decimal) -> Result<Decimal, LedgerError> {
    if value < Decimal::ZERO {
        return Err(LedgerError::InvalidInput(format!(
            "opening balance cannot be negative, got {}",
            value
        )));
    }
    check_representable(value)
}

fn check_representable(value: Decimal) -> Result<Decimal, LedgerError> {
    let normalized = value.normalize();
    if normalized.scale() > MAX_SCALE {
        return Err(LedgerError::InvalidInput(format!(
            "amount {} has more than {} decimal places",
            value, MAX_SCALE
        )));
    }
    if normalized.abs() >= Decimal::from(LIMIT) {
        return Err(LedgerError::InvalidInput(format!(
            "amount {} exceeds the maximum supported value",
            value
        )));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn accepts_two_decimal_places() {
        let amount = Amount::new(dec("40.25")).unwrap();
        assert_eq!(amount.value(), dec("40.25"));
        assert_eq!(amount.to_string(), "40.25");
    }

    #[test]
    fn trailing_zeros_do_not_count_as_precision() {
        assert!(Amount::new(dec("40.2500")).is_ok());
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert!(matches!(
            Amount::new(Decimal::ZERO),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(matches!(
            Amount::new(dec("-5")),
            Err(LedgerError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_sub_cent_amounts() {
        assert!(matches!(
            Amount::new(dec("0.001")),
            Err(LedgerError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_values_beyond_column_precision() {
        assert!(Amount::new(dec("9999999999.99")).is_ok());
        assert!(Amount::new(dec("10000000000")).is_err());
    }

    #[test]
    fn comparison_is_exact() {
        // 0.1 + 0.2 is not 0.3 in binary floating point
        let sum = dec("0.1") + dec("0.2");
        assert_eq!(Amount::new(sum).unwrap(), Amount::new(dec("0.3")).unwrap());
    }

    #[test]
    fn opening_balance_allows_zero() {
        assert_eq!(opening_balance(Decimal::ZERO).unwrap(), Decimal::ZERO);
        assert!(opening_balance(dec("-0.01")).is_err());
    }
}
