use crate::error::PaymentError;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of decimal places kept for fees and net amounts.
pub const MONEY_SCALE: u32 = 2;

/// Largest amount accepted for a single charge.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Rounds a monetary value to cents, half-up.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Like [`round_money`], but `None` when the value has too many integer
/// digits to carry two decimal places.
pub fn checked_round_money(value: Decimal) -> Option<Decimal> {
    let rounded = round_money(value);
    (rounded.scale() == MONEY_SCALE).then_some(rounded)
}

/// A strictly positive amount to be charged, at most [`MAX_AMOUNT`].
///
/// Strategies only ever see an `Amount`, so the range check happens once,
/// at the dispatcher boundary.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value <= Decimal::ZERO {
            return Err(PaymentError::InvalidAmount(value));
        }
        if value > MAX_AMOUNT {
            return Err(PaymentError::AmountTooLarge {
                amount: value,
                max: MAX_AMOUNT,
            });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(0.01)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(PaymentError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(PaymentError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_amount_upper_bound() {
        assert!(Amount::new(MAX_AMOUNT).is_ok());
        assert!(matches!(
            Amount::new(MAX_AMOUNT + dec!(0.01)),
            Err(PaymentError::AmountTooLarge { .. })
        ));
        assert!(matches!(
            Amount::new(Decimal::MAX),
            Err(PaymentError::AmountTooLarge { .. })
        ));
    }

    #[test]
    fn test_round_money_is_half_up() {
        assert_eq!(round_money(dec!(3.205)), dec!(3.21));
        assert_eq!(round_money(dec!(3.204)), dec!(3.20));
        assert_eq!(round_money(dec!(0.725)), dec!(0.73));
        assert_eq!(round_money(dec!(1.0)).to_string(), "1.00");
    }

    #[test]
    fn test_checked_round_money_rejects_lost_cents() {
        assert_eq!(checked_round_money(dec!(3.205)), Some(dec!(3.21)));
        assert_eq!(checked_round_money(MAX_AMOUNT).map(|v| v.scale()), Some(2));
        let huge = Decimal::from_str_exact("970999999999999999999999999.7").unwrap();
        assert_eq!(checked_round_money(huge), None);
    }

    #[test]
    fn test_amount_display() {
        let amount = Amount::new(dec!(40)).unwrap();
        assert_eq!(amount.to_string(), "$40.00");
    }
}
