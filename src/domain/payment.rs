use super::method::PaymentMethod;
use super::money::{Amount, checked_round_money};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PaymentStatus {
    Succeeded,
    Failed { reason: String },
}

/// Fee and net amount for a single charge.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub fee: Decimal,
    pub net_amount: Decimal,
}

impl Settlement {
    /// Splits `amount` into a fee and the remainder, both in cents.
    ///
    /// `fee + net_amount` always equals the amount rounded to cents. Returns
    /// `None` when either side overflows or cannot be kept to two decimal places.
    pub fn compute(amount: Amount, percentage: Decimal, fixed: Decimal) -> Option<Self> {
        let fee = amount
            .value()
            .checked_mul(percentage)?
            .checked_div(Decimal::ONE_HUNDRED)?
            .checked_add(fixed)?;
        let fee = checked_round_money(fee)?;
        let net_amount = checked_round_money(amount.value())?.checked_sub(fee)?;
        let net_amount = checked_round_money(net_amount)?;
        Some(Self { fee, net_amount })
    }
}

/// Outcome of one processing attempt against a single backend.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub method: PaymentMethod,
    pub amount: Decimal,
    pub fee: Decimal,
    pub net_amount: Decimal,
    /// Synthetic transaction identifier, unique within the process.
    pub correlation_id: String,
    /// Backend specific secondary reference (order id, intent id, auth code).
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument: Option<String>,
    /// Configured budget. Reported only, never enforced.
    pub timeout_ms: u64,
    pub elapsed_ms: u64,
    pub processed_at: DateTime<Utc>,
    pub status: PaymentStatus,
}

impl PaymentResult {
    /// A failed attempt for audit purposes. No money moved, so fee and net are zero.
    pub fn failed(method: PaymentMethod, amount: Decimal, reason: impl Into<String>) -> Self {
        Self {
            method,
            amount,
            fee: Decimal::ZERO,
            net_amount: Decimal::ZERO,
            correlation_id: String::new(),
            reference: String::new(),
            instrument: None,
            timeout_ms: 0,
            elapsed_ms: 0,
            processed_at: Utc::now(),
            status: PaymentStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PaymentStatus::Succeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::{MAX_AMOUNT, round_money};
    use rust_decimal_macros::dec;

    #[test]
    fn test_settlement_percentage_plus_fixed() {
        let amount = Amount::new(dec!(100.00)).unwrap();
        let settlement = Settlement::compute(amount, dec!(2.9), dec!(0.30)).unwrap();
        assert_eq!(settlement.fee, dec!(3.20));
        assert_eq!(settlement.net_amount, dec!(96.80));
    }

    #[test]
    fn test_settlement_percentage_only() {
        let amount = Amount::new(dec!(40.00)).unwrap();
        let settlement = Settlement::compute(amount, dec!(2.5), Decimal::ZERO).unwrap();
        assert_eq!(settlement.fee, dec!(1.00));
        assert_eq!(settlement.net_amount, dec!(39.00));
    }

    #[test]
    fn test_settlement_sums_to_rounded_amount() {
        for raw in [dec!(0.01), dec!(0.99), dec!(12.345), dec!(19.99), dec!(1234.5678)] {
            let amount = Amount::new(raw).unwrap();
            for (pct, fixed) in [(dec!(2.9), dec!(0.30)), (dec!(2.5), dec!(0)), (dec!(0), dec!(0))] {
                let s = Settlement::compute(amount, pct, fixed).unwrap();
                assert_eq!(s.fee + s.net_amount, round_money(raw), "amount {raw}");
                assert_eq!(s.fee, s.fee.round_dp(2));
            }
        }
    }

    #[test]
    fn test_settlement_at_max_amount_keeps_cents() {
        let amount = Amount::new(MAX_AMOUNT).unwrap();
        let s = Settlement::compute(amount, Decimal::ONE_HUNDRED, dec!(0.30)).unwrap();
        assert_eq!(s.fee, dec!(1000000000000000.30));
        assert_eq!(s.net_amount, dec!(-0.30));
        assert_eq!(s.fee.scale(), 2);
        assert_eq!(s.net_amount.scale(), 2);
    }

    #[test]
    fn test_settlement_overflow_is_none() {
        let amount = Amount::new(MAX_AMOUNT).unwrap();
        assert_eq!(Settlement::compute(amount, dec!(2.9), Decimal::MAX), None);
        let huge_fixed = Decimal::from_str_exact("1000000000000000000000000000").unwrap();
        assert_eq!(Settlement::compute(amount, dec!(2.9), huge_fixed), None);
    }

    #[test]
    fn test_failed_result_has_no_fee() {
        let result = PaymentResult::failed(PaymentMethod::Stripe, dec!(10), "disabled");
        assert!(!result.is_success());
        assert_eq!(result.fee, Decimal::ZERO);
        assert_eq!(
            result.status,
            PaymentStatus::Failed {
                reason: "disabled".to_string()
            }
        );
    }
}
