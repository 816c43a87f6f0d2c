use crate::error::PaymentError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The fixed set of payment backends known to the dispatcher.
///
/// The set is closed: methods cannot be registered or removed at runtime.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum PaymentMethod {
    PayPal,
    CreditCard,
    Stripe,
}

impl PaymentMethod {
    /// All methods, in the order they are reported to clients.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::PayPal,
        PaymentMethod::CreditCard,
        PaymentMethod::Stripe,
    ];

    /// Canonical name used in logs, responses and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::PayPal => "paypal",
            PaymentMethod::CreditCard => "creditCard",
            PaymentMethod::Stripe => "stripe",
        }
    }

    /// Human readable label, e.g. "Credit Card".
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Stripe => "Stripe",
        }
    }

    /// Comma separated list of every canonical name.
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(PaymentMethod::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paypal" => Ok(PaymentMethod::PayPal),
            "creditcard" | "credit-card" | "credit_card" => Ok(PaymentMethod::CreditCard),
            "stripe" => Ok(PaymentMethod::Stripe),
            _ => Err(PaymentError::UnsupportedMethod {
                name: s.to_string(),
                available: Self::names(),
            }),
        }
    }
}

impl Serialize for PaymentMethod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("PayPal".parse::<PaymentMethod>().unwrap(), PaymentMethod::PayPal);
        assert_eq!("STRIPE".parse::<PaymentMethod>().unwrap(), PaymentMethod::Stripe);
        assert_eq!(
            " creditCard ".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::CreditCard
        );
        assert_eq!(
            "credit-card".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::CreditCard
        );
    }

    #[test]
    fn test_unknown_method_lists_available_names() {
        let err = "bitcoin".parse::<PaymentMethod>().unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, PaymentError::UnsupportedMethod { .. }));
        assert!(message.contains("bitcoin"));
        assert!(message.contains("paypal, creditCard, stripe"));
    }

    #[test]
    fn test_empty_method_is_unsupported() {
        assert!(matches!(
            "".parse::<PaymentMethod>(),
            Err(PaymentError::UnsupportedMethod { .. })
        ));
        assert!(matches!(
            "   ".parse::<PaymentMethod>(),
            Err(PaymentError::UnsupportedMethod { .. })
        ));
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.as_str().parse::<PaymentMethod>().unwrap(), method);
        }
    }
}
