//! Settings for the payment backends and the dispatcher.
//!
//! Settings are plain data loaded once at startup. Every field has a default so
//! the system runs without any configuration file. Loading never applies
//! business validation: a strategy checks its own configuration the first time
//! it is used.

use crate::domain::method::PaymentMethod;
use crate::domain::money::Amount;
use crate::domain::payment::Settlement;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::Path;

/// Environment variable overriding `payment.default_method`.
pub const DEFAULT_METHOD_ENV: &str = "PAYMENT_DEFAULT_METHOD";

/// Percentage plus fixed per-transaction fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeModel {
    pub percentage: Decimal,
    pub fixed: Decimal,
}

impl FeeModel {
    pub fn percentage(percentage: Decimal) -> Self {
        Self {
            percentage,
            fixed: Decimal::ZERO,
        }
    }

    pub fn validate(&self, method: PaymentMethod) -> Result<()> {
        if self.percentage < Decimal::ZERO || self.percentage > Decimal::ONE_HUNDRED {
            return Err(PaymentError::InvalidConfiguration {
                method,
                reason: format!("fee percentage {} is outside 0..=100", self.percentage),
            });
        }
        if self.fixed < Decimal::ZERO {
            return Err(PaymentError::InvalidConfiguration {
                method,
                reason: format!("fixed fee {} is negative", self.fixed),
            });
        }
        Ok(())
    }

    /// Fee and net for `amount` under this model.
    pub fn settle(&self, method: PaymentMethod, amount: Amount) -> Result<Settlement> {
        Settlement::compute(amount, self.percentage, self.fixed).ok_or(PaymentError::FeeOutOfRange {
            method,
            amount: amount.value(),
        })
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PayPalConfig {
    pub enabled: bool,
    pub timeout_ms: u64,
    pub api_url: String,
    pub environment: String,
    pub client_id: String,
    pub fee_percentage: Decimal,
    pub fixed_fee: Decimal,
    pub supported_currencies: Vec<String>,
}

impl Default for PayPalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: 2000,
            api_url: "https://api.paypal.com".to_string(),
            environment: "sandbox".to_string(),
            client_id: String::new(),
            fee_percentage: dec!(2.9),
            fixed_fee: dec!(0.30),
            supported_currencies: vec!["USD".to_string(), "EUR".to_string(), "GBP".to_string()],
        }
    }
}

impl PayPalConfig {
    pub fn fee_model(&self) -> FeeModel {
        FeeModel {
            percentage: self.fee_percentage,
            fixed: self.fixed_fee,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StripeConfig {
    pub enabled: bool,
    pub timeout_ms: u64,
    pub api_url: String,
    pub fee_percentage: Decimal,
    pub supported_currencies: Vec<String>,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: 3000,
            api_url: "https://api.stripe.com".to_string(),
            fee_percentage: dec!(2.9),
            supported_currencies: vec!["USD".to_string()],
        }
    }
}

impl StripeConfig {
    pub fn fee_model(&self) -> FeeModel {
        FeeModel::percentage(self.fee_percentage)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CreditCardConfig {
    pub enabled: bool,
    pub timeout_ms: u64,
    pub processor_name: String,
    pub fee_percentage: Decimal,
    pub accepted_card_types: Vec<String>,
    pub require_cvv: bool,
    pub require_billing_address: bool,
    /// Reported with every charge. No retries are performed.
    pub max_retry_attempts: u32,
}

impl Default for CreditCardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: 1500,
            processor_name: "DefaultProcessor".to_string(),
            fee_percentage: dec!(2.5),
            accepted_card_types: vec![
                "VISA".to_string(),
                "MASTERCARD".to_string(),
                "AMEX".to_string(),
            ],
            require_cvv: true,
            require_billing_address: false,
            max_retry_attempts: 3,
        }
    }
}

impl CreditCardConfig {
    pub fn fee_model(&self) -> FeeModel {
        FeeModel::percentage(self.fee_percentage)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DispatchSettings {
    /// Method selected when the dispatcher starts.
    pub default_method: String,
    /// When false, simulated backend steps complete immediately.
    pub simulate_latency: bool,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            default_method: PaymentMethod::PayPal.as_str().to_string(),
            simulate_latency: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrderSettings {
    /// Fixed method for order payments. `None` follows the dispatcher.
    pub payment_method: Option<String>,
}

/// Top level settings, one section per backend.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub payment: DispatchSettings,
    pub orders: OrderSettings,
    pub paypal: PayPalConfig,
    pub stripe: StripeConfig,
    pub credit_card: CreditCardConfig,
}

impl Settings {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| PaymentError::Config(e.to_string()))
    }

    /// Loads settings from an optional TOML file, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => {
                let source = std::fs::read_to_string(path)?;
                Self::from_toml_str(&source)?
            }
            None => Self::default(),
        };

        if let Ok(method) = std::env::var(DEFAULT_METHOD_ENV) {
            let method = method.trim();
            if !method.is_empty() {
                settings.payment.default_method = method.to_string();
            }
        }

        Ok(settings)
    }
}
