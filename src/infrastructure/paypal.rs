use super::correlation::next_id;
use super::simulation::Simulator;
use crate::config::PayPalConfig;
use crate::domain::method::PaymentMethod;
use crate::domain::money::Amount;
use crate::domain::payment::{PaymentResult, PaymentStatus};
use crate::domain::ports::PaymentStrategy;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::time::{Duration, Instant};

/// Simulated PayPal checkout: percentage plus fixed fee.
pub struct PayPalStrategy {
    config: PayPalConfig,
    simulator: Simulator,
}

impl PayPalStrategy {
    pub fn new(config: PayPalConfig, simulator: Simulator) -> Self {
        Self { config, simulator }
    }

    pub fn config(&self) -> &PayPalConfig {
        &self.config
    }
}

/// Masks a client id as `first4****last4`, or `****` when too short to mask.
pub fn mask_client_id(client_id: &str) -> String {
    let chars: Vec<char> = client_id.chars().collect();
    if chars.len() < 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}****{tail}")
}

#[async_trait]
impl PaymentStrategy for PayPalStrategy {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::PayPal
    }

    async fn process(&self, amount: Amount) -> Result<PaymentResult> {
        let method = self.method();
        if !self.config.enabled {
            return Err(PaymentError::ServiceDisabled(method));
        }
        let fee_model = self.config.fee_model();
        fee_model.validate(method)?;

        tracing::info!(
            %amount,
            api_url = %self.config.api_url,
            environment = %self.config.environment,
            timeout_ms = self.config.timeout_ms,
            currencies = ?self.config.supported_currencies,
            "processing PayPal payment"
        );
        tracing::debug!(client_id = %mask_client_id(&self.config.client_id), "using PayPal client");

        let started = Instant::now();
        self.simulator
            .step(method, "connect", Duration::from_millis(100))
            .await?;
        self.simulator
            .step(method, "create order", Duration::from_millis(80))
            .await?;
        self.simulator
            .step(method, "authorize", Duration::from_millis(120))
            .await?;

        let settlement = fee_model.settle(method, amount)?;
        let result = PaymentResult {
            method,
            amount: amount.value(),
            fee: settlement.fee,
            net_amount: settlement.net_amount,
            correlation_id: next_id("PP-"),
            reference: next_id("PAYPAL-ORDER-"),
            instrument: None,
            timeout_ms: self.config.timeout_ms,
            elapsed_ms: started.elapsed().as_millis() as u64,
            processed_at: Utc::now(),
            status: PaymentStatus::Succeeded,
        };
        tracing::info!(
            transaction_id = %result.correlation_id,
            order_id = %result.reference,
            fee = %result.fee,
            net_amount = %result.net_amount,
            "PayPal payment completed"
        );
        Ok(result)
    }
}
