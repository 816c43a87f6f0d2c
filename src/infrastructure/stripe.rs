use super::correlation::next_id;
use super::simulation::Simulator;
use crate::config::StripeConfig;
use crate::domain::method::PaymentMethod;
use crate::domain::money::Amount;
use crate::domain::payment::{PaymentResult, PaymentStatus};
use crate::domain::ports::PaymentStrategy;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::time::{Duration, Instant};

/// Simulated Stripe payment intent flow. Percentage fee only.
pub struct StripeStrategy {
    config: StripeConfig,
    simulator: Simulator,
}

impl StripeStrategy {
    pub fn new(config: StripeConfig, simulator: Simulator) -> Self {
        Self { config, simulator }
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }
}

#[async_trait]
impl PaymentStrategy for StripeStrategy {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Stripe
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
            timeout_ms = self.config.timeout_ms,
            currencies = ?self.config.supported_currencies,
            "processing Stripe payment"
        );

        let started = Instant::now();
        self.simulator
            .step(method, "connect", Duration::from_millis(90))
            .await?;
        self.simulator
            .step(method, "create payment intent", Duration::from_millis(60))
            .await?;
        self.simulator
            .step(method, "process payment", Duration::from_millis(110))
            .await?;

        let settlement = fee_model.settle(method, amount)?;
        let result = PaymentResult {
            method,
            amount: amount.value(),
            fee: settlement.fee,
            net_amount: settlement.net_amount,
            correlation_id: next_id("ch_"),
            reference: format!("{}_secret", next_id("pi_")),
            instrument: None,
            timeout_ms: self.config.timeout_ms,
            elapsed_ms: started.elapsed().as_millis() as u64,
            processed_at: Utc::now(),
            status: PaymentStatus::Succeeded,
        };
        tracing::info!(
            charge_id = %result.correlation_id,
            payment_intent = %result.reference,
            fee = %result.fee,
            "Stripe payment completed"
        );
        Ok(result)
    }
}
