use super::correlation::next_id;
use super::simulation::Simulator;
use crate::config::CreditCardConfig;
use crate::domain::method::PaymentMethod;
use crate::domain::money::Amount;
use crate::domain::payment::{PaymentResult, PaymentStatus};
use crate::domain::ports::PaymentStrategy;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::{Duration, Instant};

/// Simulated card processor.
///
/// Optional CVV and billing address checks add steps to the pipeline. The card
/// type reported in the result is picked at random from the accepted types and
/// has no bearing on the fee.
pub struct CreditCardStrategy {
    config: CreditCardConfig,
    simulator: Simulator,
}

impl CreditCardStrategy {
    pub fn new(config: CreditCardConfig, simulator: Simulator) -> Self {
        Self { config, simulator }
    }

    pub fn config(&self) -> &CreditCardConfig {
        &self.config
    }

    fn validate(&self, method: PaymentMethod) -> Result<()> {
        self.config.fee_model().validate(method)?;
        if self.config.accepted_card_types.is_empty() {
            return Err(PaymentError::InvalidConfiguration {
                method,
                reason: "no accepted card types configured".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentStrategy for CreditCardStrategy {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::CreditCard
    }

    async fn process(&self, amount: Amount) -> Result<PaymentResult> {
        let method = self.method();
        if !self.config.enabled {
            return Err(PaymentError::ServiceDisabled(method));
        }
        self.validate(method)?;

        tracing::info!(
            %amount,
            processor = %self.config.processor_name,
            timeout_ms = self.config.timeout_ms,
            card_types = ?self.config.accepted_card_types,
            require_cvv = self.config.require_cvv,
            require_billing_address = self.config.require_billing_address,
            "processing credit card payment"
        );

        let started = Instant::now();
        if self.config.require_cvv {
            self.simulator
                .step(method, "verify cvv", Duration::from_millis(30))
                .await?;
        }
        if self.config.require_billing_address {
            self.simulator
                .step(method, "validate billing address", Duration::from_millis(40))
                .await?;
        }
        self.simulator
            .step(method, "validate card", Duration::from_millis(50))
            .await?;
        self.simulator
            .step(method, "connect", Duration::from_millis(80))
            .await?;
        self.simulator
            .step(method, "authorize", Duration::from_millis(120))
            .await?;

        let (card_type, auth_code) = {
            let mut rng = rand::thread_rng();
            let card_type = self.config.accepted_card_types.choose(&mut rng).cloned();
            (card_type, rng.gen_range(0..1_000_000u32))
        };

        let settlement = self.config.fee_model().settle(method, amount)?;
        let result = PaymentResult {
            method,
            amount: amount.value(),
            fee: settlement.fee,
            net_amount: settlement.net_amount,
            correlation_id: next_id("TXN-"),
            reference: format!("AUTH-{auth_code:06}"),
            instrument: card_type,
            timeout_ms: self.config.timeout_ms,
            elapsed_ms: started.elapsed().as_millis() as u64,
            processed_at: Utc::now(),
            status: PaymentStatus::Succeeded,
        };
        tracing::info!(
            transaction_id = %result.correlation_id,
            authorization = %result.reference,
            card_type = ?result.instrument,
            fee = %result.fee,
            net_amount = %result.net_amount,
            max_retry_attempts = self.config.max_retry_attempts,
            "credit card payment completed"
        );
        Ok(result)
    }
}
