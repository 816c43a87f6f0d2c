use super::method::PaymentMethod;
use super::money::Amount;
use super::payment::PaymentResult;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A single payment backend.
///
/// Implementations own exactly one configuration for their whole lifetime and
/// must not touch shared state: the outcome is a function of the amount and
/// that configuration.
#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    fn method(&self) -> PaymentMethod;
    async fn process(&self, amount: Amount) -> Result<PaymentResult>;
}

pub type PaymentStrategyBox = Arc<dyn PaymentStrategy>;
