#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use paydispatch::application::dispatcher::{PaymentDispatcher, StrategySet};
use paydispatch::domain::method::PaymentMethod;
use paydispatch::domain::money::Amount;
use paydispatch::domain::payment::{PaymentResult, PaymentStatus};
use paydispatch::domain::ports::{PaymentStrategy, PaymentStrategyBox};
use paydispatch::error::{PaymentError, Result};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Records every call and succeeds with a zero fee, or fails if told to.
pub struct SpyStrategy {
    method: PaymentMethod,
    fail: bool,
    calls: AtomicUsize,
}

impl SpyStrategy {
    pub fn new(method: PaymentMethod) -> Arc<Self> {
        Arc::new(Self {
            method,
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(method: PaymentMethod) -> Arc<Self> {
        Arc::new(Self {
            method,
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn succeeded(method: PaymentMethod, amount: Amount) -> PaymentResult {
    PaymentResult {
        method,
        amount: amount.value(),
        fee: Decimal::ZERO,
        net_amount: amount.value(),
        correlation_id: format!("SPY-{}", method.as_str()),
        reference: String::new(),
        instrument: None,
        timeout_ms: 0,
        elapsed_ms: 0,
        processed_at: Utc::now(),
        status: PaymentStatus::Succeeded,
    }
}

#[async_trait]
impl PaymentStrategy for SpyStrategy {
    fn method(&self) -> PaymentMethod {
        self.method
    }

    async fn process(&self, amount: Amount) -> Result<PaymentResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PaymentError::ServiceDisabled(self.method));
        }
        Ok(succeeded(self.method, amount))
    }
}

/// Blocks inside `process` until released, so a test can act while a charge
/// is in flight.
pub struct GatedStrategy {
    method: PaymentMethod,
    pub entered: Notify,
    pub release: Notify,
}

impl GatedStrategy {
    pub fn new(method: PaymentMethod) -> Arc<Self> {
        Arc::new(Self {
            method,
            entered: Notify::new(),
            release: Notify::new(),
        })
    }
}

#[async_trait]
impl PaymentStrategy for GatedStrategy {
    fn method(&self) -> PaymentMethod {
        self.method
    }

    async fn process(&self, amount: Amount) -> Result<PaymentResult> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(succeeded(self.method, amount))
    }
}

pub struct Spies {
    pub paypal: Arc<SpyStrategy>,
    pub credit_card: Arc<SpyStrategy>,
    pub stripe: Arc<SpyStrategy>,
}

impl Spies {
    pub fn new() -> Self {
        Self {
            paypal: SpyStrategy::new(PaymentMethod::PayPal),
            credit_card: SpyStrategy::new(PaymentMethod::CreditCard),
            stripe: SpyStrategy::new(PaymentMethod::Stripe),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.paypal.calls() + self.credit_card.calls() + self.stripe.calls()
    }

    pub fn strategy_set(&self) -> StrategySet {
        StrategySet {
            paypal: self.paypal.clone() as PaymentStrategyBox,
            credit_card: self.credit_card.clone() as PaymentStrategyBox,
            stripe: self.stripe.clone() as PaymentStrategyBox,
        }
    }

    pub fn dispatcher(&self, default_method: PaymentMethod) -> PaymentDispatcher {
        PaymentDispatcher::new(self.strategy_set(), default_method)
    }
}
