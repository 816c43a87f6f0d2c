use crate::application::dispatcher::{PaymentDispatcher, StrategySet};
use crate::application::orders::OrderService;
use crate::config::Settings;
use crate::domain::method::PaymentMethod;
use crate::error::Result;
use crate::infrastructure::credit_card::CreditCardStrategy;
use crate::infrastructure::paypal::PayPalStrategy;
use crate::infrastructure::simulation::{InterruptHandle, Latency, Simulator};
use crate::infrastructure::stripe::StripeStrategy;
use crate::interfaces::api::PaymentApi;
use std::sync::Arc;

/// Everything built from one set of settings.
pub struct PaymentSystem {
    pub dispatcher: Arc<PaymentDispatcher>,
    pub orders: Arc<OrderService>,
    pub interrupt: InterruptHandle,
}

impl PaymentSystem {
    /// Builds configs, strategies, the dispatcher and the order service.
    ///
    /// Fails if the configured default or order method is not a known method.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let default_method: PaymentMethod = settings.payment.default_method.parse()?;
        let order_method = settings
            .orders
            .payment_method
            .as_deref()
            .map(str::parse::<PaymentMethod>)
            .transpose()?;

        let latency = if settings.payment.simulate_latency {
            Latency::Simulated
        } else {
            Latency::Skip
        };
        let (simulator, interrupt) = Simulator::new(latency);

        let strategies = StrategySet {
            paypal: Arc::new(PayPalStrategy::new(
                settings.paypal.clone(),
                simulator.clone(),
            )),
            credit_card: Arc::new(CreditCardStrategy::new(
                settings.credit_card.clone(),
                simulator.clone(),
            )),
            stripe: Arc::new(StripeStrategy::new(settings.stripe.clone(), simulator)),
        };

        let dispatcher = Arc::new(PaymentDispatcher::new(strategies, default_method));
        let orders = Arc::new(OrderService::new(dispatcher.clone(), order_method));

        Ok(Self {
            dispatcher,
            orders,
            interrupt,
        })
    }

    pub fn api(&self) -> PaymentApi {
        PaymentApi::new(self.dispatcher.clone(), self.orders.clone())
    }
}
