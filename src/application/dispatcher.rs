use crate::domain::method::PaymentMethod;
use crate::domain::money::Amount;
use crate::domain::payment::PaymentResult;
use crate::domain::ports::PaymentStrategyBox;
use crate::error::Result;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

/// One strategy per payment method.
///
/// A struct rather than a map, so a dispatcher can never be built with a
/// method missing.
#[derive(Clone)]
pub struct StrategySet {
    pub paypal: PaymentStrategyBox,
    pub credit_card: PaymentStrategyBox,
    pub stripe: PaymentStrategyBox,
}

impl StrategySet {
    pub fn get(&self, method: PaymentMethod) -> &PaymentStrategyBox {
        match method {
            PaymentMethod::PayPal => &self.paypal,
            PaymentMethod::CreditCard => &self.credit_card,
            PaymentMethod::Stripe => &self.stripe,
        }
    }
}

/// Facade routing payments to the currently selected backend.
///
/// The selection is a single process-wide register shared by every caller.
/// [`process_with_override`](Self::process_with_override) switches it for the
/// duration of one call and switches it back afterwards; other callers that
/// process in between observe the override. That race is inherent to a shared
/// selection and is left in place.
pub struct PaymentDispatcher {
    strategies: StrategySet,
    active: RwLock<PaymentMethod>,
}

impl PaymentDispatcher {
    /// Creates a dispatcher with `default_method` selected.
    pub fn new(strategies: StrategySet, default_method: PaymentMethod) -> Self {
        tracing::info!(method = default_method.as_str(), "payment dispatcher initialised");
        Self {
            strategies,
            active: RwLock::new(default_method),
        }
    }

    /// Processes `amount` with the currently selected method.
    ///
    /// Non-positive amounts are rejected before any strategy is consulted.
    /// The selection lock is released before the strategy runs.
    pub async fn process(&self, amount: Decimal) -> Result<PaymentResult> {
        let amount = Amount::new(amount)?;
        let method = self.current_method().await;
        self.strategies.get(method).process(amount).await
    }

    /// Processes `amount` with an explicit method, leaving the selection untouched.
    pub async fn process_with(&self, method: PaymentMethod, amount: Decimal) -> Result<PaymentResult> {
        let amount = Amount::new(amount)?;
        self.strategies.get(method).process(amount).await
    }

    /// Selects the method named `name` for all subsequent callers.
    ///
    /// Matching is case-insensitive. There is no rollback: callers that want the
    /// previous method back must restore it themselves.
    pub async fn set_method(&self, name: &str) -> Result<PaymentMethod> {
        let method: PaymentMethod = name.parse()?;
        *self.active.write().await = method;
        tracing::info!(method = method.as_str(), "payment method selected");
        Ok(method)
    }

    pub async fn current_method(&self) -> PaymentMethod {
        *self.active.read().await
    }

    /// The fixed list of methods, regardless of which ones are enabled.
    pub fn available_methods(&self) -> &'static [PaymentMethod] {
        &PaymentMethod::ALL
    }

    /// Processes one payment with `override_method` without keeping it selected.
    ///
    /// The previous selection is restored whether or not processing succeeded.
    /// A failed restore is logged and never hides the processing outcome.
    pub async fn process_with_override(
        &self,
        amount: Decimal,
        override_method: Option<&str>,
    ) -> Result<PaymentResult> {
        let original = self.current_method().await;
        let override_method = override_method.map(str::trim).filter(|m| !m.is_empty());

        if let Some(name) = override_method {
            self.set_method(name).await?;
        }

        let outcome = self.process(amount).await;

        if override_method.is_some()
            && let Err(e) = self.set_method(original.as_str()).await
        {
            tracing::error!(
                method = original.as_str(),
                error = %e,
                "failed to restore payment method after override"
            );
        }

        outcome
    }
}
