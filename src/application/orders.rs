use super::dispatcher::PaymentDispatcher;
use crate::domain::method::PaymentMethod;
use crate::domain::payment::PaymentResult;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: u64,
    pub amount: Decimal,
    pub payment: PaymentResult,
}

/// Places orders and pays for them through the dispatcher.
///
/// With a fixed method every order is charged through that backend and the
/// dispatcher's selection is never read or written. Without one, orders follow
/// whatever method is currently selected.
pub struct OrderService {
    dispatcher: Arc<PaymentDispatcher>,
    fixed_method: Option<PaymentMethod>,
    next_order_id: AtomicU64,
}

impl OrderService {
    pub fn new(dispatcher: Arc<PaymentDispatcher>, fixed_method: Option<PaymentMethod>) -> Self {
        Self {
            dispatcher,
            fixed_method,
            next_order_id: AtomicU64::new(1),
        }
    }

    pub fn fixed_method(&self) -> Option<PaymentMethod> {
        self.fixed_method
    }

    pub async fn place_order(&self, amount: Decimal) -> Result<OrderReceipt> {
        let payment = match self.fixed_method {
            Some(method) => self.dispatcher.process_with(method, amount).await?,
            None => self.dispatcher.process(amount).await?,
        };
        let order_id = self.next_order_id.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            order_id,
            method = payment.method.as_str(),
            transaction_id = %payment.correlation_id,
            "order placed"
        );
        Ok(OrderReceipt {
            order_id,
            amount,
            payment,
        })
    }
}
