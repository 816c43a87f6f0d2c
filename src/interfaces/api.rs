use crate::application::dispatcher::PaymentDispatcher;
use crate::application::orders::{OrderReceipt, OrderService};
use crate::domain::method::PaymentMethod;
use crate::domain::payment::PaymentResult;
use crate::error::PaymentError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

/// A request against the payment API.
#[derive(Debug, PartialEq, Clone)]
pub enum Request {
    Process {
        amount: Decimal,
        method: Option<String>,
    },
    SetDefault {
        method: String,
    },
    Status,
    Order {
        amount: Decimal,
    },
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub current_method: PaymentMethod,
    pub available_methods: Vec<PaymentMethod>,
}

/// Body returned to clients for every request.
///
/// Failures always carry the current and available methods so a client can
/// pick a working method and retry.
#[derive(Debug, Serialize, Clone)]
#[serde(untagged)]
pub enum ApiResponse {
    Payment(PaymentResponse),
    Order(OrderResponse),
    Status(StatusResponse),
    Failure(FailureResponse),
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub success: bool,
    pub message: String,
    pub payment_method: PaymentMethod,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentResult>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub success: bool,
    pub message: String,
    pub order: OrderReceipt,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
    pub current_method: PaymentMethod,
    pub available_methods: Vec<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentResult>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        match self {
            ApiResponse::Payment(r) => r.success,
            ApiResponse::Order(r) => r.success,
            ApiResponse::Status(_) => true,
            ApiResponse::Failure(_) => false,
        }
    }
}

/// Request surface over the dispatcher and the order service.
#[derive(Clone)]
pub struct PaymentApi {
    dispatcher: Arc<PaymentDispatcher>,
    orders: Arc<OrderService>,
}

impl PaymentApi {
    pub fn new(dispatcher: Arc<PaymentDispatcher>, orders: Arc<OrderService>) -> Self {
        Self { dispatcher, orders }
    }

    pub async fn handle(&self, request: &Request) -> ApiResponse {
        match request {
            Request::Process { amount, method } => {
                self.process_payment(*amount, method.as_deref()).await
            }
            Request::SetDefault { method } => self.set_default_method(method).await,
            Request::Status => self.status().await,
            Request::Order { amount } => self.place_order(*amount).await,
        }
    }

    /// Processes a payment, optionally with a one-off method override.
    pub async fn process_payment(&self, amount: Decimal, method: Option<&str>) -> ApiResponse {
        match self.dispatcher.process_with_override(amount, method).await {
            Ok(result) => ApiResponse::Payment(PaymentResponse {
                success: true,
                message: format!(
                    "Payment of ${:.2} processed via {}",
                    result.amount, result.method
                ),
                payment_method: result.method,
                amount: result.amount,
                payment: Some(result),
            }),
            Err(e) => {
                let attempted = self.attempted_method(method).await;
                let audit = attempted.map(|m| PaymentResult::failed(m, amount, e.to_string()));
                self.failure(e, audit).await
            }
        }
    }

    pub async fn set_default_method(&self, method: &str) -> ApiResponse {
        match self.dispatcher.set_method(method).await {
            Ok(_) => ApiResponse::Status(self.status_body().await),
            Err(e) => self.failure(e, None).await,
        }
    }

    pub async fn place_order(&self, amount: Decimal) -> ApiResponse {
        match self.orders.place_order(amount).await {
            Ok(order) => ApiResponse::Order(OrderResponse {
                success: true,
                message: format!("Order {} placed", order.order_id),
                order,
            }),
            Err(e) => self.failure(e, None).await,
        }
    }

    pub async fn status(&self) -> ApiResponse {
        ApiResponse::Status(self.status_body().await)
    }

    async fn status_body(&self) -> StatusResponse {
        StatusResponse {
            current_method: self.dispatcher.current_method().await,
            available_methods: self.dispatcher.available_methods().to_vec(),
        }
    }

    /// The method a failed payment was aimed at, if it resolves to one.
    async fn attempted_method(&self, method: Option<&str>) -> Option<PaymentMethod> {
        match method.map(str::trim).filter(|m| !m.is_empty()) {
            Some(name) => name.parse().ok(),
            None => Some(self.dispatcher.current_method().await),
        }
    }

    async fn failure(&self, error: PaymentError, payment: Option<PaymentResult>) -> ApiResponse {
        tracing::warn!(error = %error, "request failed");
        let status = self.status_body().await;
        ApiResponse::Failure(FailureResponse {
            success: false,
            error: error.to_string(),
            current_method: status.current_method,
            available_methods: status.available_methods,
            payment,
        })
    }
}
