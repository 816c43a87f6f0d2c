use crate::domain::method::PaymentMethod;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Payment amount must be positive, got {0}")]
    InvalidAmount(Decimal),
    #[error("Payment amount {amount} exceeds the maximum of {max}")]
    AmountTooLarge { amount: Decimal, max: Decimal },
    #[error("Unsupported payment method: '{name}'. Available methods: {available}")]
    UnsupportedMethod { name: String, available: String },
    #[error("{0} payment service is disabled")]
    ServiceDisabled(PaymentMethod),
    #[error("{method} processing interrupted during '{step}'")]
    ProcessingInterrupted {
        method: PaymentMethod,
        step: &'static str,
    },
    #[error("{method} fee on {amount} is out of range")]
    FeeOutOfRange { method: PaymentMethod, amount: Decimal },
    #[error("Invalid {method} configuration: {reason}")]
    InvalidConfiguration {
        method: PaymentMethod,
        reason: String,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
