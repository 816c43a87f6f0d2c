//! Application layer orchestrating the payment backends.
//!
//! `PaymentDispatcher` owns the process-wide method selection and routes each
//! charge to one strategy. `OrderService` is a thin caller on top of it.

pub mod dispatcher;
pub mod orders;
