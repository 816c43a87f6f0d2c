//! Simulated payment backends and the plumbing they share.

pub mod correlation;
pub mod credit_card;
pub mod paypal;
pub mod simulation;
pub mod stripe;
