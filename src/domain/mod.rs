pub mod method;
pub mod money;
pub mod payment;
pub mod ports;
