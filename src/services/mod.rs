//! Business logic services

pub mod lending;
pub mod payment;

pub use lending::LendingCoordinator;
pub use payment::{NetBankingAuthorizer, PaymentAuthorizer, UpiAuthorizer};
