//! Simulated payment rails
//!
//! Both reference rails always approve; they exist to model the wall-clock
//! cost of talking to an external payment system. The wait is a plain
//! blocking sleep since nothing else runs concurrently.

use std::time::Duration;

use rust_decimal::Decimal;

use crate::config::{PaymentConfig, PaymentRail};

/// Collaborator approving or declining a charge for an issue transaction.
///
/// Implementations are interchangeable and selected at construction time.
/// A failure of any kind, including an interrupted wait, must come back as
/// `false` rather than a panic.
#[cfg_attr(test, mockall::automock)]
pub trait PaymentAuthorizer {
    fn charge(&self, amount: Decimal) -> bool;
}

/// UPI rail: simulates waiting for the patron to confirm in their UPI app
#[derive(Debug, Clone)]
pub struct UpiAuthorizer {
    delay: Duration,
}

impl UpiAuthorizer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl PaymentAuthorizer for UpiAuthorizer {
    fn charge(&self, amount: Decimal) -> bool {
        tracing::info!("Processing UPI payment of ${amount}...");
        tracing::info!("Waiting for payment confirmation from UPI app...");
        std::thread::sleep(self.delay);
        tracing::info!("UPI payment of ${amount} completed successfully");
        true
    }
}

/// Net-banking rail: simulates a round trip to the bank's server
#[derive(Debug, Clone)]
pub struct NetBankingAuthorizer {
    delay: Duration,
}

impl NetBankingAuthorizer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl PaymentAuthorizer for NetBankingAuthorizer {
    fn charge(&self, amount: Decimal) -> bool {
        tracing::info!("Initiating net-banking payment of ${amount}...");
        tracing::info!("Connecting to the bank's server...");
        std::thread::sleep(self.delay);
        tracing::info!("Net-banking payment of ${amount} was successful");
        true
    }
}

/// Build the rail selected in configuration
pub fn from_config(config: &PaymentConfig) -> Box<dyn PaymentAuthorizer> {
    match config.rail {
        PaymentRail::Upi => Box::new(UpiAuthorizer::new(Duration::from_millis(
            config.upi_delay_ms,
        ))),
        PaymentRail::NetBanking => Box::new(NetBankingAuthorizer::new(Duration::from_millis(
            config.netbanking_delay_ms,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_rails_always_approve() {
        let fee = Decimal::new(500, 2);
        assert!(UpiAuthorizer::new(Duration::ZERO).charge(fee));
        assert!(NetBankingAuthorizer::new(Duration::ZERO).charge(fee));
    }
}
