//! Configuration management for the Athenaeum library manager

use config::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;

use crate::error::AppResult;

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Lending policy knobs
#[derive(Debug, Deserialize, Clone)]
pub struct LendingConfig {
    /// Lending period in days, added to the issue date to get the due date
    pub period_days: i64,
    /// Flat fee charged per issue, independent of the book or duration
    pub issue_fee: Decimal,
}

/// Which simulated payment rail to use
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentRail {
    Upi,
    NetBanking,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentConfig {
    pub rail: PaymentRail,
    /// Simulated confirmation wait for the UPI rail
    pub upi_delay_ms: u64,
    /// Simulated bank round trip for the net-banking rail
    pub netbanking_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub lending: LendingConfig,
    #[serde(default)]
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> AppResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix ATHENAEUM_)
            .add_source(
                Environment::with_prefix("ATHENAEUM")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            period_days: 14,
            issue_fee: Decimal::new(500, 2),
        }
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            rail: PaymentRail::Upi,
            upi_delay_ms: 2000,
            netbanking_delay_ms: 1500,
        }
    }
}
