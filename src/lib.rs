//! Athenaeum Library Manager
//!
//! A single-process, in-memory library-catalog manager: book inventory
//! counters, patron registration and issue/return transactions gated by a
//! simulated payment step.

pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod models;
pub mod repository;
pub mod seed;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use library::Library;
