//! Error types for the Athenaeum library manager

use thiserror::Error;
use uuid::Uuid;

/// Main application error type
///
/// Every variant is recoverable: the CLI reports it and prompts again. Nothing
/// here should ever abort the process.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} is not a valid quantity of copies")]
    InvalidQuantity(i64),

    #[error("No book with ISBN {0} in the catalog")]
    BookNotFound(String),

    #[error("No patron with id {0}")]
    PatronNotFound(Uuid),

    #[error("No copies of ISBN {0} are currently available")]
    BookUnavailable(String),

    #[error("Payment of {0} was declined")]
    PaymentDeclined(rust_decimal::Decimal),

    #[error("ISBN {0} has no available copy to borrow")]
    NotAvailable(String),

    #[error("ISBN {0} has no borrowed copy to return")]
    NoBorrowedCopies(String),

    #[error("Patron {patron_id} has no active loan for ISBN {isbn}")]
    NoActiveLoan { patron_id: Uuid, isbn: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
