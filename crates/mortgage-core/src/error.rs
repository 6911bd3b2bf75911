use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MortgageError {
    #[error("Invalid principal: {0} (must be zero or greater)")]
    InvalidPrincipal(Decimal),

    #[error("Invalid periodic rate: {0} (must be zero or greater)")]
    InvalidRate(Decimal),

    #[error("Invalid period count: {0} (at least one period is required)")]
    InvalidPeriodCount(u32),

    #[error("Invalid start period: {0}")]
    InvalidStartPeriod(String),

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::SerializationError(e.to_string())
    }
}
