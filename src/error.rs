//! Error types for the valuation engine
//!
//! Expired or matured policies are not errors: they value to zero. Everything
//! here is a genuine failure that the caller has to surface.

use thiserror::Error;

/// Errors raised by the valuation engine and its loaders
#[derive(Debug, Error)]
pub enum ValuationError {
    /// Input outside its domain (coverage, term, age, subdivisions, assumptions)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A quantity that has to be divided by is zero or numerically negligible
    #[error("undefined quantity: {0}")]
    UndefinedQuantity(String),

    /// A data file row could not be interpreted
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Shorthand result type used throughout the crate
pub type Result<T, E = ValuationError> = std::result::Result<T, E>;

/// Return `InvalidArgument` unless the condition holds
macro_rules! require {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::error::ValuationError::InvalidArgument(format!($($msg)*)));
        }
    };
}

pub(crate) use require;
