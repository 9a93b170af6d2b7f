//! Error types shared by the core types.

use thiserror::Error;

/// Errors raised while validating pipeline inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The data category is not one of the partitioned categories.
    #[error("Invalid data category '{0}'. Must be one of: orders, stock")]
    UnknownCategory(String),

    /// The date string is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid pipeline date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },
}
