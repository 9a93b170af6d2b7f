//! Error types for the master data loader.

use thiserror::Error;

/// Errors that can occur while loading master data.
#[derive(Error, Debug)]
pub enum LoadError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// A row does not have one value per column.
    #[error("Row {row} of table '{table}' has {actual} values, expected {expected}")]
    ColumnMismatch {
        table: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Error reported by a non-PostgreSQL target.
    #[error("Target error on table '{table}': {message}")]
    Target { table: String, message: String },

    /// Transaction control used out of order.
    #[error("Transaction error: {0}")]
    Transaction(String),
}
