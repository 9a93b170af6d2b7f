//! The destination seam of the loader.

use crate::error::LoadError;
use async_trait::async_trait;
use procurement_core::FieldValue;

/// A transactional relational destination.
///
/// The loader calls [`LoadTarget::begin`] once, then any number of the
/// table operations, then exactly one of [`LoadTarget::commit`] or
/// [`LoadTarget::rollback`]. Table operations outside a transaction are
/// implementation-defined.
#[async_trait]
pub trait LoadTarget: Send {
    async fn begin(&mut self) -> Result<(), LoadError>;

    async fn commit(&mut self) -> Result<(), LoadError>;

    async fn rollback(&mut self) -> Result<(), LoadError>;

    /// Number of rows currently visible in `table`.
    async fn row_count(&mut self, table: &str) -> Result<u64, LoadError>;

    /// Remove every row of `table` and of the tables that reference it.
    async fn truncate_cascade(&mut self, table: &str) -> Result<(), LoadError>;

    /// Insert `rows` into `table`. Each row holds one value per column, in
    /// `columns` order. Returns the number of rows inserted.
    async fn insert_rows(
        &mut self,
        table: &str,
        columns: &[String],
        rows: &[Vec<FieldValue>],
    ) -> Result<u64, LoadError>;
}
