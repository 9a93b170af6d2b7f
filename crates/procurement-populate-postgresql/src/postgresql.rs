//! tokio-postgres implementation of [`LoadTarget`].

use crate::error::LoadError;
use crate::insert::{build_insert, count_rows, truncate_cascade, InsertMode};
use crate::target::LoadTarget;
use async_trait::async_trait;
use procurement_core::FieldValue;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls};
use tracing::debug;

/// A PostgreSQL connection used as a load destination.
///
/// Transactions are driven with explicit `BEGIN`/`COMMIT`/`ROLLBACK`
/// statements on the single client connection.
pub struct PostgreSQLTarget {
    client: Client,
    insert_mode: InsertMode,
}

impl PostgreSQLTarget {
    /// Connect and verify the connection with `SELECT 1`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let target = PostgreSQLTarget::connect(
    ///     "host=127.0.0.1 port=5432 user=procurement_user password=... dbname=procurement_db",
    /// ).await?;
    /// ```
    pub async fn connect(connection_string: &str) -> Result<Self, LoadError> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls).await?;

        // Spawn the connection task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        client.simple_query("SELECT 1").await?;

        Ok(Self::with_client(client))
    }

    /// Use an existing client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            insert_mode: InsertMode::default(),
        }
    }

    pub fn with_insert_mode(mut self, insert_mode: InsertMode) -> Self {
        self.insert_mode = insert_mode;
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl LoadTarget for PostgreSQLTarget {
    async fn begin(&mut self) -> Result<(), LoadError> {
        self.client.batch_execute("BEGIN").await?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), LoadError> {
        self.client.batch_execute("COMMIT").await?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), LoadError> {
        self.client.batch_execute("ROLLBACK").await?;
        Ok(())
    }

    async fn row_count(&mut self, table: &str) -> Result<u64, LoadError> {
        let row = self.client.query_one(&count_rows(table), &[]).await?;
        let count: i64 = row.get(0);
        Ok(count.max(0) as u64)
    }

    async fn truncate_cascade(&mut self, table: &str) -> Result<(), LoadError> {
        self.client.execute(&truncate_cascade(table), &[]).await?;
        Ok(())
    }

    async fn insert_rows(
        &mut self,
        table: &str,
        columns: &[String],
        rows: &[Vec<FieldValue>],
    ) -> Result<u64, LoadError> {
        let mut inserted = 0u64;

        for chunk in rows.chunks(self.insert_mode.rows_per_statement()) {
            let sql = build_insert(table, columns, chunk.len());

            let mut params: Vec<Box<dyn ToSql + Sync + Send>> =
                Vec::with_capacity(chunk.len() * columns.len());
            for row in chunk {
                params.extend(row.iter().map(field_value_to_boxed));
            }

            let param_refs: Vec<&(dyn ToSql + Sync)> = params
                .iter()
                .map(|p| p.as_ref() as &(dyn ToSql + Sync))
                .collect();

            inserted += self.client.execute(&sql, &param_refs).await?;
        }

        debug!("Inserted {} rows into {}", inserted, table);
        Ok(inserted)
    }
}

/// Convert a FieldValue to a boxed ToSql trait object.
fn field_value_to_boxed(value: &FieldValue) -> Box<dyn ToSql + Sync + Send> {
    match value {
        FieldValue::Text(s) => Box::new(s.clone()),
        FieldValue::Int(i) => Box::new(*i),
        FieldValue::Decimal(d) => Box::new(*d),
    }
}
