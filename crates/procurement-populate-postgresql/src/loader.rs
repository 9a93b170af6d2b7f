//! Full-replace, all-or-nothing master data loader.

use crate::error::LoadError;
use crate::target::LoadTarget;
use procurement_core::{Status, StatusLog, TableBatch};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// What happened to one table of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    /// The in-memory table was empty; the destination was left untouched.
    SkippedEmpty { table: String },
    /// The destination now holds exactly the batch's rows.
    Loaded {
        table: String,
        rows: u64,
        /// Whether existing rows were truncated first.
        replaced_existing: bool,
    },
}

/// Result of a committed load.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    pub tables: Vec<TableOutcome>,
    pub total_duration: Duration,
}

impl LoadSummary {
    pub fn rows_loaded(&self) -> u64 {
        self.tables
            .iter()
            .map(|outcome| match outcome {
                TableOutcome::Loaded { rows, .. } => *rows,
                TableOutcome::SkippedEmpty { .. } => 0,
            })
            .sum()
    }
}

/// Loads batches of named tables into a [`LoadTarget`].
pub struct MasterDataLoader<T: LoadTarget> {
    target: T,
}

impl<T: LoadTarget> MasterDataLoader<T> {
    pub fn new(target: T) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_inner(self) -> T {
        self.target
    }

    /// Load `tables` in order inside one transaction.
    ///
    /// Each non-empty table replaces the destination's contents. On the first
    /// error everything done by this call is rolled back, the error is
    /// reported to `log` and returned. On success the transaction is
    /// committed once, after the last table.
    pub async fn load(
        &mut self,
        tables: &[TableBatch],
        log: &dyn StatusLog,
    ) -> Result<LoadSummary, LoadError> {
        let start_time = Instant::now();

        if let Err(e) = self.target.begin().await {
            log.log(Status::Error, &format!("Error loading to PostgreSQL: {e}"));
            return Err(e);
        }

        let result = match self.load_in_transaction(tables, log).await {
            Ok(outcomes) => self.target.commit().await.map(|_| outcomes),
            Err(e) => {
                if let Err(rollback_error) = self.target.rollback().await {
                    warn!("Rollback failed: {}", rollback_error);
                }
                Err(e)
            }
        };

        match result {
            Ok(outcomes) => {
                log.log(Status::Success, "All data committed to PostgreSQL");
                let summary = LoadSummary {
                    tables: outcomes,
                    total_duration: start_time.elapsed(),
                };
                info!(
                    "Master data load committed: {} rows across {} tables in {:?}",
                    summary.rows_loaded(),
                    summary.tables.len(),
                    summary.total_duration
                );
                Ok(summary)
            }
            Err(e) => {
                log.log(Status::Error, &format!("Error loading to PostgreSQL: {e}"));
                Err(e)
            }
        }
    }

    async fn load_in_transaction(
        &mut self,
        tables: &[TableBatch],
        log: &dyn StatusLog,
    ) -> Result<Vec<TableOutcome>, LoadError> {
        let mut outcomes = Vec::with_capacity(tables.len());

        for batch in tables {
            let table = batch.name();

            if batch.is_empty() {
                log.log(Status::Warn, &format!("Skipping empty table: {table}"));
                outcomes.push(TableOutcome::SkippedEmpty {
                    table: table.to_string(),
                });
                continue;
            }

            check_row_widths(batch)?;

            let replaced_existing = self.target.row_count(table).await? > 0;
            if replaced_existing {
                log.log(
                    Status::Info,
                    &format!("Table '{table}' already has data. Clearing and reloading..."),
                );
                self.target.truncate_cascade(table).await?;
            }

            log.log(
                Status::Info,
                &format!("Loading {} rows into {table}...", batch.len()),
            );
            let rows = self
                .target
                .insert_rows(table, batch.columns(), batch.rows())
                .await?;
            log.log(Status::Success, &format!("Loaded {rows} rows into {table}"));

            outcomes.push(TableOutcome::Loaded {
                table: table.to_string(),
                rows,
                replaced_existing,
            });
        }

        Ok(outcomes)
    }
}

fn check_row_widths(batch: &TableBatch) -> Result<(), LoadError> {
    let expected = batch.columns().len();
    match batch
        .rows()
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != expected)
    {
        Some((row, values)) => Err(LoadError::ColumnMismatch {
            table: batch.name().to_string(),
            row,
            expected,
            actual: values.len(),
        }),
        None => Ok(()),
    }
}
