//! Date-partitioned stock snapshot file.

use crate::error::CsvPopulatorError;
use crate::writer::{write_records, WriteMetrics};
use procurement_core::{DataCategory, PipelineDate, StockRecord};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the single snapshot file inside a stock partition.
pub const STOCK_SNAPSHOT_FILE: &str = "warehouse_snapshot.csv";

/// `<raw_dir>/stock/stock_date=<date>/warehouse_snapshot.csv`
pub fn stock_snapshot_path(raw_dir: &Path, date: PipelineDate) -> PathBuf {
    raw_dir
        .join(DataCategory::Stock.partition_dir(date))
        .join(STOCK_SNAPSHOT_FILE)
}

/// Write a day's stock snapshot into its partition, creating the partition
/// directory if absent. Returns the written path and its metrics.
pub fn write_stock_snapshot(
    raw_dir: &Path,
    date: PipelineDate,
    records: &[StockRecord],
) -> Result<(PathBuf, WriteMetrics), CsvPopulatorError> {
    let path = stock_snapshot_path(raw_dir, date);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CsvPopulatorError::io(parent, e))?;
    }

    let metrics = write_records(&path, records)?;
    info!(
        "Stock snapshot for {} written to {} ({} records)",
        date,
        path.display(),
        metrics.rows_written
    );
    Ok((path, metrics))
}
