//! Per-terminal JSONL writer.

use crate::error::JsonlPopulatorError;
use procurement_core::{DataCategory, PipelineDate};
use procurement_generator::PosOrders;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

/// Default buffer size for JSONL writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Metrics from writing one terminal's file.
#[derive(Debug, Clone)]
pub struct TerminalMetrics {
    pub path: PathBuf,
    /// Number of order lines written.
    pub rows_written: u64,
    pub file_size_bytes: u64,
    pub total_duration: Duration,
}

/// `pos_007.jsonl` for terminal 7.
pub fn pos_file_name(pos_number: u32) -> String {
    format!("pos_{pos_number:03}.jsonl")
}

/// Writes a day's order partition under a raw data root.
pub struct OrdersWriter {
    partition_dir: PathBuf,
}

impl OrdersWriter {
    /// Writer for `<raw_dir>/orders/orders_date=<date>/`.
    pub fn new(raw_dir: impl AsRef<Path>, date: PipelineDate) -> Self {
        Self {
            partition_dir: raw_dir
                .as_ref()
                .join(DataCategory::Orders.partition_dir(date)),
        }
    }

    pub fn partition_dir(&self) -> &Path {
        &self.partition_dir
    }

    /// Write one terminal's orders to `pos_NNN.jsonl`, replacing the file if it
    /// exists. The partition directory is created on first use.
    pub fn write_terminal(&self, orders: &PosOrders) -> Result<TerminalMetrics, JsonlPopulatorError> {
        let start_time = Instant::now();

        std::fs::create_dir_all(&self.partition_dir)
            .map_err(|e| JsonlPopulatorError::io(&self.partition_dir, e))?;

        let path = self.partition_dir.join(pos_file_name(orders.pos_number));
        let file = File::create(&path).map_err(|e| JsonlPopulatorError::io(&path, e))?;
        let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);

        for line in &orders.lines {
            serde_json::to_writer(&mut writer, line)?;
            writeln!(writer).map_err(|e| JsonlPopulatorError::io(&path, e))?;
        }

        writer.flush().map_err(|e| JsonlPopulatorError::io(&path, e))?;
        drop(writer);

        let file_size_bytes = std::fs::metadata(&path)
            .map_err(|e| JsonlPopulatorError::io(&path, e))?
            .len();

        let metrics = TerminalMetrics {
            path,
            rows_written: orders.lines.len() as u64,
            file_size_bytes,
            total_duration: start_time.elapsed(),
        };

        debug!(
            "Wrote {} order lines ({} bytes) to {}",
            metrics.rows_written,
            metrics.file_size_bytes,
            metrics.path.display()
        );

        Ok(metrics)
    }
}
