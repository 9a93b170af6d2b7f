//! Generic CSV record writer.

use crate::error::CsvPopulatorError;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default buffer size for CSV writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Metrics from a write operation.
#[derive(Debug, Clone, Default)]
pub struct WriteMetrics {
    /// Number of records written (header excluded).
    pub rows_written: u64,
    /// Output file size in bytes.
    pub file_size_bytes: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

/// Write `records` to `path`, truncating any existing file.
///
/// The header row is derived from the record's field names. The parent
/// directory must exist.
pub fn write_records<T: Serialize>(
    path: &Path,
    records: &[T],
) -> Result<WriteMetrics, CsvPopulatorError> {
    let start_time = Instant::now();

    let file = File::create(path).map_err(|e| CsvPopulatorError::io(path, e))?;
    let buf_writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
    let mut writer = csv::Writer::from_writer(buf_writer);

    for record in records {
        writer
            .serialize(record)
            .map_err(|e| CsvPopulatorError::csv(path, e))?;
    }

    writer.flush().map_err(|e| CsvPopulatorError::io(path, e))?;
    drop(writer);

    let file_size_bytes = std::fs::metadata(path)
        .map_err(|e| CsvPopulatorError::io(path, e))?
        .len();

    let metrics = WriteMetrics {
        rows_written: records.len() as u64,
        file_size_bytes,
        total_duration: start_time.elapsed(),
    };

    debug!(
        "Wrote {} rows ({} bytes) to {} in {:?}",
        metrics.rows_written,
        metrics.file_size_bytes,
        path.display(),
        metrics.total_duration
    );

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use tempfile::TempDir;

    #[derive(Serialize)]
    struct Row {
        id: u32,
        label: &'static str,
    }

    #[test]
    fn test_write_records_with_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rows.csv");

        let rows = [Row { id: 1, label: "a" }, Row { id: 2, label: "b,c" }];
        let metrics = write_records(&path, &rows).unwrap();

        assert_eq!(metrics.rows_written, 2);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "id,label\n1,a\n2,\"b,c\"\n");
        assert_eq!(metrics.file_size_bytes, contents.len() as u64);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("rows.csv");

        let result = write_records(&path, &[Row { id: 1, label: "a" }]);
        assert!(matches!(result, Err(CsvPopulatorError::Io { .. })));
    }
}
