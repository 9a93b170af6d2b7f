//! File-backed status log.

use procurement_core::status::emit;
use procurement_core::{PipelineDate, Status, StatusLog};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Appends every status message to a per-status, per-date file and echoes it
/// through `tracing`.
///
/// ```text
/// <log_dir>/INFO/info_2024-01-15.log
/// <log_dir>/SUCCESS/success_2024-01-15.log
/// <log_dir>/exceptions/warn_2024-01-15.log
/// <log_dir>/exceptions/error_2024-01-15.log
/// ```
///
/// Each line reads `[STATUS] message`. Failing to write a log file never
/// fails the pipeline; it is reported as a `tracing` warning instead.
pub struct FileStatusLog {
    log_dir: PathBuf,
    date: PipelineDate,
    write_lock: Mutex<()>,
}

impl FileStatusLog {
    pub fn new(log_dir: impl Into<PathBuf>, date: PipelineDate) -> Self {
        Self {
            log_dir: log_dir.into(),
            date,
            write_lock: Mutex::new(()),
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// File receiving messages of `status`.
    pub fn path_for(&self, status: Status) -> PathBuf {
        let folder = if status.is_exception() {
            "exceptions"
        } else {
            status.as_str()
        };
        self.log_dir.join(folder).join(format!(
            "{}_{}.log",
            status.as_str().to_lowercase(),
            self.date
        ))
    }

    fn append(&self, status: Status, message: &str) -> std::io::Result<()> {
        let path = self.path_for(status);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let _guard = self.write_lock.lock();
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "[{}] {}", status.as_str(), message)
    }
}

impl StatusLog for FileStatusLog {
    fn log(&self, status: Status, message: &str) {
        emit(status, message);
        if let Err(e) = self.append(status, message) {
            warn!(
                "Failed to write status log {}: {}",
                self.path_for(status).display(),
                e
            );
        }
    }
}
