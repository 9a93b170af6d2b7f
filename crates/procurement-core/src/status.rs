//! Status logging capability.
//!
//! Pipeline stages report progress as `(status, message)` pairs through a
//! [`StatusLog`] they are handed, instead of writing log files themselves.
//! The binary wires in a file-backed implementation; tests use
//! [`RecordingStatusLog`].

use std::fmt;
use std::sync::Mutex;

/// Severity/kind of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Info,
    Success,
    Create,
    Skip,
    Warn,
    Error,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::Info,
        Status::Success,
        Status::Create,
        Status::Skip,
        Status::Warn,
        Status::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Info => "INFO",
            Status::Success => "SUCCESS",
            Status::Create => "CREATE",
            Status::Skip => "SKIP",
            Status::Warn => "WARN",
            Status::Error => "ERROR",
        }
    }

    /// WARN and ERROR go to the exception logs rather than the status logs.
    pub fn is_exception(&self) -> bool {
        matches!(self, Status::Warn | Status::Error)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for pipeline status messages.
pub trait StatusLog: Send + Sync {
    fn log(&self, status: Status, message: &str);
}

/// Forwards status messages to `tracing` only.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingStatusLog;

impl StatusLog for TracingStatusLog {
    fn log(&self, status: Status, message: &str) {
        emit(status, message);
    }
}

/// Emit a status message as a `tracing` event at the matching level.
pub fn emit(status: Status, message: &str) {
    match status {
        Status::Warn => tracing::warn!(status = status.as_str(), "{message}"),
        Status::Error => tracing::error!(status = status.as_str(), "{message}"),
        _ => tracing::info!(status = status.as_str(), "{message}"),
    }
}

/// Keeps every message in memory. Used by tests to assert on reported progress.
#[derive(Debug, Default)]
pub struct RecordingStatusLog {
    entries: Mutex<Vec<(Status, String)>>,
}

impl RecordingStatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded entries, oldest first.
    pub fn entries(&self) -> Vec<(Status, String)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Messages recorded with the given status.
    pub fn messages(&self, status: Status) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(s, _)| *s == status)
            .map(|(_, message)| message)
            .collect()
    }

    pub fn count(&self, status: Status) -> usize {
        self.messages(status).len()
    }
}

impl StatusLog for RecordingStatusLog {
    fn log(&self, status: Status, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((status, message.to_string()));
        }
    }
}
