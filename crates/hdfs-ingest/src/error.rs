//! Error types for external commands and ingestion.

use procurement_core::{CoreError, DataCategory};
use thiserror::Error;

/// Errors from running an external command.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The process could not be started.
    #[error("Failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully. `exit_code` is -1 when the
    /// process was killed by a signal.
    #[error("`{command}` failed (code: {exit_code}): {stderr}")]
    Failed {
        command: String,
        exit_code: i32,
        stderr: String,
    },
}

/// Errors from the ingestion steps.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Unknown data category requested.
    #[error(transparent)]
    InvalidCategory(#[from] CoreError),

    /// Existence check could not run.
    #[error("Failed to check HDFS directory {path}: {source}")]
    CheckDir {
        path: String,
        #[source]
        source: CommandError,
    },

    /// Directory creation failed; fatal to the run.
    #[error("Failed to create HDFS directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: CommandError,
    },

    /// Copying a partition failed.
    #[error("Failed to copy {category} partition into HDFS: {source}")]
    Copy {
        category: DataCategory,
        #[source]
        source: CommandError,
    },

    /// Listing the remote tree failed.
    #[error("Failed to list HDFS directory {path}: {source}")]
    List {
        path: String,
        #[source]
        source: CommandError,
    },
}
