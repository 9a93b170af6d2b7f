//! HDFS ingestion of the daily partitions.
//!
//! HDFS is reached through its command-line client inside the namenode
//! container (`docker exec <namenode> hdfs dfs ...`). Every invocation goes
//! through the [`CommandRunner`] capability, so the ingestion logic runs
//! against [`testing::FakeHdfsRunner`] in tests.
//!
//! A run walks a fixed sequence of steps:
//!
//! ```text
//! CHECK_DIRS ──► CREATE_IF_MISSING* ──► COPY_ORDERS ──► COPY_STOCK ──► VERIFY
//!      │                  │                   │              │            │
//!   -test -d          -mkdir -p          -put -f *.jsonl  -put -f *.csv  -ls -R
//! ```
//!
//! A failed directory creation aborts the run. Copy failures are returned to
//! the caller, which picks a [`CopyFailurePolicy`]. Verification gaps are
//! only warnings.

pub mod args;
pub mod client;
pub mod command;
pub mod error;
pub mod ingest;
pub mod testing;
pub mod verify;

pub use args::HdfsArgs;
pub use client::HdfsClient;
pub use command::{CommandOutput, CommandRunner, ExternalCommand, ProcessRunner};
pub use error::{CommandError, IngestError};
pub use ingest::{
    parse_categories, CopyFailurePolicy, CopyOutcome, DirOutcome, HdfsLayout, IngestReport,
    Ingestor,
};
pub use verify::{classify_listing, VerificationReport};
