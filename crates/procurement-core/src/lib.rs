//! Core types for the procurement data pipeline.
//!
//! This crate provides the types shared by every stage of the pipeline:
//!
//! - [`Supplier`], [`Product`], [`Warehouse`] - master reference records
//! - [`OrderLine`], [`StockRecord`] - daily transactional records
//! - [`PipelineDate`] - the run date, threaded explicitly through every stage
//! - [`DataCategory`] - the date-partitioned transactional categories
//! - [`TableBatch`] - a named, column-ordered batch of rows ready for loading
//! - [`StatusLog`] - the status logging capability injected into each stage
//!
//! # Architecture
//!
//! ```text
//! procurement-core (this crate)
//!    │
//!    ├─── procurement-generator            (produces records)
//!    ├─── procurement-populate-csv         (master + stock files)
//!    ├─── procurement-populate-jsonl       (order partitions)
//!    ├─── procurement-populate-postgresql  (loads TableBatch values)
//!    └─── hdfs-ingest                      (copies DataCategory partitions)
//! ```

pub mod category;
pub mod date;
pub mod error;
pub mod model;
pub mod status;
pub mod table;

// Re-exports for convenience
pub use category::DataCategory;
pub use date::PipelineDate;
pub use error::CoreError;
pub use model::{Category, OrderLine, Product, StockRecord, Supplier, Warehouse};
pub use status::{RecordingStatusLog, Status, StatusLog, TracingStatusLog};
pub use table::{FieldValue, MasterRecord, TableBatch};
