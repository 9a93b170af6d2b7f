//! Daily procurement data pipeline.
//!
//! Each run is bound to one [`PipelineDate`](procurement_core::PipelineDate)
//! and goes through:
//!
//! 1. Master data generation (suppliers, products, warehouses), written to
//!    `data/master/*.csv`.
//! 2. An idempotent PostgreSQL load of the master tables in one transaction.
//! 3. Order generation (one JSONL file per POS terminal) and the warehouse
//!    stock snapshot, written under date partitions in `data/raw/`.
//! 4. HDFS ingestion of both partitions through the namenode container,
//!    followed by a verification listing.
//!
//! # CLI Usage
//!
//! ```bash
//! # Everything for one day
//! procurement-pipeline --date 2024-01-15 run
//!
//! # Only generation and database load
//! procurement-pipeline generate --num-pos 10 --orders-per-pos 20
//!
//! # Re-ingest one category and inspect HDFS
//! procurement-pipeline --date 2024-01-15 ingest --categories stock
//! procurement-pipeline verify
//! ```
//!
//! Status messages go through a [`StatusLog`](procurement_core::StatusLog);
//! the binary uses [`FileStatusLog`], which writes per-status files under
//! `logs/`.

pub mod config;
pub mod pipeline;
pub mod status_log;

pub use config::{GenerationArgs, PipelineOpts};
pub use pipeline::{
    GenerationSummary, MasterData, OrdersSummary, Pipeline, RunSummary, StockSummary,
};
pub use status_log::FileStatusLog;
