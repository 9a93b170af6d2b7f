//! CSV files for the procurement pipeline.
//!
//! Master data lands in a flat directory:
//!
//! ```text
//! <data>/master/suppliers.csv
//! <data>/master/products.csv
//! <data>/master/warehouses.csv
//! ```
//!
//! and each day's stock snapshot in a date partition:
//!
//! ```text
//! <data>/raw/stock/stock_date=<DATE>/warehouse_snapshot.csv
//! ```
//!
//! # Example
//!
//! ```ignore
//! use procurement_populate_csv::{write_master_data, MasterFiles};
//!
//! let files = MasterFiles::new("data/master");
//! write_master_data(&files, &suppliers, &products, &warehouses)?;
//! let skus = files.read_sku_ids()?;
//! ```

pub mod error;
pub mod master;
pub mod stock;
pub mod writer;

pub use error::CsvPopulatorError;
pub use master::{write_master_data, MasterFiles, MasterWriteMetrics};
pub use stock::{stock_snapshot_path, write_stock_snapshot, STOCK_SNAPSHOT_FILE};
pub use writer::{write_records, WriteMetrics};
