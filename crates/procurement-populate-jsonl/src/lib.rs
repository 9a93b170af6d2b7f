//! JSONL (JSON Lines) order partitions.
//!
//! Each point-of-sale terminal's orders for a day are written to their own
//! file, one order line per JSON object:
//!
//! ```text
//! <raw>/orders/orders_date=2024-01-15/pos_001.jsonl
//! <raw>/orders/orders_date=2024-01-15/pos_002.jsonl
//! ```
//!
//! # Example
//!
//! ```ignore
//! use procurement_populate_jsonl::OrdersWriter;
//!
//! let writer = OrdersWriter::new("data/raw", date);
//! for terminal in &terminals {
//!     let metrics = writer.write_terminal(terminal)?;
//!     println!("{} lines -> {}", metrics.rows_written, metrics.path.display());
//! }
//! ```

pub mod error;
pub mod writer;

pub use error::JsonlPopulatorError;
pub use writer::{pos_file_name, OrdersWriter, TerminalMetrics};
