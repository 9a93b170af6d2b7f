//! Idempotent master data loader.
//!
//! Loads a list of named in-memory tables into existing relational tables
//! with full-replace semantics, inside one transaction:
//!
//! ```text
//! BEGIN
//!   for each table:
//!     empty batch?          -> skip (WARN)
//!     destination has rows? -> TRUNCATE ... CASCADE
//!     INSERT every row
//! COMMIT            (or ROLLBACK of everything on the first error)
//! ```
//!
//! The destination is reached through the [`LoadTarget`] trait.
//! [`PostgreSQLTarget`] talks to a real server; [`testing::InMemoryTarget`]
//! is a transactional fake for tests.
//!
//! # Example
//!
//! ```ignore
//! use procurement_populate_postgresql::{MasterDataLoader, PostgreSQLTarget};
//!
//! let target = PostgreSQLTarget::connect("host=127.0.0.1 user=... dbname=...").await?;
//! let mut loader = MasterDataLoader::new(target);
//! let summary = loader.load(&tables, &status_log).await?;
//! ```

pub mod args;
pub mod error;
pub mod insert;
pub mod loader;
pub mod postgresql;
pub mod target;
pub mod testing;

pub use args::PostgreSQLLoadArgs;
pub use error::LoadError;
pub use insert::InsertMode;
pub use loader::{LoadSummary, MasterDataLoader, TableOutcome};
pub use postgresql::PostgreSQLTarget;
pub use target::LoadTarget;
