//! CLI argument definitions for the PostgreSQL loader.

use crate::insert::InsertMode;
use clap::Args;

/// Default connection string of the procurement database.
pub const DEFAULT_CONNECTION_STRING: &str =
    "host=127.0.0.1 port=5432 dbname=procurement_db user=procurement_user password=procurement_pass";

/// PostgreSQL-specific load arguments.
#[derive(Args, Clone, Debug)]
pub struct PostgreSQLLoadArgs {
    /// PostgreSQL connection string (e.g., host=127.0.0.1 port=5432 dbname=... user=... password=...)
    #[arg(
        long,
        env = "POSTGRESQL_CONNECTION_STRING",
        default_value = DEFAULT_CONNECTION_STRING,
        hide_default_value = true
    )]
    pub postgresql_connection_string: String,

    /// Rows per INSERT statement (0 = one INSERT per row)
    #[arg(long, env = "PIPELINE_INSERT_BATCH_SIZE", default_value = "0")]
    pub insert_batch_size: usize,
}

impl PostgreSQLLoadArgs {
    pub fn insert_mode(&self) -> InsertMode {
        InsertMode::from_batch_size(self.insert_batch_size)
    }
}
