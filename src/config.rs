//! Command-line configuration shared by the pipeline commands.

use clap::Args;
use procurement_core::PipelineDate;
use std::path::PathBuf;

/// Options every command accepts.
#[derive(Args, Clone, Debug)]
pub struct PipelineOpts {
    /// Run date (YYYY-MM-DD); defaults to today in the local timezone
    #[arg(long, env = "PIPELINE_DATE", global = true)]
    pub date: Option<PipelineDate>,

    /// Root of the local data tree (`master/` and `raw/` live below it)
    #[arg(long, env = "PIPELINE_DATA_DIR", default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// Directory receiving the per-status log files
    #[arg(long, env = "PIPELINE_LOG_DIR", default_value = "logs", global = true)]
    pub log_dir: PathBuf,
}

impl PipelineOpts {
    /// The run date, resolved once per invocation.
    pub fn date(&self) -> PipelineDate {
        self.date.unwrap_or_else(PipelineDate::today)
    }

    pub fn master_dir(&self) -> PathBuf {
        self.data_dir.join("master")
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.data_dir.join("raw")
    }
}

/// Volumes and seeding of the generated data.
#[derive(Args, Clone, Debug)]
pub struct GenerationArgs {
    /// Number of suppliers
    #[arg(long, default_value = "10")]
    pub suppliers: usize,

    /// Number of products
    #[arg(long, default_value = "100")]
    pub products: usize,

    /// Number of warehouses
    #[arg(long, default_value = "3")]
    pub warehouses: usize,

    /// Number of point-of-sale terminals producing orders
    #[arg(long, default_value = "50")]
    pub num_pos: u32,

    /// Average number of orders per terminal (actual count varies by up to 10)
    #[arg(long, default_value = "50")]
    pub orders_per_pos: u32,

    /// Seed for master data generation (random when omitted)
    #[arg(long)]
    pub master_seed: Option<u64>,

    /// Make stock snapshots reproducible by seeding them from the run date
    #[arg(long)]
    pub seed_stock_from_date: bool,
}

impl Default for GenerationArgs {
    fn default() -> Self {
        Self {
            suppliers: 10,
            products: 100,
            warehouses: 3,
            num_pos: 50,
            orders_per_pos: 50,
            master_seed: None,
            seed_stock_from_date: false,
        }
    }
}
