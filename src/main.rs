//! Command-line interface for procurement-pipeline
//!
//! # Usage Examples
//!
//! ```bash
//! # Generate, load and ingest today's data
//! procurement-pipeline
//!
//! # The same, spelled out
//! procurement-pipeline run
//!
//! # Same for a given day, tolerating failed HDFS copies
//! procurement-pipeline --date 2024-01-15 run --allow-copy-failures
//!
//! # Batched inserts against a custom database
//! procurement-pipeline generate \
//!   --postgresql-connection-string "host=db port=5432 dbname=procurement_db user=u password=p" \
//!   --insert-batch-size 50
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use hdfs_ingest::{parse_categories, HdfsArgs, ProcessRunner};
use procurement_core::{DataCategory, Status, StatusLog};
use procurement_pipeline::{FileStatusLog, GenerationArgs, Pipeline, PipelineOpts};
use procurement_populate_postgresql::{MasterDataLoader, PostgreSQLLoadArgs, PostgreSQLTarget};

#[derive(Parser)]
#[command(name = "procurement-pipeline")]
#[command(about = "Daily procurement data generation and HDFS ingestion pipeline")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    opts: PipelineOpts,

    // `run` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Arguments of a full generation and ingestion run.
#[derive(Parser, Clone, Debug)]
struct RunArgs {
    #[command(flatten)]
    generation: GenerationArgs,

    #[command(flatten)]
    postgresql: PostgreSQLLoadArgs,

    #[command(flatten)]
    hdfs: HdfsArgs,
}

impl RunArgs {
    /// Defaults and environment fallbacks of every run argument.
    fn from_env() -> Result<Self, clap::Error> {
        Self::try_parse_from(["run"])
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the day's data, load master data and ingest into HDFS
    Run(RunArgs),

    /// Generate master and transactional data and load master data into PostgreSQL
    Generate {
        #[command(flatten)]
        generation: GenerationArgs,

        #[command(flatten)]
        postgresql: PostgreSQLLoadArgs,
    },

    /// Copy the day's local partitions into HDFS and verify
    Ingest {
        #[command(flatten)]
        hdfs: HdfsArgs,

        /// Categories to ingest (orders, stock)
        #[arg(long, value_delimiter = ',', default_values = ["orders", "stock"])]
        categories: Vec<String>,
    },

    /// List and classify what is currently stored under the HDFS raw root
    Verify {
        #[command(flatten)]
        hdfs: HdfsArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let date = cli.opts.date();
    let log = FileStatusLog::new(&cli.opts.log_dir, date);

    let command = match cli.command {
        Some(command) => command,
        None => Commands::Run(RunArgs::from_env()?),
    };

    match command {
        Commands::Run(RunArgs {
            generation,
            postgresql,
            hdfs,
        }) => {
            let pipeline = Pipeline::new(&cli.opts, generation, &log);
            let mut loader = connect_loader(&postgresql, &log).await?;
            let ingestor = hdfs.ingestor(ProcessRunner);

            pipeline
                .run(&mut loader, &ingestor, hdfs.copy_failure_policy())
                .await?;
        }
        Commands::Generate {
            generation,
            postgresql,
        } => {
            let pipeline = Pipeline::new(&cli.opts, generation, &log);
            let mut loader = connect_loader(&postgresql, &log).await?;

            let summary = pipeline.generate_data(&mut loader).await?;
            tracing::info!(
                "Generated {} order lines in {} files and {} stock records",
                summary.orders.order_lines,
                summary.orders.files.len(),
                summary.stock.records
            );
        }
        Commands::Ingest { hdfs, categories } => {
            let categories = parse_categories(&categories)?;
            let pipeline = Pipeline::new(&cli.opts, GenerationArgs::default(), &log);
            let ingestor = hdfs.ingestor(ProcessRunner);

            pipeline
                .ingest(&ingestor, &categories, hdfs.copy_failure_policy())
                .await?;
        }
        Commands::Verify { hdfs } => {
            let ingestor = hdfs.ingestor(ProcessRunner);
            let report = ingestor
                .verify(&DataCategory::ALL, &log)
                .await
                .context("HDFS verification failed")?;
            tracing::info!(
                "{} orders files, {} stock files",
                report.orders.len(),
                report.stock.len()
            );
        }
    }

    Ok(())
}

async fn connect_loader(
    args: &PostgreSQLLoadArgs,
    log: &dyn StatusLog,
) -> anyhow::Result<MasterDataLoader<PostgreSQLTarget>> {
    let target = match PostgreSQLTarget::connect(&args.postgresql_connection_string).await {
        Ok(target) => target,
        Err(e) => {
            log.log(Status::Error, &format!("Failed to connect to PostgreSQL: {e}"));
            return Err(e).context("Failed to connect to PostgreSQL");
        }
    };
    Ok(MasterDataLoader::new(
        target.with_insert_mode(args.insert_mode()),
    ))
}
