//! Pipeline orchestration: generation, master data load and HDFS ingestion.

use crate::config::{GenerationArgs, PipelineOpts};
use anyhow::Context;
use hdfs_ingest::{CommandRunner, CopyFailurePolicy, IngestReport, Ingestor};
use procurement_core::{
    DataCategory, PipelineDate, Product, Status, StatusLog, Supplier, TableBatch, Warehouse,
};
use procurement_generator::{MasterDataGenerator, OrderGenerator, StockGenerator};
use procurement_populate_csv::{write_master_data, write_stock_snapshot, MasterFiles};
use procurement_populate_jsonl::OrdersWriter;
use procurement_populate_postgresql::{LoadSummary, LoadTarget, MasterDataLoader};
use std::path::{Path, PathBuf};
use tracing::info;

/// One run's master data, in load order.
#[derive(Debug, Clone)]
pub struct MasterData {
    pub suppliers: Vec<Supplier>,
    pub products: Vec<Product>,
    pub warehouses: Vec<Warehouse>,
}

impl MasterData {
    /// Table batches for the loader: suppliers, products, warehouses.
    pub fn table_batches(&self) -> Vec<TableBatch> {
        vec![
            TableBatch::from_records(&self.suppliers),
            TableBatch::from_records(&self.products),
            TableBatch::from_records(&self.warehouses),
        ]
    }
}

/// Result of writing a day's order partition.
#[derive(Debug, Clone)]
pub struct OrdersSummary {
    pub partition_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub order_lines: u64,
}

/// Result of writing a day's stock snapshot.
#[derive(Debug, Clone)]
pub struct StockSummary {
    pub path: PathBuf,
    pub records: u64,
}

/// Everything `generate` produced.
#[derive(Debug)]
pub struct GenerationSummary {
    pub load: LoadSummary,
    pub orders: OrdersSummary,
    pub stock: StockSummary,
}

/// Full run result.
#[derive(Debug)]
pub struct RunSummary {
    pub generation: GenerationSummary,
    pub ingestion: IngestReport,
}

/// A pipeline bound to one run date and one local data tree.
pub struct Pipeline<'a> {
    date: PipelineDate,
    master: MasterFiles,
    raw_dir: PathBuf,
    generation: GenerationArgs,
    log: &'a dyn StatusLog,
}

impl<'a> Pipeline<'a> {
    pub fn new(opts: &PipelineOpts, generation: GenerationArgs, log: &'a dyn StatusLog) -> Self {
        Self::with_data_dir(opts.date(), &opts.data_dir, generation, log)
    }

    /// Pipeline for `date` rooted at `data_dir` (`master/` and `raw/` below it).
    pub fn with_data_dir(
        date: PipelineDate,
        data_dir: &Path,
        generation: GenerationArgs,
        log: &'a dyn StatusLog,
    ) -> Self {
        Self {
            date,
            master: MasterFiles::new(data_dir.join("master")),
            raw_dir: data_dir.join("raw"),
            generation,
            log,
        }
    }

    pub fn date(&self) -> PipelineDate {
        self.date
    }

    pub fn master_files(&self) -> &MasterFiles {
        &self.master
    }

    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    /// Generate suppliers, products and warehouses and write the master CSVs.
    pub fn generate_master_data(&self) -> anyhow::Result<MasterData> {
        let mut generator = match self.generation.master_seed {
            Some(seed) => MasterDataGenerator::new(seed),
            None => MasterDataGenerator::from_entropy(),
        };

        let suppliers = generator.suppliers(self.generation.suppliers);
        let products = generator
            .products(self.generation.products, &suppliers)
            .context("Failed to generate products")?;
        let warehouses = generator.warehouses(self.generation.warehouses);

        write_master_data(&self.master, &suppliers, &products, &warehouses).with_context(
            || format!("Failed to write master data to {}", self.master.dir().display()),
        )?;

        Ok(MasterData {
            suppliers,
            products,
            warehouses,
        })
    }

    /// Replace the database master tables with `data`.
    pub async fn load_master_data<T: LoadTarget>(
        &self,
        data: &MasterData,
        loader: &mut MasterDataLoader<T>,
    ) -> anyhow::Result<LoadSummary> {
        self.log
            .log(Status::Info, "loading to Postgres Database Master Data....");
        let summary = loader
            .load(&data.table_batches(), self.log)
            .await
            .context("Failed to load master data into PostgreSQL")?;
        Ok(summary)
    }

    /// Write one JSONL file per terminal, drawing SKUs from the products file.
    pub fn generate_orders(&self) -> anyhow::Result<OrdersSummary> {
        let skus = self.master.read_sku_ids().with_context(|| {
            format!(
                "Failed to read SKU ids from {}",
                self.master.products_path().display()
            )
        })?;

        let terminals = OrderGenerator::new(self.date)
            .generate(self.generation.num_pos, self.generation.orders_per_pos, &skus)
            .context("Failed to generate orders")?;

        let writer = OrdersWriter::new(&self.raw_dir, self.date);
        let mut files = Vec::with_capacity(terminals.len());
        let mut order_lines = 0;
        for terminal in &terminals {
            let metrics = writer
                .write_terminal(terminal)
                .with_context(|| format!("Failed to write orders for {}", terminal.label()))?;
            self.log.log(
                Status::Success,
                &format!(
                    "Generated {} order items for {}",
                    metrics.rows_written,
                    terminal.label()
                ),
            );
            order_lines += metrics.rows_written;
            files.push(metrics.path);
        }

        self.log.log(
            Status::Success,
            &format!("All orders for {} generated successfully!", self.date),
        );
        Ok(OrdersSummary {
            partition_dir: writer.partition_dir().to_path_buf(),
            files,
            order_lines,
        })
    }

    /// Write the warehouse x product stock snapshot for the run date.
    pub fn generate_stock(&self) -> anyhow::Result<StockSummary> {
        let warehouses = self.master.read_warehouse_ids().with_context(|| {
            format!(
                "Failed to read warehouse ids from {}",
                self.master.warehouses_path().display()
            )
        })?;
        let skus = self.master.read_sku_ids().with_context(|| {
            format!(
                "Failed to read SKU ids from {}",
                self.master.products_path().display()
            )
        })?;

        let mut generator = if self.generation.seed_stock_from_date {
            StockGenerator::seeded_from_date(self.date)
        } else {
            StockGenerator::from_entropy(self.date)
        };
        let records = generator.snapshot(&warehouses, &skus);

        let (path, metrics) = write_stock_snapshot(&self.raw_dir, self.date, &records)
            .context("Failed to write stock snapshot")?;
        self.log.log(
            Status::Success,
            &format!(
                "Stock snapshot for {} generated:{} records",
                self.date, metrics.rows_written
            ),
        );
        Ok(StockSummary {
            path,
            records: metrics.rows_written,
        })
    }

    /// Master data (files and database), then the day's orders and stock.
    pub async fn generate_data<T: LoadTarget>(
        &self,
        loader: &mut MasterDataLoader<T>,
    ) -> anyhow::Result<GenerationSummary> {
        let master = self.generate_master_data()?;
        let load = self.load_master_data(&master, loader).await?;
        self.log
            .log(Status::Success, "Master data is generated successfully!");

        let orders = self.generate_orders()?;
        self.log
            .log(Status::Success, "daily orders data generated successfully!");

        let stock = self.generate_stock()?;
        self.log
            .log(Status::Success, "warehouse snapshot generated successfully!");

        Ok(GenerationSummary {
            load,
            orders,
            stock,
        })
    }

    /// Copy the day's partitions of `categories` into HDFS and verify.
    pub async fn ingest<R: CommandRunner>(
        &self,
        ingestor: &Ingestor<R>,
        categories: &[DataCategory],
        policy: CopyFailurePolicy,
    ) -> anyhow::Result<IngestReport> {
        self.log.log(
            Status::Info,
            &format!("Creating HDFS directories for DATE: {}...", self.date),
        );
        let report = ingestor
            .run(self.date, categories, policy, self.log)
            .await
            .context("HDFS ingestion failed")?;
        Ok(report)
    }

    /// Generation followed by ingestion of every category.
    pub async fn run<T: LoadTarget, R: CommandRunner>(
        &self,
        loader: &mut MasterDataLoader<T>,
        ingestor: &Ingestor<R>,
        policy: CopyFailurePolicy,
    ) -> anyhow::Result<RunSummary> {
        self.log.log(
            Status::Create,
            &format!("Generating data for DATE :{}", self.date),
        );
        let generation = self.generate_data(loader).await?;

        self.log.log(
            Status::Info,
            &format!("Begin the ingestion for DATE:{}", self.date),
        );
        let ingestion = self.ingest(ingestor, &DataCategory::ALL, policy).await?;

        info!(
            "Pipeline run for {} finished: {} order lines, {} stock records, {} copy failures",
            self.date,
            generation.orders.order_lines,
            generation.stock.records,
            ingestion.copy_failures()
        );
        Ok(RunSummary {
            generation,
            ingestion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procurement_core::RecordingStatusLog;
    use tempfile::TempDir;

    fn small_generation() -> GenerationArgs {
        GenerationArgs {
            suppliers: 3,
            products: 12,
            warehouses: 2,
            num_pos: 2,
            orders_per_pos: 10,
            master_seed: Some(7),
            seed_stock_from_date: true,
        }
    }

    fn date() -> PipelineDate {
        "2024-01-15".parse().unwrap()
    }

    #[test]
    fn test_master_batches_in_load_order() {
        let dir = TempDir::new().unwrap();
        let log = RecordingStatusLog::new();
        let pipeline = Pipeline::with_data_dir(date(), dir.path(), small_generation(), &log);

        let master = pipeline.generate_master_data().unwrap();
        let names: Vec<String> = master
            .table_batches()
            .iter()
            .map(|b| b.name().to_string())
            .collect();
        assert_eq!(names, vec!["suppliers", "products", "warehouses"]);
        assert!(pipeline.master_files().products_path().exists());
    }

    #[test]
    fn test_stock_covers_every_pair() {
        let dir = TempDir::new().unwrap();
        let log = RecordingStatusLog::new();
        let pipeline = Pipeline::with_data_dir(date(), dir.path(), small_generation(), &log);

        pipeline.generate_master_data().unwrap();
        let stock = pipeline.generate_stock().unwrap();

        assert_eq!(stock.records, 2 * 12);
        assert_eq!(
            log.messages(Status::Success),
            vec!["Stock snapshot for 2024-01-15 generated:24 records".to_string()]
        );
    }

    #[test]
    fn test_orders_need_master_files() {
        let dir = TempDir::new().unwrap();
        let log = RecordingStatusLog::new();
        let pipeline = Pipeline::with_data_dir(date(), dir.path(), small_generation(), &log);

        let err = pipeline.generate_orders().unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read SKU ids"));
    }
}
