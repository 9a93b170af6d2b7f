//! Directory preparation, partition copy and verification.

use crate::client::HdfsClient;
use crate::command::CommandRunner;
use crate::error::{CommandError, IngestError};
use crate::verify::{classify_listing, VerificationReport};
use procurement_core::{DataCategory, PipelineDate, Status, StatusLog};
use tracing::{debug, info};

/// Where partitions live inside the namenode container and in HDFS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HdfsLayout {
    /// Mount point of the local raw data tree inside the container.
    pub container_data_dir: String,
    /// HDFS directory holding the category roots.
    pub raw_root: String,
}

impl Default for HdfsLayout {
    fn default() -> Self {
        Self {
            container_data_dir: "/data".to_string(),
            raw_root: "/raw".to_string(),
        }
    }
}

impl HdfsLayout {
    pub fn new(container_data_dir: impl Into<String>, raw_root: impl Into<String>) -> Self {
        Self {
            container_data_dir: trim_slash(container_data_dir.into()),
            raw_root: trim_slash(raw_root.into()),
        }
    }

    /// HDFS partition directory, e.g. `/raw/orders/orders_date=2024-01-15`.
    pub fn remote_partition(&self, category: DataCategory, date: PipelineDate) -> String {
        format!("{}/{}", self.raw_root, category.partition_dir(date))
    }

    /// Partition directory as seen from inside the container.
    pub fn container_partition(&self, category: DataCategory, date: PipelineDate) -> String {
        format!("{}/{}", self.container_data_dir, category.partition_dir(date))
    }
}

fn trim_slash(path: String) -> String {
    match path.trim_end_matches('/') {
        "" => "/".to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// What [`Ingestor::ensure_dir`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirOutcome {
    Existed,
    Created,
}

/// How a failed partition copy affects the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyFailurePolicy {
    /// Abort with [`IngestError::Copy`].
    #[default]
    Fail,
    /// Log the failure and move on to the next category.
    Continue,
}

/// Result of copying one category's partition.
#[derive(Debug)]
pub enum CopyOutcome {
    Copied {
        category: DataCategory,
        destination: String,
    },
    Failed {
        category: DataCategory,
        error: CommandError,
    },
}

impl CopyOutcome {
    pub fn category(&self) -> DataCategory {
        match self {
            CopyOutcome::Copied { category, .. } | CopyOutcome::Failed { category, .. } => {
                *category
            }
        }
    }

    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied { .. })
    }
}

/// Summary of a full ingestion run.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub directories: Vec<(String, DirOutcome)>,
    pub copies: Vec<CopyOutcome>,
    pub verification: VerificationReport,
}

impl IngestReport {
    pub fn created_dirs(&self) -> usize {
        self.directories
            .iter()
            .filter(|(_, outcome)| *outcome == DirOutcome::Created)
            .count()
    }

    pub fn copy_failures(&self) -> usize {
        self.copies.iter().filter(|c| !c.is_copied()).count()
    }
}

/// Parse category names given on the command line.
pub fn parse_categories<S: AsRef<str>>(names: &[S]) -> Result<Vec<DataCategory>, IngestError> {
    names
        .iter()
        .map(|name| {
            name.as_ref()
                .parse::<DataCategory>()
                .map_err(IngestError::from)
        })
        .collect()
}

/// Drives CHECK_DIRS, CREATE_IF_MISSING, COPY and VERIFY for one date.
pub struct Ingestor<R: CommandRunner> {
    client: HdfsClient<R>,
    layout: HdfsLayout,
}

impl<R: CommandRunner> Ingestor<R> {
    pub fn new(client: HdfsClient<R>, layout: HdfsLayout) -> Self {
        Self { client, layout }
    }

    pub fn client(&self) -> &HdfsClient<R> {
        &self.client
    }

    pub fn layout(&self) -> &HdfsLayout {
        &self.layout
    }

    /// Create `path` unless it already exists. Safe to call repeatedly.
    pub async fn ensure_dir(
        &self,
        path: &str,
        log: &dyn StatusLog,
    ) -> Result<DirOutcome, IngestError> {
        let exists = self
            .client
            .dir_exists(path)
            .await
            .map_err(|source| IngestError::CheckDir {
                path: path.to_string(),
                source,
            })?;

        if exists {
            log.log(
                Status::Skip,
                &format!("HDFS directory already exists: {path}"),
            );
            return Ok(DirOutcome::Existed);
        }

        log.log(Status::Create, &format!("Creating HDFS directory: {path}"));
        if let Err(source) = self.client.mkdir_p(path).await {
            log.log(
                Status::Error,
                &format!("Failed to create HDFS directory {path}: {source}"),
            );
            return Err(IngestError::CreateDir {
                path: path.to_string(),
                source,
            });
        }
        Ok(DirOutcome::Created)
    }

    /// Ensure the date partition of every category exists. Missing parents
    /// are created along with it.
    pub async fn ensure_partition_dirs(
        &self,
        date: PipelineDate,
        categories: &[DataCategory],
        log: &dyn StatusLog,
    ) -> Result<Vec<(String, DirOutcome)>, IngestError> {
        log.log(Status::Info, "Checking HDFS directories...");

        let mut outcomes = Vec::with_capacity(categories.len());
        for category in categories {
            let path = self.layout.remote_partition(*category, date);
            let outcome = self.ensure_dir(&path, log).await?;
            outcomes.push((path, outcome));
        }

        log.log(Status::Info, "HDFS directory check completed.");
        Ok(outcomes)
    }

    /// Put every file of one category's local partition into HDFS,
    /// overwriting files from an earlier run of the same date.
    pub async fn copy_partition(
        &self,
        category: DataCategory,
        date: PipelineDate,
        log: &dyn StatusLog,
    ) -> CopyOutcome {
        log.log(
            Status::Info,
            &format!("Starting ingestion of {category} for day: {date}"),
        );

        let source = self.layout.container_partition(category, date);
        let destination = self.layout.remote_partition(category, date);
        match self
            .client
            .put_glob(&source, &category.file_glob(), &destination)
            .await
        {
            Ok(_) => {
                log.log(
                    Status::Success,
                    &format!("Finished ingestion of {category} for {date}"),
                );
                CopyOutcome::Copied {
                    category,
                    destination,
                }
            }
            Err(error) => {
                log.log(
                    Status::Error,
                    &format!("Failed to ingest {category} for {date}: {error}"),
                );
                CopyOutcome::Failed { category, error }
            }
        }
    }

    /// List the raw root recursively and classify what is there, reporting
    /// on `categories` only.
    pub async fn verify(
        &self,
        categories: &[DataCategory],
        log: &dyn StatusLog,
    ) -> Result<VerificationReport, IngestError> {
        let root = &self.layout.raw_root;
        log.log(Status::Info, &format!("Verifying HDFS contents under {root}"));

        let listing = self
            .client
            .list_recursive(root)
            .await
            .map_err(|source| IngestError::List {
                path: root.clone(),
                source,
            })?;

        if listing.trim().is_empty() {
            log.log(Status::Warn, &format!("No files found in {root}"));
            return Ok(VerificationReport::default());
        }

        let report = classify_listing(&listing);
        report.log_to(categories, log);
        Ok(report)
    }

    /// Run every step for `date`.
    ///
    /// Directory failures are fatal. Copy failures follow `policy`.
    /// Verification problems are logged as warnings and yield an empty report.
    pub async fn run(
        &self,
        date: PipelineDate,
        categories: &[DataCategory],
        policy: CopyFailurePolicy,
        log: &dyn StatusLog,
    ) -> Result<IngestReport, IngestError> {
        info!(
            "Starting HDFS ingestion for {} via container {}",
            date,
            self.client.container()
        );

        let directories = self.ensure_partition_dirs(date, categories, log).await?;

        let mut copies = Vec::with_capacity(categories.len());
        for category in categories {
            match self.copy_partition(*category, date, log).await {
                CopyOutcome::Failed { category, error } if policy == CopyFailurePolicy::Fail => {
                    return Err(IngestError::Copy {
                        category,
                        source: error,
                    });
                }
                outcome => copies.push(outcome),
            }
        }

        let verification = match self.verify(categories, log).await {
            Ok(report) => report,
            Err(e) => {
                log.log(Status::Warn, &format!("HDFS verification skipped: {e}"));
                VerificationReport::default()
            }
        };

        let report = IngestReport {
            directories,
            copies,
            verification,
        };
        debug!(
            "Ingestion created {} directories with {} copy failures",
            report.created_dirs(),
            report.copy_failures()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHdfsRunner;
    use procurement_core::RecordingStatusLog;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn date() -> PipelineDate {
        "2024-01-15".parse().unwrap()
    }

    fn ingestor(runner: FakeHdfsRunner) -> Ingestor<FakeHdfsRunner> {
        Ingestor::new(
            HdfsClient::new(runner, "docker", "namenode"),
            HdfsLayout::default(),
        )
    }

    /// Lays out `orders/orders_date=2024-01-15/pos_00{1,2}.jsonl` and the
    /// stock snapshot under `root`.
    fn write_partitions(root: &Path) {
        let orders = root.join("orders/orders_date=2024-01-15");
        let stock = root.join("stock/stock_date=2024-01-15");
        fs::create_dir_all(&orders).unwrap();
        fs::create_dir_all(&stock).unwrap();
        fs::write(orders.join("pos_001.jsonl"), "{}\n").unwrap();
        fs::write(orders.join("pos_002.jsonl"), "{}\n").unwrap();
        fs::write(
            stock.join("warehouse_snapshot.csv"),
            "warehouse_id,sku_id\nWH_01,SKU_0001\n",
        )
        .unwrap();
    }

    #[test]
    fn test_layout_paths() {
        let layout = HdfsLayout::new("/data/", "/raw/");
        assert_eq!(
            layout.remote_partition(DataCategory::Orders, date()),
            "/raw/orders/orders_date=2024-01-15"
        );
        assert_eq!(
            layout.container_partition(DataCategory::Stock, date()),
            "/data/stock/stock_date=2024-01-15"
        );
    }

    #[test]
    fn test_parse_categories() {
        assert_eq!(
            parse_categories(&["orders", "stock"]).unwrap(),
            vec![DataCategory::Orders, DataCategory::Stock]
        );
        let err = parse_categories(&["orders", "inventory"]).unwrap_err();
        assert!(matches!(err, IngestError::InvalidCategory(_)));
    }

    #[tokio::test]
    async fn test_ensure_dir_twice_skips_second_time() {
        let ingestor = ingestor(FakeHdfsRunner::new());
        let log = RecordingStatusLog::new();
        let path = "/raw/orders/orders_date=2024-01-15";

        assert_eq!(ingestor.ensure_dir(path, &log).await.unwrap(), DirOutcome::Created);
        assert_eq!(ingestor.ensure_dir(path, &log).await.unwrap(), DirOutcome::Existed);

        assert_eq!(ingestor.client().runner().count_commands("-mkdir"), 1);
        assert_eq!(log.count(Status::Create), 1);
        assert_eq!(
            log.messages(Status::Skip),
            vec![format!("HDFS directory already exists: {path}")]
        );
    }

    #[tokio::test]
    async fn test_mkdir_failure_aborts_run() {
        let runner = FakeHdfsRunner::new().fail_when("-mkdir", 1, "mkdir: Permission denied");
        let ingestor = ingestor(runner);
        let log = RecordingStatusLog::new();

        let err = ingestor
            .run(date(), &DataCategory::ALL, CopyFailurePolicy::Continue, &log)
            .await
            .unwrap_err();

        match err {
            IngestError::CreateDir { path, source } => {
                assert_eq!(path, "/raw/orders/orders_date=2024-01-15");
                assert!(matches!(source, CommandError::Failed { exit_code: 1, .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(ingestor.client().runner().count_commands("-put"), 0);
        assert_eq!(log.count(Status::Error), 1);
    }

    #[tokio::test]
    async fn test_full_run_copies_and_verifies() {
        let local = TempDir::new().unwrap();
        write_partitions(local.path());
        let ingestor = ingestor(FakeHdfsRunner::new().with_container_mount("/data", local.path()));
        let log = RecordingStatusLog::new();

        let report = ingestor
            .run(date(), &DataCategory::ALL, CopyFailurePolicy::Fail, &log)
            .await
            .unwrap();

        assert_eq!(report.created_dirs(), 2);
        assert_eq!(report.copy_failures(), 0);
        assert_eq!(report.verification.orders.len(), 2);
        assert_eq!(report.verification.stock.len(), 1);
        assert_eq!(log.count(Status::Warn), 0);
        assert!(log
            .messages(Status::Success)
            .contains(&"Finished ingestion of stock for 2024-01-15".to_string()));
    }

    #[tokio::test]
    async fn test_rerun_overwrites_without_creating_dirs() {
        let local = TempDir::new().unwrap();
        write_partitions(local.path());
        let ingestor = ingestor(FakeHdfsRunner::new().with_container_mount("/data", local.path()));

        ingestor
            .run(date(), &DataCategory::ALL, CopyFailurePolicy::Fail, &RecordingStatusLog::new())
            .await
            .unwrap();
        let log = RecordingStatusLog::new();
        let report = ingestor
            .run(date(), &DataCategory::ALL, CopyFailurePolicy::Fail, &log)
            .await
            .unwrap();

        assert_eq!(report.created_dirs(), 0);
        assert_eq!(log.count(Status::Skip), 2);
        assert_eq!(ingestor.client().runner().files().len(), 3);
    }

    #[tokio::test]
    async fn test_copy_failure_is_fatal_by_default() {
        // nothing on the local side, so every put fails
        let local = TempDir::new().unwrap();
        let ingestor = ingestor(FakeHdfsRunner::new().with_container_mount("/data", local.path()));
        let log = RecordingStatusLog::new();

        let err = ingestor
            .run(date(), &DataCategory::ALL, CopyFailurePolicy::Fail, &log)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            IngestError::Copy {
                category: DataCategory::Orders,
                ..
            }
        ));
        assert_eq!(ingestor.client().runner().count_commands("-put"), 1);
    }

    #[tokio::test]
    async fn test_copy_failure_continues_when_allowed() {
        let local = TempDir::new().unwrap();
        write_partitions(local.path());
        fs::remove_dir_all(local.path().join("orders")).unwrap();
        let ingestor = ingestor(FakeHdfsRunner::new().with_container_mount("/data", local.path()));
        let log = RecordingStatusLog::new();

        let report = ingestor
            .run(date(), &DataCategory::ALL, CopyFailurePolicy::Continue, &log)
            .await
            .unwrap();

        assert_eq!(report.copy_failures(), 1);
        assert_eq!(report.copies[0].category(), DataCategory::Orders);
        assert!(report.copies[1].is_copied());
        assert_eq!(report.verification.stock.len(), 1);
        assert!(log.messages(Status::Warn).contains(&"No orders found".to_string()));
        assert_eq!(log.count(Status::Error), 1);
    }

    #[tokio::test]
    async fn test_single_category_run_verifies_only_that_category() {
        let local = TempDir::new().unwrap();
        write_partitions(local.path());
        let ingestor = ingestor(FakeHdfsRunner::new().with_container_mount("/data", local.path()));
        let log = RecordingStatusLog::new();

        let report = ingestor
            .run(date(), &[DataCategory::Orders], CopyFailurePolicy::Fail, &log)
            .await
            .unwrap();

        assert_eq!(report.created_dirs(), 1);
        assert_eq!(report.verification.orders.len(), 2);
        assert!(report.verification.stock.is_empty());
        assert!(log.messages(Status::Warn).is_empty());
        assert!(!log
            .messages(Status::Info)
            .contains(&"=== Stock Files ===".to_string()));
    }

    #[tokio::test]
    async fn test_verify_empty_root_warns() {
        let ingestor = ingestor(FakeHdfsRunner::new().with_dir("/raw"));
        let log = RecordingStatusLog::new();

        let report = ingestor.verify(&DataCategory::ALL, &log).await.unwrap();

        assert!(report.is_empty());
        assert_eq!(
            log.messages(Status::Warn),
            vec!["No files found in /raw".to_string()]
        );
    }

    #[tokio::test]
    async fn test_verify_missing_root_is_error() {
        let ingestor = ingestor(FakeHdfsRunner::new());
        let result = ingestor
            .verify(&DataCategory::ALL, &RecordingStatusLog::new())
            .await;
        assert!(matches!(result, Err(IngestError::List { .. })));
    }
}
