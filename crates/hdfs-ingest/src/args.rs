//! CLI argument definitions for HDFS ingestion.

use crate::client::HdfsClient;
use crate::command::CommandRunner;
use crate::ingest::{CopyFailurePolicy, HdfsLayout, Ingestor};
use clap::Args;

/// HDFS ingestion arguments.
#[derive(Args, Clone, Debug)]
pub struct HdfsArgs {
    /// Docker executable used to reach the namenode container
    #[arg(long, env = "PIPELINE_DOCKER_BIN", default_value = "docker")]
    pub docker_bin: String,

    /// Name of the container running the HDFS namenode
    #[arg(long, env = "PIPELINE_NAMENODE_CONTAINER", default_value = "namenode")]
    pub namenode_container: String,

    /// Path at which the local raw data directory is mounted inside the container
    #[arg(long, env = "PIPELINE_CONTAINER_DATA_DIR", default_value = "/data")]
    pub container_data_dir: String,

    /// HDFS directory holding the orders and stock partitions
    #[arg(long, env = "PIPELINE_HDFS_RAW_ROOT", default_value = "/raw")]
    pub hdfs_raw_root: String,

    /// Log failed partition copies and continue instead of aborting
    #[arg(long)]
    pub allow_copy_failures: bool,
}

impl Default for HdfsArgs {
    fn default() -> Self {
        Self {
            docker_bin: "docker".to_string(),
            namenode_container: "namenode".to_string(),
            container_data_dir: "/data".to_string(),
            hdfs_raw_root: "/raw".to_string(),
            allow_copy_failures: false,
        }
    }
}

impl HdfsArgs {
    pub fn layout(&self) -> HdfsLayout {
        HdfsLayout::new(&self.container_data_dir, &self.hdfs_raw_root)
    }

    pub fn copy_failure_policy(&self) -> CopyFailurePolicy {
        if self.allow_copy_failures {
            CopyFailurePolicy::Continue
        } else {
            CopyFailurePolicy::Fail
        }
    }

    /// Build an [`Ingestor`] that sends its commands through `runner`.
    pub fn ingestor<R: CommandRunner>(&self, runner: R) -> Ingestor<R> {
        Ingestor::new(
            HdfsClient::new(runner, &self.docker_bin, &self.namenode_container),
            self.layout(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHdfsRunner;

    #[test]
    fn test_defaults() {
        let args = HdfsArgs::default();
        assert_eq!(args.copy_failure_policy(), CopyFailurePolicy::Fail);
        assert_eq!(args.layout(), HdfsLayout::new("/data", "/raw"));

        let ingestor = args.ingestor(FakeHdfsRunner::new());
        assert_eq!(ingestor.client().container(), "namenode");
    }

    #[test]
    fn test_allow_copy_failures() {
        let args = HdfsArgs {
            allow_copy_failures: true,
            ..HdfsArgs::default()
        };
        assert_eq!(args.copy_failure_policy(), CopyFailurePolicy::Continue);
    }
}
