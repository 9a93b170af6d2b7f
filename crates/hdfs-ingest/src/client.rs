//! `hdfs dfs` operations executed inside the namenode container.

use crate::command::{CommandOutput, CommandRunner, ExternalCommand};
use crate::error::CommandError;
use tracing::debug;

/// HDFS client that shells out through `docker exec`.
///
/// Only list, make-directory and put operations are exposed.
pub struct HdfsClient<R: CommandRunner> {
    runner: R,
    docker_bin: String,
    container: String,
}

impl<R: CommandRunner> HdfsClient<R> {
    pub fn new(runner: R, docker_bin: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            runner,
            docker_bin: docker_bin.into(),
            container: container.into(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// `docker exec <container> hdfs dfs <args...>`
    pub fn dfs_command<I, S>(&self, args: I) -> ExternalCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ExternalCommand::new(&self.docker_bin)
            .args(["exec", self.container.as_str(), "hdfs", "dfs"])
            .args(args)
    }

    /// `docker exec <container> bash -c "<script>"`, for commands that need
    /// glob expansion inside the container.
    pub fn shell_command(&self, script: impl Into<String>) -> ExternalCommand {
        ExternalCommand::new(&self.docker_bin)
            .args(["exec", self.container.as_str(), "bash", "-c"])
            .arg(script)
    }

    /// Whether `path` exists as a directory (`hdfs dfs -test -d`).
    ///
    /// Any non-zero exit is read as "does not exist"; only a failure to run
    /// the command at all is an error.
    pub async fn dir_exists(&self, path: &str) -> Result<bool, CommandError> {
        let output = self.runner.run(&self.dfs_command(["-test", "-d", path])).await?;
        if !output.is_success() && !output.stderr.is_empty() {
            debug!("Existence check for {} reported: {}", path, output.stderr);
        }
        Ok(output.is_success())
    }

    /// `hdfs dfs -mkdir -p <path>`
    pub async fn mkdir_p(&self, path: &str) -> Result<CommandOutput, CommandError> {
        let command = self.dfs_command(["-mkdir", "-p", path]);
        self.runner.run(&command).await?.ensure_success(&command)
    }

    /// `hdfs dfs -put -f <source_dir>/<glob> <dest_dir>/`, overwriting files
    /// that already exist at the destination.
    pub async fn put_glob(
        &self,
        source_dir: &str,
        glob: &str,
        dest_dir: &str,
    ) -> Result<CommandOutput, CommandError> {
        let command = self.shell_command(format!(
            "hdfs dfs -put -f {source_dir}/{glob} {dest_dir}/"
        ));
        self.runner.run(&command).await?.ensure_success(&command)
    }

    /// `hdfs dfs -ls -R <path>` output.
    pub async fn list_recursive(&self, path: &str) -> Result<String, CommandError> {
        let command = self.dfs_command(["-ls", "-R", path]);
        let output = self.runner.run(&command).await?.ensure_success(&command)?;
        Ok(output.stdout)
    }
}
