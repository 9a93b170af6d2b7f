//! External command capability.

use crate::error::CommandError;
use async_trait::async_trait;
use std::fmt;
use tracing::debug;

/// A program and its arguments. Arguments are passed as-is, without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished command. Output is trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// -1 when the process was killed by a signal.
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: 0,
        }
    }

    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Turn a non-zero exit into [`CommandError::Failed`].
    pub fn ensure_success(self, command: &ExternalCommand) -> Result<Self, CommandError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(CommandError::Failed {
                command: command.to_string(),
                exit_code: self.exit_code,
                stderr: self.stderr,
            })
        }
    }
}

/// Runs external commands to completion.
///
/// `Err` means the command could not be run at all; a command that ran and
/// failed is an `Ok` output with a non-zero exit code.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &ExternalCommand) -> Result<CommandOutput, CommandError>;
}

/// Runs commands as local child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &ExternalCommand) -> Result<CommandOutput, CommandError> {
        debug!("Running: {}", command);

        let output = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        };

        if !result.is_success() {
            debug!(
                "Command exited with code {}: {}",
                result.exit_code, result.stderr
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_arguments_with_spaces() {
        let command = ExternalCommand::new("docker")
            .args(["exec", "namenode", "bash", "-c"])
            .arg("hdfs dfs -ls /raw");
        assert_eq!(
            command.to_string(),
            "docker exec namenode bash -c \"hdfs dfs -ls /raw\""
        );
    }

    #[test]
    fn test_ensure_success() {
        let command = ExternalCommand::new("false");
        assert!(CommandOutput::success("ok").ensure_success(&command).is_ok());

        let err = CommandOutput::failure(2, "boom")
            .ensure_success(&command)
            .unwrap_err();
        match err {
            CommandError::Failed {
                command,
                exit_code,
                stderr,
            } => {
                assert_eq!(command, "false");
                assert_eq!(exit_code, 2);
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_runner_captures_exit_code() {
        let output = ProcessRunner
            .run(&ExternalCommand::new("sh").args(["-c", "echo out; echo err >&2; exit 3"]))
            .await
            .unwrap();
        assert_eq!(output.stdout, "out");
        assert_eq!(output.stderr, "err");
        assert_eq!(output.exit_code, 3);
    }

    #[tokio::test]
    async fn test_process_runner_spawn_failure() {
        let result = ProcessRunner
            .run(&ExternalCommand::new("definitely-not-a-real-binary-3f9a"))
            .await;
        assert!(matches!(result, Err(CommandError::Spawn { .. })));
    }
}
