//! In-memory HDFS stand-in for tests.

use crate::command::{CommandOutput, CommandRunner, ExternalCommand};
use crate::error::CommandError;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct FakeState {
    dirs: BTreeSet<String>,
    /// path -> size in bytes
    files: BTreeMap<String, u64>,
    commands: Vec<ExternalCommand>,
}

/// A [`CommandRunner`] that interprets `docker exec <c> hdfs dfs ...` and
/// `docker exec <c> bash -c "hdfs dfs ..."` against an in-memory tree.
///
/// Supported operations: `-test -d`, `-mkdir [-p]`, `-put [-f] <glob> <dir>/`
/// and `-ls -R`. Puts resolve their source glob against a local directory
/// registered with [`FakeHdfsRunner::with_container_mount`], standing in for
/// the volume mounted into the namenode container. Commands whose rendered
/// form contains a pattern registered with [`FakeHdfsRunner::fail_when`]
/// return the configured failure instead.
#[derive(Debug, Default)]
pub struct FakeHdfsRunner {
    state: Mutex<FakeState>,
    mount: Option<(String, PathBuf)>,
    failures: Vec<(String, CommandOutput)>,
}

impl FakeHdfsRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map the container path `container_dir` onto the local `local_dir`.
    pub fn with_container_mount(
        mut self,
        container_dir: impl Into<String>,
        local_dir: impl Into<PathBuf>,
    ) -> Self {
        self.mount = Some((container_dir.into(), local_dir.into()));
        self
    }

    /// Pre-create a directory (and its parents).
    pub fn with_dir(self, path: &str) -> Self {
        if let Ok(mut state) = self.state.lock() {
            add_dir(&mut state.dirs, path);
        }
        self
    }

    /// Fail every command whose rendered form contains `pattern`.
    pub fn fail_when(mut self, pattern: &str, exit_code: i32, stderr: &str) -> Self {
        self.failures
            .push((pattern.to_string(), CommandOutput::failure(exit_code, stderr)));
        self
    }

    /// Every command received so far, oldest first.
    pub fn commands(&self) -> Vec<ExternalCommand> {
        self.state
            .lock()
            .map(|state| state.commands.clone())
            .unwrap_or_default()
    }

    /// Number of received commands whose rendered form contains `pattern`.
    pub fn count_commands(&self, pattern: &str) -> usize {
        self.commands()
            .iter()
            .filter(|c| c.to_string().contains(pattern))
            .count()
    }

    /// Files currently stored in the fake HDFS.
    pub fn files(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|state| state.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn dfs_tokens(command: &ExternalCommand) -> Vec<String> {
        // bash -c "<script>" carries the whole hdfs invocation in one argument
        if let Some(pos) = command.args.iter().position(|a| a == "-c") {
            if let Some(script) = command.args.get(pos + 1) {
                return script.split_whitespace().map(str::to_string).collect();
            }
        }
        command.args.clone()
    }

    fn execute(&self, state: &mut FakeState, tokens: &[String]) -> CommandOutput {
        let Some(dfs) = tokens.iter().position(|t| t == "dfs") else {
            return CommandOutput::success("");
        };
        let op = &tokens[dfs + 1..];
        let flags = |s: &&String| !s.starts_with('-');

        match op.first().map(String::as_str) {
            Some("-test") => {
                let path = op.iter().skip(1).find(flags).cloned().unwrap_or_default();
                if state.dirs.contains(&normalize(&path)) {
                    CommandOutput::success("")
                } else {
                    CommandOutput::failure(1, "")
                }
            }
            Some("-mkdir") => {
                let path = op.iter().skip(1).find(flags).cloned().unwrap_or_default();
                add_dir(&mut state.dirs, &path);
                CommandOutput::success("")
            }
            Some("-put") => {
                let operands: Vec<&String> = op.iter().skip(1).filter(flags).collect();
                match operands.as_slice() {
                    [source, dest] => self.put(state, source, dest),
                    _ => CommandOutput::failure(255, "put: wrong number of arguments"),
                }
            }
            Some("-ls") => {
                let path = normalize(&op.iter().skip(1).find(flags).cloned().unwrap_or_default());
                if !state.dirs.contains(&path) {
                    return CommandOutput::failure(
                        1,
                        format!("ls: `{path}': No such file or directory"),
                    );
                }
                CommandOutput::success(listing(state, &path))
            }
            _ => CommandOutput::success(""),
        }
    }

    fn put(&self, state: &mut FakeState, source: &str, dest: &str) -> CommandOutput {
        let dest = normalize(dest);
        if !state.dirs.contains(&dest) {
            return CommandOutput::failure(1, format!("put: `{dest}': No such file or directory"));
        }

        let (source_dir, pattern) = source.rsplit_once('/').unwrap_or(("", source));
        let suffix = pattern.trim_start_matches('*');
        let local_dir = match &self.mount {
            Some((container_dir, local_root)) => match source_dir.strip_prefix(container_dir.as_str()) {
                Some(rel) => local_root.join(rel.trim_start_matches('/')),
                None => return no_such_file(source),
            },
            None => return no_such_file(source),
        };

        let Ok(entries) = std::fs::read_dir(&local_dir) else {
            return no_such_file(source);
        };
        let mut copied = 0;
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if entry.path().is_file() && name.ends_with(suffix) {
                let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                state.files.insert(format!("{dest}/{name}"), size);
                copied += 1;
            }
        }

        if copied == 0 {
            no_such_file(source)
        } else {
            CommandOutput::success("")
        }
    }
}

#[async_trait]
impl CommandRunner for FakeHdfsRunner {
    async fn run(&self, command: &ExternalCommand) -> Result<CommandOutput, CommandError> {
        let rendered = command.to_string();
        let mut state = self.state.lock().map_err(|_| CommandError::Spawn {
            command: rendered.clone(),
            source: std::io::Error::other("fake HDFS state poisoned"),
        })?;
        state.commands.push(command.clone());

        if let Some((_, output)) = self
            .failures
            .iter()
            .find(|(pattern, _)| rendered.contains(pattern.as_str()))
        {
            return Ok(output.clone());
        }

        let tokens = Self::dfs_tokens(command);
        Ok(self.execute(&mut state, &tokens))
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

fn add_dir(dirs: &mut BTreeSet<String>, path: &str) {
    let path = normalize(path);
    let mut current = String::new();
    for part in path.split('/').filter(|p| !p.is_empty()) {
        current.push('/');
        current.push_str(part);
        dirs.insert(current.clone());
    }
}

fn no_such_file(path: &str) -> CommandOutput {
    CommandOutput::failure(1, format!("put: `{path}': No such file or directory"))
}

fn listing(state: &FakeState, root: &str) -> String {
    let prefix = format!("{root}/");
    let mut lines: Vec<(String, String)> = Vec::new();
    for dir in state.dirs.iter().filter(|d| d.starts_with(&prefix)) {
        lines.push((
            dir.clone(),
            format!("drwxr-xr-x   - root supergroup          0 2024-01-01 00:00 {dir}"),
        ));
    }
    for (file, size) in state.files.iter().filter(|(f, _)| f.starts_with(&prefix)) {
        lines.push((
            file.clone(),
            format!("-rw-r--r--   3 root supergroup {size:>10} 2024-01-01 00:00 {file}"),
        ));
    }
    lines.sort();
    lines
        .into_iter()
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_dir_creates_parents() {
        let mut dirs = BTreeSet::new();
        add_dir(&mut dirs, "/raw/orders/orders_date=2024-01-15/");
        assert!(dirs.contains("/raw"));
        assert!(dirs.contains("/raw/orders"));
        assert!(dirs.contains("/raw/orders/orders_date=2024-01-15"));
    }

    #[tokio::test]
    async fn test_configured_failure_wins() {
        let runner = FakeHdfsRunner::new().fail_when("-mkdir", 1, "permission denied");
        let output = runner
            .run(&ExternalCommand::new("docker").args(["exec", "nn", "hdfs", "dfs", "-mkdir", "/x"]))
            .await
            .unwrap();
        assert_eq!(output.exit_code, 1);
        assert_eq!(output.stderr, "permission denied");
        assert_eq!(runner.count_commands("-mkdir"), 1);
    }
}
