// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::consts::SHELL;
use crate::errors::WrapperError;
use crate::traits::{StageOutput, ToolExecutor};

/// Runs tool stages as `sh -c <command>` child processes.
pub struct ProcessExecutor {
    shell: String,
}

impl ProcessExecutor {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new(SHELL)
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

#[async_trait]
impl ToolExecutor for ProcessExecutor {
    async fn run(
        &self,
        command_line: &str,
        working_dir: &Path,
        stdin: Vec<u8>,
    ) -> Result<StageOutput, WrapperError> {
        let mut child = Command::new(&self.shell)
            .arg("-c")
            .arg(command_line)
            .current_dir(working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // Feed stdin while output is collected so neither side blocks on a full pipe.
        let pipe = child.stdin.take();
        let feed = async move {
            if let Some(mut pipe) = pipe {
                match pipe.write_all(&stdin).await {
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
                    other => other?,
                }
            }
            Ok::<(), io::Error>(())
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;
        fed?;

        Ok(StageOutput::failure(
            exit_code(output.status),
            output.stdout,
            output.stderr,
        ))
    }

    fn kind(&self) -> &'static str {
        "process"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn run(command: &str, stdin: &str) -> StageOutput {
        ProcessExecutor::default()
            .run(command, Path::new("."), stdin.as_bytes().to_vec())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_stdin_flows_through() {
        let output = run("tr a-z A-Z", "hello").await;
        assert_eq!(output.status, 0);
        assert_eq!(output.stdout, b"HELLO");
    }

    #[tokio::test]
    async fn test_status_and_stderr_are_captured() {
        let output = run("printf out; printf err >&2; exit 3", "").await;
        assert_eq!(output.status, 3);
        assert_eq!(output.stdout, b"out");
        assert_eq!(output.stderr, b"err");
    }

    #[tokio::test]
    async fn test_command_ignoring_stdin() {
        let big = "x".repeat(1 << 20);
        let output = run("printf done", &big).await;
        assert_eq!(output.stdout, b"done");
    }

    #[tokio::test]
    async fn test_large_output_does_not_deadlock() {
        let big = "y".repeat(1 << 20);
        let output = run("cat", &big).await;
        assert_eq!(output.stdout.len(), big.len());
    }

    #[tokio::test]
    async fn test_runs_in_working_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "here").unwrap();

        let output = ProcessExecutor::default()
            .run("cat marker.txt", dir.path(), Vec::new())
            .await
            .unwrap();
        assert_eq!(output.stdout, b"here");
    }

    #[tokio::test]
    async fn test_missing_shell_is_io_error() {
        let result = ProcessExecutor::new("/nonexistent/shell")
            .run("true", Path::new("."), Vec::new())
            .await;
        assert!(matches!(result, Err(WrapperError::Io(_))));
    }
}
