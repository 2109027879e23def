// ABOUTME: Typed external-process runner capability.
// ABOUTME: Streams output live to the operator while buffering it for error reports.

use crate::observe::{LogObserver, NoopObserver};
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Outcome of an external process invocation.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("empty command line")]
    EmptyCommand,

    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("'{command}' exited with status {status}: {stderr}")]
    Failed {
        command: String,
        status: i32,
        stderr: String,
    },
}

/// Runs external command lines to completion.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run a whitespace-separated command line, awaiting completion.
    ///
    /// Exit status 1 is the distinguished failure status; the error carries
    /// the buffered stderr. No timeout exists: a hung process blocks the
    /// deploy indefinitely.
    async fn run(&self, command: &str) -> Result<ProcessResult, ProcessError>;
}

/// Production runner over tokio::process.
///
/// Both output streams are forwarded live to the operator and buffered for
/// error reporting. Each stdout line is also handed to the installed
/// observer.
pub struct TokioProcessRunner {
    observer: Arc<dyn LogObserver>,
}

impl TokioProcessRunner {
    pub fn new(observer: Arc<dyn LogObserver>) -> Self {
        Self { observer }
    }
}

impl Default for TokioProcessRunner {
    fn default() -> Self {
        Self::new(Arc::new(NoopObserver))
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, command: &str) -> Result<ProcessResult, ProcessError> {
        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or(ProcessError::EmptyCommand)?;

        let mut child = Command::new(program)
            .args(parts)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let stdout = child.stdout.take().expect("stdout was piped");
        let stderr = child.stderr.take().expect("stderr was piped");

        let observer = Arc::clone(&self.observer);
        let stdout_task = tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            let mut buffer = String::new();
            while let Ok(Some(line)) = lines.next_line().await {
                println!("{line}");
                observer.observe(&line);
                buffer.push_str(&line);
                buffer.push('\n');
            }
            buffer
        });

        let stderr_task = tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            let mut buffer = String::new();
            while let Ok(Some(line)) = lines.next_line().await {
                eprintln!("{line}");
                buffer.push_str(&line);
                buffer.push('\n');
            }
            buffer
        });

        let status = child.wait().await.map_err(|source| ProcessError::Spawn {
            command: command.to_string(),
            source,
        })?;

        let stdout = stdout_task.await.unwrap_or_default();
        let stderr = stderr_task.await.unwrap_or_default();
        let status = status.code().unwrap_or(-1);

        if status == 1 {
            return Err(ProcessError::Failed {
                command: command.to_string(),
                status,
                stderr,
            });
        }

        Ok(ProcessResult {
            status,
            stdout,
            stderr,
        })
    }
}
