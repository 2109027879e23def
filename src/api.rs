// ABOUTME: Deployment API seam and its Firebase CLI implementation.
// ABOUTME: Every call is non-interactive and scoped to exactly the resources named.

use crate::process::{ProcessError, ProcessRunner};
use crate::types::DeployScope;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_EMULATOR_PORT: u16 = 5000;
pub const DEFAULT_EMULATOR_HOST: &str = "localhost";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("login failed: {0}")]
    Login(String),

    #[error("cannot select project '{project}': {reason}")]
    UseProject { project: String, reason: String },

    #[error("deploy rejected: {0}")]
    Deploy(String),

    #[error("emulator failed: {0}")]
    Serve(String),
}

/// One non-interactive deploy call, restricted exactly to `scope`.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub scope: DeployScope,
    pub cwd: PathBuf,
    pub token: Option<String>,
}

/// One emulator run serving the given target list.
#[derive(Debug, Clone)]
pub struct ServeRequest {
    pub port: u16,
    pub host: String,
    pub targets: Vec<String>,
}

impl ServeRequest {
    pub fn for_scope(scope: &DeployScope) -> Self {
        Self {
            port: DEFAULT_EMULATOR_PORT,
            host: DEFAULT_EMULATOR_HOST.to_string(),
            targets: scope.serve_targets(),
        }
    }
}

/// The external deployment API surface the engine drives.
#[async_trait]
pub trait DeployApi: Send + Sync {
    async fn login(&self) -> Result<(), ApiError>;

    async fn use_project(&self, project: &str) -> Result<(), ApiError>;

    async fn deploy(&self, request: &DeployRequest) -> Result<(), ApiError>;

    async fn serve(&self, request: &ServeRequest) -> Result<(), ApiError>;
}

/// Drives the `firebase` CLI through the process runner.
pub struct FirebaseCli<'a> {
    runner: &'a dyn ProcessRunner,
    cwd: PathBuf,
}

impl<'a> FirebaseCli<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, cwd: &Path) -> Self {
        Self {
            runner,
            cwd: cwd.to_path_buf(),
        }
    }
}

fn api_message(err: ProcessError) -> String {
    match err {
        ProcessError::Failed { stderr, .. } if !stderr.trim().is_empty() => stderr,
        other => other.to_string(),
    }
}

#[async_trait]
impl DeployApi for FirebaseCli<'_> {
    async fn login(&self) -> Result<(), ApiError> {
        self.runner
            .run("firebase login")
            .await
            .map(|_| ())
            .map_err(|e| ApiError::Login(api_message(e)))
    }

    async fn use_project(&self, project: &str) -> Result<(), ApiError> {
        self.runner
            .run(&format!("firebase use {project}"))
            .await
            .map(|_| ())
            .map_err(|e| ApiError::UseProject {
                project: project.to_string(),
                reason: api_message(e),
            })
    }

    async fn deploy(&self, request: &DeployRequest) -> Result<(), ApiError> {
        let mut command = format!(
            "firebase deploy --only {} --non-interactive --cwd {}",
            request.scope,
            request.cwd.display()
        );
        if let Some(token) = &request.token {
            command.push_str(&format!(" --token {token}"));
        }
        self.runner
            .run(&command)
            .await
            .map(|_| ())
            .map_err(|e| ApiError::Deploy(api_message(e)))
    }

    async fn serve(&self, request: &ServeRequest) -> Result<(), ApiError> {
        let command = format!(
            "firebase serve --only {} --port {} --host {} --non-interactive --cwd {}",
            request.targets.join(","),
            request.port,
            request.host,
            self.cwd.display()
        );
        self.runner
            .run(&command)
            .await
            .map(|_| ())
            .map_err(|e| ApiError::Serve(api_message(e)))
    }
}
