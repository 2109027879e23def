// ABOUTME: Application-wide error types for firelift.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::api::ApiError;
use crate::build::BuildError;
use crate::process::ProcessError;
use crate::types::ParseTargetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("build failed: {0}")]
    Build(#[from] BuildError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("deploy API call failed: {0}")]
    DeployApi(#[from] ApiError),

    #[error(transparent)]
    Target(#[from] ParseTargetError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
