// ABOUTME: Immutable per-invocation deploy context.
// ABOUTME: Built once after project selection; replaces mutating caller options.

use std::path::{Path, PathBuf};

/// Values resolved once at the start of a deploy and passed downward.
///
/// The auth token is held only in this in-memory value for the duration of
/// one call chain; nothing persists it.
#[derive(Debug, Clone)]
pub struct DeployContext {
    project: String,
    workspace_root: PathBuf,
    token: Option<String>,
}

impl DeployContext {
    pub fn new(project: impl Into<String>, workspace_root: &Path, token: Option<String>) -> Self {
        Self {
            project: project.into(),
            workspace_root: workspace_root.to_path_buf(),
            token,
        }
    }

    /// The resolved hosting project id.
    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
