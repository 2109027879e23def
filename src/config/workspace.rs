// ABOUTME: Reads the caller's own package.json at the workspace root.
// ABOUTME: Used when the server build declares bundle_dependencies = false.

use crate::error::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const WORKSPACE_MANIFEST: &str = "package.json";

/// The slice of the caller's package.json the engine cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkspaceManifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

/// Read the workspace manifest if one exists.
pub fn read_workspace_manifest(workspace_root: &Path) -> Result<Option<WorkspaceManifest>> {
    let path = workspace_root.join(WORKSPACE_MANIFEST);
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path)?;
    let manifest = serde_json::from_str(&raw)?;
    Ok(Some(manifest))
}
