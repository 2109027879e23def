// ABOUTME: Core value types shared across the deploy engine.
// ABOUTME: Target references, deploy scopes, and build target descriptors.

mod scope;
mod target_ref;

pub use scope::DeployScope;
pub use target_ref::{ParseTargetError, TargetReference};

use serde_json::Value;
use std::collections::HashMap;

/// A build target plus the caller-supplied options to schedule it with.
/// Never mutated by the engine.
#[derive(Debug, Clone)]
pub struct BuildTarget {
    pub reference: TargetReference,
    pub options: HashMap<String, Value>,
}

impl BuildTarget {
    pub fn new(reference: TargetReference) -> Self {
        Self {
            reference,
            options: HashMap::new(),
        }
    }
}

/// Options the build system reports for a target.
#[derive(Debug, Clone, Default)]
pub struct TargetOptions {
    /// Where the build writes its artifacts, relative to the workspace root.
    pub output_path: Option<String>,
    /// Packages the server bundle treats as externals (left unbundled).
    pub external_dependencies: Vec<String>,
    /// Whether the server build bundles its dependencies. `Some(false)`
    /// means the caller pins everything in their own package.json.
    pub bundle_dependencies: Option<bool>,
}
