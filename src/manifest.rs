// ABOUTME: Runtime package manifest generation for function and container deploys.
// ABOUTME: Dependency versions are resolved best-effort against the local npm registry.

use crate::config::{SsrMode, WorkspaceManifest};
use crate::process::ProcessRunner;
use crate::types::TargetOptions;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;

/// Runtime dependencies the function platform always needs.
pub const PLATFORM_DEPENDENCIES: [&str; 2] = ["firebase-admin", "firebase-functions"];
pub const PLATFORM_DEV_DEPENDENCIES: [&str; 1] = ["firebase-functions-test"];

/// Marker used until a version is resolved locally.
pub const UNPINNED: &str = "latest";

/// Node major the function/container runtimes target.
pub const NODE_MAJOR: u64 = 18;

/// A local-development self-reference gets swapped for this at release time.
pub const SELF_PACKAGE: &str = "firelift";
pub const SELF_VERSION_PLACEHOLDER: &str = "FIRELIFT_VERSION";

/// Caret range against a major version, e.g. `^18.0.0`.
pub fn version_range(major: u64) -> String {
    format!("^{major}.0.0")
}

#[derive(Debug, Clone, Serialize)]
pub struct Engines {
    pub node: String,
}

/// The generated runtime manifest. Built fresh per deploy and never mutated
/// after being written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct PackageManifest {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    pub dependencies: BTreeMap<String, String>,
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
    pub engines: Engines,
}

impl PackageManifest {
    pub fn engine_range(&self) -> String {
        version_range(NODE_MAJOR)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Query for locally installed package versions.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// The installed version of `name`, or None when it cannot be determined.
    async fn installed_version(&self, name: &str) -> Option<String>;
}

/// Shells out to `npm list` and scrapes the version from its tree output.
pub struct NpmRegistry<'a> {
    runner: &'a dyn ProcessRunner,
}

impl<'a> NpmRegistry<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl PackageRegistry for NpmRegistry<'_> {
    async fn installed_version(&self, name: &str) -> Option<String> {
        let result = self.runner.run(&format!("npm list {name}")).await.ok()?;
        parse_npm_list(&result.stdout, name)
    }
}

fn parse_npm_list(output: &str, name: &str) -> Option<String> {
    let needle = format!(" {name}@");
    let start = output.find(&needle)? + needle.len();
    let version: String = output[start..]
        .chars()
        .take_while(|c| !c.is_whitespace())
        .collect();
    if version.is_empty() { None } else { Some(version) }
}

/// Everything manifest generation depends on, gathered once per deploy.
pub struct ManifestInputs<'a> {
    pub mode: SsrMode,
    pub server_options: &'a TargetOptions,
    pub workspace: Option<&'a WorkspaceManifest>,
    /// Entry module path, set for container deploys.
    pub main: Option<String>,
}

/// Build the runtime manifest for one deploy. Resolution against the local
/// registry happens here and nowhere else; lookup failures leave the
/// unpinned marker in place.
pub async fn generate(
    registry: &dyn PackageRegistry,
    inputs: ManifestInputs<'_>,
) -> PackageManifest {
    let mut dependencies: BTreeMap<String, String> = BTreeMap::new();
    let mut dev_dependencies: BTreeMap<String, String> = BTreeMap::new();

    // The container image is assumed self-sufficient.
    if inputs.mode != SsrMode::CloudRun {
        for name in PLATFORM_DEPENDENCIES {
            dependencies.insert(name.to_string(), UNPINNED.to_string());
        }
        for name in PLATFORM_DEV_DEPENDENCIES {
            dev_dependencies.insert(name.to_string(), UNPINNED.to_string());
        }
    }

    // Lookup failures leave the unpinned marker in place.
    let names: Vec<String> = dependencies.keys().cloned().collect();
    for name in names {
        if let Some(version) = registry.installed_version(&name).await {
            dependencies.insert(name, version);
        }
    }
    let names: Vec<String> = dev_dependencies.keys().cloned().collect();
    for name in names {
        if let Some(version) = registry.installed_version(&name).await {
            dev_dependencies.insert(name, version);
        }
    }

    if inputs.server_options.bundle_dependencies == Some(false) {
        // The caller pins everything themselves; trust their versions.
        if let Some(workspace) = inputs.workspace {
            for (name, version) in &workspace.dependencies {
                dependencies.insert(name.clone(), version.clone());
            }
        }
    } else {
        for name in &inputs.server_options.external_dependencies {
            if let Some(version) = registry.installed_version(name).await {
                dependencies.insert(name.clone(), version);
            }
        }
    }

    if let Some(version) = dependencies.get_mut(SELF_PACKAGE) {
        if version.starts_with("file:") {
            *version = SELF_VERSION_PLACEHOLDER.to_string();
        }
    }

    PackageManifest {
        name: "functions".to_string(),
        description: "Server-rendered application".to_string(),
        main: inputs.main,
        dependencies,
        dev_dependencies,
        engines: Engines {
            node: NODE_MAJOR.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_version_from_tree_output() {
        let output = "app@0.0.0 /work/app\n└── firebase-admin@11.4.1\n";
        assert_eq!(
            parse_npm_list(output, "firebase-admin"),
            Some("11.4.1".to_string())
        );
    }

    #[test]
    fn missing_package_yields_none() {
        let output = "app@0.0.0 /work/app\n└── (empty)\n";
        assert_eq!(parse_npm_list(output, "firebase-admin"), None);
    }

    #[test]
    fn version_range_is_caret_major() {
        assert_eq!(version_range(18), "^18.0.0");
    }
}
