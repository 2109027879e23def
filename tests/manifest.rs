// ABOUTME: Tests for runtime package manifest generation.
// ABOUTME: Covers mode defaults, bundle-dependencies handling, and substitutions.

mod support;

use firelift::config::{SsrMode, WorkspaceManifest};
use firelift::manifest::{
    self, ManifestInputs, SELF_VERSION_PLACEHOLDER, UNPINNED, version_range,
};
use firelift::types::TargetOptions;
use std::collections::BTreeMap;
use support::MapRegistry;

fn workspace_with(deps: &[(&str, &str)]) -> WorkspaceManifest {
    let mut dependencies = BTreeMap::new();
    for (name, version) in deps {
        dependencies.insert(name.to_string(), version.to_string());
    }
    WorkspaceManifest { dependencies }
}

#[tokio::test]
async fn function_mode_carries_platform_dependencies() {
    let registry = MapRegistry::default()
        .with("firebase-admin", "11.4.1")
        .with("firebase-functions", "4.2.0");
    let server_options = TargetOptions::default();

    let manifest = manifest::generate(
        &registry,
        ManifestInputs {
            mode: SsrMode::Function,
            server_options: &server_options,
            workspace: None,
            main: None,
        },
    )
    .await;

    assert_eq!(
        manifest.dependencies.get("firebase-admin").unwrap(),
        "11.4.1"
    );
    assert_eq!(
        manifest.dependencies.get("firebase-functions").unwrap(),
        "4.2.0"
    );
    // Not installed locally: the unpinned marker stays.
    assert_eq!(
        manifest
            .dev_dependencies
            .get("firebase-functions-test")
            .unwrap(),
        UNPINNED
    );
}

#[tokio::test]
async fn container_mode_starts_empty() {
    let registry = MapRegistry::default();
    let server_options = TargetOptions::default();

    let manifest = manifest::generate(
        &registry,
        ManifestInputs {
            mode: SsrMode::CloudRun,
            server_options: &server_options,
            workspace: None,
            main: Some("dist/app/server/main.js".to_string()),
        },
    )
    .await;

    assert!(manifest.dependencies.is_empty());
    assert!(manifest.dev_dependencies.is_empty());
    assert_eq!(manifest.main.as_deref(), Some("dist/app/server/main.js"));
}

#[tokio::test]
async fn disabled_bundling_copies_caller_versions_verbatim() {
    let registry = MapRegistry::default();
    let server_options = TargetOptions {
        bundle_dependencies: Some(false),
        ..Default::default()
    };
    let workspace = workspace_with(&[("express", "4.18.2"), ("rxjs", "7.8.0")]);

    let manifest = manifest::generate(
        &registry,
        ManifestInputs {
            mode: SsrMode::Function,
            server_options: &server_options,
            workspace: Some(&workspace),
            main: None,
        },
    )
    .await;

    assert_eq!(manifest.dependencies.get("express").unwrap(), "4.18.2");
    assert_eq!(manifest.dependencies.get("rxjs").unwrap(), "7.8.0");
}

#[tokio::test]
async fn enabled_bundling_resolves_only_declared_externals() {
    let registry = MapRegistry::default()
        .with("sharp", "0.32.6")
        .with("express", "4.18.2");
    let server_options = TargetOptions {
        external_dependencies: vec!["sharp".to_string(), "left-pad".to_string()],
        bundle_dependencies: None,
        ..Default::default()
    };
    // Present in the caller's manifest but not declared external: ignored.
    let workspace = workspace_with(&[("express", "4.18.2")]);

    let manifest = manifest::generate(
        &registry,
        ManifestInputs {
            mode: SsrMode::CloudRun,
            server_options: &server_options,
            workspace: Some(&workspace),
            main: None,
        },
    )
    .await;

    assert_eq!(manifest.dependencies.get("sharp").unwrap(), "0.32.6");
    // Unresolvable external: left out rather than unpinned.
    assert!(!manifest.dependencies.contains_key("left-pad"));
    assert!(!manifest.dependencies.contains_key("express"));
}

#[tokio::test]
async fn local_self_reference_becomes_release_placeholder() {
    let registry = MapRegistry::default();
    let server_options = TargetOptions {
        bundle_dependencies: Some(false),
        ..Default::default()
    };
    let workspace = workspace_with(&[("firelift", "file:../firelift/dist")]);

    let manifest = manifest::generate(
        &registry,
        ManifestInputs {
            mode: SsrMode::Function,
            server_options: &server_options,
            workspace: Some(&workspace),
            main: None,
        },
    )
    .await;

    assert_eq!(
        manifest.dependencies.get("firelift").unwrap(),
        SELF_VERSION_PLACEHOLDER
    );
}

#[tokio::test]
async fn published_self_reference_is_left_alone() {
    let registry = MapRegistry::default();
    let server_options = TargetOptions {
        bundle_dependencies: Some(false),
        ..Default::default()
    };
    let workspace = workspace_with(&[("firelift", "7.0.1")]);

    let manifest = manifest::generate(
        &registry,
        ManifestInputs {
            mode: SsrMode::Function,
            server_options: &server_options,
            workspace: Some(&workspace),
            main: None,
        },
    )
    .await;

    assert_eq!(manifest.dependencies.get("firelift").unwrap(), "7.0.1");
}

#[tokio::test]
async fn manifest_carries_caret_engine_range() {
    let registry = MapRegistry::default();
    let server_options = TargetOptions::default();

    let manifest = manifest::generate(
        &registry,
        ManifestInputs {
            mode: SsrMode::Function,
            server_options: &server_options,
            workspace: None,
            main: None,
        },
    )
    .await;

    assert_eq!(manifest.engine_range(), version_range(18));

    let json = manifest.to_json().unwrap();
    assert!(json.contains("\"devDependencies\""));
    assert!(json.contains("\"node\": \"18\""));
    // No main entry in function mode.
    assert!(!json.contains("\"main\""));
}
