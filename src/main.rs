// ABOUTME: Entry point for the firelift CLI application.
// ABOUTME: Wires production collaborators and dispatches to the deploy engine.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use firelift::api::FirebaseCli;
use firelift::build::{BuildError, BuildSystem};
use firelift::config::DeployOptions;
use firelift::deploy::{self, Engine, TerminalPrompt};
use firelift::error::Result;
use firelift::fshost::StdFsHost;
use firelift::manifest::NpmRegistry;
use firelift::observe::BrowserObserver;
use firelift::process::TokioProcessRunner;
use firelift::types::{BuildTarget, TargetOptions, TargetReference};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Deploy {
            project,
            browser_target,
            server_target,
            prerender_target,
            ssr,
            preview,
            service_id,
            token,
        } => {
            let workspace_root = env::current_dir()?;

            let static_target = BuildTarget::new(TargetReference::parse(&browser_target)?);
            let server_target = server_target
                .as_deref()
                .map(TargetReference::parse)
                .transpose()?
                .map(BuildTarget::new);
            let prerender_target = prerender_target
                .as_deref()
                .map(TargetReference::parse)
                .transpose()?
                .map(BuildTarget::new);

            let options = DeployOptions {
                ssr,
                preview,
                service_id,
            };

            let runner = TokioProcessRunner::new(Arc::new(BrowserObserver));
            let api = FirebaseCli::new(&runner, &workspace_root);
            let registry = NpmRegistry::new(&runner);
            let builder = WorkspaceBuilder::new(&workspace_root, static_target.reference.clone());
            let fs = StdFsHost;
            let prompt = TerminalPrompt;

            let engine = Engine {
                api: &api,
                builder: &builder,
                fs: &fs,
                runner: &runner,
                registry: &registry,
                prompt: &prompt,
            };

            deploy::run(
                &engine,
                &project,
                &workspace_root,
                &static_target,
                server_target.as_ref(),
                prerender_target.as_ref(),
                &options,
                token,
            )
            .await
        }
    }
}

/// Build system adapter for an Angular-style workspace: targets are built
/// through the workspace CLI and their options read from angular.json.
struct WorkspaceBuilder {
    workspace_root: std::path::PathBuf,
    active: TargetReference,
}

impl WorkspaceBuilder {
    fn new(workspace_root: &Path, active: TargetReference) -> Self {
        Self {
            workspace_root: workspace_root.to_path_buf(),
            active,
        }
    }

    fn read_target_config(&self, reference: &TargetReference) -> Option<Value> {
        let raw = std::fs::read_to_string(self.workspace_root.join("angular.json")).ok()?;
        let workspace: Value = serde_json::from_str(&raw).ok()?;
        workspace
            .get("projects")?
            .get(reference.project())?
            .get("architect")?
            .get(reference.configuration())
            .cloned()
    }
}

#[async_trait]
impl BuildSystem for WorkspaceBuilder {
    async fn schedule(
        &self,
        reference: &TargetReference,
        _options: &HashMap<String, Value>,
    ) -> std::result::Result<(), BuildError> {
        let status = tokio::process::Command::new("npx")
            .args(["ng", "run", &reference.to_string()])
            .current_dir(&self.workspace_root)
            .status()
            .await
            .map_err(|e| BuildError::TargetFailed(reference.clone(), e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(BuildError::TargetFailed(
                reference.clone(),
                format!("exited with status {status}"),
            ))
        }
    }

    async fn target_options(
        &self,
        reference: &TargetReference,
    ) -> std::result::Result<TargetOptions, BuildError> {
        let config = self.read_target_config(reference).ok_or_else(|| {
            BuildError::Options(reference.clone(), "target not found in angular.json".into())
        })?;
        let options = config.get("options").cloned().unwrap_or(Value::Null);

        Ok(TargetOptions {
            output_path: options
                .get("outputPath")
                .and_then(Value::as_str)
                .map(str::to_string),
            external_dependencies: options
                .get("externalDependencies")
                .and_then(Value::as_array)
                .map(|deps| {
                    deps.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            bundle_dependencies: options.get("bundleDependencies").and_then(Value::as_bool),
        })
    }

    fn active_target(&self) -> Option<&TargetReference> {
        Some(&self.active)
    }
}
