// ABOUTME: Deploy orchestration: build, restage, dispatch, preview, deploy.
// ABOUTME: Strategy selection happens once per invocation and is never revisited.

mod container;
mod function;
mod hosting;
mod preview;
mod relocate;

pub use container::DEFAULT_SERVICE_ID;
pub use function::function_id;
pub use preview::{ConfirmPrompt, TerminalPrompt, Verdict, preview_gate};
pub use relocate::{ENTRY_DOCUMENT, ENTRY_DOCUMENT_BACKUP, deploy_root, relocate};

use crate::api::DeployApi;
use crate::build::{BuildError, BuildSystem, run_builds};
use crate::config::{DeployOptions, SsrMode};
use crate::context::DeployContext;
use crate::error::{Error, Result};
use crate::fshost::FsHost;
use crate::manifest::PackageRegistry;
use crate::process::ProcessRunner;
use crate::types::{BuildTarget, TargetOptions, TargetReference};
use std::path::Path;

/// The collaborators one deploy invocation runs against.
pub struct Engine<'a> {
    pub api: &'a dyn DeployApi,
    pub builder: &'a dyn BuildSystem,
    pub fs: &'a dyn FsHost,
    pub runner: &'a dyn ProcessRunner,
    pub registry: &'a dyn PackageRegistry,
    pub prompt: &'a dyn ConfirmPrompt,
}

/// Which pipeline a deploy request routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    HostingOnly,
    Function,
    Container,
}

/// One-shot routing decision.
pub fn select_strategy(has_server_target: bool, mode: SsrMode) -> Strategy {
    match (has_server_target, mode) {
        (false, _) => Strategy::HostingOnly,
        (true, SsrMode::CloudRun) => Strategy::Container,
        (true, _) => Strategy::Function,
    }
}

/// Run one deploy invocation end to end.
///
/// A rejection from the deployment API is reported as a logged error rather
/// than crashing the process; every other failure propagates.
#[allow(clippy::too_many_arguments)]
pub async fn run(
    engine: &Engine<'_>,
    project: &str,
    workspace_root: &Path,
    static_target: &BuildTarget,
    server_target: Option<&BuildTarget>,
    prerender_target: Option<&BuildTarget>,
    options: &DeployOptions,
    token: Option<String>,
) -> Result<()> {
    if token.is_none() {
        engine.api.login().await?;
    }

    if prerender_target.is_none() {
        println!("📦 Building \"{}\"", static_target.reference.project());
    }
    run_builds(engine.builder, static_target, server_target, prerender_target)
        .await
        .map_err(|e| match e {
            BuildError::NoActiveTarget => Error::Config(e.to_string()),
            other => Error::Build(other),
        })?;

    engine
        .api
        .use_project(project)
        .await
        .map_err(|_| Error::Config(format!("cannot select project '{project}'")))?;

    let context = DeployContext::new(project, workspace_root, token);

    let outcome = match select_strategy(server_target.is_some(), options.ssr) {
        Strategy::HostingOnly => {
            hosting::run(engine, &context, &static_target.reference, options).await
        }
        Strategy::Function => {
            let server_target = server_target.expect("function strategy implies a server target");
            function::run(
                engine,
                &context,
                &static_target.reference,
                &server_target.reference,
                options,
            )
            .await
        }
        Strategy::Container => {
            let server_target = server_target.expect("container strategy implies a server target");
            container::run(
                engine,
                &context,
                &static_target.reference,
                &server_target.reference,
                options,
            )
            .await
        }
    };

    match outcome {
        Err(Error::DeployApi(e)) => {
            tracing::error!("{e}");
            Ok(())
        }
        other => other,
    }
}

/// Resolve a target's configured output path, failing when it is absent.
pub(crate) async fn resolved_output(
    builder: &dyn BuildSystem,
    reference: &TargetReference,
) -> Result<(String, TargetOptions)> {
    let options = builder.target_options(reference).await?;
    match options.output_path.clone() {
        Some(output_path) => Ok((output_path, options)),
        None => Err(Error::Config(format!(
            "cannot read the output path of build target '{reference}'"
        ))),
    }
}
