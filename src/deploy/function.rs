// ABOUTME: Serverless-function pipeline: restage, manifest, entry point, deploy.
// ABOUTME: The function id is derived from the static target's project name.

use super::preview::{Verdict, preview_gate};
use super::relocate::{deploy_root, relocate};
use super::{Engine, resolved_output};
use crate::api::DeployRequest;
use crate::config::{DeployOptions, SsrMode, read_workspace_manifest};
use crate::context::DeployContext;
use crate::error::Result;
use crate::manifest::{self, ManifestInputs};
use crate::runtime_check::{check_node_version, installed_node_version};
use crate::templates;
use crate::types::{DeployScope, TargetReference};

const FUNCTION_PREFIX: &str = "ssr_";
const CONFIRM_MESSAGE: &str =
    "Would you like to deploy your application to Firebase Hosting & Cloud Functions?";

/// Deterministic function identifier for a static target, e.g. `ssr_app`
/// for `app:build`.
pub fn function_id(static_target: &TargetReference) -> String {
    format!("{FUNCTION_PREFIX}{}", static_target.project())
}

pub async fn run(
    engine: &Engine<'_>,
    context: &DeployContext,
    static_target: &TargetReference,
    server_target: &TargetReference,
    options: &DeployOptions,
) -> Result<()> {
    let (static_out, _) = resolved_output(engine.builder, static_target).await?;
    let (server_out, server_options) = resolved_output(engine.builder, server_target).await?;

    let root = deploy_root(&static_out, SsrMode::Function)?;
    relocate(
        engine.fs,
        context.workspace_root(),
        &static_out,
        &server_out,
        &root,
    )?;
    let dest = context.workspace_root().join(&root);

    let workspace = read_workspace_manifest(context.workspace_root())?;
    let manifest = manifest::generate(
        engine.registry,
        ManifestInputs {
            mode: SsrMode::Function,
            server_options: &server_options,
            workspace: workspace.as_ref(),
            main: None,
        },
    )
    .await;

    if let Some(installed) = installed_node_version(engine.runner).await {
        check_node_version(&installed);
    }

    engine
        .fs
        .write(&dest.join("package.json"), &manifest.to_json()?)?;

    let function_id = function_id(static_target);
    engine.fs.write(
        &dest.join("index.js"),
        &templates::entry_point(&server_out, &function_id),
    )?;

    let scope = DeployScope::hosting_and_function(static_target.project(), function_id);

    let verdict = preview_gate(
        engine.api,
        engine.prompt,
        &scope,
        CONFIRM_MESSAGE,
        options.preview,
    )
    .await?;

    if verdict == Verdict::Declined {
        println!("Deploy aborted.");
        return Ok(());
    }

    engine
        .api
        .deploy(&DeployRequest {
            scope,
            cwd: context.workspace_root().to_path_buf(),
            token: context.token().map(str::to_string),
        })
        .await?;

    Ok(())
}
