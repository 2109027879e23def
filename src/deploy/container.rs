// ABOUTME: Managed-container pipeline: image build, Cloud Run deploy, static deploy.
// ABOUTME: Steps are strictly sequential; the first failure aborts the rest.

use super::relocate::{deploy_root, relocate};
use super::{Engine, resolved_output};
use crate::api::DeployRequest;
use crate::config::{DeployOptions, SsrMode, read_workspace_manifest};
use crate::context::DeployContext;
use crate::error::{Error, Result};
use crate::manifest::{self, ManifestInputs};
use crate::runtime_check::{check_node_version, installed_node_version};
use crate::templates;
use crate::types::{DeployScope, TargetReference};

/// Service id used when the caller does not override it.
pub const DEFAULT_SERVICE_ID: &str = "ssr";

const CONTAINER_REGION: &str = "us-central1";

pub async fn run(
    engine: &Engine<'_>,
    context: &DeployContext,
    static_target: &TargetReference,
    server_target: &TargetReference,
    options: &DeployOptions,
) -> Result<()> {
    // Before any side effect: the emulator cannot simulate a container.
    if options.preview {
        return Err(Error::Config(
            "preview is not supported for managed-container deploys".to_string(),
        ));
    }

    let (static_out, _) = resolved_output(engine.builder, static_target).await?;
    let (server_out, server_options) = resolved_output(engine.builder, server_target).await?;

    let root = deploy_root(&static_out, SsrMode::CloudRun)?;
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
            mode: SsrMode::CloudRun,
            server_options: &server_options,
            workspace: workspace.as_ref(),
            main: Some(format!("{server_out}/main.js")),
        },
    )
    .await;

    if let Some(installed) = installed_node_version(engine.runner).await {
        check_node_version(&installed);
    }

    engine
        .fs
        .write(&dest.join("package.json"), &manifest.to_json()?)?;
    engine
        .fs
        .write(&dest.join("Dockerfile"), &templates::dockerfile())?;

    let service_id = options
        .service_id
        .clone()
        .unwrap_or_else(|| DEFAULT_SERVICE_ID.to_string());
    let project = context.project();
    let image = format!("gcr.io/{project}/{service_id}");

    println!("📦 Deploying to Cloud Run");
    engine
        .runner
        .run(&format!(
            "gcloud builds submit {} --tag {image} --project {project} --quiet",
            dest.display()
        ))
        .await?;
    engine
        .runner
        .run(&format!(
            "gcloud run deploy {service_id} --image {image} --project {project} \
             --platform managed --allow-unauthenticated --region={CONTAINER_REGION} --quiet"
        ))
        .await?;

    // The container serves the dynamic portion itself; only static assets go
    // through the deployment API.
    engine
        .api
        .deploy(&DeployRequest {
            scope: DeployScope::hosting(static_target.project()),
            cwd: context.workspace_root().to_path_buf(),
            token: context.token().map(str::to_string),
        })
        .await?;

    Ok(())
}
