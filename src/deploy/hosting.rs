// ABOUTME: Static-hosting-only pipeline.
// ABOUTME: One deploy call scoped to the hosting target, behind the preview gate.

use super::preview::{Verdict, preview_gate};
use super::Engine;
use crate::api::DeployRequest;
use crate::config::DeployOptions;
use crate::context::DeployContext;
use crate::error::Result;
use crate::types::{DeployScope, TargetReference};

const CONFIRM_MESSAGE: &str = "Would you like to deploy your application to Firebase Hosting?";

pub async fn run(
    engine: &Engine<'_>,
    context: &DeployContext,
    static_target: &TargetReference,
    options: &DeployOptions,
) -> Result<()> {
    let scope = DeployScope::hosting(static_target.project());

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
