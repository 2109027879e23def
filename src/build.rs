// ABOUTME: Build coordination against the external build system.
// ABOUTME: Prerender builds run exclusively; static and server builds fan out together.

use crate::types::{BuildTarget, TargetOptions, TargetReference};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no active build target context")]
    NoActiveTarget,

    #[error("build target '{0}' failed: {1}")]
    TargetFailed(TargetReference, String),

    #[error("cannot read options for build target '{0}': {1}")]
    Options(TargetReference, String),
}

/// The external build system.
#[async_trait]
pub trait BuildSystem: Send + Sync {
    /// Schedule a target and await its result.
    async fn schedule(
        &self,
        reference: &TargetReference,
        options: &HashMap<String, Value>,
    ) -> Result<(), BuildError>;

    /// Read the configured options of a target without building it.
    async fn target_options(&self, reference: &TargetReference)
    -> Result<TargetOptions, BuildError>;

    /// The target context the engine was invoked under, if any.
    fn active_target(&self) -> Option<&TargetReference>;
}

/// Run the builds a deploy depends on.
///
/// A prerender target runs exclusively; otherwise the static build and (if
/// present) the server build are scheduled concurrently and awaited
/// together. Any build failure propagates unchanged; there is no retry.
pub async fn run_builds(
    builder: &dyn BuildSystem,
    static_target: &BuildTarget,
    server_target: Option<&BuildTarget>,
    prerender_target: Option<&BuildTarget>,
) -> Result<(), BuildError> {
    if let Some(prerender) = prerender_target {
        return builder
            .schedule(&prerender.reference, &prerender.options)
            .await;
    }

    if builder.active_target().is_none() {
        return Err(BuildError::NoActiveTarget);
    }

    let static_build = builder.schedule(&static_target.reference, &static_target.options);
    let server_build = async {
        match server_target {
            Some(server) => builder.schedule(&server.reference, &server.options).await,
            None => Ok(()),
        }
    };

    tokio::try_join!(static_build, server_build)?;
    Ok(())
}
