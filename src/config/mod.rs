// ABOUTME: Caller-supplied deploy options and workspace manifest access.
// ABOUTME: Options are read-only; resolved values live in the DeployContext.

mod workspace;

pub use workspace::{WorkspaceManifest, read_workspace_manifest};

use clap::ValueEnum;

/// How the server-rendered portion of the application is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SsrMode {
    /// Static hosting only, even with a server build present.
    #[default]
    None,
    /// Serverless function hosting.
    Function,
    /// Managed-container hosting on Cloud Run.
    CloudRun,
}

/// Deploy options as supplied by the caller. Never mutated by the engine.
#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    pub ssr: SsrMode,
    /// Run the local emulator and ask for confirmation before deploying.
    pub preview: bool,
    /// Override for the managed-container service id.
    pub service_id: Option<String>,
}
