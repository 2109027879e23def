// ABOUTME: Deploy scopes restricting what a single deploy call may touch.
// ABOUTME: Rendered to the exact `--only` string passed to the deployment CLI.

use std::fmt;

/// The set of sub-resources one deploy call is permitted to affect.
///
/// A scope is computed once per pipeline run; the deploy executor passes it
/// through verbatim and never widens it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployScope {
    /// Static hosting for one project.
    HostingOnly { project: String },
    /// Static hosting plus one serverless function.
    HostingAndFunction { project: String, function: String },
}

impl DeployScope {
    pub fn hosting(project: impl Into<String>) -> Self {
        DeployScope::HostingOnly {
            project: project.into(),
        }
    }

    pub fn hosting_and_function(project: impl Into<String>, function: impl Into<String>) -> Self {
        DeployScope::HostingAndFunction {
            project: project.into(),
            function: function.into(),
        }
    }

    /// Emulator target list matching this scope.
    pub fn serve_targets(&self) -> Vec<String> {
        match self {
            DeployScope::HostingOnly { project } => vec![format!("hosting:{project}")],
            DeployScope::HostingAndFunction { project, function } => vec![
                format!("hosting:{project}"),
                format!("functions:{function}"),
            ],
        }
    }
}

impl fmt::Display for DeployScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployScope::HostingOnly { project } => write!(f, "hosting:{project}"),
            DeployScope::HostingAndFunction { project, function } => {
                write!(f, "hosting:{project},functions:{function}")
            }
        }
    }
}
