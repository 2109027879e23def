// ABOUTME: Parsed build-target references of the form "project:configuration".
// ABOUTME: Parsing happens once at the boundary; downstream code never splits strings.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseTargetError {
    #[error("target reference cannot be empty")]
    Empty,

    #[error("target reference '{0}' is missing a ':' separator")]
    MissingSeparator(String),

    #[error("target reference '{0}' has an empty project id")]
    EmptyProject(String),

    #[error("target reference '{0}' has an empty configuration id")]
    EmptyConfiguration(String),
}

/// A reference to one build target in the workspace, e.g. `app:build`.
///
/// The portion before the first `:` names the project, everything after it
/// names the build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetReference {
    project: String,
    configuration: String,
}

impl TargetReference {
    pub fn parse(value: &str) -> Result<Self, ParseTargetError> {
        if value.is_empty() {
            return Err(ParseTargetError::Empty);
        }

        let (project, configuration) = value
            .split_once(':')
            .ok_or_else(|| ParseTargetError::MissingSeparator(value.to_string()))?;

        if project.is_empty() {
            return Err(ParseTargetError::EmptyProject(value.to_string()));
        }

        if configuration.is_empty() {
            return Err(ParseTargetError::EmptyConfiguration(value.to_string()));
        }

        Ok(Self {
            project: project.to_string(),
            configuration: configuration.to_string(),
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn configuration(&self) -> &str {
        &self.configuration
    }
}

impl fmt::Display for TargetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.project, self.configuration)
    }
}
