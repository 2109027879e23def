// ABOUTME: Test support utilities.
// ABOUTME: Recording and scripted doubles for the engine's collaborator seams.

// Each test binary only uses some of these doubles.
#![allow(dead_code)]

use async_trait::async_trait;
use firelift::api::{ApiError, DeployApi, DeployRequest, ServeRequest};
use firelift::build::{BuildError, BuildSystem};
use firelift::deploy::ConfirmPrompt;
use firelift::manifest::PackageRegistry;
use firelift::process::{ProcessError, ProcessResult, ProcessRunner};
use firelift::types::{TargetOptions, TargetReference};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Every call made against the recording deploy API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Login,
    UseProject(String),
    Deploy { scope: String, token: Option<String> },
    Serve { targets: Vec<String> },
}

/// Deploy API double that records calls and can fail on demand.
#[derive(Default)]
pub struct RecordingApi {
    pub calls: Mutex<Vec<ApiCall>>,
    pub fail_use_project: bool,
    pub fail_deploy: bool,
}

impl RecordingApi {
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn deploy_calls(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, ApiCall::Deploy { .. }))
            .collect()
    }
}

#[async_trait]
impl DeployApi for RecordingApi {
    async fn login(&self) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(ApiCall::Login);
        Ok(())
    }

    async fn use_project(&self, project: &str) -> Result<(), ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(ApiCall::UseProject(project.to_string()));
        if self.fail_use_project {
            return Err(ApiError::UseProject {
                project: project.to_string(),
                reason: "no such project".to_string(),
            });
        }
        Ok(())
    }

    async fn deploy(&self, request: &DeployRequest) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(ApiCall::Deploy {
            scope: request.scope.to_string(),
            token: request.token.clone(),
        });
        if self.fail_deploy {
            return Err(ApiError::Deploy("release rejected".to_string()));
        }
        Ok(())
    }

    async fn serve(&self, request: &ServeRequest) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(ApiCall::Serve {
            targets: request.targets.clone(),
        });
        Ok(())
    }
}

/// Build system double with scripted per-target options.
pub struct ScriptedBuilder {
    pub options: HashMap<String, TargetOptions>,
    pub active: Option<TargetReference>,
    pub scheduled: Mutex<Vec<TargetReference>>,
    pub fail_target: Option<TargetReference>,
}

impl ScriptedBuilder {
    pub fn new(active: Option<TargetReference>) -> Self {
        Self {
            options: HashMap::new(),
            active,
            scheduled: Mutex::new(Vec::new()),
            fail_target: None,
        }
    }

    pub fn with_output(mut self, target: &str, output_path: &str) -> Self {
        self.options.insert(
            target.to_string(),
            TargetOptions {
                output_path: Some(output_path.to_string()),
                ..Default::default()
            },
        );
        self
    }

    pub fn with_options(mut self, target: &str, options: TargetOptions) -> Self {
        self.options.insert(target.to_string(), options);
        self
    }

    pub fn scheduled(&self) -> Vec<TargetReference> {
        self.scheduled.lock().unwrap().clone()
    }
}

#[async_trait]
impl BuildSystem for ScriptedBuilder {
    async fn schedule(
        &self,
        reference: &TargetReference,
        _options: &HashMap<String, Value>,
    ) -> Result<(), BuildError> {
        self.scheduled.lock().unwrap().push(reference.clone());
        if self.fail_target.as_ref() == Some(reference) {
            return Err(BuildError::TargetFailed(
                reference.clone(),
                "compile error".to_string(),
            ));
        }
        Ok(())
    }

    async fn target_options(
        &self,
        reference: &TargetReference,
    ) -> Result<TargetOptions, BuildError> {
        Ok(self
            .options
            .get(&reference.to_string())
            .cloned()
            .unwrap_or_default())
    }

    fn active_target(&self) -> Option<&TargetReference> {
        self.active.as_ref()
    }
}

/// Process runner double: records command lines, fails on a chosen prefix.
#[derive(Default)]
pub struct FakeRunner {
    pub commands: Mutex<Vec<String>>,
    pub fail_prefix: Option<String>,
}

impl FakeRunner {
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
    async fn run(&self, command: &str) -> Result<ProcessResult, ProcessError> {
        self.commands.lock().unwrap().push(command.to_string());
        if let Some(prefix) = &self.fail_prefix {
            if command.starts_with(prefix.as_str()) {
                return Err(ProcessError::Failed {
                    command: command.to_string(),
                    status: 1,
                    stderr: "boom".to_string(),
                });
            }
        }
        Ok(ProcessResult {
            status: 0,
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

/// Registry double backed by a fixed map.
#[derive(Default)]
pub struct MapRegistry {
    pub versions: HashMap<String, String>,
}

impl MapRegistry {
    pub fn with(mut self, name: &str, version: &str) -> Self {
        self.versions.insert(name.to_string(), version.to_string());
        self
    }
}

#[async_trait]
impl PackageRegistry for MapRegistry {
    async fn installed_version(&self, name: &str) -> Option<String> {
        self.versions.get(name).cloned()
    }
}

/// Prompt double with a canned answer.
pub struct CannedPrompt {
    pub answer: bool,
    pub asked: AtomicBool,
}

impl CannedPrompt {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: AtomicBool::new(false),
        }
    }

    pub fn was_asked(&self) -> bool {
        self.asked.load(Ordering::SeqCst)
    }
}

impl ConfirmPrompt for CannedPrompt {
    fn confirm(&self, _message: &str) -> bool {
        self.asked.store(true, Ordering::SeqCst);
        self.answer
    }
}
