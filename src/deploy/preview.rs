// ABOUTME: Optional local-emulator preview with an interactive confirmation gate.
// ABOUTME: Declining aborts the deploy successfully; nothing is rolled back.

use crate::api::{ApiError, DeployApi, ServeRequest};
use crate::types::DeployScope;

/// Interactive yes/no confirmation seam.
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Terminal prompt backed by dialoguer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl ConfirmPrompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> bool {
        dialoguer::Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Outcome of the preview gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Proceed,
    Declined,
}

/// Serve the scope's targets through the local emulator and ask whether to
/// continue. Skipped entirely when preview was not requested.
pub async fn preview_gate(
    api: &dyn DeployApi,
    prompt: &dyn ConfirmPrompt,
    scope: &DeployScope,
    message: &str,
    preview: bool,
) -> Result<Verdict, ApiError> {
    if !preview {
        return Ok(Verdict::Proceed);
    }

    api.serve(&ServeRequest::for_scope(scope)).await?;

    if prompt.confirm(message) {
        Ok(Verdict::Proceed)
    } else {
        Ok(Verdict::Declined)
    }
}
