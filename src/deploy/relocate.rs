// ABOUTME: Restages build outputs into a deploy-ready directory tree.
// ABOUTME: The destination root is disposable and fully regenerated each run.

use crate::config::SsrMode;
use crate::error::{Error, Result};
use crate::fshost::FsHost;
use std::path::{Path, PathBuf};

/// Entry document the relocator backs up so a generated server can serve a
/// different one under the original name.
pub const ENTRY_DOCUMENT: &str = "index.html";
pub const ENTRY_DOCUMENT_BACKUP: &str = "index.original.html";

const FUNCTIONS_SEGMENT: &str = "functions";
const CONTAINER_SEGMENT: &str = "run";

/// Compute the destination root for a mode by swapping the trailing path
/// segment of the static output (the renderer folder, e.g. `browser`) for
/// the mode's token. This positional convention is inherited from the build
/// system's output layout; a path without a parent segment is rejected
/// rather than silently reused.
pub fn deploy_root(static_out: &str, mode: SsrMode) -> Result<PathBuf> {
    let segment = match mode {
        SsrMode::Function => FUNCTIONS_SEGMENT,
        SsrMode::CloudRun => CONTAINER_SEGMENT,
        SsrMode::None => {
            return Err(Error::Config(
                "static hosting does not restage artifacts".to_string(),
            ));
        }
    };

    let path = Path::new(static_out);
    match path.parent() {
        Some(parent) if path.file_name().is_some() && !parent.as_os_str().is_empty() => {
            Ok(parent.join(segment))
        }
        _ => Err(Error::Config(format!(
            "cannot derive a deploy root from output path '{static_out}'"
        ))),
    }
}

/// Restage the static and server outputs under `root`. All paths are
/// workspace-relative, matching how the build system reports them.
///
/// The root is removed first, making relocation idempotent. The copies are
/// not transactional; a mid-copy failure leaves partial state behind, which
/// the next run wipes.
pub fn relocate(
    fs: &dyn FsHost,
    workspace: &Path,
    static_out: &str,
    server_out: &str,
    root: &Path,
) -> Result<()> {
    let dest = workspace.join(root);
    fs.remove_all(&dest)?;
    fs.copy_all(&workspace.join(static_out), &dest.join(static_out))?;
    fs.copy_all(&workspace.join(server_out), &dest.join(server_out))?;

    // The server build hardcodes a dependency on the original document path;
    // best effort, the document may legitimately be absent.
    let relocated_static = dest.join(static_out);
    let _ = fs.rename(
        &relocated_static.join(ENTRY_DOCUMENT),
        &relocated_static.join(ENTRY_DOCUMENT_BACKUP),
    );

    Ok(())
}
