// ABOUTME: Warns when the local Node version does not satisfy the manifest's engine range.
// ABOUTME: Advisory only; a mismatch never blocks a deploy.

use crate::manifest::{NODE_MAJOR, version_range};
use crate::process::ProcessRunner;
use semver::{Version, VersionReq};

/// The locally installed Node version, via `node --version`. Any failure
/// yields None; the check is skipped in that case.
pub async fn installed_node_version(runner: &dyn ProcessRunner) -> Option<String> {
    let result = runner.run("node --version").await.ok()?;
    let version = result.stdout.trim().trim_start_matches('v');
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// Compare an installed version against the engine constraint and warn on
/// mismatch. Unparseable input is treated as a mismatch worth warning about.
pub fn check_node_version(installed: &str) {
    let range = version_range(NODE_MAJOR);
    let satisfied = matches!(
        (Version::parse(installed), VersionReq::parse(&range)),
        (Ok(version), Ok(requirement)) if requirement.matches(&version)
    );
    if !satisfied {
        tracing::warn!(
            "your Node.js version ({installed}) does not match the deploy runtime ({NODE_MAJOR})"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_major_satisfies_range() {
        let requirement = VersionReq::parse(&version_range(NODE_MAJOR)).unwrap();
        assert!(requirement.matches(&Version::parse("18.19.1").unwrap()));
        assert!(!requirement.matches(&Version::parse("20.11.0").unwrap()));
    }
}
