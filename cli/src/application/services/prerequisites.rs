//! Application service — required tool checks.

use anyhow::Result;

use crate::application::ports::{ProgressReporter, ToolLocator};
use crate::domain::error::ProvisionError;

/// Tools that must be on `PATH` before anything else runs.
pub const REQUIRED_TOOLS: &[&str] = &["docker", "curl", "openssl", "git"];

const DOCKER_INSTALL_GUIDE: &str = "https://docs.docker.com/engine/install/ubuntu/";

/// Remediation hint shown next to a missing tool.
#[must_use]
pub fn install_hint(tool: &str) -> String {
    match tool {
        "docker" => format!("Docker installation guide: {DOCKER_INSTALL_GUIDE}"),
        other => format!("You can install it with: sudo apt-get install {other}"),
    }
}

/// Verify every tool in `tools` resolves, failing on the first one missing.
///
/// # Errors
///
/// Returns `MissingDependency` naming the first missing tool.
pub fn check_prerequisites(
    locator: &impl ToolLocator,
    reporter: &impl ProgressReporter,
    tools: &[&str],
) -> Result<()> {
    for tool in tools {
        match locator.locate(tool) {
            Some(path) => tracing::debug!(tool, path = %path.display(), "tool found"),
            None => {
                return Err(ProvisionError::MissingDependency {
                    tool: (*tool).to_string(),
                    hint: Some(install_hint(tool)),
                }
                .into());
            }
        }
    }
    reporter.success("All required dependencies found");
    Ok(())
}
