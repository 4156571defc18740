//! Target architecture detection.
//!
//! Asks the host's `dpkg` which architecture packages are built for. Every
//! later artefact name and control field depends on the answer, so any
//! failure here aborts the build.

use crate::error::{PackagerError, Result};
use crate::executor::{CommandExecutor, stderr_message};
use crate::identity::Architecture;
use log::debug;

/// Command queried for the host architecture.
pub const ARCHITECTURE_COMMAND: &str = "dpkg";

/// Arguments passed to [`ARCHITECTURE_COMMAND`].
pub const ARCHITECTURE_ARGS: &[&str] = &["--print-architecture"];

/// Detect the target architecture via `dpkg --print-architecture`.
///
/// # Errors
///
/// Returns [`PackagerError::ArchitectureDetection`] if the command cannot be
/// spawned, exits unsuccessfully, or prints nothing.
pub fn detect_architecture(executor: &dyn CommandExecutor) -> Result<Architecture> {
    let output = executor
        .run(ARCHITECTURE_COMMAND, ARCHITECTURE_ARGS)
        .map_err(|e| PackagerError::ArchitectureDetection {
            reason: format!("failed to run {ARCHITECTURE_COMMAND}: {e}"),
        })?;

    if !output.status.success() {
        let stderr = stderr_message(&output);
        let reason = if stderr.is_empty() {
            format!("{ARCHITECTURE_COMMAND} exited with {}", output.status)
        } else {
            format!("{ARCHITECTURE_COMMAND} exited with {}: {stderr}", output.status)
        };
        return Err(PackagerError::ArchitectureDetection { reason });
    }

    let architecture = Architecture::try_from(String::from_utf8_lossy(&output.stdout).as_ref())?;
    debug!(target: "architecture", "detected architecture {architecture}");
    Ok(architecture)
}
