//! Running Node version detection.

use std::process::Command;

use crate::error::{Result, ShieldError};
use crate::version::RunningVersion;

/// Ask `node_binary --version` for the running Node version.
///
/// Fails if the binary cannot be spawned, exits non-zero, or prints nothing.
pub fn detect_node_version(node_binary: &str) -> Result<RunningVersion> {
    let output = Command::new(node_binary)
        .arg("--version")
        .output()
        .map_err(|e| ShieldError::RuntimeUnavailable(format!("failed to run {node_binary}: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ShieldError::RuntimeUnavailable(format!(
            "{node_binary} --version failed: {}",
            stderr.trim()
        )));
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if version.is_empty() {
        return Err(ShieldError::RuntimeUnavailable(format!(
            "{node_binary} --version returned empty output"
        )));
    }

    Ok(RunningVersion::new(version))
}

/// Resolve the running version, preferring an explicit override.
pub fn running_version(node_binary: &str, override_version: Option<&str>) -> Result<RunningVersion> {
    match override_version {
        Some(version) => {
            tracing::debug!("Using configured Node version {}", version);
            Ok(RunningVersion::new(version))
        }
        None => detect_node_version(node_binary),
    }
}
