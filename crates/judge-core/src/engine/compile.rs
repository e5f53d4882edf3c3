//! The compile stage: drives `cargo build --release --quiet` in a
//! workspace's project directory.

use std::process::Command;
use std::time::Duration;

use crate::error::CompileError;
use crate::messages;
use crate::sanitize;
use crate::workspace::Workspace;

/// Compiles `workspace`. Returns `None` on success, or a sanitized
/// diagnostic on failure (including timeout).
pub fn compile(workspace: &Workspace, timeout: Duration) -> Result<Option<String>, CompileError> {
    let mut command = Command::new("cargo");
    command
        .arg("build")
        .arg("--release")
        .arg("--quiet")
        .current_dir(workspace.project_dir());

    let child = super::child::spawn(command, false).map_err(CompileError::Spawn)?;
    let outcome = super::child::drive(child, None, timeout).map_err(CompileError::Wait)?;

    if outcome.timed_out {
        tracing::warn!(project_dir = ?workspace.project_dir(), "compile timed out");
        return Ok(Some(messages::TIMEOUT.to_string()));
    }

    let success = outcome.status.is_some_and(|s| s.success());
    let stderr = String::from_utf8_lossy(&outcome.stderr);

    if success && stderr.trim().is_empty() {
        return Ok(None);
    }

    Ok(sanitize::clean_error(Some(&stderr)))
}
