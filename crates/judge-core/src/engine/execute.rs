//! The execute stage: runs the compiled binary against user input under a
//! reduced-privilege execution context with a wall-clock timeout.

use std::process::Command;
use std::time::Duration;

use crate::error::ExecutionError;
use crate::messages;
use crate::model::ExecuteOutcome;
use crate::sanitize;
use crate::workspace::Workspace;

use super::privilege;

/// Runs `workspace`'s compiled binary, piping `data_in` to its stdin.
pub fn execute(
    workspace: &Workspace,
    data_in: Option<&str>,
    timeout: Duration,
    sandbox_user_uid: u32,
) -> Result<ExecuteOutcome, ExecutionError> {
    let mut command = Command::new(workspace.binary_path());
    command.env("RUST_BACKTRACE", "0");

    privilege::drop_privileges(&mut command, sandbox_user_uid);

    let normalized_input = data_in.map(|s| s.replace('\n', " "));

    let child = super::child::spawn(command, true).map_err(ExecutionError::Spawn)?;
    let outcome = super::child::drive(child, normalized_input.as_deref(), timeout)
        .map_err(ExecutionError::Wait)?;

    if outcome.timed_out {
        return Ok(ExecuteOutcome {
            result: None,
            error: Some(messages::TIMEOUT.to_string()),
        });
    }

    let stdout_raw = String::from_utf8_lossy(&outcome.stdout).into_owned();
    let stderr_raw = String::from_utf8_lossy(&outcome.stderr).into_owned();
    let cleaned_stderr = sanitize::strip_backtrace(&stderr_raw);

    if cleaned_stderr.contains("panicked at") {
        let combined = format!("{stdout_raw}{cleaned_stderr}");
        Ok(ExecuteOutcome {
            result: sanitize::clean_str(Some(&combined)),
            error: Some(messages::PANIC.to_string()),
        })
    } else {
        let error = if cleaned_stderr.trim().is_empty() {
            None
        } else {
            sanitize::clean_error(Some(&cleaned_stderr))
        };

        Ok(ExecuteOutcome {
            result: sanitize::clean_str(Some(&stdout_raw)),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempdir::TempDir;

    fn write_script(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("script.sh");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "#!/bin/sh").unwrap();
        writeln!(f, "{body}").unwrap();
        drop(f);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }

    #[test]
    fn echoes_stdin_to_stdout() {
        let dir = TempDir::new("judge-core-execute").unwrap();
        let script = write_script(dir.path(), "cat");

        let mut command = Command::new(&script);
        command.env("RUST_BACKTRACE", "0");
        let child = super::super::child::spawn(command, true).unwrap();
        let outcome =
            super::super::child::drive(child, Some("hello"), Duration::from_secs(5)).unwrap();

        assert!(!outcome.timed_out);
        assert_eq!(String::from_utf8_lossy(&outcome.stdout), "hello");
    }

    #[test]
    fn times_out_on_infinite_loop() {
        let dir = TempDir::new("judge-core-execute").unwrap();
        let script = write_script(dir.path(), "while true; do :; done");

        let mut command = Command::new(&script);
        let child = super::super::child::spawn(command, false).unwrap();
        let outcome = super::super::child::drive(child, None, Duration::from_millis(200)).unwrap();

        assert!(outcome.timed_out);
    }
}
