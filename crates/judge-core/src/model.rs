//! Request/response data types exchanged with the engine.
//!
//! These are plain data: the engine neither parses nor produces JSON itself,
//! but the types derive [`serde`] traits so a thin caller (the CLI, or an
//! external HTTP layer) can do so without a translation layer.

use serde::{Deserialize, Serialize};

/// A single debug-mode request: one source file, one optional stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugRequest {
    pub code: String,
    #[serde(default)]
    pub data_in: Option<String>,
}

/// The result of a debug-mode run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebugResult {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One test case within a [`TestsRequest`].
///
/// `result`, `error` and `ok` are populated by the engine; callers submit a
/// case with only `data_in`/`data_out` set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub data_in: Option<String>,
    pub data_out: String,

    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub ok: bool,
}

impl TestCase {
    /// Creates a new, not-yet-run test case.
    pub fn new(data_in: Option<String>, data_out: String) -> Self {
        Self {
            data_in,
            data_out,
            result: None,
            error: None,
            ok: false,
        }
    }
}

/// A testing-mode request: one source file, one checker, many test cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestsRequest {
    pub code: String,
    pub checker: String,
    pub tests: Vec<TestCase>,
}

/// The result of a testing-mode run: the original cases, mutated in place,
/// plus the derived aggregate counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestsResult {
    pub tests: Vec<TestCase>,
    pub num: usize,
    pub num_ok: usize,
    pub ok: bool,
}

impl TestsResult {
    /// Builds the aggregate result from a fully-run sequence of test cases.
    pub fn from_tests(tests: Vec<TestCase>) -> Self {
        let num = tests.len();
        let num_ok = tests.iter().filter(|t| t.ok).count();

        Self {
            tests,
            num,
            num_ok,
            ok: num == num_ok,
        }
    }
}

/// The outcome of a single execution of the compiled program.
#[derive(Debug, Clone, Default)]
pub struct ExecuteOutcome {
    pub result: Option<String>,
    pub error: Option<String>,
}
