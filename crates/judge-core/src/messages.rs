//! Canonical, stable, user-visible diagnostic messages.
//!
//! Every identity named in the external interface (timeout, panic, …) has a
//! fixed string here. Callers that need to recognize a particular failure
//! kind programmatically should match on these constants rather than parsing
//! prose.

pub const TIMEOUT: &str = "Program execution time limit exceeded.";
pub const CHECKER_SIGNATURE_MISSING: &str =
    "Checker must define a function named `checker`.";
pub const CHECKER_NO_RETURN: &str = "Checker function must contain a return statement.";
pub const CHECKER_NON_BOOLEAN: &str = "Checker must return a boolean value.";
pub const CHECKER_CALL_FAILED: &str = "Invalid checker. See details.";
pub const EXECUTION_FAILURE: &str = "Unexpected error during program execution.";
pub const COMPILE_FAILURE: &str = "Compilation error.";
pub const MISSING_STDIN: &str = "Program expected standard input that was not provided.";
pub const PANIC: &str = "Program panicked during execution.";
