//! Command line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const EXIT_OK: u8 = 0;
pub const EXIT_TEST_FAILURE: u8 = 1;
pub const EXIT_OPERATION_FAILURE: u8 = 2;
pub const EXIT_ERROR: u8 = 3;

/// Downcast-matched in `main`'s error chain to select `EXIT_OPERATION_FAILURE`:
/// the engine itself reported a host-side failure (not a normal job result).
#[derive(Debug)]
pub struct OperationFailure(pub Box<dyn std::error::Error + Send + Sync + 'static>);

impl std::fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for OperationFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<judge_core::EngineError> for OperationFailure {
    fn from(value: judge_core::EngineError) -> Self {
        OperationFailure(Box::new(value))
    }
}

/// Downcast-matched in `main`'s error chain to select `EXIT_TEST_FAILURE`:
/// the job ran to completion but at least one test case did not pass.
#[derive(Debug, thiserror::Error)]
#[error("not all test cases passed")]
pub struct TestFailure;

#[derive(Debug, Parser)]
#[command(name = "judge-cli", version, about = "Run a single debug or testing job through the sandboxed build-and-execute engine")]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity; may be repeated.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a single compile + execute job and print its raw result.
    Debug {
        /// Path to a JSON-encoded `DebugRequest`; reads stdin if omitted.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Run a single compile followed by many checker-judged executions.
    Testing {
        /// Path to a JSON-encoded `TestsRequest`; reads stdin if omitted.
        #[arg(long)]
        input: Option<PathBuf>,
    },
}
