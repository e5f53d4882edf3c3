//! The engine's error taxonomy.
//!
//! Every structured error here is a [`thiserror`] enum; callers at the process
//! boundary (the CLI, or an HTTP layer) are expected to wrap these in their
//! own `anyhow`/`color-eyre` context rather than the library doing so itself.

use std::io;

use crate::checker::CheckerError;

/// Failure to create, populate, or tear down a [`crate::workspace::Workspace`].
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("failed to create workspace directory")]
    Create(#[source] io::Error),

    #[error("failed to write workspace file")]
    Write(#[source] io::Error),
}

/// Failure to drive the compile step of a job.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("failed to spawn the build driver")]
    Spawn(#[source] io::Error),

    #[error("failed to wait on the build driver")]
    Wait(#[source] io::Error),
}

/// Failure to drive the execute step of a job.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("failed to spawn the compiled program")]
    Spawn(#[source] io::Error),

    #[error("failed to write to the compiled program's stdin")]
    WriteStdin(#[source] io::Error),

    #[error("failed to wait on the compiled program")]
    Wait(#[source] io::Error),
}

/// A host-side failure surfaced from any stage of a job.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("workspace error")]
    Workspace(#[from] WorkspaceError),

    #[error("compile error")]
    Compile(#[from] CompileError),

    #[error("execution error")]
    Execution(#[from] ExecutionError),

    #[error("checker error")]
    Checker(#[from] CheckerError),
}
