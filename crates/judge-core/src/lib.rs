//! The sandboxed build-and-execute engine.
//!
//! Materializes a per-job [`workspace::Workspace`], drives a build and (on
//! success) an execution of the compiled program through [`engine`], and
//! normalizes diagnostics through [`sanitize`]. [`checker`] implements the
//! small scripting dialect testing jobs use to judge an execution's output.

pub mod checker;
pub mod config;
pub mod engine;
pub mod error;
pub mod messages;
pub mod model;
pub mod sanitize;
pub mod workspace;
pub mod wrapper;

pub use config::EngineConfig;
pub use error::EngineError;
pub use model::{DebugRequest, DebugResult, TestCase, TestsRequest, TestsResult};
