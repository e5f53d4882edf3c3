//! The build-and-execute engine: compile, execute, and the orchestration
//! that ties them to a workspace and, for testing jobs, the checker.

mod child;
pub mod compile;
pub mod execute;
pub mod orchestrate;
mod privilege;

pub use orchestrate::{debug, testing};
