//! Per-job scratch project directory.
//!
//! A [`Workspace`] owns a uniquely-named `cargo` package directory for the
//! lifetime of one job. It is always released: the engine calls
//! [`Workspace::remove`] explicitly on every exit path, and a [`Drop`] impl
//! backs that up so a panic mid-job still tears the directory down.

use std::path::{Path, PathBuf};

use judge_stdx::fs as stdx_fs;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::error::WorkspaceError;
use crate::wrapper;

static MAIN_FN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bfn\s+main\s*\(").expect("static regex is valid"));

/// A freshly materialized, single-use `cargo` package directory.
pub struct Workspace {
    project_dir: PathBuf,
    source_path: PathBuf,
    #[allow(dead_code)]
    manifest_path: PathBuf,
    binary_path: PathBuf,
    removed: bool,
}

impl Workspace {
    /// Creates a new workspace under `root`, writing the (possibly wrapped)
    /// `code` to `src/main.rs` and a minimal manifest next to it.
    pub fn create(root: &Path, code: &str) -> Result<Self, WorkspaceError> {
        let id = Uuid::new_v4().simple().to_string();
        let package_name = format!("sandbox_proj_{id}");

        let project_dir = root.join(&package_name);
        let src_dir = project_dir.join("src");

        stdx_fs::create_dir(&src_dir).map_err(WorkspaceError::Create)?;

        let source = if MAIN_FN.is_match(code) {
            code.to_string()
        } else {
            wrapper::wrap_if_needed(code)
        };

        let source_path = src_dir.join("main.rs");
        std::fs::write(&source_path, source).map_err(WorkspaceError::Write)?;

        let manifest_path = project_dir.join("Cargo.toml");
        let manifest = format!(
            "[package]\nname = \"{package_name}\"\nversion = \"0.1.0\"\nedition = \"2021\"\n\n[dependencies]\n"
        );
        std::fs::write(&manifest_path, manifest).map_err(WorkspaceError::Write)?;

        let binary_name = package_name.replace('-', "_");
        let binary_path = project_dir
            .join("target")
            .join("release")
            .join(binary_name);

        Ok(Self {
            project_dir,
            source_path,
            manifest_path,
            binary_path,
            removed: false,
        })
    }

    /// The directory `cargo build` should run in.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// The path the wrapped/raw source was written to.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// The predicted path of the release binary once compiled.
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Best-effort, idempotent removal of the project directory.
    pub fn remove(&mut self) {
        if self.removed {
            return;
        }

        if let Err(err) = stdx_fs::remove_dir(&self.project_dir) {
            tracing::warn!(project_dir = ?self.project_dir, error = %err, "failed to remove workspace");
        }

        self.removed = true;
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        self.remove();
    }
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    #[test]
    fn create_writes_manifest_and_source() {
        let root = TempDir::new("judge-core-workspace").unwrap();
        let ws = Workspace::create(root.path(), "fn main() { println!(\"hi\"); }").unwrap();

        assert!(ws.source_path().is_file());
        assert!(ws.project_dir().join("Cargo.toml").is_file());
    }

    #[test]
    fn create_wraps_code_without_entry_point() {
        let root = TempDir::new("judge-core-workspace").unwrap();
        let ws = Workspace::create(root.path(), "let x = 1;").unwrap();

        let contents = std::fs::read_to_string(ws.source_path()).unwrap();
        assert!(contents.contains("fn main()"));
    }

    #[test]
    fn create_recognizes_loosely_formatted_main() {
        let root = TempDir::new("judge-core-workspace").unwrap();
        let code = "fn main ()\n{\n    println!(\"hi\");\n}\n";
        let ws = Workspace::create(root.path(), code).unwrap();

        let contents = std::fs::read_to_string(ws.source_path()).unwrap();
        assert_eq!(contents, code);
        assert_eq!(contents.matches("fn main").count(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let root = TempDir::new("judge-core-workspace").unwrap();
        let mut ws = Workspace::create(root.path(), "fn main() {}").unwrap();
        let project_dir = ws.project_dir().to_path_buf();

        ws.remove();
        ws.remove();

        assert!(!project_dir.exists());
    }

    #[test]
    fn drop_removes_directory() {
        let root = TempDir::new("judge-core-workspace").unwrap();
        let project_dir;
        {
            let ws = Workspace::create(root.path(), "fn main() {}").unwrap();
            project_dir = ws.project_dir().to_path_buf();
        }

        assert!(!project_dir.exists());
    }
}
