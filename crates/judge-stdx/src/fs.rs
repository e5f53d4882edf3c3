//! Helper functions for managing the filesystem.

use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use crate::result::ResultEx;

/// Creates a directory and its parents, but doesn't fail if it already exists.
///
/// # Example
/// ```no_run
/// # use judge_stdx::fs::create_dir;
/// create_dir("foo/bar")?;
/// create_dir("foo/bar")?; // second time doesn't fail
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn create_dir<P>(path: P) -> io::Result<()>
where
    P: AsRef<Path>,
{
    fn inner(path: &Path) -> io::Result<()> {
        fs::create_dir_all(path).ignore_default(|e| e.kind() == ErrorKind::AlreadyExists)
    }

    inner(path.as_ref())
}

/// Recursively removes a directory, but doesn't fail if it doesn't exist.
///
/// # Example
/// ```no_run
/// # use judge_stdx::fs::remove_dir;
/// remove_dir("foo")?;
/// remove_dir("foo")?; // second time doesn't fail
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn remove_dir<P>(path: P) -> io::Result<()>
where
    P: AsRef<Path>,
{
    fn inner(path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path).ignore_default(|e| {
            if e.kind() == ErrorKind::NotFound {
                true
            } else {
                tracing::warn!(?path, error = %e, "failed to remove directory");
                false
            }
        })
    }

    inner(path.as_ref())
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    #[test]
    fn create_dir_is_idempotent() {
        let root = TempDir::new("judge-stdx-fs").unwrap();
        let nested = root.path().join("a/b/c");

        create_dir(&nested).unwrap();
        create_dir(&nested).unwrap();

        assert!(nested.is_dir());
    }

    #[test]
    fn remove_dir_ignores_missing() {
        let root = TempDir::new("judge-stdx-fs").unwrap();
        let missing = root.path().join("does-not-exist");

        remove_dir(&missing).unwrap();
    }

    #[test]
    fn remove_dir_deletes_recursively() {
        let root = TempDir::new("judge-stdx-fs").unwrap();
        let nested = root.path().join("a/b/c");
        create_dir(&nested).unwrap();

        remove_dir(root.path().join("a")).unwrap();

        assert!(!root.path().join("a").exists());
    }
}
