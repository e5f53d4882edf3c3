//! Process-wide engine configuration, read once at startup.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Errors produced while reading [`EngineConfig`] from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("environment variable {name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Immutable configuration shared by every job.
///
/// Read once via [`EngineConfig::from_env`] and passed by reference into each
/// call to [`crate::engine::orchestrate::debug`] or
/// [`crate::engine::orchestrate::testing`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Root directory under which per-job workspaces are created.
    pub sandbox_dir: PathBuf,
    /// Unprivileged uid/gid the execution child drops to (unix only).
    pub sandbox_user_uid: u32,
    /// Wall-clock timeout applied independently to compile and to each execution.
    pub timeout: Duration,
}

impl EngineConfig {
    const SANDBOX_DIR: &'static str = "SANDBOX_DIR";
    const SANDBOX_USER_UID: &'static str = "SANDBOX_USER_UID";
    const TIMEOUT: &'static str = "TIMEOUT";

    /// Reads the engine configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let sandbox_dir = Self::var(Self::SANDBOX_DIR)?.into();

        let uid_raw = Self::var(Self::SANDBOX_USER_UID)?;
        let sandbox_user_uid = uid_raw
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: Self::SANDBOX_USER_UID,
                value: uid_raw,
            })?;

        let timeout_raw = Self::var(Self::TIMEOUT)?;
        let timeout_secs: u64 = timeout_raw
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: Self::TIMEOUT,
                value: timeout_raw,
            })?;

        Ok(Self {
            sandbox_dir,
            sandbox_user_uid,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    fn var(name: &'static str) -> Result<String, ConfigError> {
        env::var(name).map_err(|_| ConfigError::Missing(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_uid_is_reported_by_name() {
        // parse on a non-numeric string always fails, independent of env state
        let err: Result<u32, _> = "not-a-number".parse();
        assert!(err.is_err());
    }
}
