//! Read-only scan context shared by every check.

use reqwest::blocking::Client;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, ShipcheckError};
use crate::net::{build_client, CHECK_TIMEOUT};

/// Everything a check may read: the project tree, its config and the HTTP
/// client. Built once per scan and never mutated.
#[derive(Debug, Clone)]
pub struct Context {
    root: PathBuf,
    config: Config,
    http: Client,
}

impl Context {
    /// Create a context with the default check client.
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Result<Self> {
        Ok(Self::with_client(root, config, build_client(CHECK_TIMEOUT)?))
    }

    /// Create a context for an existing project directory.
    pub fn for_project(root: impl Into<PathBuf>, config: Config) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ShipcheckError::ProjectNotFound { path: root });
        }
        Self::new(root, config)
    }

    /// Create a context with a caller-supplied client.
    pub fn with_client(root: impl Into<PathBuf>, config: Config, http: Client) -> Self {
        Self {
            root: root.into(),
            config,
            http,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn stack(&self) -> &str {
        &self.config.stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn for_project_rejects_missing_dir() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = Context::for_project(&missing, Config::default()).unwrap_err();
        assert!(matches!(err, ShipcheckError::ProjectNotFound { .. }));
    }

    #[test]
    fn exposes_root_and_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.stack = "rails".into();

        let ctx = Context::for_project(temp.path(), config).unwrap();
        assert_eq!(ctx.root(), temp.path());
        assert_eq!(ctx.stack(), "rails");
    }
}
