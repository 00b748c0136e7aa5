//! Configuration file discovery and loading.
//!
//! Lookup order:
//! 1. An explicit `--config` path (must exist)
//! 2. `shipcheck.yml` in the project root
//! 3. `.shipcheck.yml` in the project root
//! 4. Built-in defaults (nothing declared, stack `unknown`)

use crate::config::schema::Config;
use crate::error::{Result, ShipcheckError};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names searched in the project root, in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &["shipcheck.yml", ".shipcheck.yml"];

/// Find the config file for a project root, if any.
pub fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
}

/// Load a single config file and parse it into [`Config`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ShipcheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ShipcheckError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`Config`].
///
/// An empty document is treated as an empty mapping.
pub fn parse_config(content: &str, source_path: &Path) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    serde_yaml::from_str(content).map_err(|e| ShipcheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// Without an override, a missing config file is not an error: the scan runs
/// with defaults so always-on checks still apply.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(override_path) = config_override {
        return load_config_file(override_path);
    }

    match find_config_file(project_root) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => {
            tracing::debug!(
                "No config file in {}, using defaults",
                project_root.display()
            );
            Ok(Config::default())
        }
    }
}
