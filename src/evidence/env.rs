//! Environment variable evidence.

use std::fs;
use std::path::Path;

use crate::config::strip_export;

/// Env files consulted by [`has_env_var`], in order.
pub const ENV_FILES: &[&str] = &[
    ".env",
    ".env.local",
    ".env.development",
    ".env.production",
    ".env.example",
    ".env.sample",
];

/// Whether a single env line declares a key starting with `prefix`.
///
/// Matching is on the normalized line start only, so a prefix appearing
/// inside another key or a value never counts.
pub fn line_has_prefix(line: &str, prefix: &str) -> bool {
    let line = strip_export(line.trim());
    if line.starts_with('#') {
        return false;
    }
    line.to_uppercase().starts_with(&prefix.to_uppercase())
}

/// Whether the env file at `path` declares a key starting with `prefix`.
pub fn env_file_has_prefix(path: &Path, prefix: &str) -> bool {
    match fs::read_to_string(path) {
        Ok(content) => content.lines().any(|line| line_has_prefix(line, prefix)),
        Err(_) => false,
    }
}

/// Whether any candidate env file declares a key starting with `prefix`.
///
/// # Example
///
/// ```
/// use shipcheck::evidence::has_env_var;
/// use tempfile::TempDir;
///
/// let temp = TempDir::new().unwrap();
/// std::fs::write(temp.path().join(".env.example"), "STRIPE_SECRET_KEY=\n").unwrap();
///
/// assert!(has_env_var(temp.path(), "STRIPE_"));
/// assert!(!has_env_var(temp.path(), "SENTRY_"));
/// ```
pub fn has_env_var(root: &Path, prefix: &str) -> bool {
    ENV_FILES
        .iter()
        .map(|name| root.join(name))
        .any(|path| env_file_has_prefix(&path, prefix))
}

/// Whether any of the prefixes is declared.
pub fn has_any_env_var(root: &Path, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| has_env_var(root, prefix))
}
