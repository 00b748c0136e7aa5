//! File-based detection helpers.

use std::fs;
use std::path::Path;

/// Check if a file exists relative to the project root.
pub fn file_exists(project_root: &Path, file: &str) -> bool {
    project_root.join(file).exists()
}

/// Check if a file exists and contains `needle`, ignoring ASCII case.
pub fn file_contains(project_root: &Path, file: &str, needle: &str) -> bool {
    match fs::read_to_string(project_root.join(file)) {
        Ok(content) => content
            .to_ascii_lowercase()
            .contains(&needle.to_ascii_lowercase()),
        Err(_) => false,
    }
}
