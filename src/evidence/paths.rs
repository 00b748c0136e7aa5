//! Candidate path expansion.
//!
//! Candidate lists are written relative to the project root and may contain
//! a single-segment wildcard (`apps/*/public`, `lib/*_web/components`). A `*`
//! never crosses a directory boundary.

use std::fs;
use std::path::{Path, PathBuf};

/// Expand a candidate pattern into the existing paths it names.
///
/// Results are sorted so callers see a deterministic order.
pub fn expand(root: &Path, pattern: &str) -> Vec<PathBuf> {
    if pattern.is_empty() {
        return vec![root.to_path_buf()];
    }

    let mut current = vec![root.to_path_buf()];
    for segment in pattern.split('/') {
        let mut next = Vec::new();
        for base in &current {
            if segment.contains('*') {
                next.extend(matching_children(base, segment));
            } else {
                next.push(base.join(segment));
            }
        }
        current = next;
        if current.is_empty() {
            break;
        }
    }

    current.retain(|p| p.exists());
    current.sort();
    current
}

/// Expand every pattern in order, keeping only existing paths.
pub fn expand_all(root: &Path, patterns: &[&str]) -> Vec<PathBuf> {
    patterns.iter().flat_map(|p| expand(root, p)).collect()
}

/// First existing file named by the pattern list.
pub fn first_existing_file(root: &Path, patterns: &[&str]) -> Option<PathBuf> {
    patterns
        .iter()
        .flat_map(|p| expand(root, p))
        .find(|p| p.is_file())
}

fn matching_children(base: &Path, segment: &str) -> Vec<PathBuf> {
    let Some((prefix, suffix)) = segment.split_once('*') else {
        return Vec::new();
    };
    let Ok(entries) = fs::read_dir(base) else {
        return Vec::new();
    };

    let mut matches: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.len() >= prefix.len() + suffix.len()
                && name.starts_with(prefix)
                && name.ends_with(suffix)
        })
        .map(|e| e.path())
        .collect();
    matches.sort();
    matches
}
