//! Bounded directory walking with an explicit stop token.
//!
//! The visitor returns [`ControlFlow::Continue`] to keep walking and
//! [`ControlFlow::Break`] to stop; the break value is handed back to the
//! caller. Known non-source directories are pruned before descent.

use std::ops::ControlFlow;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into.
pub const SKIP_DIRS: &[&str] = &[
    "node_modules",
    "vendor",
    ".git",
    ".hg",
    ".svn",
    "dist",
    "build",
    ".next",
    ".nuxt",
    ".svelte-kit",
    ".output",
    ".vercel",
    ".netlify",
    ".turbo",
    "out",
    "target",
    "coverage",
    "tmp",
    ".cache",
    "__pycache__",
    ".venv",
    "venv",
    "_build",
    "deps",
    "storage",
    "bower_components",
];

/// Default depth bound for walks.
pub const MAX_DEPTH: usize = 8;

/// Files larger than this are never read.
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Walk limits.
#[derive(Debug, Clone, Copy)]
pub struct Walk {
    pub max_depth: usize,
    pub max_file_size: u64,
}

impl Default for Walk {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl Walk {
    /// Unbounded depth, for whole-tree scans.
    pub fn whole_tree() -> Self {
        Self {
            max_depth: usize::MAX,
            ..Self::default()
        }
    }

    /// Visit every regular file under `root` within the limits.
    ///
    /// Returns the value the visitor broke with, or `None` if the walk ran to
    /// completion.
    pub fn files<B>(
        &self,
        root: &Path,
        mut visit: impl FnMut(&Path) -> ControlFlow<B>,
    ) -> Option<B> {
        let walker = WalkDir::new(root)
            .max_depth(self.max_depth)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_pruned(e));

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            match entry.metadata() {
                Ok(meta) if meta.len() <= self.max_file_size => {}
                _ => continue,
            }
            if let ControlFlow::Break(value) = visit(entry.path()) {
                return Some(value);
            }
        }

        None
    }
}

fn is_pruned(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRS.contains(&name))
}

/// Lowercased extension of a path, if any.
pub fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn visits_files_and_prunes_skip_dirs() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src/components")).unwrap();
        fs::create_dir_all(temp.path().join("node_modules/pkg")).unwrap();
        fs::write(temp.path().join("src/components/a.tsx"), "").unwrap();
        fs::write(temp.path().join("node_modules/pkg/index.js"), "").unwrap();

        let mut seen: Vec<PathBuf> = Vec::new();
        let stopped = Walk::default().files(temp.path(), |p| {
            seen.push(p.to_path_buf());
            ControlFlow::<()>::Continue(())
        });

        assert!(stopped.is_none());
        assert_eq!(seen.len(), 1);
        assert!(seen[0].ends_with("src/components/a.tsx"));
    }

    #[test]
    fn break_stops_the_walk() {
        let temp = TempDir::new().unwrap();
        for i in 0..5 {
            fs::write(temp.path().join(format!("f{i}.txt")), "").unwrap();
        }

        let mut visited = 0;
        let found = Walk::default().files(temp.path(), |p| {
            visited += 1;
            ControlFlow::Break(p.to_path_buf())
        });

        assert!(found.is_some());
        assert_eq!(visited, 1);
    }

    #[test]
    fn root_named_like_skip_dir_is_still_walked() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("build");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("index.html"), "").unwrap();

        let found = Walk::default().files(&root, |p| ControlFlow::Break(p.to_path_buf()));
        assert!(found.is_some());
    }

    #[test]
    fn oversized_files_are_skipped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("big.js"), vec![b'a'; 64]).unwrap();

        let walk = Walk {
            max_file_size: 16,
            ..Walk::default()
        };
        let found = walk.files(temp.path(), |p| ControlFlow::Break(p.to_path_buf()));
        assert!(found.is_none());
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension(Path::new("a/B.HTML")), Some("html".to_string()));
        assert_eq!(extension(Path::new("Makefile")), None);
    }
}
