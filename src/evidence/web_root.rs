//! Web-root enumeration for static files.

use std::path::{Path, PathBuf};

use super::paths::expand_all;

/// Conventional directories served as the site root, in order.
pub const WEB_ROOT_DIRS: &[&str] = &[
    "public",
    "static",
    "www",
    "web",
    "assets",
    "app",
    "src/app",
    "src",
    "",
];

/// Web roots of workspace members in a monorepo.
pub const MONOREPO_WEB_ROOT_DIRS: &[&str] = &[
    "apps/*/public",
    "apps/*/static",
    "apps/*/app",
    "apps/*/src/app",
    "packages/*/public",
];

/// Where a web root came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    Conventional,
    Monorepo,
}

/// A static file found in a web root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebFile {
    pub path: PathBuf,
    pub kind: RootKind,
}

/// Existing web-root directories, conventional ones first.
pub fn web_roots(root: &Path) -> Vec<(PathBuf, RootKind)> {
    let conventional = expand_all(root, WEB_ROOT_DIRS)
        .into_iter()
        .filter(|p| p.is_dir())
        .map(|p| (p, RootKind::Conventional));
    let monorepo = expand_all(root, MONOREPO_WEB_ROOT_DIRS)
        .into_iter()
        .filter(|p| p.is_dir())
        .map(|p| (p, RootKind::Monorepo));

    conventional.chain(monorepo).collect()
}

/// Every existing file among `names` across the web roots, in search order.
///
/// All names are tried in one web root before moving to the next.
pub fn find_web_files(root: &Path, names: &[&str]) -> Vec<WebFile> {
    web_roots(root)
        .into_iter()
        .flat_map(|(dir, kind)| {
            names
                .iter()
                .map(move |name| dir.join(name))
                .filter(|p| p.is_file())
                .map(move |path| WebFile { path, kind })
        })
        .collect()
}

/// Find the first of `names` in any web root.
pub fn find_web_file(root: &Path, names: &[&str]) -> Option<WebFile> {
    find_web_files(root, names).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_file_in_public() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("public")).unwrap();
        fs::write(temp.path().join("public/robots.txt"), "User-agent: *").unwrap();

        let found = find_web_file(temp.path(), &["robots.txt"]).unwrap();
        assert!(found.path.ends_with("public/robots.txt"));
        assert_eq!(found.kind, RootKind::Conventional);
    }

    #[test]
    fn finds_file_in_project_root() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("favicon.ico"), "ico").unwrap();

        let found = find_web_file(temp.path(), &["favicon.ico"]).unwrap();
        assert_eq!(found.kind, RootKind::Conventional);
    }

    #[test]
    fn finds_file_in_monorepo_app() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("apps/web/public")).unwrap();
        fs::write(temp.path().join("apps/web/public/favicon.svg"), "<svg/>").unwrap();

        let found = find_web_file(temp.path(), &["favicon.ico", "favicon.svg"]).unwrap();
        assert_eq!(found.kind, RootKind::Monorepo);
        assert!(found.path.ends_with("favicon.svg"));
    }

    #[test]
    fn conventional_roots_come_first() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("public")).unwrap();
        fs::create_dir_all(temp.path().join("apps/web/public")).unwrap();

        let roots = web_roots(temp.path());
        assert_eq!(roots.first().unwrap().1, RootKind::Conventional);
        assert_eq!(roots.last().unwrap().1, RootKind::Monorepo);
    }

    #[test]
    fn lists_every_match_in_root_order() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("public")).unwrap();
        fs::create_dir_all(temp.path().join("static")).unwrap();
        fs::write(temp.path().join("public/robots.txt"), "").unwrap();
        fs::write(temp.path().join("static/robots.txt"), "User-agent: *").unwrap();

        let found = find_web_files(temp.path(), &["robots.txt"]);
        assert_eq!(found.len(), 2);
        assert!(found[0].path.ends_with("public/robots.txt"));
        assert!(found[1].path.ends_with("static/robots.txt"));
    }

    #[test]
    fn missing_everywhere() {
        let temp = TempDir::new().unwrap();
        assert!(find_web_file(temp.path(), &["sitemap.xml"]).is_none());
    }
}
