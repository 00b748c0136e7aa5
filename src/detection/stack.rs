//! Stack inference.
//!
//! An ordered decision list: the first rule with a matching probe names the
//! stack. CMSs and meta-frameworks come before the generic runtimes they
//! are built on.

use std::path::Path;

use super::file_detection::{file_contains, file_exists};

/// One predicate over the project tree.
#[derive(Debug, Clone, Copy)]
pub enum Probe {
    /// File or directory exists.
    Exists(&'static str),
    /// File exists and contains the text (ASCII case-insensitive).
    Contains(&'static str, &'static str),
}

impl Probe {
    pub fn matches(&self, root: &Path) -> bool {
        match self {
            Probe::Exists(file) => file_exists(root, file),
            Probe::Contains(file, needle) => file_contains(root, file, needle),
        }
    }
}

/// Stack label and the probes that identify it (any one suffices).
pub const STACK_RULES: &[(&str, &[Probe])] = &[
    ("strapi", &[Probe::Contains("package.json", "\"@strapi/strapi\"")]),
    ("ghost", &[Probe::Contains("package.json", "\"ghost\"")]),
    (
        "wordpress",
        &[
            Probe::Exists("wp-config.php"),
            Probe::Exists("wp-content"),
            Probe::Contains("composer.json", "/wordpress\""),
        ],
    ),
    (
        "next",
        &[
            Probe::Exists("next.config.js"),
            Probe::Exists("next.config.mjs"),
            Probe::Exists("next.config.ts"),
            Probe::Contains("package.json", "\"next\""),
        ],
    ),
    (
        "nuxt",
        &[
            Probe::Exists("nuxt.config.ts"),
            Probe::Exists("nuxt.config.js"),
            Probe::Contains("package.json", "\"nuxt\""),
        ],
    ),
    (
        "sveltekit",
        &[
            Probe::Exists("svelte.config.js"),
            Probe::Contains("package.json", "\"@sveltejs/kit\""),
        ],
    ),
    (
        "astro",
        &[
            Probe::Exists("astro.config.mjs"),
            Probe::Exists("astro.config.ts"),
            Probe::Contains("package.json", "\"astro\""),
        ],
    ),
    ("remix", &[Probe::Contains("package.json", "\"@remix-run/")]),
    (
        "gatsby",
        &[
            Probe::Exists("gatsby-config.js"),
            Probe::Exists("gatsby-config.ts"),
            Probe::Contains("package.json", "\"gatsby\""),
        ],
    ),
    (
        "rails",
        &[
            Probe::Exists("bin/rails"),
            Probe::Contains("Gemfile", "gem 'rails'"),
            Probe::Contains("Gemfile", "gem \"rails\""),
        ],
    ),
    (
        "laravel",
        &[
            Probe::Exists("artisan"),
            Probe::Contains("composer.json", "\"laravel/framework\""),
        ],
    ),
    (
        "django",
        &[
            Probe::Exists("manage.py"),
            Probe::Contains("requirements.txt", "django"),
            Probe::Contains("pyproject.toml", "django"),
        ],
    ),
    (
        "flask",
        &[
            Probe::Contains("requirements.txt", "flask"),
            Probe::Contains("pyproject.toml", "flask"),
        ],
    ),
    ("phoenix", &[Probe::Contains("mix.exs", ":phoenix")]),
    (
        "hugo",
        &[Probe::Exists("hugo.toml"), Probe::Exists("hugo.yaml"), Probe::Exists("hugo.json")],
    ),
    ("jekyll", &[Probe::Contains("Gemfile", "jekyll")]),
    (
        "eleventy",
        &[
            Probe::Exists(".eleventy.js"),
            Probe::Exists("eleventy.config.js"),
            Probe::Contains("package.json", "\"@11ty/eleventy\""),
        ],
    ),
    ("vue", &[Probe::Contains("package.json", "\"vue\"")]),
    ("react", &[Probe::Contains("package.json", "\"react\"")]),
    ("node", &[Probe::Exists("package.json")]),
    ("static", &[Probe::Exists("index.html"), Probe::Exists("public/index.html")]),
];

/// Label used when no rule matches.
pub const UNKNOWN_STACK: &str = "unknown";

/// Infer the project's stack.
///
/// # Example
///
/// ```
/// use shipcheck::detection::detect_stack;
/// use tempfile::TempDir;
///
/// let temp = TempDir::new().unwrap();
/// std::fs::write(
///     temp.path().join("package.json"),
///     r#"{ "dependencies": { "next": "15.0.0", "react": "19.0.0" } }"#,
/// ).unwrap();
///
/// assert_eq!(detect_stack(temp.path()), "next");
/// ```
pub fn detect_stack(root: &Path) -> &'static str {
    STACK_RULES
        .iter()
        .find(|(stack, probes)| {
            let hit = probes.iter().any(|p| p.matches(root));
            if hit {
                tracing::debug!("Stack rule {stack} matched");
            }
            hit
        })
        .map(|(stack, _)| *stack)
        .unwrap_or(UNKNOWN_STACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn empty_project_is_unknown() {
        let temp = TempDir::new().unwrap();
        assert_eq!(detect_stack(temp.path()), "unknown");
    }

    #[test]
    fn next_wins_over_react() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "package.json",
            r#"{ "dependencies": { "react": "19", "next": "15" } }"#,
        );
        assert_eq!(detect_stack(temp.path()), "next");
    }

    #[test]
    fn strapi_wins_over_node() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "package.json",
            r#"{ "dependencies": { "@strapi/strapi": "4" } }"#,
        );
        assert_eq!(detect_stack(temp.path()), "strapi");
    }

    #[test]
    fn plain_package_json_is_node() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "package.json", r#"{ "dependencies": { "express": "4" } }"#);
        assert_eq!(detect_stack(temp.path()), "node");
    }

    #[test]
    fn rails_from_gemfile() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "Gemfile", "source 'https://rubygems.org'\ngem 'rails', '~> 7.1'\n");
        assert_eq!(detect_stack(temp.path()), "rails");
    }

    #[test]
    fn sentry_rails_alone_is_not_rails() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "Gemfile", "gem 'sentry-rails'\ngem 'jekyll'\n");
        assert_eq!(detect_stack(temp.path()), "jekyll");
    }

    #[test]
    fn django_from_requirements() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "requirements.txt", "Django==5.0\ngunicorn\n");
        assert_eq!(detect_stack(temp.path()), "django");
    }

    #[test]
    fn laravel_from_artisan() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "artisan", "#!/usr/bin/env php");
        assert_eq!(detect_stack(temp.path()), "laravel");
    }

    #[test]
    fn static_site() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "index.html", "<html></html>");
        assert_eq!(detect_stack(temp.path()), "static");
    }
}
