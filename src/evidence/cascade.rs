//! Tiered evidence search.
//!
//! Evidence of a practice (an SDK init call, a meta tag) is sought in two
//! tiers, stopping at the first hit:
//!
//! 1. [`Tier::StackCandidate`]: the stack's conventional files (layouts,
//!    initializers, framework config).
//! 2. [`Tier::SourceWalk`]: a bounded walk of conventional source
//!    directories, restricted to template/source extensions.
//!
//! The walk only runs when the first tier finds nothing, and it stops at the
//! first matching file.

use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use super::layout::stack_layouts;
use super::paths::expand_all;
use super::walk::{extension, Walk};

/// Source directories walked in the second tier.
pub const SOURCE_DIRS: &[&str] = &[
    "src",
    "app",
    "components",
    "templates",
    "views",
    "layouts",
    "pages",
    "resources",
    "lib",
    "includes",
    "_includes",
    "_layouts",
    "partials",
    "themes",
    "config",
    "apps",
    "packages",
];

/// Extensions read during the walk.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "html", "htm", "erb", "haml", "slim", "js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "vue",
    "svelte", "astro", "php", "twig", "liquid", "njk", "hbs", "handlebars", "ejs", "pug", "py",
    "rb", "ex", "exs", "heex", "eex", "go", "tmpl", "gohtml", "cshtml", "jinja", "jinja2", "j2",
    "mdx",
];

/// Non-layout files worth checking first for each stack.
const STACK_SOURCES: &[(&str, &[&str])] = &[
    (
        "next",
        &[
            "app/providers.tsx",
            "src/app/providers.tsx",
            "instrumentation.ts",
            "instrumentation-client.ts",
            "src/instrumentation.ts",
            "sentry.client.config.ts",
            "sentry.server.config.ts",
            "next.config.js",
            "next.config.mjs",
            "next.config.ts",
        ],
    ),
    ("rails", &["config/initializers/*.rb", "app/javascript/application.js"]),
    ("laravel", &["config/services.php", "resources/js/app.js"]),
    ("django", &["*/settings.py", "*/settings/base.py"]),
    ("nuxt", &["plugins/*.ts", "plugins/*.js"]),
    ("sveltekit", &["src/hooks.client.ts", "src/hooks.server.ts", "src/hooks.client.js"]),
    ("astro", &["astro.config.mjs", "astro.config.ts"]),
    ("remix", &["app/entry.client.tsx", "app/entry.server.tsx"]),
    ("gatsby", &["gatsby-config.js", "gatsby-browser.js", "gatsby-ssr.js"]),
    ("wordpress", &["wp-content/themes/*/functions.php", "wp-config.php"]),
    ("phoenix", &["config/runtime.exs", "assets/js/app.js"]),
];

/// Which tier produced the evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    StackCandidate,
    SourceWalk,
}

/// A matched file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    pub tier: Tier,
    pub path: PathBuf,
}

/// Outcome of a search, with counters describing how much work it did.
#[derive(Debug, Clone, Default)]
pub struct SearchTrace {
    pub evidence: Option<Evidence>,
    pub candidates_checked: usize,
    pub files_walked: usize,
}

/// Candidate files for the first tier, in order.
pub fn stack_candidates(root: &Path, stack: &str) -> Vec<PathBuf> {
    let extras = STACK_SOURCES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(stack))
        .map(|(_, files)| *files)
        .unwrap_or(&[]);

    let mut seen = HashSet::new();
    expand_all(root, stack_layouts(stack))
        .into_iter()
        .chain(expand_all(root, extras))
        .filter(|p| p.is_file() && seen.insert(p.clone()))
        .collect()
}

/// Compile a list of patterns, skipping (and logging) invalid ones.
pub fn compile_patterns(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!("Ignoring invalid evidence pattern {p:?}: {e}");
                None
            }
        })
        .collect()
}

/// Whether a file's content matches any pattern. Unreadable files never match.
pub fn file_matches(path: &Path, patterns: &[Regex]) -> bool {
    match fs::read_to_string(path) {
        Ok(content) => patterns.iter().any(|re| re.is_match(&content)),
        Err(_) => false,
    }
}

/// Run the cascade and report which tier matched and how much was read.
pub fn search_with_trace(root: &Path, stack: &str, patterns: &[Regex]) -> SearchTrace {
    let mut trace = SearchTrace::default();
    if patterns.is_empty() {
        return trace;
    }

    for candidate in stack_candidates(root, stack) {
        trace.candidates_checked += 1;
        if file_matches(&candidate, patterns) {
            tracing::debug!("Evidence in stack candidate {}", candidate.display());
            trace.evidence = Some(Evidence {
                tier: Tier::StackCandidate,
                path: candidate,
            });
            return trace;
        }
    }

    let walk = Walk::default();
    for dir in SOURCE_DIRS {
        let base = root.join(dir);
        if !base.is_dir() {
            continue;
        }

        let hit = walk.files(&base, |path| {
            let is_source = extension(path)
                .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext.as_str()));
            if !is_source {
                return ControlFlow::Continue(());
            }
            trace.files_walked += 1;
            if file_matches(path, patterns) {
                ControlFlow::Break(path.to_path_buf())
            } else {
                ControlFlow::Continue(())
            }
        });

        if let Some(path) = hit {
            tracing::debug!("Evidence found by source walk in {}", path.display());
            trace.evidence = Some(Evidence {
                tier: Tier::SourceWalk,
                path,
            });
            return trace;
        }
    }

    trace
}

/// Whether any pattern matches somewhere in the project's evidence tiers.
///
/// # Example
///
/// ```
/// use shipcheck::evidence::{compile_patterns, search_for_patterns};
/// use tempfile::TempDir;
/// use std::fs;
///
/// let temp = TempDir::new().unwrap();
/// fs::create_dir_all(temp.path().join("src")).unwrap();
/// fs::write(temp.path().join("src/main.ts"), "Sentry.init({ dsn })").unwrap();
///
/// let patterns = compile_patterns(&[r"Sentry\.init"]);
/// assert!(search_for_patterns(temp.path(), "unknown", &patterns));
/// ```
pub fn search_for_patterns(root: &Path, stack: &str, patterns: &[Regex]) -> bool {
    search_with_trace(root, stack, patterns).evidence.is_some()
}
