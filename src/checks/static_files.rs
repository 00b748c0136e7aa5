//! Static web file presence checks.
//!
//! Each [`StaticFileSpec`] names the files to look for in web roots, the
//! route handlers that generate the file at request time, and build config
//! markers for plugins that emit it during the build.

use std::fs;
use std::path::Path;

use super::check::{Check, Severity};
use super::context::Context;
use super::result::CheckResult;
use crate::config::Config;
use crate::error::Result;
use crate::evidence::{expand, expand_all, find_web_files, RootKind};

/// Description of one expected static file.
#[derive(Debug, Clone, Copy)]
pub struct StaticFileSpec {
    pub id: &'static str,
    pub title: &'static str,
    /// File names looked up in every web root.
    pub file_names: &'static [&'static str],
    /// Route handlers that serve the file dynamically (may contain `*`).
    pub dynamic_routes: &'static [&'static str],
    /// `(file, needle)` pairs: the file exists and contains the needle.
    /// An empty needle means existence is enough.
    pub config_markers: &'static [(&'static str, &'static str)],
    pub enabled: fn(&Config) -> bool,
    pub suggestion: &'static str,
}

fn always(_: &Config) -> bool {
    true
}

fn llms_txt_enabled(config: &Config) -> bool {
    config.checks.files.llms_txt
}

fn web_manifest_enabled(config: &Config) -> bool {
    config.checks.files.web_manifest
}

pub const FAVICON: StaticFileSpec = StaticFileSpec {
    id: "favicon",
    title: "Favicon",
    file_names: &["favicon.ico", "favicon.svg", "favicon.png", "icon.svg", "icon.png"],
    dynamic_routes: &[
        "app/icon.tsx",
        "app/icon.ts",
        "app/icon.jsx",
        "src/app/icon.tsx",
        "src/app/icon.ts",
        "apps/*/app/icon.tsx",
    ],
    config_markers: &[
        ("gatsby-config.js", "gatsby-plugin-manifest"),
        ("gatsby-config.ts", "gatsby-plugin-manifest"),
    ],
    enabled: always,
    suggestion: "Add favicon.ico or favicon.svg to your public directory",
};

pub const ROBOTS_TXT: StaticFileSpec = StaticFileSpec {
    id: "robots-txt",
    title: "robots.txt",
    file_names: &["robots.txt"],
    dynamic_routes: &[
        "app/robots.ts",
        "app/robots.js",
        "src/app/robots.ts",
        "src/app/robots.js",
        "apps/*/app/robots.ts",
        "app/robots.txt/route.ts",
        "src/routes/robots.txt/+server.ts",
        "src/routes/robots.txt/+server.js",
        "server/routes/robots.txt.ts",
        "src/pages/robots.txt.ts",
        "src/pages/robots.txt.js",
        "app/routes/robots[.]txt.ts",
        "app/routes/robots[.]txt.tsx",
    ],
    config_markers: &[
        ("package.json", "next-sitemap"),
        ("package.json", "gatsby-plugin-robots-txt"),
        ("package.json", "astro-robots-txt"),
        ("nuxt.config.ts", "@nuxtjs/robots"),
        ("nuxt.config.js", "@nuxtjs/robots"),
    ],
    enabled: always,
    suggestion: "Add robots.txt to your public directory (or a robots route handler)",
};

pub const SITEMAP: StaticFileSpec = StaticFileSpec {
    id: "sitemap",
    title: "Sitemap",
    file_names: &["sitemap.xml", "sitemap_index.xml", "sitemap-index.xml", "sitemap.xml.gz"],
    dynamic_routes: &[
        "app/sitemap.ts",
        "app/sitemap.js",
        "src/app/sitemap.ts",
        "src/app/sitemap.js",
        "apps/*/app/sitemap.ts",
        "app/sitemap.xml/route.ts",
        "src/routes/sitemap.xml/+server.ts",
        "src/routes/sitemap.xml/+server.js",
        "server/routes/sitemap.xml.ts",
        "src/pages/sitemap.xml.ts",
        "src/pages/sitemap.xml.js",
        "app/routes/sitemap[.]xml.ts",
        "app/routes/sitemap[.]xml.tsx",
        "config/sitemap.rb",
    ],
    config_markers: &[
        ("package.json", "next-sitemap"),
        ("package.json", "@astrojs/sitemap"),
        ("package.json", "@nuxtjs/sitemap"),
        ("package.json", "gatsby-plugin-sitemap"),
        ("package.json", "vite-plugin-sitemap"),
        ("Gemfile", "sitemap_generator"),
        ("composer.json", "spatie/laravel-sitemap"),
        ("*/settings.py", "django.contrib.sitemaps"),
        ("_config.yml", "jekyll-sitemap"),
        ("hugo.toml", ""),
        ("hugo.yaml", ""),
    ],
    enabled: always,
    suggestion: "Generate sitemap.xml and serve it from your site root",
};

pub const LLMS_TXT: StaticFileSpec = StaticFileSpec {
    id: "llms-txt",
    title: "llms.txt",
    file_names: &["llms.txt", "llms-full.txt"],
    dynamic_routes: &[
        "app/llms.txt/route.ts",
        "src/app/llms.txt/route.ts",
        "src/routes/llms.txt/+server.ts",
        "src/pages/llms.txt.ts",
    ],
    config_markers: &[],
    enabled: llms_txt_enabled,
    suggestion: "Add llms.txt describing your site for language models (https://llmstxt.org)",
};

pub const WEB_MANIFEST: StaticFileSpec = StaticFileSpec {
    id: "web-manifest",
    title: "Web app manifest",
    file_names: &["site.webmanifest", "manifest.webmanifest", "manifest.json"],
    dynamic_routes: &[
        "app/manifest.ts",
        "app/manifest.js",
        "src/app/manifest.ts",
        "src/app/manifest.js",
        "apps/*/app/manifest.ts",
    ],
    config_markers: &[
        ("package.json", "vite-plugin-pwa"),
        ("package.json", "@vite-pwa/"),
        ("package.json", "next-pwa"),
        ("package.json", "gatsby-plugin-manifest"),
    ],
    enabled: web_manifest_enabled,
    suggestion: "Add site.webmanifest and link it from your layout",
};

/// All static file specs, in report order.
pub const STATIC_FILES: &[StaticFileSpec] = &[FAVICON, ROBOTS_TXT, SITEMAP, LLMS_TXT, WEB_MANIFEST];

/// Presence check for one static web file.
#[derive(Debug, Clone, Copy)]
pub struct StaticFileCheck {
    spec: StaticFileSpec,
}

impl StaticFileCheck {
    pub fn new(spec: StaticFileSpec) -> Self {
        Self { spec }
    }
}

/// Whether a file exists and contains `needle` (empty needle: exists).
fn marker_present(root: &Path, file: &str, needle: &str) -> bool {
    expand(root, file).iter().filter(|p| p.is_file()).any(|p| {
        needle.is_empty() || fs::read_to_string(p).is_ok_and(|c| c.contains(needle))
    })
}

/// Readable and not just whitespace.
fn has_content(path: &Path) -> bool {
    fs::read(path).is_ok_and(|bytes| !bytes.iter().all(u8::is_ascii_whitespace))
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

impl Check for StaticFileCheck {
    fn id(&self) -> &str {
        self.spec.id
    }

    fn title(&self) -> &str {
        self.spec.title
    }

    fn run(&self, ctx: &Context) -> Result<CheckResult> {
        let spec = &self.spec;
        if !(spec.enabled)(ctx.config()) {
            return Ok(CheckResult::skip(spec.id, spec.title, "not enabled, skipping"));
        }
        let root = ctx.root();

        let found = find_web_files(root, spec.file_names);
        if let Some(valid) = found.iter().find(|f| has_content(&f.path)) {
            let rel = relative(root, &valid.path);
            let message = match valid.kind {
                RootKind::Conventional => format!("found {rel}"),
                RootKind::Monorepo => format!("found {rel} (monorepo app)"),
            };
            return Ok(CheckResult::pass(spec.id, spec.title, message));
        }
        if let Some(empty) = found.first() {
            let severity = ctx.config().checks.malformed.files;
            return Ok(CheckResult::fail(
                spec.id,
                spec.title,
                severity,
                format!("{} is empty or unreadable", relative(root, &empty.path)),
            )
            .with_suggestion(spec.suggestion));
        }

        if let Some(route) = expand_all(root, spec.dynamic_routes)
            .into_iter()
            .find(|p| p.is_file())
        {
            return Ok(CheckResult::pass(
                spec.id,
                spec.title,
                format!("generated by {}", relative(root, &route)),
            ));
        }

        if let Some((file, needle)) = spec
            .config_markers
            .iter()
            .find(|(file, needle)| marker_present(root, file, needle))
        {
            let via = if needle.is_empty() {
                file.to_string()
            } else {
                format!("{needle} in {file}")
            };
            return Ok(CheckResult::pass(
                spec.id,
                spec.title,
                format!("generated at build time ({via})"),
            ));
        }

        Ok(CheckResult::fail(
            spec.id,
            spec.title,
            Severity::Warn,
            format!("{} not found", spec.file_names[0]),
        )
        .with_suggestion(spec.suggestion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Outcome;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn run(spec: StaticFileSpec, root: &Path, config: Config) -> CheckResult {
        let ctx = Context::new(root, config).unwrap();
        StaticFileCheck::new(spec).run(&ctx).unwrap()
    }

    #[test]
    fn robots_in_public_passes() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "public/robots.txt", "User-agent: *\nAllow: /\n");

        let result = run(ROBOTS_TXT, temp.path(), Config::default());
        assert_eq!(result.outcome, Outcome::Passed);
        assert!(result.message.contains("public/robots.txt"));
    }

    #[test]
    fn missing_sitemap_warns() {
        let temp = TempDir::new().unwrap();
        let result = run(SITEMAP, temp.path(), Config::default());

        assert_eq!(result.outcome, Outcome::Failed(Severity::Warn));
        assert_eq!(result.message, "sitemap.xml not found");
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn next_route_handler_counts() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "app/sitemap.ts", "export default function sitemap() {}");

        let result = run(SITEMAP, temp.path(), Config::default());
        assert_eq!(result.outcome, Outcome::Passed);
        assert!(result.message.contains("app/sitemap.ts"));
    }

    #[test]
    fn build_plugin_counts() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "package.json",
            r#"{ "devDependencies": { "next-sitemap": "^4.0.0" } }"#,
        );

        let result = run(SITEMAP, temp.path(), Config::default());
        assert_eq!(result.outcome, Outcome::Passed);
        assert!(result.message.contains("next-sitemap"));
    }

    #[test]
    fn monorepo_public_dir_counts() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "apps/web/public/favicon.ico", "ico");

        let result = run(FAVICON, temp.path(), Config::default());
        assert_eq!(result.outcome, Outcome::Passed);
        assert!(result.message.contains("monorepo"));
    }

    #[test]
    fn empty_file_uses_malformed_severity() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "public/robots.txt", "  \n");

        let result = run(ROBOTS_TXT, temp.path(), Config::default());
        assert_eq!(result.outcome, Outcome::Failed(Severity::Warn));

        let mut config = Config::default();
        config.checks.malformed.files = Severity::Error;
        let result = run(ROBOTS_TXT, temp.path(), config);
        assert_eq!(result.outcome, Outcome::Failed(Severity::Error));
        assert!(result.message.contains("empty"));
    }

    #[test]
    fn empty_file_in_earlier_root_does_not_mask_later_one() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "public/robots.txt", "");
        write(temp.path(), "static/robots.txt", "User-agent: *\n");

        let result = run(ROBOTS_TXT, temp.path(), Config::default());
        assert_eq!(result.outcome, Outcome::Passed);
        assert_eq!(result.message, "found static/robots.txt");
    }

    #[test]
    fn disabled_spec_is_skipped() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.checks.files.llms_txt = false;

        let result = run(LLMS_TXT, temp.path(), config);
        assert_eq!(result.outcome, Outcome::Skipped);
    }

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<_> = STATIC_FILES.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), STATIC_FILES.len());
    }
}
