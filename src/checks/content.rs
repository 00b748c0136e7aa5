//! SEO content assertions against the main layout.
//!
//! Each [`ContentSpec`] tests the primary HTML regexes first, then
//! framework-specific alternates (Next.js `metadata` exports,
//! `<svelte:head>`, Nuxt `useHead`, Jekyll `{% seo %}`), then file
//! conventions that generate the tag.

use regex::Regex;
use std::fs;

use super::check::{Check, Severity};
use super::context::Context;
use super::result::CheckResult;
use crate::error::Result;
use crate::evidence::{compile_patterns, expand_all, resolve_main_layout};

/// One `<head>` practice to assert.
#[derive(Debug, Clone, Copy)]
pub struct ContentSpec {
    pub id: &'static str,
    pub title: &'static str,
    /// What is missing, used in the failure message.
    pub element: &'static str,
    pub patterns: &'static [&'static str],
    pub alternates: &'static [&'static str],
    /// Files whose mere existence emits the tag.
    pub convention_files: &'static [&'static str],
    pub suggestion: &'static str,
}

const JEKYLL_SEO: &str = r"\{%-?\s*seo\s*-?%\}";

pub const META_TITLE: ContentSpec = ContentSpec {
    id: "meta-title",
    title: "Page title",
    element: "<title>",
    patterns: &[r"(?i)<title[\s>]"],
    alternates: &[
        r"(?s)export\s+const\s+metadata\b.*?\btitle\s*:",
        r"generateMetadata",
        r"(?s)useHead\(.*?\btitle\s*:",
        r"useSeoMeta\(",
        r"(?s)<svelte:head>.*?<title",
        r"<(SEO|Seo|NextSeo|DefaultSeo)\b",
        JEKYLL_SEO,
    ],
    convention_files: &[],
    suggestion: "Add a <title> to your main layout (or a metadata export)",
};

pub const META_DESCRIPTION: ContentSpec = ContentSpec {
    id: "meta-description",
    title: "Meta description",
    element: "meta description",
    patterns: &[r#"(?i)<meta[^>]+name\s*=\s*["']description["']"#],
    alternates: &[
        r"(?s)export\s+const\s+metadata\b.*?\bdescription\s*:",
        r"generateMetadata",
        r"(?s)useHead\(.*?\bdescription",
        r"useSeoMeta\(",
        r#"(?i)name\s*:\s*["']description["']"#,
        r"<(SEO|Seo|NextSeo|DefaultSeo)\b",
        JEKYLL_SEO,
    ],
    convention_files: &[],
    suggestion: "Add <meta name=\"description\" content=\"…\"> to your main layout",
};

pub const VIEWPORT: ContentSpec = ContentSpec {
    id: "viewport",
    title: "Viewport meta tag",
    element: "viewport meta tag",
    patterns: &[r#"(?i)<meta[^>]+name\s*=\s*["']viewport["']"#],
    alternates: &[
        // Next.js App Router injects a default viewport for any metadata export.
        r"export\s+const\s+(viewport|metadata)\b",
        r"generateViewport",
        r#"(?i)name\s*:\s*["']viewport["']"#,
        // Nuxt `app.head.viewport`.
        r"(?s)\bhead\s*:\s*\{[^}]*\bviewport\s*:",
    ],
    convention_files: &[],
    suggestion: "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
};

pub const LANG_ATTRIBUTE: ContentSpec = ContentSpec {
    id: "lang-attribute",
    title: "Document language",
    element: "<html lang> attribute",
    patterns: &[r#"(?i)<html[^>]*\slang\s*=\s*["'{]"#],
    alternates: &[
        r"(?s)htmlAttrs\s*:\s*\{[^}]*\blang\b",
        r"(?s)setHtmlAttributes\(\s*\{[^}]*\blang\b",
    ],
    convention_files: &[],
    suggestion: "Set the lang attribute on <html>, e.g. <html lang=\"en\">",
};

pub const CANONICAL_URL: ContentSpec = ContentSpec {
    id: "canonical-url",
    title: "Canonical URL",
    element: "canonical link",
    patterns: &[r#"(?i)<link[^>]+rel\s*=\s*["']canonical["']"#],
    alternates: &[
        r"(?s)alternates\s*:\s*\{[^}]*canonical",
        r"\bcanonical\s*:",
        JEKYLL_SEO,
    ],
    convention_files: &[],
    suggestion: "Add <link rel=\"canonical\" href=\"…\"> to your main layout",
};

pub const OPEN_GRAPH: ContentSpec = ContentSpec {
    id: "open-graph",
    title: "Open Graph tags",
    element: "Open Graph tags",
    patterns: &[r#"(?i)<meta[^>]+property\s*=\s*["']og:"#],
    alternates: &[
        r"\bopenGraph\s*:",
        r"\bog(Title|Image|Description)\s*:",
        r#"(?i)["']og:title["']"#,
        r"<(SEO|Seo|NextSeo|DefaultSeo)\b",
        JEKYLL_SEO,
    ],
    convention_files: &[
        "app/opengraph-image.*",
        "src/app/opengraph-image.*",
    ],
    suggestion: "Add og:title, og:description and og:image meta tags",
};

pub const TWITTER_CARD: ContentSpec = ContentSpec {
    id: "twitter-card",
    title: "Twitter card",
    element: "twitter:card meta tag",
    patterns: &[r#"(?i)<meta[^>]+name\s*=\s*["']twitter:card["']"#],
    alternates: &[
        r"(?s)\btwitter\s*:\s*\{",
        r"\btwitterCard\s*:",
        r#"(?i)["']twitter:card["']"#,
        JEKYLL_SEO,
    ],
    convention_files: &[
        "app/twitter-image.*",
        "src/app/twitter-image.*",
    ],
    suggestion: "Add <meta name=\"twitter:card\" content=\"summary_large_image\">",
};

/// The SEO battery, in report order.
pub const CONTENT_CHECKS: &[ContentSpec] = &[
    META_TITLE,
    META_DESCRIPTION,
    VIEWPORT,
    LANG_ATTRIBUTE,
    CANONICAL_URL,
    OPEN_GRAPH,
    TWITTER_CARD,
];

/// Asserts one `<head>` practice in the main layout.
#[derive(Debug, Clone, Copy)]
pub struct ContentCheck {
    spec: ContentSpec,
}

impl ContentCheck {
    pub fn new(spec: ContentSpec) -> Self {
        Self { spec }
    }
}

fn any_match(patterns: &[Regex], content: &str) -> bool {
    patterns.iter().any(|re| re.is_match(content))
}

impl Check for ContentCheck {
    fn id(&self) -> &str {
        self.spec.id
    }

    fn title(&self) -> &str {
        self.spec.title
    }

    fn run(&self, ctx: &Context) -> Result<CheckResult> {
        let spec = &self.spec;
        let seo = &ctx.config().checks.seo;
        if !seo.enabled {
            return Ok(CheckResult::skip(spec.id, spec.title, "not enabled, skipping"));
        }

        let Some(layout) = resolve_main_layout(ctx.root(), ctx.stack(), seo.main_layout.as_deref())
        else {
            return Ok(CheckResult::fail(
                spec.id,
                spec.title,
                Severity::Warn,
                "no main layout found",
            )
            .with_suggestion("Set checks.seo.main_layout in shipcheck.yml"));
        };
        let rel = layout
            .strip_prefix(ctx.root())
            .unwrap_or(&layout)
            .display()
            .to_string();

        let content = match fs::read_to_string(&layout) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Cannot read layout {}: {e}", layout.display());
                return Ok(CheckResult::fail(
                    spec.id,
                    spec.title,
                    ctx.config().checks.malformed.content,
                    format!("{rel} could not be read"),
                ));
            }
        };

        if any_match(&compile_patterns(spec.patterns), &content) {
            return Ok(CheckResult::pass(spec.id, spec.title, format!("found in {rel}")));
        }
        if any_match(&compile_patterns(spec.alternates), &content) {
            return Ok(CheckResult::pass(
                spec.id,
                spec.title,
                format!("provided by framework metadata in {rel}"),
            ));
        }
        if let Some(file) = expand_all(ctx.root(), spec.convention_files)
            .into_iter()
            .find(|p| p.is_file())
        {
            let file_rel = file.strip_prefix(ctx.root()).unwrap_or(&file);
            return Ok(CheckResult::pass(
                spec.id,
                spec.title,
                format!("generated from {}", file_rel.display()),
            ));
        }

        Ok(CheckResult::fail(
            spec.id,
            spec.title,
            Severity::Warn,
            format!("{} missing in {rel}", spec.element),
        )
        .with_suggestion(spec.suggestion))
    }
}
