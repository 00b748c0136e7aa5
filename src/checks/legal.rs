//! Privacy policy and terms pages.

use std::path::Path;

use super::check::{Check, Severity};
use super::context::Context;
use super::result::CheckResult;
use crate::error::Result;
use crate::evidence::first_existing_file;
use crate::net::{join_path, parse_site_url};

/// Route and template locations, with `{slug}` standing for the page slug.
const PAGE_LOCATIONS: &[&str] = &[
    "app/{slug}/page.*",
    "src/app/{slug}/page.*",
    "app/(*)/{slug}/page.*",
    "src/app/(*)/{slug}/page.*",
    "apps/*/app/{slug}/page.*",
    "pages/{slug}.*",
    "src/pages/{slug}.*",
    "src/pages/{slug}/index.*",
    "src/routes/{slug}/+page.*",
    "app/routes/{slug}.*",
    "app/views/*/{slug}.html.*",
    "resources/views/{slug}.blade.php",
    "resources/views/*/{slug}.blade.php",
    "templates/{slug}.html",
    "content/{slug}.md",
    "content/{slug}/index.md",
    "_pages/{slug}.md",
    "{slug}.html",
    "{slug}.md",
    "public/{slug}.html",
    "public/{slug}/index.html",
    "static/{slug}.html",
];

/// One legal document.
#[derive(Debug, Clone, Copy)]
pub struct LegalPage {
    pub name: &'static str,
    /// Local slugs, tried in order.
    pub slugs: &'static [&'static str],
    /// Paths probed on the live site.
    pub live_paths: &'static [&'static str],
}

pub const LEGAL_PAGES: &[LegalPage] = &[
    LegalPage {
        name: "privacy policy",
        slugs: &["privacy", "privacy-policy"],
        live_paths: &["/privacy", "/privacy-policy"],
    },
    LegalPage {
        name: "terms of service",
        slugs: &["terms", "terms-of-service", "terms-and-conditions", "tos"],
        live_paths: &["/terms", "/terms-of-service"],
    },
];

/// First local file that serves the page.
pub fn find_local_page(root: &Path, page: &LegalPage) -> Option<std::path::PathBuf> {
    let candidates: Vec<String> = page
        .slugs
        .iter()
        .flat_map(|slug| PAGE_LOCATIONS.iter().map(move |loc| loc.replace("{slug}", slug)))
        .collect();
    let refs: Vec<&str> = candidates.iter().map(String::as_str).collect();
    first_existing_file(root, &refs)
}

/// Requires a privacy policy and terms of service.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalPagesCheck;

impl LegalPagesCheck {
    fn live_page_exists(&self, ctx: &Context, page: &LegalPage) -> bool {
        let Some(base) = ctx.config().primary_url().and_then(|raw| parse_site_url(raw).ok()) else {
            return false;
        };
        page.live_paths.iter().any(|path| {
            let Ok(url) = join_path(&base, path) else {
                return false;
            };
            match ctx.http().get(url.clone()).send() {
                Ok(response) => response.status().is_success(),
                Err(e) => {
                    tracing::debug!("Legal page probe {url} failed: {e}");
                    false
                }
            }
        })
    }
}

impl Check for LegalPagesCheck {
    fn id(&self) -> &str {
        "legal-pages"
    }

    fn title(&self) -> &str {
        "Legal pages"
    }

    fn run(&self, ctx: &Context) -> Result<CheckResult> {
        let missing: Vec<&str> = LEGAL_PAGES
            .iter()
            .filter(|page| {
                find_local_page(ctx.root(), page).is_none() && !self.live_page_exists(ctx, page)
            })
            .map(|page| page.name)
            .collect();

        if missing.is_empty() {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                "privacy policy and terms of service found",
            ));
        }

        Ok(CheckResult::fail(
            self.id(),
            self.title(),
            Severity::Warn,
            format!("missing: {}", missing.join(", ")),
        )
        .with_suggestions(missing.iter().map(|name| format!("Publish a {name} page"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Outcome;
    use crate::config::Config;
    use httpmock::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "legal").unwrap();
    }

    fn run(root: &Path, production: Option<String>) -> CheckResult {
        let mut config = Config::default();
        config.urls.production = production;
        let ctx = Context::new(root, config).unwrap();
        LegalPagesCheck.run(&ctx).unwrap()
    }

    #[test]
    fn next_route_groups_count() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "app/(marketing)/privacy/page.tsx");
        write(temp.path(), "app/terms-of-service/page.mdx");

        assert_eq!(run(temp.path(), None).outcome, Outcome::Passed);
    }

    #[test]
    fn missing_terms_warns() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "app/views/pages/privacy.html.erb");

        let result = run(temp.path(), None);
        assert_eq!(result.outcome, Outcome::Failed(Severity::Warn));
        assert_eq!(result.message, "missing: terms of service");
    }

    #[test]
    fn live_pages_count() {
        let temp = TempDir::new().unwrap();
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/privacy-policy");
            then.status(200).body("privacy");
        });
        server.mock(|when, then| {
            when.method(GET).path("/terms");
            then.status(200).body("terms");
        });

        let result = run(temp.path(), Some(server.base_url()));
        assert_eq!(result.outcome, Outcome::Passed);
    }

    #[test]
    fn live_404_does_not_count() {
        let temp = TempDir::new().unwrap();
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(404);
        });

        let result = run(temp.path(), Some(server.base_url()));
        assert_eq!(result.message, "missing: privacy policy, terms of service");
    }
}
