//! Security response headers.

use reqwest::header::HeaderMap;

use super::check::{Check, Severity};
use super::context::Context;
use super::result::CheckResult;
use super::site::{resolve_site, unreachable, Site};
use crate::error::Result;

/// Required headers, by display name.
pub const REQUIRED_HEADERS: &[&str] = &[
    "Strict-Transport-Security",
    "X-Content-Type-Options",
    "X-Frame-Options",
    "Content-Security-Policy",
    "Referrer-Policy",
];

/// Required headers missing from a response.
///
/// `X-Frame-Options` is satisfied by a CSP with `frame-ancestors`.
pub fn missing_headers(headers: &HeaderMap) -> Vec<&'static str> {
    let csp_frame_ancestors = headers
        .get_all("content-security-policy")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.to_ascii_lowercase().contains("frame-ancestors"));

    REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|name| {
            if headers.contains_key(*name) {
                return false;
            }
            !(*name == "X-Frame-Options" && csp_frame_ancestors)
        })
        .collect()
}

/// Fetches the site once and verifies security headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityHeadersCheck;

impl Check for SecurityHeadersCheck {
    fn id(&self) -> &str {
        "security-headers"
    }

    fn title(&self) -> &str {
        "Security headers"
    }

    fn run(&self, ctx: &Context) -> Result<CheckResult> {
        if !ctx.config().checks.security.enabled {
            return Ok(CheckResult::skip(self.id(), self.title(), "not enabled, skipping"));
        }
        let url = match resolve_site(ctx, self.id(), self.title()) {
            Site::Url(url) => url,
            Site::Done(result) => return Ok(result),
        };

        let response = match ctx.http().get(url.clone()).send() {
            Ok(response) => response,
            Err(e) => return Ok(unreachable(self.id(), self.title(), url.as_str(), e)),
        };

        let missing = missing_headers(response.headers());
        if missing.is_empty() {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                "all recommended security headers present",
            ));
        }

        Ok(CheckResult::fail(
            self.id(),
            self.title(),
            Severity::Warn,
            format!("missing headers: {}", missing.join(", ")),
        )
        .with_suggestions(
            missing
                .iter()
                .map(|name| format!("Send {name} from your server or CDN")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Outcome;
    use crate::config::Config;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    fn run(production: &str) -> CheckResult {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.urls.production = Some(production.to_string());
        let ctx = Context::new(temp.path(), config).unwrap();
        SecurityHeadersCheck.run(&ctx).unwrap()
    }

    #[test]
    fn all_headers_pass() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .header("Strict-Transport-Security", "max-age=63072000")
                .header("X-Content-Type-Options", "nosniff")
                .header("Content-Security-Policy", "default-src 'self'; frame-ancestors 'none'")
                .header("Referrer-Policy", "strict-origin-when-cross-origin")
                .body("ok");
        });

        let result = run(&server.base_url());
        assert_eq!(result.outcome, Outcome::Passed);
    }

    #[test]
    fn missing_headers_warn() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200).header("X-Content-Type-Options", "nosniff").body("ok");
        });

        let result = run(&server.base_url());
        assert_eq!(result.outcome, Outcome::Failed(Severity::Warn));
        assert!(result.message.starts_with("missing headers:"));
        assert!(result.message.contains("Strict-Transport-Security"));
        assert!(result.message.contains("X-Frame-Options"));
        assert!(!result.message.contains("X-Content-Type-Options"));
        assert_eq!(result.suggestions.len(), 4);
    }

    #[test]
    fn unreachable_is_distinct_warn() {
        let result = run("http://127.0.0.1:1");
        assert_eq!(result.outcome, Outcome::Failed(Severity::Warn));
        assert!(result.message.contains("unreachable"));
        assert!(!result.message.contains("missing headers"));
    }

    #[test]
    fn frame_ancestors_satisfies_frame_options() {
        let mut headers = HeaderMap::new();
        headers.insert("content-security-policy", "frame-ancestors 'self'".parse().unwrap());
        let missing = missing_headers(&headers);

        assert!(!missing.contains(&"X-Frame-Options"));
        assert!(!missing.contains(&"Content-Security-Policy"));
        assert!(missing.contains(&"Referrer-Policy"));
    }
}
