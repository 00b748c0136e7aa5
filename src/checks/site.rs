//! Target URL resolution shared by live probes.

use reqwest::Url;

use super::check::Severity;
use super::context::Context;
use super::result::CheckResult;
use crate::net::parse_site_url;

/// Either the URL to probe or the result to report without probing.
pub(crate) enum Site {
    Url(Url),
    Done(CheckResult),
}

/// Resolve the production (else staging) URL for a probe.
///
/// No URL is a skip; an unparseable URL is a check-local warning.
pub(crate) fn resolve_site(ctx: &Context, id: &str, title: &str) -> Site {
    let Some(raw) = ctx.config().primary_url() else {
        return Site::Done(CheckResult::skip(
            id,
            title,
            "no production or staging URL configured",
        ));
    };

    match parse_site_url(raw) {
        Ok(url) => Site::Url(url),
        Err(e) => Site::Done(
            CheckResult::fail(id, title, Severity::Warn, e.to_string())
                .with_suggestion("Set urls.production to a full URL such as https://example.com"),
        ),
    }
}

/// Result for a probe whose target could not be reached.
pub(crate) fn unreachable(id: &str, title: &str, target: &str, err: impl std::fmt::Display) -> CheckResult {
    CheckResult::fail(
        id,
        title,
        Severity::Warn,
        format!("{target} unreachable: {err}"),
    )
    .with_suggestion("Check that the site is deployed and reachable from this machine")
}
