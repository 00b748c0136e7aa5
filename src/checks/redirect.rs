//! Apex and `www.` host consistency.

use reqwest::Url;

use super::check::{Check, Severity};
use super::context::Context;
use super::result::CheckResult;
use super::site::{resolve_site, unreachable, Site};
use crate::error::Result;
use crate::net::www_variants;

/// Compare where the apex and `www.` variants end up after redirects.
///
/// Returns `None` when both land on the same host, else a description of
/// the mismatch.
pub fn host_mismatch(apex_final: &Url, www_final: &Url) -> Option<String> {
    let apex_host = apex_final.host_str().unwrap_or_default();
    let www_host = www_final.host_str().unwrap_or_default();
    if apex_host.eq_ignore_ascii_case(www_host) {
        None
    } else {
        Some(format!(
            "apex lands on {apex_host} but www lands on {www_host}"
        ))
    }
}

/// Fetches both host variants and requires one to redirect to the other.
#[derive(Debug, Clone, Copy, Default)]
pub struct WwwRedirectCheck;

impl Check for WwwRedirectCheck {
    fn id(&self) -> &str {
        "www-redirect"
    }

    fn title(&self) -> &str {
        "www redirect"
    }

    fn run(&self, ctx: &Context) -> Result<CheckResult> {
        if !ctx.config().checks.security.enabled {
            return Ok(CheckResult::skip(self.id(), self.title(), "not enabled, skipping"));
        }
        let url = match resolve_site(ctx, self.id(), self.title()) {
            Site::Url(url) => url,
            Site::Done(result) => return Ok(result),
        };

        let is_domain = url.domain().is_some_and(|d| d.contains('.'));
        if !is_domain {
            return Ok(CheckResult::skip(
                self.id(),
                self.title(),
                "site host is not a domain name, skipping",
            ));
        }

        let (apex, www) = match www_variants(&url) {
            Ok(variants) => variants,
            Err(e) => {
                return Ok(CheckResult::fail(self.id(), self.title(), Severity::Warn, e.to_string())
                    .with_suggestion("Set urls.production to the site's apex or www host"))
            }
        };
        let mut finals = Vec::with_capacity(2);
        for variant in [&apex, &www] {
            match ctx.http().get(variant.clone()).send() {
                Ok(response) => finals.push(response.url().clone()),
                Err(e) => return Ok(unreachable(self.id(), self.title(), variant.as_str(), e)),
            }
        }

        match host_mismatch(&finals[0], &finals[1]) {
            None => Ok(CheckResult::pass(
                self.id(),
                self.title(),
                format!(
                    "apex and www both land on {}",
                    finals[0].host_str().unwrap_or_default()
                ),
            )),
            Some(message) => Ok(CheckResult::fail(self.id(), self.title(), Severity::Warn, message)
                .with_suggestion("Redirect one host variant to the other with a 301")),
        }
    }
}
