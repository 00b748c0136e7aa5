//! Health endpoint probe.

use super::check::{Check, Severity};
use super::context::Context;
use super::result::CheckResult;
use super::site::{resolve_site, unreachable, Site};
use crate::error::Result;
use crate::net::join_path;

/// GETs the configured health path and requires a 2xx.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthEndpointCheck;

impl Check for HealthEndpointCheck {
    fn id(&self) -> &str {
        "health-endpoint"
    }

    fn title(&self) -> &str {
        "Health endpoint"
    }

    fn run(&self, ctx: &Context) -> Result<CheckResult> {
        let health = &ctx.config().checks.health;
        if !health.enabled {
            return Ok(CheckResult::skip(self.id(), self.title(), "not enabled, skipping"));
        }
        let base = match resolve_site(ctx, self.id(), self.title()) {
            Site::Url(url) => url,
            Site::Done(result) => return Ok(result),
        };
        let url = join_path(&base, &health.path)?;

        let response = match ctx.http().get(url.clone()).send() {
            Ok(response) => response,
            Err(e) => return Ok(unreachable(self.id(), self.title(), url.as_str(), e)),
        };

        let status = response.status();
        if status.is_success() {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                format!("{} returned {}", url.path(), status.as_u16()),
            ));
        }

        Ok(CheckResult::fail(
            self.id(),
            self.title(),
            Severity::Warn,
            format!("{} returned {}", url.path(), status.as_u16()),
        )
        .with_suggestion(format!(
            "Serve a 200 response at {} for uptime monitors",
            health.path
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Outcome;
    use crate::config::Config;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    fn run(production: &str, path: &str) -> CheckResult {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.urls.production = Some(production.to_string());
        config.checks.health.enabled = true;
        config.checks.health.path = path.to_string();
        let ctx = Context::new(temp.path(), config).unwrap();
        HealthEndpointCheck.run(&ctx).unwrap()
    }

    #[test]
    fn healthy_endpoint_passes() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/up");
            then.status(200).body("ok");
        });

        let result = run(&server.base_url(), "up");
        mock.assert();
        assert_eq!(result.outcome, Outcome::Passed);
        assert_eq!(result.message, "/up returned 200");
    }

    #[test]
    fn error_status_warns() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(503);
        });

        let result = run(&server.base_url(), "/health");
        assert_eq!(result.outcome, Outcome::Failed(Severity::Warn));
        assert!(result.message.contains("503"));
    }

    #[test]
    fn disabled_by_default() {
        let temp = TempDir::new().unwrap();
        let ctx = Context::new(temp.path(), Config::default()).unwrap();

        let result = HealthEndpointCheck.run(&ctx).unwrap();
        assert_eq!(result.outcome, Outcome::Skipped);
    }
}
