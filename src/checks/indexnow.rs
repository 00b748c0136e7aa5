//! IndexNow key verification.

use std::fs;

use super::check::{Check, Severity};
use super::context::Context;
use super::result::CheckResult;
use crate::error::Result;
use crate::evidence::find_web_file;
use crate::net::{join_path, parse_site_url};

/// Verifies the IndexNow key file is published.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexNowCheck;

impl Check for IndexNowCheck {
    fn id(&self) -> &str {
        "indexnow"
    }

    fn title(&self) -> &str {
        "IndexNow key"
    }

    fn run(&self, ctx: &Context) -> Result<CheckResult> {
        let indexnow = &ctx.config().checks.indexnow;
        if !indexnow.enabled {
            return Ok(CheckResult::skip(self.id(), self.title(), "not enabled, skipping"));
        }
        let Some(key) = indexnow.key.as_deref().map(str::trim).filter(|k| !k.is_empty()) else {
            return Ok(CheckResult::fail(
                self.id(),
                self.title(),
                Severity::Warn,
                "IndexNow is enabled but no key is configured",
            )
            .with_suggestion("Set checks.indexnow.key in shipcheck.yml"));
        };
        let file_name = format!("{key}.txt");

        if let Some(found) = find_web_file(ctx.root(), &[file_name.as_str()]) {
            let rel = found
                .path
                .strip_prefix(ctx.root())
                .unwrap_or(&found.path)
                .display()
                .to_string();
            let content = fs::read_to_string(&found.path).unwrap_or_default();
            if content.trim() == key {
                return Ok(CheckResult::pass(self.id(), self.title(), format!("found {rel}")));
            }
            return Ok(CheckResult::fail(
                self.id(),
                self.title(),
                ctx.config().checks.malformed.files,
                format!("{rel} does not contain the configured key"),
            )
            .with_suggestion(format!("The file must contain exactly {key}")));
        }

        if let Some(base) = ctx.config().primary_url().and_then(|raw| parse_site_url(raw).ok()) {
            let url = join_path(&base, &file_name)?;
            match ctx.http().get(url.clone()).send() {
                Ok(response) if response.status().is_success() => {
                    let body = response.text().unwrap_or_default();
                    if body.trim() == key {
                        return Ok(CheckResult::pass(
                            self.id(),
                            self.title(),
                            format!("{} serves the key", url.path()),
                        ));
                    }
                    tracing::debug!("IndexNow key file at {url} has unexpected content");
                }
                Ok(response) => {
                    tracing::debug!("IndexNow key file at {url} returned {}", response.status());
                }
                Err(e) => tracing::debug!("IndexNow probe of {url} failed: {e}"),
            }
        }

        Ok(CheckResult::fail(
            self.id(),
            self.title(),
            Severity::Warn,
            format!("key file {file_name} not found"),
        )
        .with_suggestion(format!(
            "Publish {file_name} containing the key at your site root"
        )))
    }
}
