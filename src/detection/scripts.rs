//! Live script fingerprinting.
//!
//! External `<script src>` URLs found in templates are fetched and matched
//! against provider signatures. Fetching is bounded twice: each request has
//! its own timeout and a shared deadline is checked before every request.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;
use reqwest::blocking::Client;

use crate::catalog::ServiceSpec;
use crate::error::Result;
use crate::net::build_client;

/// Per-request timeout for script fetches.
pub const SCRIPT_TIMEOUT: Duration = Duration::from_secs(3);

/// Wall-clock budget for all script fetches together.
pub const SCRIPT_DEADLINE: Duration = Duration::from_secs(8);

/// At most this many scripts are fetched.
pub const MAX_SCRIPTS: usize = 5;

static SCRIPT_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<script\b[^>]*\bsrc\s*=\s*["'](https?://[^"']+)["']"#)
        .expect("script src pattern is valid")
});

/// External script URLs referenced by a template, in document order.
pub fn external_scripts(html: &str) -> Vec<String> {
    SCRIPT_SRC
        .captures_iter(html)
        .map(|c| c[1].to_string())
        .collect()
}

/// A fetched script body.
#[derive(Debug, Clone)]
pub struct FetchedScript {
    pub url: String,
    /// Lowercased body.
    pub body: String,
}

/// Fetches script bodies under a deadline.
pub struct ScriptFetcher {
    client: Client,
    budget: Duration,
}

impl ScriptFetcher {
    /// Fetcher with the default per-request timeout and deadline.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client(SCRIPT_TIMEOUT)?,
            budget: SCRIPT_DEADLINE,
        })
    }

    /// Fetcher over a prepared client and overall budget.
    pub fn with_client(client: Client, budget: Duration) -> Self {
        Self { client, budget }
    }

    /// Fetch up to [`MAX_SCRIPTS`] URLs, starting the budget now.
    pub fn fetch(&self, urls: &[String]) -> Vec<FetchedScript> {
        self.fetch_until(urls, Instant::now() + self.budget)
    }

    /// Fetch up to [`MAX_SCRIPTS`] URLs, stopping once `deadline` passes.
    ///
    /// Failed requests and non-2xx responses are skipped.
    pub fn fetch_until(&self, urls: &[String], deadline: Instant) -> Vec<FetchedScript> {
        let urls = &urls[..urls.len().min(MAX_SCRIPTS)];
        let mut fetched = Vec::new();

        for (i, url) in urls.iter().enumerate() {
            if Instant::now() >= deadline {
                tracing::debug!(
                    "Script fetch deadline reached, skipping {} script(s)",
                    urls.len() - i
                );
                break;
            }

            let response = match self.client.get(url).send() {
                Ok(r) if r.status().is_success() => r,
                Ok(r) => {
                    tracing::debug!("Script {url} returned {}", r.status());
                    continue;
                }
                Err(e) => {
                    tracing::debug!("Script {url} failed: {e}");
                    continue;
                }
            };

            match response.text() {
                Ok(body) => fetched.push(FetchedScript {
                    url: url.clone(),
                    body: body.to_lowercase(),
                }),
                Err(e) => tracing::debug!("Script {url} body unreadable: {e}"),
            }
        }

        fetched
    }
}

/// First fetched script whose body or URL carries one of the service's
/// signatures.
pub fn matching_script<'a>(
    spec: &ServiceSpec,
    scripts: &'a [FetchedScript],
) -> Option<&'a FetchedScript> {
    scripts.iter().find(|script| {
        let url = script.url.to_lowercase();
        spec.script_signatures.iter().any(|sig| {
            let sig = sig.to_lowercase();
            script.body.contains(&sig) || url.contains(&sig)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use httpmock::prelude::*;

    fn fetcher() -> ScriptFetcher {
        ScriptFetcher::new().unwrap()
    }

    #[test]
    fn extracts_only_external_scripts() {
        let html = r#"
            <script src="/local.js"></script>
            <script async src="https://cdn.example.com/a.js"></script>
            <SCRIPT type="module" src='http://cdn.example.com/b.js'></SCRIPT>
            <script>inline()</script>
        "#;
        assert_eq!(
            external_scripts(html),
            ["https://cdn.example.com/a.js", "http://cdn.example.com/b.js"]
        );
    }

    #[test]
    fn fetches_and_lowercases_bodies() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/tag.js");
            then.status(200).body("window.PostHog = {}");
        });

        let scripts = fetcher().fetch(&[server.url("/tag.js")]);
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].body, "window.posthog = {}");
    }

    #[test]
    fn skips_failed_responses() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing.js");
            then.status(404);
        });

        let scripts = fetcher().fetch(&[server.url("/missing.js")]);
        assert!(scripts.is_empty());
    }

    #[test]
    fn passed_deadline_fetches_nothing() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/tag.js");
            then.status(200).body("x");
        });

        let scripts = fetcher().fetch_until(&[server.url("/tag.js")], Instant::now());
        assert!(scripts.is_empty());
        mock.assert_calls(0);
    }

    #[test]
    fn fetches_at_most_five() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/tag.js");
            then.status(200).body("x");
        });

        let urls = vec![server.url("/tag.js"); 8];
        let scripts = fetcher().fetch(&urls);
        assert_eq!(scripts.len(), MAX_SCRIPTS);
        mock.assert_calls(MAX_SCRIPTS);
    }

    #[test]
    fn signature_match() {
        let plausible = catalog::service("plausible").unwrap();
        let scripts = vec![FetchedScript {
            url: "https://cdn.example.com/s.js".into(),
            body: "plausible.io/api/event".into(),
        }];
        assert!(matching_script(plausible, &scripts).is_some());

        let stripe = catalog::service("stripe").unwrap();
        assert!(matching_script(stripe, &scripts).is_none());
    }
}
