//! Shared HTTP client and URL helpers for live probes.

use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;

use crate::error::{Result, ShipcheckError};

/// Timeout used by checks for every outbound request.
pub const CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("shipcheck/", env!("CARGO_PKG_VERSION"));

/// Build a blocking client with the given timeout.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| ShipcheckError::Other(anyhow::anyhow!("Failed to build HTTP client: {e}")))
}

/// Parse a configured site URL.
///
/// A bare host gets `https://` prepended. Only http(s) URLs with a host are
/// accepted.
pub fn parse_site_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let invalid = |message: &str| ShipcheckError::InvalidUrl {
        url: raw.to_string(),
        message: message.to_string(),
    };

    let url = Url::parse(&candidate).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none_or(|h| h.is_empty()) {
        return Err(invalid("missing host"));
    }
    Ok(url)
}

/// Host without a leading `www.`.
pub fn apex_host(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// The apex and `www.` variants of a site URL, in that order.
pub fn www_variants(url: &Url) -> Result<(Url, Url)> {
    let host = url.host_str().unwrap_or_default();
    let apex = apex_host(host).to_string();

    let mut apex_url = url.clone();
    let mut www_url = url.clone();
    apex_url
        .set_host(Some(&apex))
        .map_err(|e| ShipcheckError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;
    www_url
        .set_host(Some(&format!("www.{apex}")))
        .map_err(|e| ShipcheckError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;
    apex_url.set_path("/");
    www_url.set_path("/");

    Ok((apex_url, www_url))
}

/// Resolve `path` against the site origin.
pub fn join_path(base: &Url, path: &str) -> Result<Url> {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    base.join(&path).map_err(|e| ShipcheckError::InvalidUrl {
        url: format!("{base}{path}"),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_https() {
        let url = parse_site_url("example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn rejects_other_schemes() {
        let err = parse_site_url("ftp://example.com").unwrap_err();
        assert!(matches!(err, ShipcheckError::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_site_url("https://").is_err());
        assert!(parse_site_url("http://exa mple.com").is_err());
    }

    #[test]
    fn www_variants_from_apex() {
        let url = parse_site_url("https://example.com/pricing").unwrap();
        let (apex, www) = www_variants(&url).unwrap();
        assert_eq!(apex.as_str(), "https://example.com/");
        assert_eq!(www.as_str(), "https://www.example.com/");
    }

    #[test]
    fn www_variants_from_www() {
        let url = parse_site_url("https://www.example.com").unwrap();
        let (apex, www) = www_variants(&url).unwrap();
        assert_eq!(apex.host_str(), Some("example.com"));
        assert_eq!(www.host_str(), Some("www.example.com"));
    }

    #[test]
    fn join_path_normalizes_slash() {
        let base = parse_site_url("https://example.com/app/").unwrap();
        assert_eq!(
            join_path(&base, "health").unwrap().as_str(),
            "https://example.com/health"
        );
        assert_eq!(
            join_path(&base, "/privacy").unwrap().as_str(),
            "https://example.com/privacy"
        );
    }

    #[test]
    fn client_builds() {
        assert!(build_client(Duration::from_secs(1)).is_ok());
    }
}
