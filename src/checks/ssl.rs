//! TLS certificate expiry.

use chrono::{DateTime, Utc};

use super::check::{Check, Severity};
use super::context::Context;
use super::result::CheckResult;
use super::site::{resolve_site, unreachable, Site};
use crate::error::Result;
use crate::net::{CertificateExpiry, CertificateProbe, RustlsProbe};

/// Days of validity above which the certificate passes.
pub const WARN_WITHIN_DAYS: i64 = 30;
/// Days of validity at or below which the certificate is an error.
pub const ERROR_WITHIN_DAYS: i64 = 7;

/// Handshakes with the site and buckets the leaf certificate's expiry.
pub struct SslCheck {
    probe: Box<dyn CertificateProbe>,
}

impl SslCheck {
    pub fn new() -> Self {
        Self::with_probe(Box::new(RustlsProbe::new()))
    }

    pub fn with_probe(probe: Box<dyn CertificateProbe>) -> Self {
        Self { probe }
    }
}

impl Default for SslCheck {
    fn default() -> Self {
        Self::new()
    }
}

/// Bucket a certificate expiry relative to `now`.
pub fn classify_expiry(not_after: DateTime<Utc>, now: DateTime<Utc>) -> (Option<Severity>, String) {
    if not_after <= now {
        return (Some(Severity::Error), "certificate has expired".to_string());
    }

    let days = (not_after - now).num_days();
    let message = match days {
        1 => "certificate expires in 1 day".to_string(),
        n => format!("certificate expires in {n} days"),
    };
    let severity = if days > WARN_WITHIN_DAYS {
        None
    } else if days > ERROR_WITHIN_DAYS {
        Some(Severity::Warn)
    } else {
        Some(Severity::Error)
    };
    (severity, message)
}

impl Check for SslCheck {
    fn id(&self) -> &str {
        "ssl"
    }

    fn title(&self) -> &str {
        "SSL certificate"
    }

    fn run(&self, ctx: &Context) -> Result<CheckResult> {
        if !ctx.config().checks.security.enabled {
            return Ok(CheckResult::skip(self.id(), self.title(), "not enabled, skipping"));
        }
        let url = match resolve_site(ctx, self.id(), self.title()) {
            Site::Url(url) => url,
            Site::Done(result) => return Ok(result),
        };

        let host = url.host_str().unwrap_or_default().to_string();
        let port = if url.scheme() == "https" {
            url.port().unwrap_or(443)
        } else {
            443
        };

        let expiry = match self.probe.expiry(&host, port) {
            Ok(expiry) => expiry,
            Err(e) => {
                tracing::debug!("TLS probe of {host}:{port} failed: {e}");
                return Ok(unreachable(self.id(), self.title(), &format!("{host}:{port}"), e));
            }
        };

        let (severity, message) = match expiry {
            CertificateExpiry::Expired => (Some(Severity::Error), "certificate has expired".to_string()),
            CertificateExpiry::NotAfter(not_after) => classify_expiry(not_after, Utc::now()),
            CertificateExpiry::Rejected(reason) => {
                return Ok(CheckResult::fail(
                    self.id(),
                    self.title(),
                    Severity::Error,
                    format!("certificate rejected: {reason}"),
                )
                .with_suggestion(format!(
                    "Serve a certificate for {host} issued by a publicly trusted CA"
                )));
            }
        };

        Ok(match severity {
            None => CheckResult::pass(self.id(), self.title(), message),
            Some(severity) => CheckResult::fail(self.id(), self.title(), severity, message)
                .with_suggestion(format!("Renew the certificate for {host}"))
                .with_suggestion("Enable automatic renewal (e.g. Let's Encrypt via certbot or your host)"),
        })
    }
}
