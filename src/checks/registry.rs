//! Check selection.
//!
//! The [`CheckRegistry`] holds the checks enabled for one scan, in report
//! order. [`build_enabled_checks`] is the single place that decides which
//! checks a config turns on.

use super::check::Check;
use super::content::{ContentCheck, CONTENT_CHECKS};
use super::env_gitignored::EnvGitignoredCheck;
use super::env_parity::EnvParityCheck;
use super::headers::SecurityHeadersCheck;
use super::health::HealthEndpointCheck;
use super::indexnow::IndexNowCheck;
use super::legal::LegalPagesCheck;
use super::license::LicenseCheck;
use super::redirect::WwwRedirectCheck;
use super::secrets::SecretScanCheck;
use super::service::ServiceCheck;
use super::ssl::SslCheck;
use super::static_files::{StaticFileCheck, FAVICON, LLMS_TXT, ROBOTS_TXT, SITEMAP, WEB_MANIFEST};
use crate::catalog::SERVICES;
use crate::config::Config;

/// Ordered collection of checks.
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Create a registry with every check the config enables.
    ///
    /// Ignore-list filtering is not applied here; see [`build_enabled_checks`].
    pub fn for_config(config: &Config) -> Self {
        let settings = &config.checks;
        let mut registry = Self::new();

        registry.register(Box::new(SecretScanCheck::new()));
        registry.register(Box::new(EnvGitignoredCheck));
        registry.register(Box::new(StaticFileCheck::new(FAVICON)));
        registry.register(Box::new(StaticFileCheck::new(ROBOTS_TXT)));
        registry.register(Box::new(StaticFileCheck::new(SITEMAP)));
        registry.register(Box::new(LegalPagesCheck));

        if settings.seo.enabled {
            for spec in CONTENT_CHECKS {
                registry.register(Box::new(ContentCheck::new(*spec)));
            }
        }
        if settings.files.llms_txt {
            registry.register(Box::new(StaticFileCheck::new(LLMS_TXT)));
        }
        if settings.files.web_manifest {
            registry.register(Box::new(StaticFileCheck::new(WEB_MANIFEST)));
        }
        if settings.env.enabled {
            registry.register(Box::new(EnvParityCheck));
        }
        if settings.security.enabled {
            registry.register(Box::new(SslCheck::new()));
            registry.register(Box::new(SecurityHeadersCheck));
            registry.register(Box::new(WwwRedirectCheck));
        }
        if settings.health.enabled {
            registry.register(Box::new(HealthEndpointCheck));
        }
        if settings.indexnow.enabled {
            registry.register(Box::new(IndexNowCheck));
        }
        if settings.license.enabled {
            registry.register(Box::new(LicenseCheck));
        }

        for spec in SERVICES.iter().filter(|s| config.is_declared(s.id)) {
            registry.register(Box::new(ServiceCheck::new(spec)));
        }

        registry
    }

    /// Register a check after the existing ones.
    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    /// Get a check by id.
    pub fn get(&self, id: &str) -> Option<&dyn Check> {
        self.checks.iter().find(|c| c.id() == id).map(|c| c.as_ref())
    }

    /// Iterate over all checks in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|c| c.as_ref())
    }

    /// Get the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn into_checks(self) -> Vec<Box<dyn Check>> {
        self.checks
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove every check whose id is on the ignore list.
pub fn filter_ignored(checks: Vec<Box<dyn Check>>, config: &Config) -> Vec<Box<dyn Check>> {
    checks
        .into_iter()
        .filter(|check| {
            let ignored = config.is_ignored(check.id());
            if ignored {
                tracing::debug!("Ignoring check {}", check.id());
            }
            !ignored
        })
        .collect()
}

/// The checks to run for a config, in report order, minus ignored ids.
pub fn build_enabled_checks(config: &Config) -> Vec<Box<dyn Check>> {
    filter_ignored(CheckRegistry::for_config(config).into_checks(), config)
}
