//! Configuration schema definitions for shipcheck.
//!
//! This module contains all the struct definitions that map to
//! the `shipcheck.yml` file format.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::checks::Severity;

/// Root configuration structure for shipcheck.yml
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Project name (for display purposes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Framework label, e.g. `next`, `rails`, `laravel`
    #[serde(default = "default_stack")]
    pub stack: String,

    /// Deployed URLs used by live probes
    pub urls: Urls,

    /// Third-party services the project is expected to use
    #[serde(default)]
    pub services: BTreeMap<String, ServiceConfig>,

    /// Per-check settings
    pub checks: ChecksConfig,

    /// Check or service ids excluded from the scan entirely
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: None,
            stack: default_stack(),
            urls: Urls::default(),
            services: BTreeMap::new(),
            checks: ChecksConfig::default(),
            ignore: Vec::new(),
        }
    }
}

impl Config {
    /// Whether the named service is declared as in use.
    pub fn is_declared(&self, service: &str) -> bool {
        self.services.get(service).is_some_and(|s| s.declared)
    }

    /// Whether an id (check or service) is on the ignore list.
    pub fn is_ignored(&self, id: &str) -> bool {
        self.ignore.iter().any(|i| i == id)
    }

    /// URL used for live probes: production, falling back to staging.
    pub fn primary_url(&self) -> Option<&str> {
        self.urls
            .production
            .as_deref()
            .or(self.urls.staging.as_deref())
            .filter(|u| !u.trim().is_empty())
    }

    /// Display name for reports.
    pub fn display_name(&self) -> &str {
        self.project.as_deref().unwrap_or("project")
    }
}

fn default_stack() -> String {
    "unknown".to_string()
}

/// Deployed URLs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Urls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging: Option<String>,
}

/// Declaration of one third-party service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ServiceConfig {
    pub declared: bool,
}

impl ServiceConfig {
    pub fn declared() -> Self {
        Self { declared: true }
    }
}

/// Settings for every check category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ChecksConfig {
    pub seo: SeoConfig,
    pub files: FilesConfig,
    pub env: EnvConfig,
    pub security: SecurityConfig,
    pub health: HealthConfig,
    pub indexnow: IndexNowConfig,
    pub license: LicenseConfig,
    pub malformed: MalformedConfig,
}

/// Content assertions against the main layout.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SeoConfig {
    pub enabled: bool,

    /// Layout file relative to the project root, overriding stack conventions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_layout: Option<PathBuf>,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            main_layout: None,
        }
    }
}

/// Optional standard web files.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FilesConfig {
    pub llms_txt: bool,
    pub web_manifest: bool,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            llms_txt: true,
            web_manifest: true,
        }
    }
}

/// Env file parity between the real env file and its committed example.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EnvConfig {
    pub enabled: bool,

    #[serde(default = "default_env_file")]
    pub file: String,

    #[serde(default = "default_example_file")]
    pub example_file: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: default_env_file(),
            example_file: default_example_file(),
        }
    }
}

fn default_env_file() -> String {
    ".env".to_string()
}

fn default_example_file() -> String {
    ".env.example".to_string()
}

/// Live probes against the deployed site (SSL, headers, redirects).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SecurityConfig {
    pub enabled: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Health endpoint probe.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HealthConfig {
    pub enabled: bool,

    #[serde(default = "default_health_path")]
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_health_path(),
        }
    }
}

fn default_health_path() -> String {
    "/health".to_string()
}

/// IndexNow key verification.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct IndexNowConfig {
    pub enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// License file detection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LicenseConfig {
    pub enabled: bool,
}

/// Severity reported when an expected file is present but empty or unreadable.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MalformedConfig {
    /// Static web files (robots.txt, sitemap.xml, ...)
    pub files: Severity,
    /// Main layout used by content assertions
    pub content: Severity,
    /// License file
    pub license: Severity,
}

impl Default for MalformedConfig {
    fn default() -> Self {
        Self {
            files: Severity::Warn,
            content: Severity::Warn,
            license: Severity::Warn,
        }
    }
}
