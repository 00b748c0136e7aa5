//! Readiness checks.
//!
//! This module provides the check contract and every built-in check:
//!
//! - [`Check`] - The trait all checks implement
//! - [`CheckResult`] / [`Outcome`] / [`Severity`] - What a check reports
//! - [`Context`] - Read-only scan inputs
//! - [`build_enabled_checks`] / [`run_checks`] / [`Scanner`] - Orchestration
//! - [`exit_code`] - Result list to process exit code
//!
//! # Example
//!
//! ```
//! use shipcheck::checks::{exit_code, Scanner};
//! use shipcheck::config::Config;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let mut config = Config::default();
//! config.checks.security.enabled = false;
//!
//! let report = Scanner::new(temp.path(), config).unwrap().scan();
//! assert!(report.results.iter().any(|r| r.id == "favicon"));
//! assert_eq!(exit_code(&report.results), 1);
//! ```

pub mod check;
pub mod content;
pub mod context;
pub mod env_gitignored;
pub mod env_parity;
pub mod exit;
pub mod headers;
pub mod health;
pub mod indexnow;
pub mod legal;
pub mod license;
pub mod redirect;
pub mod registry;
pub mod result;
pub mod runner;
pub mod secrets;
pub mod service;
mod site;
pub mod ssl;
pub mod static_files;

pub use check::{Check, Outcome, Severity};
pub use content::{ContentCheck, ContentSpec, CONTENT_CHECKS};
pub use context::Context;
pub use env_gitignored::EnvGitignoredCheck;
pub use env_parity::EnvParityCheck;
pub use exit::{exit_code, worst_failure, EXIT_ERROR, EXIT_OK, EXIT_TOOL_ERROR, EXIT_WARN};
pub use headers::SecurityHeadersCheck;
pub use health::HealthEndpointCheck;
pub use indexnow::IndexNowCheck;
pub use legal::LegalPagesCheck;
pub use license::LicenseCheck;
pub use redirect::WwwRedirectCheck;
pub use registry::{build_enabled_checks, filter_ignored, CheckRegistry};
pub use result::CheckResult;
pub use runner::{run_check, run_checks, ScanReport, Scanner};
pub use secrets::SecretScanCheck;
pub use service::ServiceCheck;
pub use ssl::SslCheck;
pub use static_files::{StaticFileCheck, StaticFileSpec, STATIC_FILES};
