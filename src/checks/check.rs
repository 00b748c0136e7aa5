//! Check definitions.
//!
//! This module provides the core traits and types for verification units:
//!
//! - [`Check`] - The trait every check implements
//! - [`Severity`] - Severity level of a failure (info, warn, error)
//! - [`Outcome`] - Three-state result of running a check

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::context::Context;
use super::result::CheckResult;
use crate::error::Result;

/// Severity level of a failing check.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, never affects the exit code.
    Info,
    /// Should be addressed before launch.
    Warn,
    /// Blocks launch.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warn => write!(f, "warn"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// What happened when a check ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to check (feature not declared, no URL configured, ...).
    Skipped,
    /// Verified good.
    Passed,
    /// Evidence missing or wrong.
    Failed(Severity),
}

impl Outcome {
    /// Lowercase status label used by renderers.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Skipped => "skipped",
            Outcome::Passed => "passed",
            Outcome::Failed(_) => "failed",
        }
    }
}

/// A single verification unit.
///
/// Checks are stateless: everything they need comes from the [`Context`].
/// Live probes perform outbound reads through the shared client; nothing
/// else has side effects.
pub trait Check: Send + Sync {
    /// Stable identifier, also accepted by the ignore list.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn title(&self) -> &str;

    /// Run the check.
    ///
    /// An `Err` is not fatal to the scan; the runner turns it into a
    /// failing result.
    fn run(&self, ctx: &Context) -> Result<CheckResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert_eq!(
            [Severity::Warn, Severity::Error, Severity::Info].iter().max(),
            Some(&Severity::Error)
        );
    }

    #[test]
    fn severity_display() {
        assert_eq!(format!("{}", Severity::Info), "info");
        assert_eq!(format!("{}", Severity::Warn), "warn");
        assert_eq!(format!("{}", Severity::Error), "error");
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Warn).unwrap(), "\"warn\"");
        let parsed: Severity = serde_yaml::from_str("error").unwrap();
        assert_eq!(parsed, Severity::Error);
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(Outcome::Skipped.label(), "skipped");
        assert_eq!(Outcome::Passed.label(), "passed");
        assert_eq!(Outcome::Failed(Severity::Warn).label(), "failed");
    }
}
