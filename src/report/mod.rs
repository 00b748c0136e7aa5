//! Report rendering.
//!
//! Formatters turn a [`ScanReport`] into text. They never decide the exit
//! code; that stays with [`ScanReport::exit_code`].

pub mod human;
pub mod json;
pub mod theme;

use std::io::Write;

use serde::Serialize;

use crate::checks::{CheckResult, Outcome, ScanReport, Severity};
use crate::error::Result;

pub use human::HumanFormatter;
pub use json::JsonFormatter;
pub use theme::{StatusKind, Theme};

/// Renders a scan report.
pub trait ReportFormatter {
    fn format(&self, report: &ScanReport, out: &mut dyn Write) -> Result<()>;
}

/// Result counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub passed: usize,
    pub skipped: usize,
    pub info: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl Summary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.outcome {
                Outcome::Passed => summary.passed += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Failed(Severity::Info) => summary.info += 1,
                Outcome::Failed(Severity::Warn) => summary.warnings += 1,
                Outcome::Failed(Severity::Error) => summary.errors += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.passed + self.skipped + self.info + self.warnings + self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_each_status() {
        let results = vec![
            CheckResult::pass("a", "A", "ok"),
            CheckResult::pass("b", "B", "ok"),
            CheckResult::skip("c", "C", "off"),
            CheckResult::fail("d", "D", Severity::Warn, "missing"),
            CheckResult::fail("e", "E", Severity::Error, "leaked"),
        ];

        let summary = Summary::from_results(&results);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.info, 0);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.total(), 5);
    }
}
