//! Machine-readable report.

use std::io::Write;

use serde::Serialize;

use super::{ReportFormatter, Summary};
use crate::checks::{CheckResult, ScanReport, Severity};
use crate::error::{Result, ShipcheckError};

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    project: &'a str,
    results: Vec<JsonResult<'a>>,
    summary: Summary,
    exit_code: u8,
}

#[derive(Debug, Serialize)]
struct JsonResult<'a> {
    id: &'a str,
    title: &'a str,
    status: &'static str,
    passed: bool,
    severity: Severity,
    message: &'a str,
    suggestions: &'a [String],
}

impl<'a> From<&'a CheckResult> for JsonResult<'a> {
    fn from(result: &'a CheckResult) -> Self {
        Self {
            id: &result.id,
            title: &result.title,
            status: result.outcome.label(),
            passed: result.passed(),
            severity: result.severity(),
            message: &result.message,
            suggestions: &result.suggestions,
        }
    }
}

/// Pretty-printed JSON document on one write.
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &ScanReport, out: &mut dyn Write) -> Result<()> {
        let doc = JsonReport {
            project: &report.project,
            results: report.results.iter().map(JsonResult::from).collect(),
            summary: Summary::from_results(&report.results),
            exit_code: report.exit_code(),
        };

        let json = serde_json::to_string_pretty(&doc)
            .map_err(|e| ShipcheckError::Other(anyhow::anyhow!("Failed to render JSON: {e}")))?;
        writeln!(out, "{json}")?;
        Ok(())
    }
}
