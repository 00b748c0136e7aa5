//! Terminal report.

use std::io::Write;

use super::theme::{StatusKind, Theme};
use super::{ReportFormatter, Summary};
use crate::checks::{CheckResult, ScanReport};
use crate::error::Result;

/// One line per result, suggestions indented underneath, then a summary.
pub struct HumanFormatter {
    theme: Theme,
}

impl HumanFormatter {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Formatter that never emits ANSI escapes.
    pub fn plain() -> Self {
        Self::new(Theme::plain())
    }

    fn write_result(&self, result: &CheckResult, out: &mut dyn Write) -> Result<()> {
        let status = StatusKind::of(result);
        let message = if status == StatusKind::Skipped {
            self.theme.dim.apply_to(&result.message).to_string()
        } else {
            result.message.clone()
        };

        writeln!(
            out,
            "  {} {}  {}",
            status.styled(&self.theme),
            self.theme.highlight.apply_to(&result.title),
            message
        )?;
        for suggestion in &result.suggestions {
            writeln!(out, "      {}", self.theme.hint.apply_to(format!("→ {suggestion}")))?;
        }
        Ok(())
    }

    fn summary_line(&self, summary: &Summary) -> String {
        let mut parts = vec![self
            .theme
            .success
            .apply_to(format!("{} passed", summary.passed))
            .to_string()];
        if summary.errors > 0 {
            parts.push(
                self.theme
                    .error
                    .apply_to(format!("{} {}", summary.errors, plural(summary.errors, "error")))
                    .to_string(),
            );
        }
        if summary.warnings > 0 {
            parts.push(
                self.theme
                    .warning
                    .apply_to(format!(
                        "{} {}",
                        summary.warnings,
                        plural(summary.warnings, "warning")
                    ))
                    .to_string(),
            );
        }
        if summary.info > 0 {
            parts.push(self.theme.info.apply_to(format!("{} info", summary.info)).to_string());
        }
        if summary.skipped > 0 {
            parts.push(
                self.theme
                    .dim
                    .apply_to(format!("{} skipped", summary.skipped))
                    .to_string(),
            );
        }
        parts.join(", ")
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new(Theme::new())
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, report: &ScanReport, out: &mut dyn Write) -> Result<()> {
        writeln!(
            out,
            "{}",
            self.theme
                .highlight
                .apply_to(format!("shipcheck: {}", report.project))
        )?;
        writeln!(out)?;

        for result in &report.results {
            self.write_result(result, out)?;
        }

        writeln!(out)?;
        writeln!(out, "{}", self.summary_line(&Summary::from_results(&report.results)))?;
        Ok(())
    }
}
