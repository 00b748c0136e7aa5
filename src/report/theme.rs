//! Visual theme and status glyphs.

use console::Style;

use crate::checks::{CheckResult, Outcome, Severity};

/// Styles used by the human report.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Passed checks (green).
    pub success: Style,
    /// Warn failures (orange).
    pub warning: Style,
    /// Error failures (red bold).
    pub error: Style,
    /// Info failures (cyan).
    pub info: Style,
    /// Skipped checks and secondary text.
    pub dim: Style,
    /// Check titles and the project header.
    pub highlight: Style,
    /// Remediation suggestions.
    pub hint: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().cyan(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            hint: Style::new().magenta().dim(),
        }
    }

    /// Theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            hint: Style::new(),
        }
    }
}

/// Display status of one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Passed,
    Info,
    Warning,
    Error,
    Skipped,
}

impl StatusKind {
    pub fn of(result: &CheckResult) -> Self {
        match result.outcome {
            Outcome::Passed => Self::Passed,
            Outcome::Skipped => Self::Skipped,
            Outcome::Failed(Severity::Info) => Self::Info,
            Outcome::Failed(Severity::Warn) => Self::Warning,
            Outcome::Failed(Severity::Error) => Self::Error,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Passed => "✓",
            Self::Info => "ℹ",
            Self::Warning => "⚠",
            Self::Error => "✗",
            Self::Skipped => "○",
        }
    }

    /// Styled icon string using the given theme.
    pub fn styled(self, theme: &Theme) -> String {
        let icon = self.icon();
        match self {
            Self::Passed => theme.success.apply_to(icon).to_string(),
            Self::Info => theme.info.apply_to(icon).to_string(),
            Self::Warning => theme.warning.apply_to(icon).to_string(),
            Self::Error => theme.error.apply_to(icon).to_string(),
            Self::Skipped => theme.dim.apply_to(icon).to_string(),
        }
    }
}
