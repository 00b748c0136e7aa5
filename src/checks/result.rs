//! Check results.

use super::check::{Outcome, Severity};

/// The immutable result of running one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub id: String,
    pub title: String,
    pub outcome: Outcome,
    pub message: String,
    pub suggestions: Vec<String>,
}

impl CheckResult {
    /// Create a result with an explicit outcome.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        outcome: Outcome,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            outcome,
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn skip(id: impl Into<String>, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(id, title, Outcome::Skipped, message)
    }

    pub fn pass(id: impl Into<String>, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(id, title, Outcome::Passed, message)
    }

    pub fn fail(
        id: impl Into<String>,
        title: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self::new(id, title, Outcome::Failed(severity), message)
    }

    /// Append a remediation suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Append several remediation suggestions, keeping order.
    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions
            .extend(suggestions.into_iter().map(Into::into));
        self
    }

    /// True for skipped and passed results.
    pub fn passed(&self) -> bool {
        !matches!(self.outcome, Outcome::Failed(_))
    }

    /// Effective severity: the carried one for failures, info otherwise.
    pub fn severity(&self) -> Severity {
        match self.outcome {
            Outcome::Failed(severity) => severity,
            Outcome::Skipped | Outcome::Passed => Severity::Info,
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.outcome == Outcome::Skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_and_passed_are_passing_info() {
        let skipped = CheckResult::skip("stripe", "Stripe", "not declared, skipping");
        let passed = CheckResult::pass("favicon", "Favicon", "found");

        for result in [skipped, passed] {
            assert!(result.passed());
            assert_eq!(result.severity(), Severity::Info);
        }
    }

    #[test]
    fn failed_carries_severity() {
        let result = CheckResult::fail("sitemap", "Sitemap", Severity::Warn, "missing");
        assert!(!result.passed());
        assert_eq!(result.severity(), Severity::Warn);
    }

    #[test]
    fn failed_info_still_fails() {
        let result = CheckResult::fail("x", "X", Severity::Info, "note");
        assert!(!result.passed());
        assert_eq!(result.severity(), Severity::Info);
    }

    #[test]
    fn suggestions_keep_order() {
        let result = CheckResult::fail("stripe", "Stripe", Severity::Warn, "missing")
            .with_suggestion("first")
            .with_suggestions(["second", "third"]);

        assert_eq!(result.suggestions, vec!["first", "second", "third"]);
    }
}
