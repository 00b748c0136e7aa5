//! Exit-code policy.

use super::check::Severity;
use super::result::CheckResult;

/// Exit code when a failing check has severity error.
pub const EXIT_ERROR: u8 = 2;
/// Exit code when the worst failing severity is warn.
pub const EXIT_WARN: u8 = 1;
/// Exit code when nothing failed above info.
pub const EXIT_OK: u8 = 0;
/// Exit code for tool errors (bad config, missing project directory).
pub const EXIT_TOOL_ERROR: u8 = 3;

/// Worst severity among failing results, if any failed.
pub fn worst_failure(results: &[CheckResult]) -> Option<Severity> {
    results
        .iter()
        .filter(|r| !r.passed())
        .map(CheckResult::severity)
        .max()
}

/// Reduce a result list to a process exit code.
///
/// Depends only on the failing results' severities, never on order or count.
pub fn exit_code(results: &[CheckResult]) -> u8 {
    match worst_failure(results) {
        Some(Severity::Error) => EXIT_ERROR,
        Some(Severity::Warn) => EXIT_WARN,
        Some(Severity::Info) | None => EXIT_OK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fail(severity: Severity) -> CheckResult {
        CheckResult::fail("x", "X", severity, "failed")
    }

    #[test]
    fn empty_is_ok() {
        assert_eq!(exit_code(&[]), EXIT_OK);
    }

    #[test]
    fn passing_results_never_fail() {
        let results = vec![
            CheckResult::pass("a", "A", "ok"),
            CheckResult::skip("b", "B", "not declared, skipping"),
        ];
        assert_eq!(exit_code(&results), EXIT_OK);
    }

    #[test]
    fn failing_info_is_ok() {
        assert_eq!(exit_code(&[fail(Severity::Info)]), EXIT_OK);
    }

    #[test]
    fn warn_gives_one() {
        let results = vec![CheckResult::pass("a", "A", "ok"), fail(Severity::Warn)];
        assert_eq!(exit_code(&results), EXIT_WARN);
    }

    #[test]
    fn error_dominates_regardless_of_order() {
        let a = vec![fail(Severity::Error), fail(Severity::Warn)];
        let b = vec![fail(Severity::Warn), fail(Severity::Error)];
        assert_eq!(exit_code(&a), EXIT_ERROR);
        assert_eq!(exit_code(&b), EXIT_ERROR);
    }

    #[test]
    fn worst_failure_ignores_passing() {
        let results = vec![CheckResult::pass("a", "A", "ok"), fail(Severity::Warn)];
        assert_eq!(worst_failure(&results), Some(Severity::Warn));
        assert_eq!(worst_failure(&[CheckResult::pass("a", "A", "ok")]), None);
    }
}
