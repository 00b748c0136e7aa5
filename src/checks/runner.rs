//! Check execution.
//!
//! Checks run strictly one after another. Each run is fault-isolated: an
//! `Err` or a panic inside a check becomes a failing `error` result for
//! that check and the scan continues.

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use super::check::{Check, Severity};
use super::context::Context;
use super::exit::exit_code;
use super::registry::build_enabled_checks;
use super::result::CheckResult;
use crate::config::Config;
use crate::error::Result;

/// Outcome of one scan, as handed to renderers.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub project: String,
    pub results: Vec<CheckResult>,
}

impl ScanReport {
    /// Process exit code for this report.
    pub fn exit_code(&self) -> u8 {
        exit_code(&self.results)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Run one check, converting errors and panics into a failing result.
pub fn run_check(check: &dyn Check, ctx: &Context) -> CheckResult {
    tracing::debug!("Running check {}", check.id());
    match panic::catch_unwind(AssertUnwindSafe(|| check.run(ctx))) {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            tracing::warn!("Check {} failed: {e}", check.id());
            CheckResult::fail(
                check.id(),
                check.title(),
                Severity::Error,
                format!("check failed: {e}"),
            )
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!("Check {} panicked: {message}", check.id());
            CheckResult::fail(
                check.id(),
                check.title(),
                Severity::Error,
                format!("check panicked: {message}"),
            )
        }
    }
}

/// Run every check in order, producing exactly one result per check.
pub fn run_checks(checks: &[Box<dyn Check>], ctx: &Context) -> Vec<CheckResult> {
    checks.iter().map(|check| run_check(check.as_ref(), ctx)).collect()
}

/// Builds the enabled checks for a project and runs them.
pub struct Scanner {
    ctx: Context,
}

impl Scanner {
    /// Create a scanner for an existing project directory.
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Result<Self> {
        Ok(Self {
            ctx: Context::for_project(root, config)?,
        })
    }

    /// Create a scanner over a prepared context.
    pub fn with_context(ctx: Context) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Select, run and collect.
    pub fn scan(&self) -> ScanReport {
        let checks = build_enabled_checks(self.ctx.config());
        tracing::debug!("Running {} checks", checks.len());

        ScanReport {
            project: self.ctx.config().display_name().to_string(),
            results: run_checks(&checks, &self.ctx),
        }
    }
}
