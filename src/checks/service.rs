//! Declared-service checks, one per catalog entry.

use super::check::{Check, Severity};
use super::context::Context;
use super::result::CheckResult;
use crate::catalog::ServiceSpec;
use crate::error::Result;
use crate::evidence::{compile_patterns, has_any_env_var, search_with_trace};

/// Verifies a declared third-party service is actually wired in.
///
/// Env-key prefixes are tried first; the SDK patterns go through the
/// evidence cascade only when no env file mentions the service.
#[derive(Debug, Clone, Copy)]
pub struct ServiceCheck {
    spec: &'static ServiceSpec,
}

impl ServiceCheck {
    pub fn new(spec: &'static ServiceSpec) -> Self {
        Self { spec }
    }
}

impl Check for ServiceCheck {
    fn id(&self) -> &str {
        self.spec.id
    }

    fn title(&self) -> &str {
        self.spec.title
    }

    fn run(&self, ctx: &Context) -> Result<CheckResult> {
        let spec = self.spec;
        if !ctx.config().is_declared(spec.id) {
            return Ok(CheckResult::skip(spec.id, spec.title, "not declared, skipping"));
        }

        if has_any_env_var(ctx.root(), spec.env_prefixes) {
            return Ok(CheckResult::pass(
                spec.id,
                spec.title,
                format!("{} configured in env files", spec.title),
            ));
        }

        let patterns = compile_patterns(spec.sdk_patterns);
        let trace = search_with_trace(ctx.root(), ctx.stack(), &patterns);
        if let Some(evidence) = trace.evidence {
            let rel = evidence
                .path
                .strip_prefix(ctx.root())
                .unwrap_or(&evidence.path);
            return Ok(CheckResult::pass(
                spec.id,
                spec.title,
                format!("{} initialized in {}", spec.title, rel.display()),
            ));
        }

        tracing::debug!(
            "{}: no env keys, {} candidates and {} source files without SDK usage",
            spec.id,
            trace.candidates_checked,
            trace.files_walked
        );
        Ok(CheckResult::fail(
            spec.id,
            spec.title,
            Severity::Warn,
            format!("{} is declared but no configuration or SDK usage was found", spec.title),
        )
        .with_suggestion(format!("Add {} to your env files", spec.env_hint))
        .with_suggestion(format!("Initialize the SDK with {}", spec.sdk_hint)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::service;
    use crate::checks::Outcome;
    use crate::config::{Config, ServiceConfig};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn ctx(root: &Path, declared: &[&str]) -> Context {
        let mut config = Config::default();
        for id in declared {
            config.services.insert(id.to_string(), ServiceConfig::declared());
        }
        Context::new(root, config).unwrap()
    }

    fn stripe() -> ServiceCheck {
        ServiceCheck::new(service("stripe").unwrap())
    }

    #[test]
    fn undeclared_is_skipped() {
        let temp = TempDir::new().unwrap();
        let result = stripe().run(&ctx(temp.path(), &[])).unwrap();

        assert_eq!(result.outcome, Outcome::Skipped);
        assert!(result.message.contains("not declared"));
    }

    #[test]
    fn env_prefix_passes() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env.example"), "STRIPE_SECRET_KEY=\n").unwrap();

        let result = stripe().run(&ctx(temp.path(), &["stripe"])).unwrap();
        assert_eq!(result.outcome, Outcome::Passed);
    }

    #[test]
    fn sdk_usage_passes() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src/lib")).unwrap();
        fs::write(
            temp.path().join("src/lib/billing.ts"),
            "const stripe = new Stripe(process.env.KEY);",
        )
        .unwrap();

        let result = stripe().run(&ctx(temp.path(), &["stripe"])).unwrap();
        assert_eq!(result.outcome, Outcome::Passed);
        assert!(result.message.contains("billing.ts"));
    }

    #[test]
    fn missing_evidence_warns_with_hints() {
        let temp = TempDir::new().unwrap();
        let result = stripe().run(&ctx(temp.path(), &["stripe"])).unwrap();

        assert_eq!(result.outcome, Outcome::Failed(Severity::Warn));
        assert_eq!(result.suggestions.len(), 2);
        assert!(result.suggestions[0].contains("STRIPE_SECRET_KEY"));
        assert!(result.suggestions[1].contains("loadStripe"));
    }

    #[test]
    fn prefix_inside_other_key_does_not_count() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env"), "FOO_STRIPE_KEY=1\n").unwrap();

        let result = stripe().run(&ctx(temp.path(), &["stripe"])).unwrap();
        assert_eq!(result.outcome, Outcome::Failed(Severity::Warn));
    }
}
