//! Env file parity with its committed example.

use std::collections::BTreeSet;

use super::check::{Check, Severity};
use super::context::Context;
use super::result::CheckResult;
use crate::config::EnvFileParser;
use crate::error::Result;

/// Compares keys in the env file with keys in the example file.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvParityCheck;

impl Check for EnvParityCheck {
    fn id(&self) -> &str {
        "env-parity"
    }

    fn title(&self) -> &str {
        "Env example parity"
    }

    fn run(&self, ctx: &Context) -> Result<CheckResult> {
        let env = &ctx.config().checks.env;
        if !env.enabled {
            return Ok(CheckResult::skip(self.id(), self.title(), "not enabled, skipping"));
        }

        let example_path = ctx.root().join(&env.example_file);
        let env_path = ctx.root().join(&env.file);
        if !example_path.is_file() {
            return Ok(CheckResult::skip(self.id(), self.title(), "no example file found"));
        }
        if !env_path.is_file() {
            return Ok(CheckResult::skip(
                self.id(),
                self.title(),
                format!("no {} file found", env.file),
            ));
        }

        let keys = EnvFileParser::load_keys(&env_path)
            .map_err(|e| (&env.file, e))
            .and_then(|actual| {
                let example =
                    EnvFileParser::load_keys(&example_path).map_err(|e| (&env.example_file, e))?;
                Ok((actual, example))
            });
        let (actual, example) = match keys {
            Ok(keys) => keys,
            Err((file, e)) => {
                tracing::debug!("Failed to read {file}: {e}");
                return Ok(CheckResult::fail(
                    self.id(),
                    self.title(),
                    ctx.config().checks.malformed.files,
                    format!("could not read {file}: {e}"),
                )
                .with_suggestions([format!("Save {file} as UTF-8 text")]));
            }
        };

        let undocumented: BTreeSet<&String> = actual.difference(&example).collect();
        let unset: BTreeSet<&String> = example.difference(&actual).collect();
        if undocumented.is_empty() && unset.is_empty() {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                format!("{} keys match {}", actual.len(), env.example_file),
            ));
        }

        let join = |keys: &BTreeSet<&String>| {
            keys.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", ")
        };
        let mut parts = Vec::new();
        let mut result_suggestions = Vec::new();
        if !undocumented.is_empty() {
            parts.push(format!("missing from {}: {}", env.example_file, join(&undocumented)));
            result_suggestions.push(format!(
                "Document {} in {}",
                join(&undocumented),
                env.example_file
            ));
        }
        if !unset.is_empty() {
            parts.push(format!("missing from {}: {}", env.file, join(&unset)));
            result_suggestions.push(format!("Set {} in {}", join(&unset), env.file));
        }

        Ok(CheckResult::fail(self.id(), self.title(), Severity::Warn, parts.join("; "))
            .with_suggestions(result_suggestions))
    }
}
