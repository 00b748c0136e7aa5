//! `.env` must never be committed.

use regex::Regex;
use std::fs;

use super::check::{Check, Severity};
use super::context::Context;
use super::result::CheckResult;
use crate::error::Result;

/// Fails with `error` when `.env` exists but `.gitignore` does not exclude it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvGitignoredCheck;

/// Translate one `.gitignore` pattern into an anchored regex over a
/// root-level file name. Directory-only patterns never match a file.
fn pattern_regex(pattern: &str) -> Option<Regex> {
    let pattern = pattern
        .strip_prefix("**/")
        .or_else(|| pattern.strip_prefix('/'))
        .unwrap_or(pattern);
    if pattern.is_empty() || pattern.ends_with('/') || pattern.contains('/') {
        return None;
    }

    let mut regex = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => regex.push_str("[^/]*"),
            '?' => regex.push_str("[^/]"),
            c => regex.push_str(&regex::escape(&c.to_string())),
        }
    }
    regex.push('$');
    Regex::new(&regex).ok()
}

/// Whether `.gitignore` content ignores a root-level file.
///
/// Later lines override earlier ones, so `!name` re-includes.
pub fn is_ignored(gitignore: &str, file_name: &str) -> bool {
    let mut ignored = false;
    for line in gitignore.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (negated, pattern) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line),
        };
        if pattern_regex(pattern).is_some_and(|re| re.is_match(file_name)) {
            ignored = !negated;
        }
    }
    ignored
}

impl Check for EnvGitignoredCheck {
    fn id(&self) -> &str {
        "env-gitignored"
    }

    fn title(&self) -> &str {
        ".env ignored by git"
    }

    fn run(&self, ctx: &Context) -> Result<CheckResult> {
        if !ctx.root().join(".env").is_file() {
            return Ok(CheckResult::skip(self.id(), self.title(), "no .env file"));
        }

        let gitignore = fs::read_to_string(ctx.root().join(".gitignore")).unwrap_or_default();
        if is_ignored(&gitignore, ".env") {
            return Ok(CheckResult::pass(self.id(), self.title(), ".env is listed in .gitignore"));
        }

        Ok(CheckResult::fail(
            self.id(),
            self.title(),
            Severity::Error,
            ".env exists but is not excluded by .gitignore",
        )
        .with_suggestion("Add .env to .gitignore")
        .with_suggestion("If it was already committed, remove it with `git rm --cached .env` and rotate its secrets"))
    }
}
