//! Checks command implementation.
//!
//! The `shipcheck checks` command lists the checks the current config
//! enables, in report order.

use std::io::Write;

use crate::checks::build_enabled_checks;
use crate::config::load_config;
use crate::error::Result;

use super::dispatcher::{Command, CommandResult, GlobalOptions};

/// The checks command implementation.
pub struct ChecksCommand {
    options: GlobalOptions,
}

impl ChecksCommand {
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }
}

impl Command for ChecksCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let config = load_config(&self.options.project_root, self.options.config_path())?;
        let checks = build_enabled_checks(&config);

        let width = checks.iter().map(|c| c.id().len()).max().unwrap_or(0);
        for check in &checks {
            writeln!(out, "{:<width$}  {}", check.id(), check.title())?;
        }
        Ok(CommandResult::success())
    }
}
