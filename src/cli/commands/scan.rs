//! Scan command implementation.
//!
//! The `shipcheck scan` command runs every enabled check and prints the
//! report. Its exit code is the scan verdict.

use std::io::Write;

use crate::checks::Scanner;
use crate::cli::args::{OutputFormat, ScanArgs};
use crate::config::load_config;
use crate::error::Result;
use crate::report::{HumanFormatter, JsonFormatter, ReportFormatter, Theme};

use super::dispatcher::{Command, CommandResult, GlobalOptions};

/// The scan command implementation.
pub struct ScanCommand {
    options: GlobalOptions,
    args: ScanArgs,
}

impl ScanCommand {
    pub fn new(options: GlobalOptions, args: ScanArgs) -> Self {
        Self { options, args }
    }

    fn formatter(&self) -> Box<dyn ReportFormatter> {
        match self.args.format {
            OutputFormat::Json => Box::new(JsonFormatter),
            OutputFormat::Human => {
                let theme = if self.options.color && console::colors_enabled() {
                    Theme::new()
                } else {
                    Theme::plain()
                };
                Box::new(HumanFormatter::new(theme))
            }
        }
    }
}

impl Command for ScanCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let root = &self.options.project_root;
        let mut config = load_config(root, self.options.config_path())?;
        config.ignore.extend(self.args.ignore.iter().cloned());
        if config.project.is_none() {
            config.project = self.options.project_name();
        }

        let report = Scanner::new(root, config)?.scan();
        self.formatter().format(&report, out)?;

        Ok(CommandResult::from_exit_code(report.exit_code()))
    }
}
