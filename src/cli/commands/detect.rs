//! Detect command implementation.
//!
//! The `shipcheck detect` command prints a starter config. It never writes
//! files.

use std::io::Write;

use crate::cli::args::DetectArgs;
use crate::detection::{DetectOptions, DetectionRunner};
use crate::error::{Result, ShipcheckError};

use super::dispatcher::{Command, CommandResult, GlobalOptions};

/// The detect command implementation.
pub struct DetectCommand {
    options: GlobalOptions,
    args: DetectArgs,
}

impl DetectCommand {
    pub fn new(options: GlobalOptions, args: DetectArgs) -> Self {
        Self { options, args }
    }
}

impl Command for DetectCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let root = &self.options.project_root;
        if !root.is_dir() {
            return Err(ShipcheckError::ProjectNotFound { path: root.clone() });
        }

        let runner = DetectionRunner::new(DetectOptions {
            network: !self.args.no_network,
        });
        let detection = runner.run(root)?;

        writeln!(out, "# Generated by shipcheck detect")?;
        writeln!(out, "# stack: {}", detection.stack)?;
        for detail in detection.details.iter().filter(|d| d.detected()) {
            let signals: Vec<String> = detail.signals.iter().map(ToString::to_string).collect();
            writeln!(out, "# {}: {}", detail.id, signals.join(", "))?;
        }
        write!(out, "{}", detection.to_yaml(self.options.project_name())?)?;

        Ok(CommandResult::success())
    }
}
