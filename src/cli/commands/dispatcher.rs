//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, ScanArgs};
use crate::error::Result;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait. Output goes to `out` so
/// commands can be exercised against a buffer.
pub trait Command {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Process exit code.
    pub exit_code: u8,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: u8) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Result carrying a scan verdict.
    pub fn from_exit_code(exit_code: u8) -> Self {
        if exit_code == 0 {
            Self::success()
        } else {
            Self::failure(exit_code)
        }
    }
}

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub project_root: PathBuf,
    pub config: Option<PathBuf>,
    pub color: bool,
}

impl GlobalOptions {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            config: None,
            color: true,
        }
    }

    pub fn from_cli(cli: &Cli, project_root: PathBuf) -> Self {
        Self {
            project_root,
            config: cli.config.clone(),
            color: !cli.no_color,
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    /// Project directory name, used when the config names no project.
    pub fn project_name(&self) -> Option<String> {
        let root = self
            .project_root
            .canonicalize()
            .unwrap_or_else(|_| self.project_root.clone());
        root.file_name().map(|n| n.to_string_lossy().into_owned())
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    options: GlobalOptions,
}

impl CommandDispatcher {
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.options.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Scan(args)) => {
                super::scan::ScanCommand::new(self.options.clone(), args.clone()).execute(out)
            }
            Some(Commands::Detect(args)) => {
                super::detect::DetectCommand::new(self.options.clone(), args.clone()).execute(out)
            }
            Some(Commands::Checks) => {
                super::checks::ChecksCommand::new(self.options.clone()).execute(out)
            }
            Some(Commands::Schema) => super::schema::SchemaCommand.execute(out),
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(out)
            }
            None => {
                // Default to scan with default args
                super::scan::ScanCommand::new(self.options.clone(), ScanArgs::default())
                    .execute(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(2);
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn from_exit_code_zero_is_success() {
        assert!(CommandResult::from_exit_code(0).success);
        assert!(!CommandResult::from_exit_code(1).success);
    }

    #[test]
    fn dispatches_schema() {
        let temp = TempDir::new().unwrap();
        let cli = Cli::parse_from(["shipcheck", "schema"]);
        let dispatcher = CommandDispatcher::new(GlobalOptions::new(temp.path()));

        let mut out = Vec::new();
        let result = dispatcher.dispatch(&cli, &mut out).unwrap();
        assert!(result.success);
        assert!(String::from_utf8(out).unwrap().contains("\"properties\""));
    }
}
