//! Schema command implementation.
//!
//! The `shipcheck schema` command prints the JSON schema of `shipcheck.yml`
//! for editor integration.

use std::io::Write;

use crate::config::Config;
use crate::error::{Result, ShipcheckError};

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand;

impl Command for SchemaCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let schema = schemars::schema_for!(Config);
        let json = serde_json::to_string_pretty(&schema)
            .map_err(|e| ShipcheckError::Other(anyhow::anyhow!("Failed to render schema: {e}")))?;
        writeln!(out, "{json}")?;
        Ok(CommandResult::success())
    }
}
