//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`shipcheck scan`, `shipcheck detect`)
//! - Shared initialization logic
//! - Consistent global flag handling

pub mod checks;
pub mod completions;
pub mod detect;
pub mod dispatcher;
pub mod scan;
pub mod schema;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, GlobalOptions};
