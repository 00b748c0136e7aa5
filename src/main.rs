//! shipcheck CLI entry point.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use shipcheck::checks::EXIT_TOOL_ERROR;
use shipcheck::cli::{Cli, CommandDispatcher, GlobalOptions};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr so JSON reports on stdout stay clean.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("shipcheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shipcheck=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("shipcheck starting with args: {:?}", cli);

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let project_root = match cli.project.clone() {
        Some(path) => path,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error: cannot determine current directory: {e}");
                return ExitCode::from(EXIT_TOOL_ERROR);
            }
        },
    };

    let dispatcher = CommandDispatcher::new(GlobalOptions::from_cli(&cli, project_root));
    let mut stdout = std::io::stdout().lock();

    match dispatcher.dispatch(&cli, &mut stdout) {
        Ok(result) => {
            let _ = stdout.flush();
            ExitCode::from(result.exit_code)
        }
        Err(e) => {
            let _ = stdout.flush();
            eprintln!(
                "{}",
                console::style(format!("Error: {e}")).for_stderr().red().bold()
            );
            ExitCode::from(EXIT_TOOL_ERROR)
        }
    }
}
