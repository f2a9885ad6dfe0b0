//! formulary CLI Application
//!
//! Renders Homebrew formulas from release manifests and prints artifact
//! checksums.

// CLI binary needs to output to stdout/stderr - this is intentional
#![allow(clippy::print_stdout, clippy::print_stderr)]

use formulary::cli::{self, CliError, EXIT_OK, exit_code_for, render_error};
use formulary::commands;
use formulary::tracing::{TracingConfig, init_tracing};
use formulary_homebrew::write_formula;
use std::io;

fn main() {
    // NOTE: tracing may be unusable during a panic, so write directly to stderr
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();

    let tracing_config = TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
        ..Default::default()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("Failed to initialize tracing: {e}");
    }

    let exit_code = match run(&cli) {
        Ok(()) => EXIT_OK,
        Err(err) => {
            render_error(&err);
            exit_code_for(&err)
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &cli::Cli) -> Result<(), CliError> {
    tracing::debug!(command = ?cli.command, "Executing command");
    if let Some(output) = commands::execute(&cli.command)? {
        write_formula(&mut io::stdout().lock(), &output)?;
    }
    Ok(())
}
