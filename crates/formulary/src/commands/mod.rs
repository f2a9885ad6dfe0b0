//! Command implementations.

pub mod checksum;
pub mod fetch;
pub mod formula;

use crate::cli::{CliError, Commands};

/// Result of a command: text for stdout, if any.
pub type CommandResult = Result<Option<String>, CliError>;

/// Dispatch a parsed subcommand.
///
/// # Errors
///
/// Returns the command's error.
pub fn execute(command: &Commands) -> CommandResult {
    match command {
        Commands::Formula(args) => formula::execute(args),
        Commands::Checksum { path } => checksum::execute(path).map(Some),
    }
}
