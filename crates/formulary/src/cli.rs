use crate::tracing::{LogLevel, TracingFormat};
use clap::{Args, Parser, Subcommand};
use formulary_release::{DEFAULT_MANIFEST, QuotePolicy};
use miette::{Diagnostic, Report};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// CLI, manifest or I/O error exit code
pub const EXIT_CLI: i32 = 2;
/// Descriptor validation error exit code
pub const EXIT_RENDER: i32 = 3;

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// CLI or configuration error (exit code 2)
    #[error("CLI/configuration error: {message}")]
    #[diagnostic(code(formulary::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// The release descriptor failed validation (exit code 3)
    #[error("Cannot render formula: {message}")]
    #[diagnostic(code(formulary::cli::render))]
    Render {
        /// The error message
        message: String,
        /// Offending descriptor field
        field: Option<String>,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Other unexpected error (exit code 2)
    #[error("Unexpected error: {message}")]
    #[diagnostic(code(formulary::cli::other))]
    Other {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new configuration error with help text
    #[must_use]
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new other error
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            help: None,
        }
    }
}

/// Convert `formulary_release::Error` to the matching `CliError` variant.
///
/// - Validation failures (missing field, bad checksum, quoting) -> Render (exit code 3)
/// - Manifest and artifact problems -> Config (exit code 2)
/// - Output and I/O errors -> Other (exit code 2)
impl From<formulary_release::Error> for CliError {
    fn from(err: formulary_release::Error) -> Self {
        use formulary_release::Error;

        if err.is_validation() {
            let help = match &err {
                Error::MissingField { field } => Some(format!(
                    "Set `{field}` in the release manifest or pass it on the command line"
                )),
                Error::UnescapedQuote { .. } => Some(
                    "Remove the offending characters or pass --quote-policy escape".to_string(),
                ),
                Error::InvalidChecksum { .. } => {
                    Some("A SHA-256 checksum is exactly 64 hexadecimal characters".to_string())
                }
                Error::InvalidFormulaName { .. } => Some(
                    "Formula names may not contain path separators or be '.' or '..'".to_string(),
                ),
                _ => None,
            };
            return Self::Render {
                message: err.to_string(),
                field: err.field().map(str::to_string),
                help,
            };
        }

        match err {
            Error::Manifest { message, .. } => Self::config_with_help(
                message,
                format!("Pass --manifest or create {DEFAULT_MANIFEST}"),
            ),
            Error::Artifact { message, .. } => Self::config(message),
            other => Self::other(other.to_string()),
        }
    }
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Render { .. } => EXIT_RENDER,
        CliError::Config { .. } | CliError::Other { .. } => EXIT_CLI,
    }
}

/// Render an error to stderr with miette
#[allow(clippy::print_stderr)]
pub fn render_error(err: &CliError) {
    let report = Report::new(err.clone());
    eprintln!("{report:?}");
    // Ensure output is flushed before potential process exit
    let _ = io::stderr().flush();
}

/// Generate Homebrew formulas for CLI releases.
#[derive(Parser, Debug)]
#[command(name = "formulary")]
#[command(about = "Generate Homebrew formulas for CLI releases")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level.
    #[arg(
        short = 'L',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    /// Log output format.
    #[arg(
        long,
        global = true,
        help = "Log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a Homebrew formula from a release manifest.
    #[command(about = "Render a Homebrew formula from a release manifest")]
    Formula(FormulaArgs),

    /// Print the SHA-256 checksum of an artifact.
    #[command(about = "Print the SHA-256 checksum of an artifact in sha256sum format")]
    Checksum {
        /// Artifact to hash.
        path: PathBuf,
    },
}

/// Arguments of `formulary formula`.
#[derive(Args, Debug, Clone)]
pub struct FormulaArgs {
    /// Release manifest (TOML, or JSON with a `.json` extension).
    #[arg(
        short,
        long,
        env = "FORMULARY_MANIFEST",
        default_value = DEFAULT_MANIFEST,
        value_name = "PATH"
    )]
    pub manifest: PathBuf,

    /// Formula name if not specified using the manifest name.
    #[arg(long)]
    pub name: Option<String>,

    /// Write `<name>.rb` to this directory instead of stdout.
    #[arg(short, long, env = "FORMULARY_OUTPUT_DIR", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// How to treat quotes and other unsafe characters in quoted fields.
    #[arg(long, env = "FORMULARY_QUOTE_POLICY", value_name = "POLICY")]
    pub quote_policy: Option<QuotePolicy>,

    #[command(flatten)]
    pub checksum: ChecksumSource,
}

/// Where the artifact checksum comes from; the manifest is used when none is given.
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct ChecksumSource {
    /// SHA-256 of the artifact.
    #[arg(long, value_name = "HEX")]
    pub checksum: Option<String>,

    /// Compute the SHA-256 of a local artifact.
    #[arg(long, value_name = "PATH")]
    pub archive: Option<PathBuf>,

    /// Read the SHA-256 from a sha256sum-style file.
    #[arg(long, value_name = "PATH")]
    pub checksum_file: Option<PathBuf>,

    /// Download the artifact from the resolved URL and hash it.
    #[arg(long)]
    pub fetch: bool,
}

/// Parse command-line arguments
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
