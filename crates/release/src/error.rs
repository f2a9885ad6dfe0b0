//! Error types for release descriptor and formula operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, validating or rendering a release.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// A required field is absent or empty.
    #[error("Missing required field: {field}")]
    #[diagnostic(
        code(formulary::release::missing_field),
        help("Set `{field}` in the release manifest or pass it on the command line")
    )]
    MissingField {
        /// Dotted path of the missing field (e.g. `project.description`)
        field: String,
    },

    /// The artifact checksum is not a SHA-256 hex digest.
    #[error("Invalid checksum '{checksum}': {reason}")]
    #[diagnostic(
        code(formulary::release::invalid_checksum),
        help("A SHA-256 checksum is exactly 64 hexadecimal characters")
    )]
    InvalidChecksum {
        /// The rejected checksum
        checksum: String,
        /// Why it was rejected
        reason: String,
    },

    /// A quoted field contains a character that would break the string literal.
    #[error("Field `{field}` contains characters that cannot appear unescaped: {value:?}")]
    #[diagnostic(
        code(formulary::release::unescaped_quote),
        help("Remove the offending characters or render with the `escape` quote policy")
    )]
    UnescapedQuote {
        /// Name of the offending field
        field: String,
        /// The offending value
        value: String,
    },

    /// The formula class name is not a valid Ruby constant.
    #[error("Invalid formula class name: '{class_name}'")]
    #[diagnostic(
        code(formulary::release::invalid_class_name),
        help("Class names start with an uppercase ASCII letter followed by letters, digits or '_'")
    )]
    InvalidClassName {
        /// The rejected class name
        class_name: String,
    },

    /// The formula name cannot be used as an output file stem.
    #[error("Invalid formula name: '{name}'")]
    #[diagnostic(
        code(formulary::release::invalid_formula_name),
        help("Formula names may not contain path separators or be '.' or '..'")
    )]
    InvalidFormulaName {
        /// The rejected name
        name: String,
    },

    /// Release manifest could not be read or parsed.
    #[error("Manifest error: {message}")]
    #[diagnostic(
        code(formulary::release::manifest),
        help("Check that the manifest file exists and is valid TOML or JSON")
    )]
    Manifest {
        /// The error message
        message: String,
        /// The manifest file path
        path: Option<PathBuf>,
    },

    /// Artifact or checksum file error.
    #[error("Artifact error: {message}")]
    #[diagnostic(
        code(formulary::release::artifact),
        help("Check that the artifact exists and is readable")
    )]
    Artifact {
        /// The error message
        message: String,
        /// The path that caused the error
        path: Option<PathBuf>,
    },

    /// Rendered formula could not be written.
    #[error("Output error: {message}")]
    #[diagnostic(
        code(formulary::release::output),
        help("Check that the output directory is writable")
    )]
    Output {
        /// The error message
        message: String,
        /// The path that caused the error
        path: Option<PathBuf>,
    },

    /// Wrapped I/O error.
    #[error("I/O error: {0}")]
    #[diagnostic(code(formulary::release::io))]
    Io(#[from] std::io::Error),

    /// Wrapped JSON error.
    #[error("JSON error: {0}")]
    #[diagnostic(code(formulary::release::json))]
    Json(#[from] serde_json::Error),

    /// Wrapped TOML parsing error.
    #[error("TOML parse error: {0}")]
    #[diagnostic(code(formulary::release::toml_parse))]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Create a new missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a new invalid checksum error.
    #[must_use]
    pub fn invalid_checksum(checksum: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidChecksum {
            checksum: checksum.into(),
            reason: reason.into(),
        }
    }

    /// Create a new unescaped quote error.
    #[must_use]
    pub fn unescaped_quote(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnescapedQuote {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a new invalid class name error.
    #[must_use]
    pub fn invalid_class_name(class_name: impl Into<String>) -> Self {
        Self::InvalidClassName {
            class_name: class_name.into(),
        }
    }

    /// Create a new invalid formula name error.
    #[must_use]
    pub fn invalid_formula_name(name: impl Into<String>) -> Self {
        Self::InvalidFormulaName { name: name.into() }
    }

    /// Create a new manifest error.
    #[must_use]
    pub fn manifest(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Manifest {
            message: message.into(),
            path,
        }
    }

    /// Create a new artifact error.
    #[must_use]
    pub fn artifact(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Artifact {
            message: message.into(),
            path,
        }
    }

    /// Create a new output error.
    #[must_use]
    pub fn output(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Output {
            message: message.into(),
            path,
        }
    }

    /// The descriptor field this error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field } | Self::UnescapedQuote { field, .. } => {
                Some(field.as_str())
            }
            Self::InvalidChecksum { .. } => Some("checksum"),
            Self::InvalidClassName { .. } => Some("class_name"),
            Self::InvalidFormulaName { .. } => Some("name"),
            _ => None,
        }
    }

    /// Whether this error is a validation failure of the descriptor itself.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidChecksum { .. }
                | Self::UnescapedQuote { .. }
                | Self::InvalidClassName { .. }
                | Self::InvalidFormulaName { .. }
        )
    }
}
