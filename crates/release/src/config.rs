//! Formula configuration types.
//!
//! These are read from the `[formula]` table of a release manifest and can be
//! overridden from the command line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How interpolated string fields are treated when they contain characters
/// that would break a double-quoted Ruby literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotePolicy {
    /// Reject the descriptor with an `UnescapedQuote` error (default).
    #[default]
    Strict,

    /// Escape the offending characters so the literal stays well-formed.
    Escape,
}

impl fmt::Display for QuotePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Escape => write!(f, "escape"),
        }
    }
}

impl FromStr for QuotePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "escape" => Ok(Self::Escape),
            _ => Err(format!("Unknown quote policy: {s}")),
        }
    }
}

/// Formula rendering and output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulaConfig {
    /// Quoting policy for interpolated fields.
    pub quote_policy: QuotePolicy,
    /// Directory to write `<name>.rb` into; stdout when unset.
    pub output_dir: Option<PathBuf>,
}

impl FormulaConfig {
    /// Applies command-line overrides on top of this configuration.
    #[must_use]
    pub fn with_overrides(
        mut self,
        quote_policy: Option<QuotePolicy>,
        output_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(policy) = quote_policy {
            self.quote_policy = policy;
        }
        if output_dir.is_some() {
            self.output_dir = output_dir;
        }
        self
    }
}
