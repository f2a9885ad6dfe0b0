//! Formula output destinations.
//!
//! A formula is always rendered in full before it reaches an output, so a
//! failed render never leaves a partial `.rb` file behind.

use formulary_release::{Error, Result, check_formula_name};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where a rendered formula goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormulaOutput {
    /// Standard output
    #[default]
    Stdout,
    /// `<dir>/<name>.rb`
    Directory(PathBuf),
}

impl FormulaOutput {
    /// Stdout when `dir` is `None`, otherwise the directory.
    #[must_use]
    pub fn from_dir(dir: Option<PathBuf>) -> Self {
        dir.map_or(Self::Stdout, Self::Directory)
    }

    /// Path the formula `name` would be written to, if any.
    #[must_use]
    pub fn formula_file(&self, name: &str) -> Option<PathBuf> {
        match self {
            Self::Stdout => None,
            Self::Directory(dir) => Some(formula_path(dir, name)),
        }
    }

    /// Writes `formula` for `name`, returning the file path for directory
    /// output.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file or
    /// stdout cannot be written.
    pub fn write(&self, name: &str, formula: &str) -> Result<Option<PathBuf>> {
        match self {
            Self::Stdout => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                write_formula(&mut handle, formula)?;
                Ok(None)
            }
            Self::Directory(dir) => write_formula_file(dir, name, formula).map(Some),
        }
    }
}

/// `<dir>/<name>.rb`
#[must_use]
pub fn formula_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.rb"))
}

/// Writes a formula to any writer and flushes it.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_formula<W: Write>(writer: &mut W, formula: &str) -> Result<()> {
    writer.write_all(formula.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Writes a formula to `<dir>/<name>.rb`, creating `dir` when needed.
///
/// # Errors
///
/// Returns [`Error::InvalidFormulaName`] if `name` would leave `dir`, and an
/// error if the directory cannot be created or the file cannot be written.
pub fn write_formula_file(dir: &Path, name: &str, formula: &str) -> Result<PathBuf> {
    check_formula_name(name)?;
    fs::create_dir_all(dir).map_err(|e| {
        Error::output(
            format!("Failed to create output directory: {e}"),
            Some(dir.to_path_buf()),
        )
    })?;

    let path = formula_path(dir, name);
    fs::write(&path, formula).map_err(|e| {
        Error::output(
            format!("Failed to write formula: {e}"),
            Some(path.clone()),
        )
    })?;

    info!(path = %path.display(), "Formula written");
    Ok(path)
}
