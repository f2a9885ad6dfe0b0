//! `formulary checksum`

use crate::cli::CliError;
use formulary_release::compute_sha256;
use std::path::Path;

/// Hash an artifact and format the result like `sha256sum`.
///
/// # Errors
///
/// Returns an error if the artifact cannot be read.
pub fn execute(path: &Path) -> Result<String, CliError> {
    let checksum = compute_sha256(path)?;
    let filename = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    Ok(format!("{checksum}  {filename}\n"))
}
