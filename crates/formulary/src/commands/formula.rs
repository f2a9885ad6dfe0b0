//! `formulary formula`
//!
//! Loads the release manifest, settles the checksum, renders the formula and
//! sends it to stdout or `<output-dir>/<name>.rb`.

use super::CommandResult;
use super::fetch::fetch_sha256;
use crate::cli::{ChecksumSource, CliError, FormulaArgs};
use formulary_homebrew::{FormulaGenerator, FormulaOutput};
use formulary_release::{
    Checksum, ReleaseManifest, ResolveOptions, compute_sha256, read_checksum_file,
};
use tracing::{info, instrument};

/// Render the formula described by `args`.
///
/// Returns the formula text when it should go to stdout, or `None` after
/// writing it to the output directory.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded, the checksum cannot be
/// obtained, the descriptor is invalid, or the file cannot be written.
#[instrument(name = "formula", skip(args), fields(manifest = %args.manifest.display()))]
pub fn execute(args: &FormulaArgs) -> CommandResult {
    let manifest = ReleaseManifest::load(&args.manifest)?;
    let config = manifest
        .formula
        .clone()
        .with_overrides(args.quote_policy, args.output_dir.clone());

    let name = manifest.formula_name(args.name.as_deref())?;
    let checksum = resolve_checksum(&args.checksum, || manifest.download_url(&name))?;
    let resolved = manifest.resolve(&ResolveOptions {
        name: Some(name),
        checksum,
    })?;

    let formula = FormulaGenerator::new(config.quote_policy).generate(&resolved.descriptor)?;

    match FormulaOutput::from_dir(config.output_dir) {
        FormulaOutput::Stdout => Ok(Some(formula)),
        output => {
            if let Some(path) = output.write(&resolved.name, &formula)? {
                info!(path = %path.display(), formula = %resolved.name, "Formula generated");
            }
            Ok(None)
        }
    }
}

/// Obtain a checksum from the command line, if one was requested.
///
/// `url` is only evaluated for `--fetch`.
fn resolve_checksum<F>(source: &ChecksumSource, url: F) -> Result<Option<Checksum>, CliError>
where
    F: FnOnce() -> formulary_release::Result<String>,
{
    if let Some(hex) = &source.checksum {
        return Ok(Some(Checksum::parse(hex)?));
    }
    if let Some(archive) = &source.archive {
        return Ok(Some(compute_sha256(archive)?));
    }
    if let Some(file) = &source.checksum_file {
        return Ok(Some(read_checksum_file(file)?));
    }
    if source.fetch {
        let url = url()?;
        return fetch_sha256(&url).map(Some);
    }
    Ok(None)
}
