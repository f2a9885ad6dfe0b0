//! Release manifest reading and resolution.
//!
//! A manifest is the on-disk form of a release (`formulary.toml` or a JSON
//! equivalent). Every field is optional at parse time; [`ReleaseManifest::resolve`]
//! fills the gaps (class name, download URL) and reports whatever is still
//! missing by its dotted path.

use crate::checksum::Checksum;
use crate::config::FormulaConfig;
use crate::descriptor::{BinaryTarget, ProjectInfo, ReleaseDescriptor};
use crate::error::{Error, Result};
use heck::ToUpperCamelCase;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default manifest file name.
pub const DEFAULT_MANIFEST: &str = "formulary.toml";

/// `[project]` table of a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestProject {
    /// One-line description
    pub description: Option<String>,
    /// Project homepage
    pub homepage: Option<String>,
    /// Source repository URL
    pub repository: Option<String>,
    /// SPDX license identifier
    pub license: Option<String>,
    /// Release version
    pub version: Option<String>,
}

/// `[[bins]]` entry of a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestBinary {
    /// File name under `bin/`
    pub name: Option<String>,
}

/// A release manifest as written on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseManifest {
    /// Formula name; also the output file stem
    pub name: Option<String>,
    /// Explicit formula class name
    pub class_name: Option<String>,
    /// Explicit artifact URL
    pub url: Option<String>,
    /// Artifact checksum
    pub checksum: Option<String>,
    /// Project metadata
    pub project: ManifestProject,
    /// Binaries in output order
    pub bins: Vec<ManifestBinary>,
    /// Rendering and output settings
    pub formula: FormulaConfig,
}

/// Per-invocation inputs that take precedence over the manifest.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Formula name override
    pub name: Option<String>,
    /// Checksum obtained outside the manifest
    pub checksum: Option<Checksum>,
}

/// A manifest resolved into a renderable descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    /// Formula name
    pub name: String,
    /// Descriptor ready for rendering
    pub descriptor: ReleaseDescriptor,
}

impl ReleaseManifest {
    /// Reads a manifest, choosing JSON for `.json` files and TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::manifest(
                format!("Failed to read {}: {e}", path.display()),
                Some(path.to_path_buf()),
            )
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        };
        let manifest = parsed.map_err(|e| {
            Error::manifest(
                format!("Failed to parse {}: {e}", path.display()),
                Some(path.to_path_buf()),
            )
        })?;

        tracing::debug!(
            path = %path.display(),
            bins = manifest.bins.len(),
            "Loaded release manifest"
        );
        Ok(manifest)
    }

    /// Parses a TOML manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a valid manifest.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parses a JSON manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a valid manifest.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Determines the formula name: the override, else `name`, else the first
    /// binary's name. Blank candidates are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if none of them is set and
    /// [`Error::InvalidFormulaName`] if the chosen name is not a plain file
    /// stem.
    pub fn formula_name(&self, name_override: Option<&str>) -> Result<String> {
        let name = non_empty(name_override)
            .or_else(|| non_empty(self.name.as_deref()))
            .or_else(|| non_empty(self.bins.first().and_then(|bin| bin.name.as_deref())))
            .ok_or_else(|| Error::missing_field("name"))?;
        check_formula_name(name)?;
        Ok(name.to_string())
    }

    /// The explicit class name, or the PascalCase form of `name`.
    #[must_use]
    pub fn class_name(&self, name: &str) -> String {
        self.class_name
            .as_deref()
            .filter(|class_name| !class_name.is_empty())
            .map_or_else(|| class_name_for(name), str::to_string)
    }

    /// The explicit URL, or the GitHub-style release download URL derived from
    /// `project.repository` and `project.version`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] for `url` when it is not set and cannot
    /// be derived.
    pub fn download_url(&self, name: &str) -> Result<String> {
        if let Some(url) = self.url.as_deref().filter(|url| !url.is_empty()) {
            return Ok(url.to_string());
        }
        let repository = non_empty(self.project.repository.as_deref());
        let version = non_empty(self.project.version.as_deref());
        match (repository, version) {
            (Some(repository), Some(version)) => {
                Ok(release_download_url(repository, name, version))
            }
            _ => Err(Error::missing_field("url")),
        }
    }

    /// Resolves the manifest into a descriptor.
    ///
    /// A checksum in `options` wins over the manifest's own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] naming the first required value that is
    /// neither in the manifest nor derivable. Shape checks (checksum format,
    /// class name) are left to [`ReleaseDescriptor::validate`].
    pub fn resolve(&self, options: &ResolveOptions) -> Result<ResolvedRelease> {
        let name = self.formula_name(options.name.as_deref())?;
        let class_name = self.class_name(&name);
        let description = required(self.project.description.as_deref(), "project.description")?;
        let url = self.download_url(&name)?;
        let checksum = match &options.checksum {
            Some(checksum) => checksum.to_string(),
            None => required(self.checksum.as_deref(), "checksum")?,
        };
        let license = required(self.project.license.as_deref(), "project.license")?;
        let bins = self
            .bins
            .iter()
            .enumerate()
            .map(|(index, bin)| {
                required(bin.name.as_deref(), &format!("bins[{index}].name")).map(BinaryTarget::new)
            })
            .collect::<Result<Vec<_>>>()?;

        let project = ProjectInfo {
            description,
            homepage: self.project.homepage.clone(),
            repository: self.project.repository.clone(),
            license,
            version: self.project.version.clone(),
        };

        let descriptor = ReleaseDescriptor {
            class_name,
            project,
            url,
            checksum,
            bins,
        };

        tracing::debug!(
            name = %name,
            class_name = %descriptor.class_name,
            url = %descriptor.url,
            "Resolved release descriptor"
        );

        Ok(ResolvedRelease { name, descriptor })
    }
}

/// Converts a formula name into a class name (`my-tool` becomes `MyTool`).
#[must_use]
pub fn class_name_for(name: &str) -> String {
    name.to_upper_camel_case()
}

/// Builds `{repository}/releases/download/v{version}/{name}-v{version}.tar.gz`.
///
/// A leading `v` on `version` is not doubled.
#[must_use]
pub fn release_download_url(repository: &str, name: &str, version: &str) -> String {
    let repository = repository.trim_end_matches('/');
    let version = version.strip_prefix('v').unwrap_or(version);
    format!("{repository}/releases/download/v{version}/{name}-v{version}.tar.gz")
}

/// Checks that `name` can be used as the stem of `<dir>/<name>.rb`.
///
/// # Errors
///
/// Returns [`Error::InvalidFormulaName`] for names containing `/` or a
/// backslash, and for `.` or `..`.
pub fn check_formula_name(name: &str) -> Result<()> {
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(Error::invalid_formula_name(name));
    }
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(value: Option<&str>, field: &str) -> Result<String> {
    non_empty(value)
        .map(str::to_string)
        .ok_or_else(|| Error::missing_field(field))
}
