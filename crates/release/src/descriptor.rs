//! Release descriptor: the single input of a formula render.

use crate::checksum::Checksum;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project metadata carried into the formula header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// One-line description (`desc`)
    pub description: String,
    /// Project homepage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Source repository URL, used when no homepage is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// SPDX license identifier
    pub license: String,
    /// Release version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ProjectInfo {
    /// Creates project info with the required fields.
    #[must_use]
    pub fn new(description: impl Into<String>, license: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            license: license.into(),
            ..Self::default()
        }
    }

    /// Sets the homepage.
    #[must_use]
    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = Some(homepage.into());
        self
    }

    /// Sets the repository URL.
    #[must_use]
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    /// Sets the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Resolves the homepage: a non-blank `homepage`, else a non-blank
    /// `repository`, else the empty string.
    #[must_use]
    pub fn resolved_homepage(&self) -> &str {
        non_empty(self.homepage.as_deref())
            .or_else(|| non_empty(self.repository.as_deref()))
            .unwrap_or_default()
    }
}

/// A binary installed by the formula and exercised by its test block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinaryTarget {
    /// File name under `bin/`
    pub name: String,
}

impl BinaryTarget {
    /// Creates a binary target.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Everything needed to render one formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDescriptor {
    /// Ruby class name of the formula (e.g. `Foo`)
    pub class_name: String,
    /// Project metadata
    pub project: ProjectInfo,
    /// Artifact download URL
    pub url: String,
    /// SHA-256 of the artifact, hex encoded
    pub checksum: String,
    /// Binaries in output order
    #[serde(default)]
    pub bins: Vec<BinaryTarget>,
}

/// Non-fatal findings from [`ReleaseDescriptor::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// The descriptor lists no binaries, so the test block is empty.
    NoBinaries,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBinaries => write!(f, "no binaries listed; the formula test block will be empty"),
        }
    }
}

/// Outcome of a successful validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    /// Non-fatal findings
    pub warnings: Vec<ValidationWarning>,
}

impl Validation {
    /// Whether validation produced no warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl ReleaseDescriptor {
    /// Creates a descriptor with no binaries.
    #[must_use]
    pub fn new(
        class_name: impl Into<String>,
        project: ProjectInfo,
        url: impl Into<String>,
        checksum: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            project,
            url: url.into(),
            checksum: checksum.into(),
            bins: Vec::new(),
        }
    }

    /// Appends a binary.
    #[must_use]
    pub fn with_bin(mut self, name: impl Into<String>) -> Self {
        self.bins.push(BinaryTarget::new(name));
        self
    }

    /// Appends several binaries, keeping their order.
    #[must_use]
    pub fn with_bins<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bins.extend(names.into_iter().map(BinaryTarget::new));
        self
    }

    /// Checks the descriptor invariants.
    ///
    /// Required fields are checked in output order so the first reported
    /// problem is the first one a reader of the formula would hit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`], [`Error::InvalidClassName`] or
    /// [`Error::InvalidChecksum`] for the first violated invariant.
    pub fn validate(&self) -> Result<Validation> {
        require("class_name", &self.class_name)?;
        if !is_ruby_constant(&self.class_name) {
            return Err(Error::invalid_class_name(&self.class_name));
        }
        require("project.description", &self.project.description)?;
        require("url", &self.url)?;
        Checksum::parse(&self.checksum)?;
        require("project.license", &self.project.license)?;
        for (index, bin) in self.bins.iter().enumerate() {
            require(&format!("bins[{index}].name"), &bin.name)?;
        }

        let mut validation = Validation::default();
        if self.bins.is_empty() {
            validation.warnings.push(ValidationWarning::NoBinaries);
        }
        Ok(validation)
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::missing_field(field));
    }
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Whether `name` is a valid Ruby constant (`[A-Z][A-Za-z0-9_]*`).
#[must_use]
pub fn is_ruby_constant(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReleaseDescriptor {
        ReleaseDescriptor::new(
            "Foo",
            ProjectInfo::new("A tool", "MIT").with_homepage("https://x.example"),
            "https://x.example/foo-1.0.tgz",
            "a".repeat(64),
        )
        .with_bin("foo")
    }

    #[test]
    fn test_validate_ok() {
        let validation = sample().validate().unwrap();
        assert!(validation.is_clean());
    }

    #[test]
    fn test_validate_no_bins_warns() {
        let mut descriptor = sample();
        descriptor.bins.clear();
        let validation = descriptor.validate().unwrap();
        assert_eq!(validation.warnings, vec![ValidationWarning::NoBinaries]);
        assert!(!validation.is_clean());
    }

    #[test]
    fn test_validate_missing_description() {
        let mut descriptor = sample();
        descriptor.project.description = String::new();
        let err = descriptor.validate().unwrap_err();
        assert_eq!(err.field(), Some("project.description"));
    }

    #[test]
    fn test_validate_whitespace_license_is_missing() {
        let mut descriptor = sample();
        descriptor.project.license = "  ".to_string();
        let err = descriptor.validate().unwrap_err();
        assert!(matches!(err, Error::MissingField { ref field } if field == "project.license"));
    }

    #[test]
    fn test_validate_missing_url() {
        let mut descriptor = sample();
        descriptor.url = String::new();
        assert_eq!(descriptor.validate().unwrap_err().field(), Some("url"));
    }

    #[test]
    fn test_validate_missing_checksum() {
        let mut descriptor = sample();
        descriptor.checksum = String::new();
        let err = descriptor.validate().unwrap_err();
        assert!(matches!(err, Error::MissingField { .. }));
    }

    #[test]
    fn test_validate_short_checksum() {
        let mut descriptor = sample();
        descriptor.checksum = "a".repeat(63);
        let err = descriptor.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidChecksum { .. }));
    }

    #[test]
    fn test_validate_empty_bin_name() {
        let descriptor = sample().with_bin("");
        let err = descriptor.validate().unwrap_err();
        assert_eq!(err.field(), Some("bins[1].name"));
    }

    #[test]
    fn test_validate_bad_class_name() {
        let mut descriptor = sample();
        descriptor.class_name = "foo-bar".to_string();
        let err = descriptor.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidClassName { .. }));
    }

    #[test]
    fn test_is_ruby_constant() {
        assert!(is_ruby_constant("Foo"));
        assert!(is_ruby_constant("MyTool2"));
        assert!(is_ruby_constant("A_B"));
        assert!(!is_ruby_constant(""));
        assert!(!is_ruby_constant("foo"));
        assert!(!is_ruby_constant("2Foo"));
        assert!(!is_ruby_constant("Foo Bar"));
        assert!(!is_ruby_constant("Foo-Bar"));
    }

    #[test]
    fn test_resolved_homepage_prefers_homepage() {
        let project = ProjectInfo::new("d", "MIT")
            .with_homepage("H")
            .with_repository("R");
        assert_eq!(project.resolved_homepage(), "H");
    }

    #[test]
    fn test_resolved_homepage_falls_back_to_repository() {
        let project = ProjectInfo::new("d", "MIT")
            .with_homepage("")
            .with_repository("R");
        assert_eq!(project.resolved_homepage(), "R");
    }

    #[test]
    fn test_resolved_homepage_skips_blank_homepage() {
        let project = ProjectInfo::new("d", "MIT")
            .with_homepage("   ")
            .with_repository("R");
        assert_eq!(project.resolved_homepage(), "R");
    }

    #[test]
    fn test_resolved_homepage_empty() {
        let project = ProjectInfo::new("d", "MIT").with_repository("");
        assert_eq!(project.resolved_homepage(), "");
    }

    #[test]
    fn test_with_bins_keeps_order() {
        let descriptor = sample().with_bins(["b", "a", "b"]);
        let names: Vec<_> = descriptor.bins.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["foo", "b", "a", "b"]);
    }

    #[test]
    fn test_descriptor_json_roundtrip() {
        let descriptor = sample();
        let json = serde_json::to_string(&descriptor).unwrap();
        let parsed: ReleaseDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, descriptor);
    }
}
