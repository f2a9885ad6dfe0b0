//! Release descriptors for formulary.
//!
//! This crate holds everything a formula render consumes: the
//! [`ReleaseDescriptor`] data model and its validation, artifact checksums,
//! release manifests that resolve into descriptors, formula configuration, and
//! the shared error type.
//!
//! # Example
//!
//! ```rust,ignore
//! use formulary_release::{ReleaseManifest, ResolveOptions};
//! use std::path::Path;
//!
//! let manifest = ReleaseManifest::load(Path::new("formulary.toml"))?;
//! let resolved = manifest.resolve(&ResolveOptions::default())?;
//! let validation = resolved.descriptor.validate()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod checksum;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod manifest;

// Re-export main types
pub use checksum::{Checksum, compute_sha256, compute_sha256_reader, read_checksum_file};
pub use config::{FormulaConfig, QuotePolicy};
pub use descriptor::{
    BinaryTarget, ProjectInfo, ReleaseDescriptor, Validation, ValidationWarning, is_ruby_constant,
};
pub use error::{Error, Result};
pub use manifest::{
    DEFAULT_MANIFEST, ManifestBinary, ManifestProject, ReleaseManifest, ResolveOptions,
    ResolvedRelease, check_formula_name, class_name_for, release_download_url,
};
