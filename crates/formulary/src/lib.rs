// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

//! formulary - Homebrew formula generation for CLI releases
//!
//! The binary is a thin shell over this library: [`cli`] parses arguments and
//! maps errors to exit codes, [`commands`] runs `formula` and `checksum`, and
//! [`tracing`] sets up structured logging on stderr.
//!
//! Rendering itself lives in `formulary-homebrew`; manifests, descriptors and
//! checksums live in `formulary-release`.
//!
//! # Example
//!
//! ```ignore
//! use formulary::cli::{ChecksumSource, FormulaArgs};
//! use formulary::commands::formula;
//!
//! let args = FormulaArgs {
//!     manifest: "formulary.toml".into(),
//!     name: None,
//!     output_dir: None,
//!     quote_policy: None,
//!     checksum: ChecksumSource::default(),
//! };
//! if let Some(text) = formula::execute(&args)? {
//!     print!("{text}");
//! }
//! ```

/// CLI argument parsing and exit codes.
pub mod cli;
/// Command implementations (formula, checksum).
pub mod commands;
/// Structured logging setup.
pub mod tracing;
