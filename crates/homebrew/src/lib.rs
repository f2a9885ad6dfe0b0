//! Homebrew formula rendering for formulary.
//!
//! This crate turns a [`ReleaseDescriptor`](formulary_release::ReleaseDescriptor)
//! into a Ruby formula and writes it out.
//!
//! # Features
//!
//! - Fixed header order: `desc`, `homepage`, `url`, `sha256`, `license`
//! - Homepage fallback to the repository URL
//! - Fixed `shinc` dependency and install block (binaries, man pages, completions)
//! - One `--version` check per binary in the test block
//! - Strict or escaping treatment of quoted fields
//!
//! # Example
//!
//! ```rust,ignore
//! use formulary_homebrew::{FormulaOutput, render};
//! use formulary_release::{ProjectInfo, ReleaseDescriptor};
//!
//! let descriptor = ReleaseDescriptor::new(
//!     "Foo",
//!     ProjectInfo::new("A tool", "MIT").with_homepage("https://x.example"),
//!     "https://x.example/foo-1.0.tgz",
//!     "a".repeat(64),
//! )
//! .with_bin("foo");
//!
//! let formula = render(&descriptor)?;
//! FormulaOutput::Stdout.write("foo", &formula)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

mod formula;
pub mod literal;
mod output;

pub use formula::{
    COMPANION_DEPENDENCY, FormulaGenerator, INSTALL_STEPS, InstallStep, VERSION_FLAG, render,
    render_with,
};
pub use output::{FormulaOutput, formula_path, write_formula, write_formula_file};
