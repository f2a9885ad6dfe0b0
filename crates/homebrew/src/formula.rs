//! Homebrew formula generation.
//!
//! Renders a Ruby formula from a [`ReleaseDescriptor`]. The header fields come
//! from the descriptor; the runtime dependency and the install block are fixed
//! for every formula this crate produces.

use crate::literal;
use formulary_release::{QuotePolicy, ReleaseDescriptor, Result};
use tracing::{debug, warn};

/// Runtime dependency shared by every generated formula (shell-completion
/// support library).
pub const COMPANION_DEPENDENCY: &str = "shinc";

/// Flag passed to each binary in the formula test block.
pub const VERSION_FLAG: &str = "--version";

/// One `install` line of the formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallStep {
    /// Comment emitted above the line
    pub comment: Option<&'static str>,
    /// Homebrew install target (`bin`, `man`, `bash_completion`, ...)
    pub target: &'static str,
    /// Glob of archive paths installed into the target
    pub glob: &'static str,
}

/// Install block of every generated formula, in output order.
pub const INSTALL_STEPS: [InstallStep; 5] = [
    InstallStep {
        comment: None,
        target: "bin",
        glob: "bin/*",
    },
    InstallStep {
        comment: Some("Install man pages"),
        target: "man",
        glob: "share/man/*",
    },
    InstallStep {
        comment: Some("Install bash, fish, and zsh completions"),
        target: "bash_completion",
        glob: "share/completions/bash/*",
    },
    InstallStep {
        comment: None,
        target: "fish_completion",
        glob: "share/completions/fish/*",
    },
    InstallStep {
        comment: None,
        target: "zsh_completion",
        glob: "share/completions/zsh/*",
    },
];

/// Homebrew formula generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaGenerator {
    policy: QuotePolicy,
}

impl FormulaGenerator {
    /// Creates a generator using `policy` for quoted fields.
    #[must_use]
    pub const fn new(policy: QuotePolicy) -> Self {
        Self { policy }
    }

    /// The quoting policy in use.
    #[must_use]
    pub const fn policy(&self) -> QuotePolicy {
        self.policy
    }

    /// Generates a Ruby formula from the descriptor.
    ///
    /// The descriptor is validated and every quoted field is checked before
    /// any output is produced.
    ///
    /// # Errors
    ///
    /// Returns `MissingField`, `InvalidClassName` or `InvalidChecksum` when
    /// the descriptor is invalid, and `UnescapedQuote` when a field cannot be
    /// quoted under the strict policy.
    #[allow(clippy::format_push_string)]
    pub fn generate(&self, data: &ReleaseDescriptor) -> Result<String> {
        let validation = data.validate()?;
        for warning in &validation.warnings {
            warn!(class_name = %data.class_name, "{warning}");
        }

        let desc = literal::quote(self.policy, "desc", &data.project.description)?;
        let homepage = literal::quote(self.policy, "homepage", data.project.resolved_homepage())?;
        let url = literal::quote(self.policy, "url", &data.url)?;
        let license = literal::quote(self.policy, "license", &data.project.license)?;
        let bins = data
            .bins
            .iter()
            .enumerate()
            .map(|(i, bin)| literal::quote(self.policy, &format!("bins[{i}].name"), &bin.name))
            .collect::<Result<Vec<_>>>()?;

        let mut formula = format!(
            r#"class {} < Formula
  desc "{}"
  homepage "{}"
  url "{}"
  sha256 "{}"
  license "{}"

  depends_on "{}"
"#,
            data.class_name, desc, homepage, url, data.checksum, license, COMPANION_DEPENDENCY
        );

        formula.push_str("\n  def install\n");
        for step in &INSTALL_STEPS {
            if let Some(comment) = step.comment {
                formula.push_str(&format!("    # {comment}\n"));
            }
            formula.push_str(&format!(
                "    {}.install Dir[\"{}\"]\n",
                step.target, step.glob
            ));
        }
        formula.push_str("  end\n");

        formula.push_str("\n  test do\n");
        for name in &bins {
            // `#{bin}` is Ruby interpolation and must reach the output as-is
            formula.push_str(&format!(
                "    system \"#{{bin}}/{name}\", \"{VERSION_FLAG}\"\n"
            ));
        }
        formula.push_str("  end\nend\n");

        debug!(
            class_name = %data.class_name,
            bins = bins.len(),
            formula_len = formula.len(),
            "Generated formula"
        );

        Ok(formula)
    }
}

/// Renders a formula with the strict quoting policy.
///
/// # Errors
///
/// See [`FormulaGenerator::generate`].
pub fn render(descriptor: &ReleaseDescriptor) -> Result<String> {
    FormulaGenerator::default().generate(descriptor)
}

/// Renders a formula with the given quoting policy.
///
/// # Errors
///
/// See [`FormulaGenerator::generate`].
pub fn render_with(descriptor: &ReleaseDescriptor, policy: QuotePolicy) -> Result<String> {
    FormulaGenerator::new(policy).generate(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulary_release::{Error, ProjectInfo};

    fn descriptor() -> ReleaseDescriptor {
        ReleaseDescriptor::new(
            "Foo",
            ProjectInfo::new("A tool", "MIT").with_homepage("https://x.example"),
            "https://x.example/foo-1.0.tgz",
            "a".repeat(64),
        )
        .with_bin("foo")
    }

    fn test_lines(formula: &str) -> Vec<&str> {
        formula
            .lines()
            .filter(|line| line.trim_start().starts_with("system "))
            .collect()
    }

    #[test]
    fn test_generate_formula() {
        let formula = render(&descriptor()).unwrap();
        let expected = format!(
            r##"class Foo < Formula
  desc "A tool"
  homepage "https://x.example"
  url "https://x.example/foo-1.0.tgz"
  sha256 "{}"
  license "MIT"

  depends_on "shinc"

  def install
    bin.install Dir["bin/*"]
    # Install man pages
    man.install Dir["share/man/*"]
    # Install bash, fish, and zsh completions
    bash_completion.install Dir["share/completions/bash/*"]
    fish_completion.install Dir["share/completions/fish/*"]
    zsh_completion.install Dir["share/completions/zsh/*"]
  end

  test do
    system "#{{bin}}/foo", "--version"
  end
end
"##,
            "a".repeat(64)
        );
        assert_eq!(formula, expected);
    }

    #[test]
    fn test_smoke_substrings() {
        let formula = render(&descriptor()).unwrap();
        assert!(formula.contains("class Foo"));
        assert!(formula.contains("desc \"A tool\""));
        assert!(formula.contains("homepage \"https://x.example\""));
        assert!(formula.contains("license \"MIT\""));
        let lines = test_lines(&formula);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("/foo\""));
    }

    #[test]
    fn test_field_order() {
        let formula = render(&descriptor()).unwrap();
        let positions: Vec<usize> = [
            "  desc ",
            "  homepage ",
            "  url ",
            "  sha256 ",
            "  license ",
            "  depends_on ",
            "  def install",
            "  test do",
        ]
        .iter()
        .map(|marker| formula.find(marker).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_homepage_wins_over_repository() {
        let mut data = descriptor();
        data.project.homepage = Some("H".to_string());
        data.project.repository = Some("R".to_string());
        let formula = render(&data).unwrap();
        assert!(formula.contains("homepage \"H\""));
        assert!(!formula.contains("\"R\""));
    }

    #[test]
    fn test_homepage_falls_back_to_repository() {
        let mut data = descriptor();
        data.project.homepage = Some(String::new());
        data.project.repository = Some("R".to_string());
        let formula = render(&data).unwrap();
        assert!(formula.contains("homepage \"R\""));
    }

    #[test]
    fn test_homepage_empty() {
        let mut data = descriptor();
        data.project.homepage = None;
        data.project.repository = Some(String::new());
        let formula = render(&data).unwrap();
        assert!(formula.contains("homepage \"\"\n"));
    }

    #[test]
    fn test_bins_in_input_order() {
        let data = descriptor().with_bins(["zeta", "alpha", "zeta"]);
        let formula = render(&data).unwrap();
        let lines = test_lines(&formula);
        assert_eq!(
            lines,
            vec![
                "    system \"#{bin}/foo\", \"--version\"",
                "    system \"#{bin}/zeta\", \"--version\"",
                "    system \"#{bin}/alpha\", \"--version\"",
                "    system \"#{bin}/zeta\", \"--version\"",
            ]
        );
    }

    #[test]
    fn test_empty_bins_keeps_test_block() {
        let mut data = descriptor();
        data.bins.clear();
        let formula = render(&data).unwrap();
        assert!(formula.contains("  test do\n  end\nend\n"));
        assert!(test_lines(&formula).is_empty());
    }

    #[test]
    fn test_install_block_is_fixed() {
        let a = render(&descriptor()).unwrap();
        let mut other = descriptor().with_bins(["bar", "baz"]);
        other.class_name = "Other".to_string();
        let b = render(&other).unwrap();

        let install = |formula: &str| -> String {
            let start = formula.find("  def install").unwrap();
            let end = formula[start..].find("  end\n").unwrap() + start;
            formula[start..end].to_string()
        };
        assert_eq!(install(&a), install(&b));
        assert_eq!(INSTALL_STEPS.len(), 5);
    }

    #[test]
    fn test_deterministic() {
        let data = descriptor().with_bins(["a", "b"]);
        assert_eq!(render(&data).unwrap(), render(&data).unwrap());
    }

    #[test]
    fn test_invalid_checksum_short() {
        let mut data = descriptor();
        data.checksum = "a".repeat(63);
        let err = render(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidChecksum { .. }));
    }

    #[test]
    fn test_invalid_checksum_non_hex() {
        let mut data = descriptor();
        data.checksum = "z".repeat(64);
        let err = render(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidChecksum { .. }));
    }

    #[test]
    fn test_missing_license() {
        let mut data = descriptor();
        data.project.license = String::new();
        let err = render(&data).unwrap_err();
        assert!(matches!(err, Error::MissingField { ref field } if field == "project.license"));
    }

    #[test]
    fn test_strict_rejects_quote_in_description() {
        let mut data = descriptor();
        data.project.description = "The \"best\" tool".to_string();
        let err = render(&data).unwrap_err();
        assert!(matches!(err, Error::UnescapedQuote { ref field, .. } if field == "desc"));
    }

    #[test]
    fn test_strict_rejects_quote_in_license() {
        let mut data = descriptor();
        data.project.license = "MIT\"".to_string();
        let err = render(&data).unwrap_err();
        assert!(matches!(err, Error::UnescapedQuote { ref field, .. } if field == "license"));
    }

    #[test]
    fn test_strict_rejects_interpolation_in_bin_name() {
        let data = descriptor().with_bin("#{evil}");
        let err = render(&data).unwrap_err();
        assert!(matches!(err, Error::UnescapedQuote { ref field, .. } if field == "bins[1].name"));
    }

    #[test]
    fn test_escape_policy_escapes_description() {
        let mut data = descriptor();
        data.project.description = "The \"best\" tool".to_string();
        let formula = render_with(&data, QuotePolicy::Escape).unwrap();
        assert!(formula.contains(r#"desc "The \"best\" tool""#));
    }

    #[test]
    fn test_escape_policy_still_validates() {
        let mut data = descriptor();
        data.url = String::new();
        let err = render_with(&data, QuotePolicy::Escape).unwrap_err();
        assert!(matches!(err, Error::MissingField { ref field } if field == "url"));
    }

    #[test]
    fn test_generator_policy() {
        assert_eq!(FormulaGenerator::default().policy(), QuotePolicy::Strict);
        assert_eq!(
            FormulaGenerator::new(QuotePolicy::Escape).policy(),
            QuotePolicy::Escape
        );
    }
}
