//! SHA-256 checksums for release artifacts.
//!
//! Checksums are carried as lowercase-or-uppercase hex strings exactly as the
//! caller supplied them; [`Checksum::parse`] only checks shape, it never
//! rewrites the digest.

use crate::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Number of hex characters in a SHA-256 digest.
pub const SHA256_HEX_LEN: usize = 64;

const BUFFER_SIZE: usize = 8192;

/// A validated SHA-256 hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum(String);

impl Checksum {
    /// Validates `value` as a SHA-256 hex digest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] for an empty value and
    /// [`Error::InvalidChecksum`] for a wrong length or non-hex characters.
    pub fn parse(value: &str) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::missing_field("checksum"));
        }
        if let Some(bad) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(Error::invalid_checksum(
                value,
                format!("non-hex character {bad:?}"),
            ));
        }
        if value.len() != SHA256_HEX_LEN {
            return Err(Error::invalid_checksum(
                value,
                format!(
                    "expected {SHA256_HEX_LEN} characters, got {}",
                    value.len()
                ),
            ));
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the digest as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Checksum {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Checksum {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Computes the SHA-256 checksum of everything readable from `reader`.
///
/// # Errors
///
/// Returns an error if reading fails.
pub fn compute_sha256_reader<R: Read>(mut reader: R) -> Result<Checksum> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Checksum(hex::encode(hasher.finalize())))
}

/// Computes the SHA-256 checksum of a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn compute_sha256(path: &Path) -> Result<Checksum> {
    let file = File::open(path).map_err(|e| {
        Error::artifact(
            format!("Failed to open file for checksum: {e}"),
            Some(path.to_path_buf()),
        )
    })?;
    let checksum = compute_sha256_reader(BufReader::new(file)).map_err(|e| {
        Error::artifact(
            format!("Failed to read file for checksum: {e}"),
            Some(path.to_path_buf()),
        )
    })?;
    tracing::debug!(path = %path.display(), checksum = %checksum, "Computed artifact checksum");
    Ok(checksum)
}

/// Reads a `sha256sum`-style sidecar file (`{sha256}  {filename}`).
///
/// Only the first token of the first non-empty line is used.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is empty, or does not start
/// with a valid digest.
pub fn read_checksum_file(path: &Path) -> Result<Checksum> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::artifact(
            format!("Failed to read checksum file: {e}"),
            Some(path.to_path_buf()),
        )
    })?;
    let digest = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(|line| line.split_whitespace().next())
        .ok_or_else(|| Error::artifact("Checksum file is empty", Some(path.to_path_buf())))?;
    Checksum::parse(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    // sha256("hello world")
    const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn test_parse_valid() {
        let checksum = Checksum::parse(&"a".repeat(64)).unwrap();
        assert_eq!(checksum.as_str().len(), 64);
    }

    #[test]
    fn test_parse_preserves_case() {
        let upper = "A".repeat(64);
        assert_eq!(Checksum::parse(&upper).unwrap().as_str(), upper);
    }

    #[test]
    fn test_parse_too_short() {
        let err = Checksum::parse(&"a".repeat(63)).unwrap_err();
        assert!(matches!(err, Error::InvalidChecksum { .. }));
        assert!(err.to_string().contains("got 63"));
    }

    #[test]
    fn test_parse_too_long() {
        let err = Checksum::parse(&"0".repeat(65)).unwrap_err();
        assert!(matches!(err, Error::InvalidChecksum { .. }));
    }

    #[test]
    fn test_parse_non_hex() {
        let value = format!("{}g", "a".repeat(63));
        let err = Checksum::parse(&value).unwrap_err();
        assert!(matches!(err, Error::InvalidChecksum { .. }));
        assert!(err.to_string().contains("'g'"));
    }

    #[test]
    fn test_parse_empty_is_missing() {
        let err = Checksum::parse("").unwrap_err();
        assert!(matches!(err, Error::MissingField { ref field } if field == "checksum"));
    }

    #[test]
    fn test_from_str() {
        let checksum: Checksum = HELLO_SHA256.parse().unwrap();
        assert_eq!(checksum.to_string(), HELLO_SHA256);
    }

    #[test]
    fn test_compute_sha256_reader() {
        let checksum = compute_sha256_reader(Cursor::new(b"hello world")).unwrap();
        assert_eq!(checksum.as_str(), HELLO_SHA256);
    }

    #[test]
    fn test_compute_sha256_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("foo-v1.0.0.tar.gz");
        fs::write(&path, "hello world").unwrap();
        assert_eq!(compute_sha256(&path).unwrap().as_str(), HELLO_SHA256);
    }

    #[test]
    fn test_compute_sha256_missing_file() {
        let err = compute_sha256(Path::new("/nonexistent/archive.tar.gz")).unwrap_err();
        assert!(matches!(err, Error::Artifact { .. }));
    }

    #[test]
    fn test_read_checksum_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("foo-v1.0.0.tar.gz.sha256");
        fs::write(&path, format!("\n{HELLO_SHA256}  foo-v1.0.0.tar.gz\n")).unwrap();
        assert_eq!(read_checksum_file(&path).unwrap().as_str(), HELLO_SHA256);
    }

    #[test]
    fn test_read_checksum_file_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.sha256");
        fs::write(&path, "\n\n").unwrap();
        let err = read_checksum_file(&path).unwrap_err();
        assert!(matches!(err, Error::Artifact { .. }));
    }

    #[test]
    fn test_read_checksum_file_bad_digest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.sha256");
        fs::write(&path, "deadbeef  foo.tar.gz\n").unwrap();
        let err = read_checksum_file(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidChecksum { .. }));
    }
}
