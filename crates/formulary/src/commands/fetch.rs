//! Checksum of a remote artifact.

use crate::cli::CliError;
use formulary_release::{Checksum, compute_sha256_reader};
use reqwest::blocking::Client;
use std::sync::Once;
use tracing::{debug, info};

static CRYPTO_PROVIDER: Once = Once::new();

fn install_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        // Err only means another provider was installed first
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Download `url` and hash the response body.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the request fails,
/// the server answers with a non-success status, or the body cannot be read.
pub fn fetch_sha256(url: &str) -> Result<Checksum, CliError> {
    install_crypto_provider();
    let client = Client::builder()
        .build()
        .map_err(|e| CliError::other(format!("Failed to create HTTP client: {e}")))?;
    fetch_sha256_with(&client, url)
}

fn fetch_sha256_with(client: &Client, url: &str) -> Result<Checksum, CliError> {
    info!(url = %url, "Downloading artifact to compute checksum");

    let response = client.get(url).send().map_err(|e| {
        CliError::config_with_help(
            format!("Failed to download {url}: {e}"),
            "Check the URL or pass --archive / --checksum instead",
        )
    })?;

    if !response.status().is_success() {
        return Err(CliError::config(format!(
            "Failed to download {url}: HTTP {}",
            response.status()
        )));
    }

    let checksum = compute_sha256_reader(response)
        .map_err(|e| CliError::config(format!("Failed to read {url}: {e}")))?;
    debug!(url = %url, checksum = %checksum, "Computed remote artifact checksum");
    Ok(checksum)
}
