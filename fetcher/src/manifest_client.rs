//! Manifest retrieval over HTTP.
//!
//! Provides a trait-based abstraction for fetching the version manifest,
//! enabling dependency injection for testing.

use crate::error::Result;
use crate::http::get_text;
use crate::manifest::VersionManifest;

/// The well-known manifest resource published by the distributor.
pub const DEFAULT_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";

/// Trait for fetching the version manifest.
///
/// Abstraction allows tests to mock manifest retrieval without network
/// access.
#[cfg_attr(test, mockall::automock)]
pub trait ManifestClient {
    /// Perform a single retrieval of the manifest and parse it.
    ///
    /// No retries are attempted; the caller decides whether to rerun the
    /// whole pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::FetchError::Network`] on transport failure
    /// and [`crate::error::FetchError::Parse`] when the response is not a
    /// well-formed manifest.
    fn fetch_manifest(&self) -> Result<VersionManifest>;
}

/// HTTP-backed [`ManifestClient`] using the shared agent.
///
/// # Examples
///
/// ```
/// use craftfetch::manifest_client::{DEFAULT_MANIFEST_URL, HttpManifestClient};
///
/// let client = HttpManifestClient::new(DEFAULT_MANIFEST_URL);
/// assert_eq!(client.manifest_url(), DEFAULT_MANIFEST_URL);
/// ```
#[derive(Debug, Clone)]
pub struct HttpManifestClient {
    manifest_url: String,
}

impl HttpManifestClient {
    /// Create a client fetching the given manifest URL.
    #[must_use]
    pub fn new(manifest_url: impl Into<String>) -> Self {
        Self {
            manifest_url: manifest_url.into(),
        }
    }

    /// The manifest URL this client fetches.
    #[must_use]
    pub fn manifest_url(&self) -> &str {
        &self.manifest_url
    }
}

impl ManifestClient for HttpManifestClient {
    fn fetch_manifest(&self) -> Result<VersionManifest> {
        let body = get_text(&self.manifest_url)?;
        let manifest = VersionManifest::parse(&body)?;
        log::debug!(
            "manifest at {} lists {} version(s)",
            self.manifest_url,
            manifest.len()
        );
        Ok(manifest)
    }
}
