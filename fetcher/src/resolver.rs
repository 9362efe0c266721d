//! Resolution of a version's metadata URL to its client download URL.
//!
//! Provides a trait-based abstraction so the pipeline and its tests can
//! inject resolution behaviour without network access.

use crate::error::{FetchError, Result};
use crate::http::get_text;
use crate::metadata::VersionMetadata;

/// Trait for resolving a metadata URL to the client-artifact download URL.
///
/// Resolution is purely functional given the input URL: identical
/// metadata payloads yield identical download URLs.
#[cfg_attr(test, mockall::automock)]
pub trait VersionResolver {
    /// Retrieve the metadata at `metadata_url` and extract the client
    /// download URL.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] on transport failure,
    /// [`FetchError::Parse`] on malformed metadata, and
    /// [`FetchError::ClientDescriptorMissing`] when the metadata is
    /// well-formed but has no client descriptor.
    fn resolve_download_url(&self, metadata_url: &str) -> Result<String>;
}

/// HTTP-backed [`VersionResolver`] using the shared agent.
#[derive(Debug, Clone, Default)]
pub struct HttpVersionResolver;

impl VersionResolver for HttpVersionResolver {
    fn resolve_download_url(&self, metadata_url: &str) -> Result<String> {
        let body = get_text(metadata_url)?;
        let metadata = VersionMetadata::parse(&body)?;
        extract_client_url(&metadata, metadata_url)
    }
}

/// Extract the client download URL from parsed metadata.
fn extract_client_url(metadata: &VersionMetadata, metadata_url: &str) -> Result<String> {
    metadata
        .client_download()
        .map(|descriptor| descriptor.url.clone())
        .ok_or_else(|| FetchError::ClientDescriptorMissing {
            url: metadata_url.to_owned(),
        })
}
