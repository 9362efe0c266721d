//! Per-version metadata model and client-descriptor lookup.
//!
//! Parses the metadata document fetched lazily for the selected version.
//! Only the `client` download descriptor's URL is consumed; the record is
//! discarded once the URL has been extracted.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::{FetchError, Result};

/// The artifact kind the pipeline downloads.
const CLIENT_KIND: &str = "client";

/// A single downloadable artifact descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadDescriptor {
    /// Concrete download URL for the artifact.
    pub url: String,
    /// Declared artifact size in bytes, when the publisher provides one.
    #[serde(default)]
    pub size: Option<u64>,
    /// Publisher-declared digest. Parsed for completeness; this tool does
    /// not verify digests.
    #[serde(default)]
    pub sha1: Option<String>,
}

/// Per-version metadata: artifact kind to download descriptor.
///
/// # Examples
///
/// ```
/// use craftfetch::metadata::VersionMetadata;
///
/// let json = r#"{"downloads":{"client":{"url":"https://x/client.jar"}}}"#;
/// let metadata = VersionMetadata::parse(json).expect("valid metadata");
/// let client = metadata.client_download().expect("client descriptor");
/// assert_eq!(client.url, "https://x/client.jar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionMetadata {
    downloads: BTreeMap<String, DownloadDescriptor>,
}

impl VersionMetadata {
    /// Parse a metadata JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Parse`] if the payload is not well-formed
    /// JSON or lacks the `downloads` mapping.
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| FetchError::parse("metadata fetch", &e))
    }

    /// Download descriptor for the client artifact, if present.
    #[must_use]
    pub fn client_download(&self) -> Option<&DownloadDescriptor> {
        self.downloads.get(CLIENT_KIND)
    }
}
