//! Version manifest model and parsing.
//!
//! Parses the top-level manifest payload into the [`VersionManifest`]
//! mapping of version identifier to per-version metadata URL. The manifest
//! is immutable once fetched; one pipeline run performs exactly one fetch
//! and discards the mapping after resolution.

use serde::Deserialize;
use std::collections::HashSet;

use crate::error::{FetchError, Result};
use crate::version_id::VersionId;

/// One version entry in the raw manifest payload.
#[derive(Debug, Clone, Deserialize)]
struct RawEntry {
    id: VersionId,
    url: String,
}

/// Raw manifest payload shape: `{"versions": [{"id": ..., "url": ...}]}`.
#[derive(Debug, Deserialize)]
struct RawManifest {
    versions: Vec<RawEntry>,
}

/// The fetched version manifest: version identifier to metadata URL.
///
/// Entries keep the order of the payload so callers can present versions
/// the way the publisher listed them. Identifiers are unique; a payload
/// with duplicates is rejected at parse time.
///
/// # Examples
///
/// ```
/// use craftfetch::manifest::VersionManifest;
/// use craftfetch::version_id::VersionId;
///
/// let json = r#"{"versions":[{"id":"1.20.1","url":"https://x/1.20.1.json"}]}"#;
/// let manifest = VersionManifest::parse(json).expect("valid manifest");
/// assert_eq!(manifest.len(), 1);
/// assert_eq!(
///     manifest.metadata_url(&VersionId::from("1.20.1")),
///     Some("https://x/1.20.1.json"),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionManifest {
    entries: Vec<(VersionId, String)>,
}

impl VersionManifest {
    /// Parse a manifest JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Parse`] if the payload is not well-formed
    /// JSON, lacks the `versions` field, or lists the same identifier
    /// twice.
    pub fn parse(json: &str) -> Result<Self> {
        let raw: RawManifest =
            serde_json::from_str(json).map_err(|e| FetchError::parse("manifest fetch", &e))?;
        Self::from_entries(
            raw.versions
                .into_iter()
                .map(|entry| (entry.id, entry.url))
                .collect(),
        )
    }

    /// Build a manifest from already-separated entries.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Parse`] if the same identifier appears twice.
    pub fn from_entries(entries: Vec<(VersionId, String)>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (id, _) in &entries {
            if !seen.insert(id.as_str()) {
                return Err(FetchError::Parse {
                    operation: "manifest fetch",
                    reason: format!("duplicate version id {id}"),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Number of versions listed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the manifest lists no versions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Metadata URL for the given version identifier, if present.
    #[must_use]
    pub fn metadata_url(&self, id: &VersionId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, url)| url.as_str())
    }

    /// True when the manifest lists the given version identifier.
    #[must_use]
    pub fn contains(&self, id: &VersionId) -> bool {
        self.metadata_url(id).is_some()
    }

    /// Iterate version identifiers in manifest order.
    pub fn ids(&self) -> impl Iterator<Item = &VersionId> {
        self.entries.iter().map(|(id, _)| id)
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
