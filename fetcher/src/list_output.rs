//! Output formatting for version listing.
//!
//! This module provides utilities to format the manifest's version list
//! for human-readable or JSON output.

use serde::Serialize;

use crate::manifest::VersionManifest;
use crate::version_id::VersionId;

/// Format the manifest's versions for human-readable output.
///
/// # Examples
///
/// ```
/// use craftfetch::list_output::format_human;
/// use craftfetch::manifest::VersionManifest;
///
/// let output = format_human(&VersionManifest::default());
/// assert!(output.contains("No versions"));
/// ```
#[must_use]
pub fn format_human(manifest: &VersionManifest) -> String {
    if manifest.is_empty() {
        return String::from("No versions listed in the manifest.");
    }

    let mut output = String::from("Available versions:\n");
    for id in manifest.ids() {
        output.push_str(&format!("  {id}\n"));
    }
    output
}

/// JSON-serializable representation of the version list.
#[derive(Debug, Serialize)]
struct VersionListing<'a> {
    /// Version identifiers in manifest order.
    versions: Vec<&'a VersionId>,
}

/// Format the manifest's versions as JSON.
///
/// # Examples
///
/// ```
/// use craftfetch::list_output::format_json;
/// use craftfetch::manifest::VersionManifest;
///
/// let json = format_json(&VersionManifest::default());
/// assert!(json.contains("\"versions\""));
/// ```
#[must_use]
pub fn format_json(manifest: &VersionManifest) -> String {
    let listing = VersionListing {
        versions: manifest.ids().collect(),
    };
    serde_json::to_string_pretty(&listing).unwrap_or_else(|_| "{}".to_owned())
}
