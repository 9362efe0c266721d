//! Error types for the fetch pipeline.
//!
//! This module defines the semantic error variants surfaced by every stage
//! of the pipeline. Each stage fails fast and propagates its specific
//! variant unchanged so that callers can render kind-appropriate messages.

use crate::version_id::VersionId;
use thiserror::Error;

/// Errors that can occur while resolving and downloading a client artifact.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: DNS, connection refused, timeout, or a
    /// non-2xx status.
    #[error("network error for {url}: {reason}")]
    Network {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// A response body did not match the expected structured schema.
    #[error("{operation} returned malformed data: {reason}")]
    Parse {
        /// The operation whose response failed to parse.
        operation: &'static str,
        /// A human-readable description of the parse failure.
        reason: String,
    },

    /// The metadata was well-formed but carried no client download
    /// descriptor.
    #[error("no client download descriptor in metadata at {url}")]
    ClientDescriptorMissing {
        /// The metadata URL that lacked a client descriptor.
        url: String,
    },

    /// The selected version identifier is absent from the manifest.
    #[error("version {id} not present in the manifest")]
    UnknownVersion {
        /// The identifier that was requested.
        id: VersionId,
    },

    /// The manifest parsed but listed zero versions.
    #[error("the version manifest lists no versions")]
    EmptyManifest,

    /// Local filesystem failure: permission, disk space, path creation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected failure during the transfer loop, including a stream
    /// that ended short of its declared length.
    #[error("transfer failed: {reason}")]
    Transfer {
        /// A human-readable description of the failure.
        reason: String,
    },
}

impl FetchError {
    /// Build a [`FetchError::Parse`] from a JSON deserialization error.
    pub(crate) fn parse(operation: &'static str, source: &serde_json::Error) -> Self {
        Self::Parse {
            operation,
            reason: source.to_string(),
        }
    }
}

/// Result type alias using [`FetchError`].
pub type Result<T> = std::result::Result<T, FetchError>;
