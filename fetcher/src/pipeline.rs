//! Fetch pipeline orchestration.
//!
//! Sequences manifest fetch, version selection, download-URL resolution,
//! destination selection, and the streamed download. Failures
//! short-circuit the remaining stages and propagate unchanged after being
//! recorded in the failure log; the two selection boundaries may instead
//! end the run as [`FetchOutcome::Cancelled`].

use camino::Utf8PathBuf;

use crate::downloader::{ClientDownloader, DownloadSummary, ProgressSink};
use crate::error::{FetchError, Result};
use crate::failure_log::FailureLog;
use crate::manifest::VersionManifest;
use crate::manifest_client::ManifestClient;
use crate::resolver::VersionResolver;
use crate::version_id::VersionId;

/// File name used for the client artifact inside the version directory.
pub const CLIENT_ARTIFACT_FILE_NAME: &str = "client.jar";

/// Supplies the version chosen by the user.
///
/// This is the seam where an interactive picker or a CLI flag plugs in;
/// the pipeline never performs interactive I/O itself.
#[cfg_attr(test, mockall::automock)]
pub trait VersionPicker {
    /// Pick a version from the fetched manifest, or `None` when nothing
    /// was selected.
    fn pick(&self, manifest: &VersionManifest) -> Option<VersionId>;
}

/// Supplies the directory the artifact should be saved under.
#[cfg_attr(test, mockall::automock)]
pub trait DestinationPicker {
    /// Pick the destination directory, or `None` when nothing was
    /// selected.
    fn pick(&self) -> Option<Utf8PathBuf>;
}

/// Terminal outcome of one pipeline run.
///
/// Cancellation is deliberately not an error: failures travel as the
/// `Err` half of [`Result`], while "nothing selected" ends the run here
/// and is never logged as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The artifact was downloaded to the destination path.
    Completed(DownloadSummary),
    /// The user declined to pick a version or a destination.
    Cancelled,
}

/// Orchestrates one fetch run over injected collaborators.
pub struct FetchPipeline<'a> {
    manifest_client: &'a dyn ManifestClient,
    resolver: &'a dyn VersionResolver,
    downloader: &'a dyn ClientDownloader,
    failure_log: &'a dyn FailureLog,
}

impl<'a> FetchPipeline<'a> {
    /// Assemble a pipeline from its collaborators.
    #[must_use]
    pub fn new(
        manifest_client: &'a dyn ManifestClient,
        resolver: &'a dyn VersionResolver,
        downloader: &'a dyn ClientDownloader,
        failure_log: &'a dyn FailureLog,
    ) -> Self {
        Self {
            manifest_client,
            resolver,
            downloader,
            failure_log,
        }
    }

    /// Run the pipeline once: manifest, selection, resolution, download.
    ///
    /// The destination path is composed as
    /// `<destination dir>/<version id>/client.jar`; intermediate
    /// directories are created by the downloader.
    ///
    /// # Errors
    ///
    /// Propagates the failing stage's [`FetchError`] verbatim:
    /// [`FetchError::EmptyManifest`] when the manifest lists no versions,
    /// [`FetchError::UnknownVersion`] when the picked identifier is not in
    /// the manifest, and the network, parse, lookup, and transfer errors
    /// of the underlying collaborators. Every failure is recorded in the
    /// failure log before propagation.
    pub fn run(
        &self,
        version_picker: &dyn VersionPicker,
        destination_picker: &dyn DestinationPicker,
        progress: &mut dyn ProgressSink,
    ) -> Result<FetchOutcome> {
        let manifest =
            self.recorded("manifest fetch", self.manifest_client.fetch_manifest())?;
        if manifest.is_empty() {
            return self.recorded("manifest fetch", Err(FetchError::EmptyManifest));
        }

        let Some(version_id) = version_picker.pick(&manifest) else {
            log::debug!("no version selected; run cancelled");
            return Ok(FetchOutcome::Cancelled);
        };

        // The picker should only offer manifest entries; checked anyway.
        let metadata_url = self.recorded(
            "version lookup",
            manifest
                .metadata_url(&version_id)
                .map(str::to_owned)
                .ok_or_else(|| FetchError::UnknownVersion {
                    id: version_id.clone(),
                }),
        )?;

        let download_url = self.recorded(
            "download URL resolution",
            self.resolver.resolve_download_url(&metadata_url),
        )?;

        let Some(destination_dir) = destination_picker.pick() else {
            log::debug!("no destination selected; run cancelled");
            return Ok(FetchOutcome::Cancelled);
        };

        let destination = destination_dir
            .join(version_id.as_str())
            .join(CLIENT_ARTIFACT_FILE_NAME);
        let summary = self.recorded(
            "client download",
            self.downloader.download(&download_url, &destination, progress),
        )?;
        Ok(FetchOutcome::Completed(summary))
    }

    /// Record a stage failure in the failure log, then pass the result on.
    fn recorded<T>(&self, operation: &'static str, result: Result<T>) -> Result<T> {
        if let Err(error) = &result {
            self.failure_log.record(operation, &error.to_string());
        }
        result
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
