//! Streamed artifact download with ordered progress reporting.
//!
//! Streams the client artifact from its download URL to a destination
//! file in fixed-size chunks, invoking a [`ProgressSink`] synchronously
//! after each chunk write. The destination handle is owned by the single
//! in-flight transfer and closes on every exit path.

use camino::{Utf8Path, Utf8PathBuf};
use std::io::{ErrorKind, Read, Write};

use crate::error::{FetchError, Result};
use crate::http::{http_agent, network_error};

/// Transfer chunk size in bytes. Tunable; a progress sample is reported
/// after each chunk write.
const CHUNK_SIZE: usize = 1024;

/// A point-in-time measurement of bytes transferred versus total expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes written to the destination so far.
    pub bytes_downloaded: u64,
    /// Declared total size, when the response carried a content length.
    pub total_bytes: Option<u64>,
}

impl Progress {
    /// Percent complete, or `None` when the total is unknown or zero.
    ///
    /// Callers rendering progress must handle the indeterminate case;
    /// there is no divide-by-zero here.
    ///
    /// # Examples
    ///
    /// ```
    /// use craftfetch::downloader::Progress;
    ///
    /// let sample = Progress { bytes_downloaded: 512, total_bytes: Some(2048) };
    /// assert_eq!(sample.percent(), Some(25.0));
    ///
    /// let indeterminate = Progress { bytes_downloaded: 512, total_bytes: None };
    /// assert_eq!(indeterminate.percent(), None);
    /// ```
    #[must_use]
    pub fn percent(&self) -> Option<f64> {
        match self.total_bytes {
            Some(total) if total > 0 => {
                Some(self.bytes_downloaded as f64 / total as f64 * 100.0)
            }
            _ => None,
        }
    }
}

/// Receives ordered progress samples during a transfer.
///
/// Samples arrive on the transfer's own thread of control, so
/// implementations must return promptly; a blocked sink stalls the
/// transfer.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressSink {
    /// Observe an updated progress sample.
    fn update(&mut self, progress: Progress);
}

/// Terminal description of a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Destination file the artifact was written to.
    pub path: Utf8PathBuf,
    /// Total bytes written.
    pub bytes_written: u64,
}

/// Trait for streaming an artifact URL to a destination file.
///
/// Abstraction allows the pipeline and its tests to inject transfer
/// behaviour without network access.
#[cfg_attr(test, mockall::automock)]
pub trait ClientDownloader {
    /// Stream `url` to `destination`, reporting progress after each chunk.
    ///
    /// Parent directories are created as needed; an existing file at the
    /// destination is overwritten. On mid-stream failure the partial file
    /// is left on disk for the caller to discard.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] on transport failure,
    /// [`FetchError::Io`] when the destination cannot be created or
    /// written, and [`FetchError::Transfer`] for any other failure of the
    /// transfer, including a stream that ends short of its declared
    /// length.
    fn download(
        &self,
        url: &str,
        destination: &Utf8Path,
        sink: &mut dyn ProgressSink,
    ) -> Result<DownloadSummary>;
}

/// HTTP-backed [`ClientDownloader`] using the shared agent.
#[derive(Debug, Clone, Default)]
pub struct HttpClientDownloader;

impl ClientDownloader for HttpClientDownloader {
    fn download(
        &self,
        url: &str,
        destination: &Utf8Path,
        sink: &mut dyn ProgressSink,
    ) -> Result<DownloadSummary> {
        let response = http_agent()
            .get(url)
            .call()
            .map_err(|e| network_error(url, &e))?;
        let total_bytes = content_length(&response);
        log::debug!(
            "downloading {url} to {destination} ({} bytes declared)",
            total_bytes.map_or_else(|| "unknown".to_owned(), |t| t.to_string())
        );

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(destination)?;
        let mut body = response.into_body();
        stream_to_file(&mut body.as_reader(), total_bytes, file, destination, url, sink)
    }
}

/// Declared content length, when the response carries one.
fn content_length(response: &ureq::http::Response<ureq::Body>) -> Option<u64> {
    response
        .headers()
        .get(ureq::http::header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Copy `reader` into `file` in fixed-size chunks, reporting a progress
/// sample after each chunk write.
///
/// A read failure maps to a network error for `url`. A stream that ends
/// cleanly short of the declared total is a failed transfer, never a
/// silent success; the partial file stays on disk.
fn stream_to_file(
    reader: &mut dyn Read,
    total_bytes: Option<u64>,
    mut file: std::fs::File,
    destination: &Utf8Path,
    url: &str,
    sink: &mut dyn ProgressSink,
) -> Result<DownloadSummary> {
    let mut buffer = [0_u8; CHUNK_SIZE];
    let mut bytes_downloaded: u64 = 0;
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(FetchError::Network {
                    url: url.to_owned(),
                    reason: format!("stream interrupted after {bytes_downloaded} bytes: {e}"),
                });
            }
        };
        file.write_all(&buffer[..read])?;
        bytes_downloaded += read as u64;
        sink.update(Progress {
            bytes_downloaded,
            total_bytes,
        });
    }

    if let Some(total) = total_bytes
        && bytes_downloaded != total
    {
        return Err(FetchError::Transfer {
            reason: format!("stream ended after {bytes_downloaded} of {total} declared bytes"),
        });
    }

    Ok(DownloadSummary {
        path: destination.to_owned(),
        bytes_written: bytes_downloaded,
    })
}

#[cfg(test)]
#[path = "downloader_tests.rs"]
mod tests;
