//! Append-only failure log collaborator.
//!
//! Every pipeline failure is appended here with the operation name and
//! underlying cause before it propagates. The log is an explicitly passed
//! collaborator rather than process-wide state, and it is never rotated
//! or truncated. Cancellation is not a failure and is never recorded.

use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;

/// Records pipeline failures for later diagnosis.
#[cfg_attr(test, mockall::automock)]
pub trait FailureLog {
    /// Append one failure entry naming the operation and its cause.
    fn record(&self, operation: &str, cause: &str);
}

/// File-backed [`FailureLog`] appending one human-readable line per
/// failure.
///
/// # Examples
///
/// ```
/// use craftfetch::failure_log::{FailureLog, FileFailureLog};
///
/// let dir = tempfile::tempdir().expect("temp dir");
/// let path = dir.path().join("error_log.txt");
/// let log = FileFailureLog::new(path.to_str().expect("UTF-8 path"));
/// log.record("manifest fetch", "connection refused");
/// log.record("client download", "disk full");
///
/// let contents = std::fs::read_to_string(&path).expect("log readable");
/// assert_eq!(contents.lines().count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FileFailureLog {
    path: Utf8PathBuf,
}

impl FileFailureLog {
    /// Default log file name, created relative to the working directory.
    pub const DEFAULT_FILE_NAME: &'static str = "error_log.txt";

    /// Create a log appending to the given file path.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this log appends to.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl FailureLog for FileFailureLog {
    fn record(&self, operation: &str, cause: &str) {
        log::error!("{operation} failed: {cause}");
        let appended = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path.as_std_path())
            .and_then(|mut file| writeln!(file, "{operation} failed: {cause}"));
        if appended.is_err() {
            // Best-effort logging; ignore log write failures.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_in(dir: &tempfile::TempDir) -> FileFailureLog {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("error_log.txt"))
            .expect("UTF-8 path");
        FileFailureLog::new(path)
    }

    #[test]
    fn appends_operation_and_cause() {
        let dir = tempfile::tempdir().expect("temp dir");
        let log = log_in(&dir);

        log.record("manifest fetch", "connection refused");

        let contents = std::fs::read_to_string(log.path().as_std_path()).expect("log readable");
        assert_eq!(contents, "manifest fetch failed: connection refused\n");
    }

    #[test]
    fn appends_without_truncating_earlier_entries() {
        let dir = tempfile::tempdir().expect("temp dir");
        let log = log_in(&dir);

        log.record("manifest fetch", "first");
        log.record("client download", "second");

        let contents = std::fs::read_to_string(log.path().as_std_path()).expect("log readable");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            [
                "manifest fetch failed: first",
                "client download failed: second",
            ],
        );
    }

    #[test]
    fn unwritable_path_is_ignored() {
        let log = FileFailureLog::new("/nonexistent-root-dir/error_log.txt");
        log.record("manifest fetch", "cause");
    }
}
