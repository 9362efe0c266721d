//! Unit tests for the chunked transfer loop and progress reporting.

use super::*;
use rstest::rstest;
use std::io::Cursor;

/// Sink that records every sample it receives.
#[derive(Default)]
struct RecordingSink {
    samples: Vec<Progress>,
}

impl ProgressSink for RecordingSink {
    fn update(&mut self, progress: Progress) {
        self.samples.push(progress);
    }
}

/// Reader that yields `prefix`, then fails with the given error kind.
struct FailingReader {
    prefix: Cursor<Vec<u8>>,
    kind: ErrorKind,
    failed: bool,
}

impl FailingReader {
    fn new(prefix: Vec<u8>, kind: ErrorKind) -> Self {
        Self {
            prefix: Cursor::new(prefix),
            kind,
            failed: false,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let read = self.prefix.read(buf)?;
        if read > 0 {
            return Ok(read);
        }
        if self.failed {
            return Ok(0);
        }
        self.failed = true;
        Err(std::io::Error::new(self.kind, "connection reset by peer"))
    }
}

fn destination_in(dir: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join("client.jar")).expect("UTF-8 path")
}

fn run_stream(
    payload: &mut dyn Read,
    total_bytes: Option<u64>,
    sink: &mut RecordingSink,
) -> (Result<DownloadSummary>, Utf8PathBuf, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let destination = destination_in(&dir);
    let file = std::fs::File::create(&destination).expect("create destination");
    let result = stream_to_file(
        payload,
        total_bytes,
        file,
        &destination,
        "https://x/client.jar",
        sink,
    );
    (result, destination, dir)
}

#[test]
fn progress_is_monotonic_and_final_sample_matches_total() {
    let total: u64 = 3 * 1024 + 200;
    let payload = vec![0xAB_u8; usize::try_from(total).expect("fits usize")];
    let mut sink = RecordingSink::default();

    let (result, destination, _dir) =
        run_stream(&mut Cursor::new(payload), Some(total), &mut sink);

    let summary = result.expect("transfer succeeds");
    assert_eq!(summary.bytes_written, total);
    assert_eq!(summary.path, destination);

    let written = std::fs::metadata(destination.as_std_path()).expect("metadata");
    assert_eq!(written.len(), total);

    assert!(!sink.samples.is_empty());
    for window in sink.samples.windows(2) {
        assert!(window[0].bytes_downloaded <= window[1].bytes_downloaded);
    }
    let last = sink.samples.last().expect("at least one sample");
    assert_eq!(last.bytes_downloaded, total);
    assert_eq!(last.total_bytes, Some(total));
    assert_eq!(last.percent(), Some(100.0));
}

#[test]
fn short_stream_is_a_failed_transfer_with_partial_file() {
    let declared: u64 = 5000;
    let payload = vec![0_u8; 3000];
    let mut sink = RecordingSink::default();

    let (result, destination, _dir) =
        run_stream(&mut Cursor::new(payload), Some(declared), &mut sink);

    let err = result.expect_err("expected failed transfer");
    assert!(matches!(err, FetchError::Transfer { .. }), "got {err:?}");

    let written = std::fs::metadata(destination.as_std_path()).expect("metadata");
    assert!(written.len() < declared);
}

#[test]
fn mid_stream_read_failure_maps_to_network_error() {
    let declared: u64 = 4096;
    let mut reader = FailingReader::new(vec![0_u8; 2048], ErrorKind::ConnectionReset);
    let mut sink = RecordingSink::default();

    let (result, destination, _dir) = run_stream(&mut reader, Some(declared), &mut sink);

    let err = result.expect_err("expected network failure");
    match err {
        FetchError::Network { url, reason } => {
            assert_eq!(url, "https://x/client.jar");
            assert!(reason.contains("2048"));
        }
        other => panic!("expected Network, got {other:?}"),
    }

    let written = std::fs::metadata(destination.as_std_path()).expect("metadata");
    assert!(written.len() < declared);
}

#[test]
fn interrupted_reads_are_retried() {
    let mut reader = FailingReader::new(vec![0_u8; 512], ErrorKind::Interrupted);
    let mut sink = RecordingSink::default();

    let (result, _destination, _dir) = run_stream(&mut reader, Some(512), &mut sink);

    let summary = result.expect("interrupted read retried");
    assert_eq!(summary.bytes_written, 512);
}

#[test]
fn unknown_total_reports_indeterminate_progress() {
    let payload = vec![0_u8; 2500];
    let mut sink = RecordingSink::default();

    let (result, _destination, _dir) = run_stream(&mut Cursor::new(payload), None, &mut sink);

    let summary = result.expect("transfer succeeds");
    assert_eq!(summary.bytes_written, 2500);
    assert!(sink.samples.iter().all(|s| s.percent().is_none()));
}

#[test]
fn empty_body_with_zero_declared_length_succeeds() {
    let mut sink = RecordingSink::default();
    let (result, destination, _dir) =
        run_stream(&mut Cursor::new(Vec::new()), Some(0), &mut sink);

    let summary = result.expect("empty transfer succeeds");
    assert_eq!(summary.bytes_written, 0);
    assert!(sink.samples.is_empty());
    let written = std::fs::metadata(destination.as_std_path()).expect("metadata");
    assert_eq!(written.len(), 0);
}

#[rstest]
#[case::half(512, Some(1024), Some(50.0))]
#[case::complete(1024, Some(1024), Some(100.0))]
#[case::zero_total(512, Some(0), None)]
#[case::unknown_total(512, None, None)]
fn percent_handles_declared_and_indeterminate_totals(
    #[case] bytes_downloaded: u64,
    #[case] total_bytes: Option<u64>,
    #[case] expected: Option<f64>,
) {
    let sample = Progress {
        bytes_downloaded,
        total_bytes,
    };
    assert_eq!(sample.percent(), expected);
}
