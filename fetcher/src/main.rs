//! craftfetch CLI entrypoint.
//!
//! This binary fetches the version manifest, resolves the selected
//! version to its client download URL, and streams the artifact to disk
//! with a progress line on stderr. The version and destination given on
//! the command line stand in for interactive pickers: omitting the
//! version cancels the run.

use camino::Utf8PathBuf;
use clap::Parser;
use craftfetch::cli::{Cli, Command, FetchArgs};
use craftfetch::downloader::{HttpClientDownloader, Progress, ProgressSink};
use craftfetch::error::Result;
use craftfetch::failure_log::FileFailureLog;
use craftfetch::list::run_list;
use craftfetch::manifest::VersionManifest;
use craftfetch::manifest_client::{DEFAULT_MANIFEST_URL, HttpManifestClient};
use craftfetch::pipeline::{DestinationPicker, FetchOutcome, FetchPipeline, VersionPicker};
use craftfetch::resolver::HttpVersionResolver;
use craftfetch::version_id::VersionId;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Some(Command::List(args)) => {
            let mut stdout = std::io::stdout();
            run_list(args, &mut stdout)
        }
        Some(Command::Fetch(args)) => run_fetch(args, stderr),
        None => run_fetch(&cli.fetch, stderr),
    }
}

/// Supplies the version identifier given on the command line.
struct ArgVersionPicker {
    version_id: Option<VersionId>,
}

impl VersionPicker for ArgVersionPicker {
    fn pick(&self, _manifest: &VersionManifest) -> Option<VersionId> {
        self.version_id.clone()
    }
}

/// Supplies the destination directory from the command line or the
/// platform default.
struct ArgDestinationPicker {
    dest_dir: Option<Utf8PathBuf>,
}

impl DestinationPicker for ArgDestinationPicker {
    fn pick(&self) -> Option<Utf8PathBuf> {
        self.dest_dir.clone().or_else(default_destination_dir)
    }
}

/// Default destination directory: `~/.minecraft/versions`.
fn default_destination_dir() -> Option<Utf8PathBuf> {
    let dirs = directories_next::UserDirs::new()?;
    let home = Utf8PathBuf::from_path_buf(dirs.home_dir().to_path_buf()).ok()?;
    Some(home.join(".minecraft").join("versions"))
}

/// Renders an in-place progress line on stderr.
struct StderrProgress<'a> {
    quiet: bool,
    rendered: bool,
    stderr: &'a mut dyn Write,
}

impl ProgressSink for StderrProgress<'_> {
    fn update(&mut self, progress: Progress) {
        if self.quiet {
            return;
        }
        self.rendered = true;
        let line = progress_line(progress);
        if self.stderr.write_all(line.as_bytes()).is_err() {
            // Best-effort display; ignore write failures.
        }
    }
}

/// Format one in-place progress line.
fn progress_line(progress: Progress) -> String {
    match progress.percent() {
        Some(percent) => format!("\rDownloading... {percent:6.2}%"),
        None => format!("\rDownloading... {} bytes", progress.bytes_downloaded),
    }
}

/// Runs the fetch pipeline with HTTP collaborators and CLI pickers.
fn run_fetch(args: &FetchArgs, stderr: &mut dyn Write) -> Result<()> {
    let manifest_url = args
        .manifest_url
        .clone()
        .unwrap_or_else(|| DEFAULT_MANIFEST_URL.to_owned());
    let manifest_client = HttpManifestClient::new(manifest_url);
    let resolver = HttpVersionResolver;
    let downloader = HttpClientDownloader;
    let failure_log = FileFailureLog::new(failure_log_path(args));
    let pipeline = FetchPipeline::new(&manifest_client, &resolver, &downloader, &failure_log);

    let version_picker = ArgVersionPicker {
        version_id: args.version_id.clone().map(VersionId::from),
    };
    let destination_picker = ArgDestinationPicker {
        dest_dir: args.dest_dir.clone(),
    };

    let mut progress = StderrProgress {
        quiet: args.quiet,
        rendered: false,
        stderr: &mut *stderr,
    };
    let outcome = pipeline.run(&version_picker, &destination_picker, &mut progress);
    let rendered = progress.rendered;
    if rendered {
        // Terminate the in-place progress line.
        write_stderr_line(stderr, "");
    }

    match outcome? {
        FetchOutcome::Completed(summary) => {
            if !args.quiet {
                write_stderr_line(
                    stderr,
                    format!(
                        "Saved client to {} ({} bytes).",
                        summary.path, summary.bytes_written
                    ),
                );
            }
        }
        FetchOutcome::Cancelled => {
            write_stderr_line(stderr, "Nothing selected; nothing downloaded.");
        }
    }
    Ok(())
}

/// Failure log path from the CLI, or the default file in the working
/// directory.
fn failure_log_path(args: &FetchArgs) -> Utf8PathBuf {
    args.log_file
        .clone()
        .unwrap_or_else(|| Utf8PathBuf::from(FileFailureLog::DEFAULT_FILE_NAME))
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use craftfetch::error::FetchError;
    use rstest::rstest;

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_and_returns_one() {
        let err = FetchError::UnknownVersion {
            id: VersionId::from("9.9.9"),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains("9.9.9"));
    }

    #[test]
    fn version_picker_returns_command_line_selection() {
        let picker = ArgVersionPicker {
            version_id: Some(VersionId::from("1.20.1")),
        };
        let manifest = VersionManifest::default();
        assert_eq!(picker.pick(&manifest), Some(VersionId::from("1.20.1")));
    }

    #[test]
    fn version_picker_without_selection_cancels() {
        let picker = ArgVersionPicker { version_id: None };
        assert_eq!(picker.pick(&VersionManifest::default()), None);
    }

    #[test]
    fn destination_picker_prefers_explicit_directory() {
        let picker = ArgDestinationPicker {
            dest_dir: Some(Utf8PathBuf::from("/tmp/out")),
        };
        assert_eq!(picker.pick(), Some(Utf8PathBuf::from("/tmp/out")));
    }

    #[rstest]
    #[case::declared(
        Progress { bytes_downloaded: 512, total_bytes: Some(1024) },
        " 50.00%"
    )]
    #[case::indeterminate(
        Progress { bytes_downloaded: 512, total_bytes: None },
        "512 bytes"
    )]
    fn progress_line_handles_declared_and_indeterminate_totals(
        #[case] progress: Progress,
        #[case] expected_suffix: &str,
    ) {
        let line = progress_line(progress);
        assert!(line.starts_with("\rDownloading..."));
        assert!(line.ends_with(expected_suffix), "line: {line:?}");
    }

    #[test]
    fn quiet_progress_sink_writes_nothing() {
        let mut buffer = Vec::new();
        let mut sink = StderrProgress {
            quiet: true,
            rendered: false,
            stderr: &mut buffer,
        };
        sink.update(Progress {
            bytes_downloaded: 100,
            total_bytes: Some(200),
        });
        assert!(!sink.rendered);
        assert!(buffer.is_empty());
    }

    #[test]
    fn failure_log_path_defaults_to_working_directory_file() {
        let args = FetchArgs::default();
        assert_eq!(
            failure_log_path(&args),
            Utf8PathBuf::from(FileFailureLog::DEFAULT_FILE_NAME),
        );
    }
}
