//! List command implementation.
//!
//! This module provides the `run_list` command handler for querying and
//! displaying the versions the manifest offers.

use log::trace;
use std::io::Write;

use crate::cli::ListArgs;
use crate::error::{FetchError, Result};
use crate::list_output::{format_human, format_json};
use crate::manifest_client::{DEFAULT_MANIFEST_URL, HttpManifestClient, ManifestClient};

/// Lists the versions the manifest offers.
///
/// Fetches the manifest (honouring `--manifest-url`) and formats the
/// version list for display. Output is written to stdout
/// (human-readable by default, JSON with `--json`).
///
/// # Errors
///
/// Returns an error if the manifest cannot be fetched or parsed, or if
/// writing to stdout fails.
pub fn run_list(args: &ListArgs, stdout: &mut dyn Write) -> Result<()> {
    let manifest_url = args
        .manifest_url
        .clone()
        .unwrap_or_else(|| DEFAULT_MANIFEST_URL.to_owned());
    let client = HttpManifestClient::new(manifest_url);
    run_list_with(&client, args, stdout)
}

/// Internal implementation with an injectable manifest client for
/// testability.
fn run_list_with(
    client: &dyn ManifestClient,
    args: &ListArgs,
    stdout: &mut dyn Write,
) -> Result<()> {
    let manifest = client.fetch_manifest()?;
    trace!("listing {} version(s)", manifest.len());

    let output = if args.json {
        format_json(&manifest)
    } else {
        format_human(&manifest)
    };

    writeln!(stdout, "{}", output.trim_end()).map_err(FetchError::Io)?;
    Ok(())
}
