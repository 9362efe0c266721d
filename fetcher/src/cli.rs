//! CLI argument definitions for the craftfetch binary.
//!
//! This module defines the command-line interface using clap. It is
//! separated from the main entrypoint to keep the binary small and
//! focused on orchestration.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Fetch game-client artifacts listed in a public version manifest.
#[derive(Parser, Debug)]
#[command(name = "craftfetch")]
#[command(version, about)]
#[command(long_about = concat!(
    "Fetch game-client artifacts listed in a public version manifest.\n\n",
    "craftfetch retrieves the version manifest, resolves the chosen ",
    "version's metadata to a concrete client download URL, and streams ",
    "the artifact to <dest-dir>/<version>/client.jar with progress ",
    "feedback.\n\n",
    "Omitting the version argument counts as selecting nothing: the run ",
    "ends as cancelled rather than failed.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  List the versions the manifest offers:\n",
    "    $ craftfetch list\n\n",
    "  Download a client into the default directory:\n",
    "    $ craftfetch 1.20.1\n\n",
    "  Download into an explicit directory, quietly:\n",
    "    $ craftfetch fetch 1.20.1 --dest-dir /tmp/out --quiet\n",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Fetch arguments (used when no subcommand is given).
    #[command(flatten)]
    pub fetch: FetchArgs,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Download a client artifact (default when no subcommand given).
    Fetch(FetchArgs),

    /// List the versions the manifest offers.
    List(ListArgs),
}

/// Arguments for the fetch command.
#[derive(Parser, Debug, Clone)]
pub struct FetchArgs {
    /// Version identifier to download; omitting it cancels the run.
    #[arg(value_name = "VERSION")]
    pub version_id: Option<String>,

    /// Directory to save the artifact under [default: ~/.minecraft/versions].
    #[arg(short, long, value_name = "DIR")]
    pub dest_dir: Option<Utf8PathBuf>,

    /// Override the version manifest URL.
    #[arg(long, value_name = "URL")]
    pub manifest_url: Option<String>,

    /// Append failure details to this file [default: error_log.txt].
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<Utf8PathBuf>,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the list command.
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Output in JSON format for scripting.
    #[arg(long)]
    pub json: bool,

    /// Override the version manifest URL.
    #[arg(long, value_name = "URL")]
    pub manifest_url: Option<String>,
}

impl Default for FetchArgs {
    /// Creates a `FetchArgs` instance with no version selected and all
    /// flags disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use craftfetch::cli::FetchArgs;
    ///
    /// let args = FetchArgs::default();
    /// assert!(args.version_id.is_none());
    /// assert!(!args.quiet);
    /// ```
    fn default() -> Self {
        Self {
            version_id: None,
            dest_dir: None,
            manifest_url: None,
            log_file: None,
            quiet: false,
        }
    }
}

impl Default for ListArgs {
    /// Creates a `ListArgs` instance with default settings.
    fn default() -> Self {
        Self {
            json: false,
            manifest_url: None,
        }
    }
}

impl Cli {
    /// Returns the effective fetch arguments.
    ///
    /// If a `Fetch` subcommand was provided, returns those arguments.
    /// Otherwise returns the flattened fetch arguments.
    ///
    /// # Note
    ///
    /// When `Command::List` is active, this returns the default flattened
    /// fetch arguments. Callers should check `self.command` before
    /// calling this method if the `List` case needs different handling.
    #[must_use]
    pub fn fetch_args(&self) -> &FetchArgs {
        match &self.command {
            Some(Command::Fetch(args)) => args,
            Some(Command::List(_)) | None => &self.fetch,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
