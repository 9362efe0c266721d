//! craftfetch library.
//!
//! This crate provides the core functionality for locating, selecting,
//! and downloading a game-client artifact identified by a public version
//! manifest: fetching and parsing the manifest, resolving a chosen
//! version's metadata to a concrete download URL, and streaming the
//! transfer to disk with ordered progress samples. It is used by the
//! `craftfetch` CLI binary and can be consumed programmatically with
//! custom pickers and progress sinks.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`downloader`] - Streamed transfer with progress reporting
//! - [`error`] - Semantic error types and the crate `Result` alias
//! - [`failure_log`] - Append-only failure log collaborator
//! - [`list`] - List command handler
//! - [`list_output`] - Output formatting for version listing
//! - [`manifest`] - Version manifest model and parsing
//! - [`manifest_client`] - Manifest retrieval over HTTP
//! - [`metadata`] - Per-version metadata and client-descriptor lookup
//! - [`pipeline`] - Fetch pipeline orchestration
//! - [`resolver`] - Metadata-URL to download-URL resolution
//! - [`version_id`] - Semantic wrapper for version identifiers

pub mod cli;
pub mod downloader;
pub mod error;
pub mod failure_log;
mod http;
pub mod list;
pub mod list_output;
pub mod manifest;
pub mod manifest_client;
pub mod metadata;
pub mod pipeline;
pub mod resolver;
pub mod version_id;
