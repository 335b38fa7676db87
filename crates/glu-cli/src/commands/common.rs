//! Utilities shared across CLI commands.

use anyhow::{Context, Result};
use glu_client::GluServer;
use glu_core::cli::{ExitCode, OutputFormat};
use glu_core::{DescUri, Error};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::commands::config::Config;

/// One row of a component or resource listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListingEntry {
    /// Component or resource name
    pub name: String,
    /// Short description
    pub desc: String,
    /// Where the full descriptor lives
    pub uri: String,
}

/// Flattens a `name → {desc, uri}` listing into rows, sorted by name.
#[must_use]
pub fn listing_entries(listing: BTreeMap<String, DescUri>) -> Vec<ListingEntry> {
    listing
        .into_iter()
        .map(|(name, entry)| ListingEntry {
            name,
            desc: entry.desc,
            uri: entry.uri,
        })
        .collect()
}

/// Connects to the server named by `--server`, or by the configuration.
///
/// No request is sent; only the configuration is checked.
pub fn connect(server: Option<&str>, config: &Config) -> Result<GluServer> {
    let client_config = config.client_config(server)?;
    GluServer::new(client_config).context("failed to set up HTTP client")
}

/// Formats `data` and prints it to stdout.
pub fn print_output<T: Serialize>(data: &T, output_format: OutputFormat) -> Result<()> {
    let formatted =
        crate::formatters::format_output(data, output_format).context("failed to format output")?;
    println!("{formatted}");
    Ok(())
}

/// Picks the exit code for a failed command.
///
/// Protocol errors anywhere in the chain decide the code; anything else is
/// a general error.
///
/// # Examples
///
/// ```
/// use glu_cli::commands::common::exit_code_for;
/// use glu_core::Error;
/// use glu_core::cli::ExitCode;
///
/// let err = anyhow::Error::new(Error::NotFound {
///     kind: "Service",
///     name: "foobar".to_string(),
/// });
/// assert_eq!(exit_code_for(&err), ExitCode::NOT_FOUND);
/// assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), ExitCode::ERROR);
/// ```
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<Error>())
        .map_or(ExitCode::ERROR, ExitCode::for_error)
}
