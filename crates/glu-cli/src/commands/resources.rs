//! Resources command implementation.

use anyhow::{Context, Result};
use glu_client::GluServer;
use glu_core::cli::{ExitCode, OutputFormat};

use super::common::{ListingEntry, listing_entries, print_output};

/// Fetches the resource listing.
pub async fn list(server: &GluServer) -> Result<Vec<ListingEntry>> {
    let listing = server
        .list_resources()
        .await
        .context("failed to list resources")?;
    Ok(listing_entries(listing))
}

/// Runs the resources command.
pub async fn run(server: &GluServer, output_format: OutputFormat) -> Result<ExitCode> {
    print_output(&list(server).await?, output_format)?;
    Ok(ExitCode::SUCCESS)
}
