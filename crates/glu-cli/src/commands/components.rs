//! Components command implementation.

use anyhow::{Context, Result};
use glu_client::GluServer;
use glu_core::cli::{ExitCode, OutputFormat};
use tracing::info;

use super::common::{ListingEntry, listing_entries, print_output};

/// Fetches the component listing.
pub async fn list(server: &GluServer) -> Result<Vec<ListingEntry>> {
    let listing = server
        .list_components()
        .await
        .context("failed to list components")?;
    Ok(listing_entries(listing))
}

/// Runs the components command.
pub async fn run(server: &GluServer, output_format: OutputFormat) -> Result<ExitCode> {
    let entries = list(server).await?;
    info!("Server publishes {} components", entries.len());
    print_output(&entries, output_format)?;
    Ok(ExitCode::SUCCESS)
}
