//! Delete command implementation.

use anyhow::{Context, Result};
use glu_client::GluServer;
use glu_core::cli::{ExitCode, OutputFormat};
use serde::Serialize;
use tracing::info;

use super::common::print_output;

/// Outcome of a deletion.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeleteResult {
    /// Name of the deleted resource
    pub name: String,
    /// Always `true`; failures are reported as errors
    pub deleted: bool,
}

/// Deletes the named resource.
pub async fn delete(server: &GluServer, name: &str) -> Result<DeleteResult> {
    let resource = server
        .resource(name)
        .await
        .with_context(|| format!("failed to fetch resource '{name}'"))?;
    resource
        .delete()
        .await
        .with_context(|| format!("failed to delete resource '{name}'"))?;
    info!("Deleted resource '{name}'");

    Ok(DeleteResult {
        name: name.to_string(),
        deleted: true,
    })
}

/// Runs the delete command.
pub async fn run(server: &GluServer, name: &str, output_format: OutputFormat) -> Result<ExitCode> {
    print_output(&delete(server, name).await?, output_format)?;
    Ok(ExitCode::SUCCESS)
}
