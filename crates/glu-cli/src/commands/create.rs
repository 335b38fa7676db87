//! Create command implementation.
//!
//! Runs the two-phase creation protocol: validate and post the creation
//! parameters, then fetch the confirmed resource.

use anyhow::{Context, Result};
use glu_client::GluServer;
use glu_core::cli::{ExitCode, OutputFormat, ParamAssignment};
use serde::Serialize;
use tracing::info;

use super::common::print_output;

/// Summary of a newly created resource.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateResult {
    /// Name the server gave the resource
    pub name: String,
    /// Resource URI
    pub uri: String,
    /// Services the resource exposes
    pub services: Vec<String>,
}

/// Creates a resource from `component`.
///
/// Parameter values are passed as strings and coerced by the component's
/// declared types; nothing is sent unless all of them validate.
pub async fn create(
    server: &GluServer,
    component: &str,
    name: Option<String>,
    description: Option<String>,
    params: Vec<ParamAssignment>,
) -> Result<CreateResult> {
    let component = server
        .component(component)
        .await
        .with_context(|| format!("failed to fetch component '{component}'"))?;

    let mut template = component.resource_template();
    template.set_params(params.into_iter().map(ParamAssignment::into_pair))?;
    if let Some(name) = name {
        template.set_suggested_name(name);
    }
    if let Some(description) = description {
        template.set_description(description);
    }

    let resource = template.create_resource().await?;
    info!("Created resource '{}'", resource.name());

    Ok(CreateResult {
        name: resource.name().to_string(),
        uri: resource.uri().to_string(),
        services: resource.services().keys().cloned().collect(),
    })
}

/// Runs the create command.
pub async fn run(
    server: &GluServer,
    component: &str,
    name: Option<String>,
    description: Option<String>,
    params: Vec<ParamAssignment>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let result = create(server, component, name, description, params).await?;
    print_output(&result, output_format)?;
    Ok(ExitCode::SUCCESS)
}
