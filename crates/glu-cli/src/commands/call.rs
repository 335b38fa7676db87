//! Call command implementation.
//!
//! Invokes one service of a resource and prints the server's answer as it
//! came back. A non-2xx status is not an error here; it is printed and
//! reflected in the exit code.

use anyhow::{Context, Result};
use glu_client::GluServer;
use glu_core::cli::{ExitCode, OutputFormat, ParamAssignment};
use glu_core::{HttpMethod, HttpResult};
use tracing::{debug, warn};

use super::common::print_output;

/// Resolves an `--input` argument: `@path` reads the file, anything else is
/// used verbatim.
pub async fn read_input(input: &str) -> Result<String> {
    match input.strip_prefix('@') {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read input file '{path}'")),
        None => Ok(input.to_string()),
    }
}

/// Invokes `service` on `resource`.
pub async fn call(
    server: &GluServer,
    resource: &str,
    service: &str,
    params: Vec<ParamAssignment>,
    input: Option<String>,
    method: Option<HttpMethod>,
) -> Result<HttpResult> {
    let resource = server
        .resource(resource)
        .await
        .with_context(|| format!("failed to fetch resource '{resource}'"))?;

    let mut accessible = resource.service(service)?;
    accessible.set_params(params.into_iter().map(ParamAssignment::into_pair))?;
    if let Some(input) = input {
        accessible.set_input(read_input(&input).await?)?;
    }

    debug!("Calling {}", accessible.request_uri());
    Ok(accessible.access(method).await?)
}

/// Runs the call command.
///
/// Exits with [`ExitCode::SERVER_ERROR`] when the server answered with a
/// non-2xx status.
pub async fn run(
    server: &GluServer,
    resource: &str,
    service: &str,
    params: Vec<ParamAssignment>,
    input: Option<String>,
    method: Option<HttpMethod>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let result = call(server, resource, service, params, input, method).await?;
    print_output(&result, output_format)?;

    if result.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("Server answered with status {}", result.status);
        Ok(ExitCode::SERVER_ERROR)
    }
}
