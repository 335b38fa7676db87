//! Describe command implementation.
//!
//! Prints a component descriptor in its published wire shape, optionally
//! together with the component's documentation.

use anyhow::{Context, Result};
use glu_client::GluServer;
use glu_core::Value;
use glu_core::cli::{ExitCode, OutputFormat};
use serde::Serialize;

use super::common::print_output;

/// A component descriptor plus, if requested, its documentation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ComponentDescription {
    /// The descriptor as published
    pub component: Value,
    /// The documentation, when it was fetched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<Value>,
}

/// Fetches a component and, when `with_docs` is set, its documentation.
pub async fn describe(
    server: &GluServer,
    name: &str,
    with_docs: bool,
) -> Result<ComponentDescription> {
    let component = server
        .component(name)
        .await
        .with_context(|| format!("failed to fetch component '{name}'"))?;

    let docs = if with_docs {
        let docs = component
            .docs()
            .await
            .with_context(|| format!("failed to fetch documentation for '{name}'"))?;
        Some(docs.clone())
    } else {
        None
    };

    Ok(ComponentDescription {
        component: component.descriptor().to_value(),
        docs,
    })
}

/// Runs the describe command.
pub async fn run(
    server: &GluServer,
    name: &str,
    with_docs: bool,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    print_output(&describe(server, name, with_docs).await?, output_format)?;
    Ok(ExitCode::SUCCESS)
}
