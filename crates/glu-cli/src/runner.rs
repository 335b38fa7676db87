//! Command execution and runtime logic.
//!
//! Contains logging initialization and the dispatch from parsed commands to
//! their handlers.

use anyhow::{Context, Result};
use clap::CommandFactory;
use glu_core::cli::{ExitCode, OutputFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::commands;
use crate::commands::config::Config;

/// Initializes logging to stderr.
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG` wins, then the
/// configured `default_level`.
pub fn init_logging(verbose: bool, default_level: &str) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("failed to initialize logging")?;

    Ok(())
}

/// Resolves the output format: an explicit `--format` wins over the
/// configured default.
pub fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => format
            .parse()
            .with_context(|| format!("invalid --format '{format}'")),
        None => config.output_format(),
    }
}

/// Executes the specified CLI command.
///
/// `server` is the `--server` override; commands that talk to a server
/// connect with it, or with the configured URL when it is absent.
pub async fn execute_command(
    command: Commands,
    server: Option<&str>,
    config: &Config,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    match command {
        Commands::Components => {
            let server = commands::common::connect(server, config)?;
            commands::components::run(&server, output_format).await
        }
        Commands::Describe { component, docs } => {
            let server = commands::common::connect(server, config)?;
            commands::describe::run(&server, &component, docs, output_format).await
        }
        Commands::Resources => {
            let server = commands::common::connect(server, config)?;
            commands::resources::run(&server, output_format).await
        }
        Commands::Create {
            component,
            name,
            description,
            params,
        } => {
            let server = commands::common::connect(server, config)?;
            commands::create::run(&server, &component, name, description, params, output_format)
                .await
        }
        Commands::Call {
            resource,
            service,
            params,
            input,
            method,
        } => {
            let server = commands::common::connect(server, config)?;
            commands::call::run(
                &server,
                &resource,
                &service,
                params,
                input,
                method,
                output_format,
            )
            .await
        }
        Commands::Delete { resource } => {
            let server = commands::common::connect(server, config)?;
            commands::delete::run(&server, &resource, output_format).await
        }
        Commands::Config { action } => commands::config::run(action, output_format),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
