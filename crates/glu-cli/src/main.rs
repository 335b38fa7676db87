//! Glu command-line client.
//!
//! Drives a Glu server purely from the descriptions it publishes.
//!
//! # Examples
//!
//! ```bash
//! # What can this server build?
//! glu components
//!
//! # Create a resource and call one of its services
//! glu create Combiner --name r1 --param some_number=3
//! glu call r1 foobar --param text=hi
//! ```

use clap::Parser;
use colored::Colorize;
use glu_cli::Cli;
use glu_cli::commands::common::exit_code_for;
use glu_cli::commands::config::load_config;
use glu_cli::runner::{execute_command, init_logging, resolve_format};
use glu_core::cli::ExitCode;

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config()?;
    init_logging(cli.verbose, &config.general.log_level)?;
    let output_format = resolve_format(cli.format.as_deref(), &config)?;
    execute_command(cli.command, cli.server.as_deref(), &config, output_format).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            exit_code_for(&err)
        }
    };

    std::process::exit(exit_code.as_i32());
}
