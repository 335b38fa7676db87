//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use glu_core::HttpMethod;
use glu_core::cli::ParamAssignment;

use crate::actions::ConfigAction;

/// Glu - drive self-describing HTTP components from the command line.
///
/// Every command works from the descriptions the server publishes; no
/// component-specific client code is involved.
#[derive(Parser, Debug)]
#[command(name = "glu")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Server base URL, overriding the configuration file
    #[arg(long, global = true, env = "GLU_SERVER", value_name = "URL")]
    pub server: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    ///
    /// Falls back to `general.default_format` from the configuration file.
    #[arg(long = "format", global = true)]
    pub format: Option<String>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the components published by the server.
    Components,

    /// Show a component's parameters and services.
    ///
    /// # Examples
    ///
    /// ```bash
    /// glu describe Combiner --docs
    /// ```
    Describe {
        /// Component name
        component: String,

        /// Also fetch the component's documentation
        #[arg(long)]
        docs: bool,
    },

    /// List the resources that currently exist.
    Resources,

    /// Create a resource from a component.
    ///
    /// Parameters are validated against the component's description before
    /// anything is sent.
    ///
    /// # Examples
    ///
    /// ```bash
    /// glu create Combiner --name r1 --param some_number=3
    /// ```
    Create {
        /// Component name
        component: String,

        /// Suggested name for the new resource
        #[arg(long)]
        name: Option<String>,

        /// Description of the new resource
        #[arg(long = "desc")]
        description: Option<String>,

        /// Creation parameter
        #[arg(short, long = "param", value_name = "NAME=VALUE")]
        params: Vec<ParamAssignment>,
    },

    /// Invoke a service of a resource and print the raw answer.
    ///
    /// # Examples
    ///
    /// ```bash
    /// glu call r1 foobar --param text=hi
    /// glu call r1 store --input @payload.json --method PUT
    /// ```
    Call {
        /// Resource name
        resource: String,

        /// Service name
        service: String,

        /// Call parameter
        #[arg(short, long = "param", value_name = "NAME=VALUE")]
        params: Vec<ParamAssignment>,

        /// Request body, or `@path` to read it from a file
        #[arg(long, value_name = "TEXT|@FILE")]
        input: Option<String>,

        /// HTTP method; inferred from the presence of a body when omitted
        #[arg(long)]
        method: Option<HttpMethod>,
    },

    /// Delete a resource.
    Delete {
        /// Resource name
        resource: String,
    },

    /// Manage the configuration file.
    Config {
        /// Configuration action
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions.
    ///
    /// # Examples
    ///
    /// ```bash
    /// glu completions bash > /etc/bash_completion.d/glu
    /// ```
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_components() {
        let cli = Cli::parse_from(["glu", "components"]);
        assert!(matches!(cli.command, Commands::Components));
        assert!(!cli.verbose);
        assert!(cli.format.is_none());
    }

    #[test]
    fn test_cli_parsing_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "glu",
            "resources",
            "--server",
            "http://example.com:9000",
            "--format",
            "json",
            "-v",
        ]);
        assert_eq!(cli.server.as_deref(), Some("http://example.com:9000"));
        assert_eq!(cli.format.as_deref(), Some("json"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parsing_create() {
        let cli = Cli::parse_from([
            "glu",
            "create",
            "Combiner",
            "--name",
            "r1",
            "--desc",
            "first",
            "-p",
            "some_number=3",
            "--param",
            "label=a=b",
        ]);
        match cli.command {
            Commands::Create {
                component,
                name,
                description,
                params,
            } => {
                assert_eq!(component, "Combiner");
                assert_eq!(name.as_deref(), Some("r1"));
                assert_eq!(description.as_deref(), Some("first"));
                assert_eq!(params.len(), 2);
                assert_eq!(params[1].name(), "label");
                assert_eq!(params[1].value(), "a=b");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parsing_call() {
        let cli = Cli::parse_from([
            "glu", "call", "r1", "foobar", "-p", "text=hi", "--input", "@body.json", "--method",
            "put",
        ]);
        match cli.command {
            Commands::Call {
                resource,
                service,
                params,
                input,
                method,
            } => {
                assert_eq!(resource, "r1");
                assert_eq!(service, "foobar");
                assert_eq!(params[0].name(), "text");
                assert_eq!(input.as_deref(), Some("@body.json"));
                assert_eq!(method, Some(HttpMethod::Put));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_malformed_param() {
        let result = Cli::try_parse_from(["glu", "call", "r1", "foobar", "-p", "novalue"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_method() {
        let result = Cli::try_parse_from(["glu", "call", "r1", "foobar", "--method", "PATCH"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parsing_config_set() {
        let cli = Cli::parse_from(["glu", "config", "set", "server.url", "http://h:1"]);
        match cli.command {
            Commands::Config { action } => assert_eq!(
                action,
                ConfigAction::Set {
                    key: "server.url".to_string(),
                    value: "http://h:1".to_string(),
                }
            ),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::parse_from(["glu", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Commands::Completions { shell: Shell::Zsh }
        ));
    }

    #[test]
    fn test_cli_debug_asserts() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
