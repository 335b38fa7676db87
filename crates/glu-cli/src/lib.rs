//! Glu command-line client library.
//!
//! Holds everything behind the `glu` binary so argument parsing, command
//! logic and output formatting can be tested without spawning a process.

#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unnecessary_wraps)] // every command returns Result<ExitCode>

pub mod actions;
pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;

pub use actions::ConfigAction;
pub use cli::{Cli, Commands};
