//! Command implementations for the Glu CLI.
//!
//! Commands that talk to a server take a connected [`glu_client::GluServer`],
//! so they can be exercised against a recording transport in tests. Each
//! one splits into a function returning a serializable result and a `run`
//! that prints it.

pub mod call;
pub mod common;
pub mod completions;
pub mod components;
pub mod config;
pub mod create;
pub mod delete;
pub mod describe;
pub mod resources;
