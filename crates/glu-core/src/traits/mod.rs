//! Collaborator traits.
//!
//! The core never talks to the network itself. Everything that needs I/O
//! goes through the traits in this module, which the client crate and tests
//! implement.
//!
//! # Module Structure
//!
//! - `transport` - request/response transport

mod transport;

pub use transport::Transport;
