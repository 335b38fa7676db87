//! Client for self-describing Glu servers.
//!
//! A Glu server publishes components; each component describes the
//! parameters needed to create a resource from it and the services that
//! resource will expose. This crate reads those descriptions and drives the
//! server with them, with no per-component client code:
//!
//! - [`GluServer`] lists and fetches components and resources
//! - [`Component`] exposes a component's description and builds a
//!   [`ResourceTemplate`]
//! - [`ResourceTemplate`] validates creation parameters and creates a
//!   [`Resource`]
//! - [`Resource`] hands out [`AccessibleService`]s, which validate call
//!   parameters, assemble the request and return the server's raw answer
//!
//! Requests are awaited one at a time; nothing runs in the background and
//! nothing is retried.
//!
//! # Examples
//!
//! ```no_run
//! use glu_client::GluServer;
//! use glu_core::{ClientConfig, HttpMethod};
//!
//! # async fn example() -> glu_core::Result<()> {
//! let server = GluServer::new(ClientConfig::default())?;
//! let resource = server.resource("r1").await?;
//!
//! let mut store = resource.service("store")?;
//! store.set_input(r#"{"key": "value"}"#)?;
//! let result = store.access(Some(HttpMethod::Put)).await?;
//! assert!(result.is_success());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod component;
mod resource;
mod server;
mod service;
mod template;
mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use component::Component;
pub use resource::Resource;
pub use server::GluServer;
pub use service::AccessibleService;
pub use template::ResourceTemplate;
pub use transport::HttpTransport;
