//! Core types, traits, and errors for Glu.
//!
//! Glu servers publish self-describing components: each component states its
//! creation parameters and the services a resource built from it exposes,
//! down to the type of every parameter. This crate holds that metadata model
//! and the protocol vocabulary shared by clients and servers.
//!
//! # Architecture
//!
//! The core consists of:
//! - Descriptor types parsed from (and emitted as) wire maps:
//!   [`ComponentDescriptor`], [`ResourceDescriptor`], [`ServiceDefinition`],
//!   [`ParameterDefinition`]
//! - The parameter type system and its value coercion ([`ParameterType`])
//! - HTTP vocabulary: [`HttpRequest`], [`HttpResult`], [`infer_method`]
//! - The [`Transport`](traits::Transport) seam the client sends through
//! - Client configuration ([`ClientConfig`])
//! - A declarative builder for server-side descriptors ([`declare`])

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod http;

pub mod cli;
pub mod component;
pub mod declare;
pub mod parameter;
pub mod service;
pub mod traits;
pub mod value;

pub use component::{ComponentDescriptor, DescUri, ResourceCreationParams, ResourceDescriptor, parse_listing};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::{Error, Result};
pub use http::{
    HttpMethod, HttpRequest, HttpResult, HttpStatus, encode_path_segment, infer_method,
};
pub use parameter::{ParameterDefinition, ParameterType};
pub use service::ServiceDefinition;
pub use value::Value;
