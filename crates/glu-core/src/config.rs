//! Client configuration.
//!
//! Where the server lives, under which path prefixes it publishes components
//! and resources, and how long a single request may take.
//!
//! # Examples
//!
//! ```
//! use glu_core::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::default();
//! assert_eq!(config.base_url, "http://localhost:8001");
//! assert_eq!(config.resource_prefix, "/resource");
//!
//! let custom = ClientConfig::builder()
//!     .base_url("http://glu.example.com:9000")
//!     .request_timeout(Duration::from_secs(5))
//!     .build();
//! assert!(custom.validate().is_ok());
//! ```

use crate::{Error, Result, encode_path_segment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Default server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";
/// Default prefix of the meta (documentation) tree.
pub const DEFAULT_META_PREFIX: &str = "/meta";
/// Default prefix of the component tree.
pub const DEFAULT_CODE_PREFIX: &str = "/code";
/// Default prefix of the resource tree.
pub const DEFAULT_RESOURCE_PREFIX: &str = "/resource";
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for talking to one Glu server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server base URL, e.g. `http://localhost:8001`.
    pub base_url: String,

    /// Path prefix of the documentation tree.
    /// Default: `/meta`
    pub meta_prefix: String,

    /// Path prefix under which components are published.
    /// Default: `/code`
    pub code_prefix: String,

    /// Path prefix under which resources live.
    /// Default: `/resource`
    pub resource_prefix: String,

    /// Timeout applied by the transport to each request.
    /// Default: 30 seconds
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,

    /// Headers sent with every request.
    #[serde(default)]
    pub default_headers: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            meta_prefix: DEFAULT_META_PREFIX.to_string(),
            code_prefix: DEFAULT_CODE_PREFIX.to_string(),
            resource_prefix: DEFAULT_RESOURCE_PREFIX.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Creates a default configuration pointing at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Path of the component listing.
    #[must_use]
    pub fn components_path(&self) -> String {
        self.code_prefix.clone()
    }

    /// Path of one component's descriptor; `name` is encoded as a single
    /// segment.
    #[must_use]
    pub fn component_path(&self, name: &str) -> String {
        format!("{}/{}", self.code_prefix, encode_path_segment(name))
    }

    /// Path of the resource listing.
    #[must_use]
    pub fn resources_path(&self) -> String {
        self.resource_prefix.clone()
    }

    /// Canonical path of a named resource; `name` is encoded as a single
    /// segment.
    #[must_use]
    pub fn resource_path(&self, name: &str) -> String {
        format!("{}/{}", self.resource_prefix, encode_path_segment(name))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if:
    /// - the base URL is empty, unparsable, or not `http`/`https`
    /// - a path prefix does not start with `/`
    /// - the request timeout is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use glu_core::ClientConfig;
    ///
    /// assert!(ClientConfig::default().validate().is_ok());
    ///
    /// let mut bad = ClientConfig::default();
    /// bad.code_prefix = "code".to_string();
    /// assert!(bad.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(config_error("base URL cannot be empty"));
        }
        let url = Url::parse(&self.base_url)
            .map_err(|e| config_error(format!("invalid base URL '{}': {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(config_error(format!(
                "unsupported URL scheme '{}', expected http or https",
                url.scheme()
            )));
        }

        for (key, prefix) in [
            ("meta_prefix", &self.meta_prefix),
            ("code_prefix", &self.code_prefix),
            ("resource_prefix", &self.resource_prefix),
        ] {
            if !prefix.starts_with('/') {
                return Err(config_error(format!("{key} must start with '/'")));
            }
        }

        if self.request_timeout.is_zero() {
            return Err(config_error("request timeout must be greater than zero"));
        }

        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> Error {
    Error::Config {
        message: message.into(),
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

/// Builder for `ClientConfig`.
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Sets the server base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Sets the component tree prefix.
    #[must_use]
    pub fn code_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.code_prefix = prefix.into();
        self
    }

    /// Sets the resource tree prefix.
    #[must_use]
    pub fn resource_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.resource_prefix = prefix.into();
        self
    }

    /// Sets the meta tree prefix.
    #[must_use]
    pub fn meta_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.meta_prefix = prefix.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(name.into(), value.into());
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
