//! Error types for Glu.
//!
//! Every failure of the metadata model and the invocation protocol is one
//! variant of [`Error`]. The variants keep "the server sent a broken
//! descriptor" apart from "the caller supplied a bad value", so callers can
//! tell configuration bugs from bad user input.
//!
//! # Examples
//!
//! ```
//! use glu_core::{Error, Result};
//!
//! fn require_name(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::MissingParameter {
//!             parameter: "name".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_name("").unwrap_err();
//! assert!(err.is_missing_parameter());
//! ```

use serde_json::Value;
use thiserror::Error;

/// Main error type for Glu.
///
/// All errors raised by the core and the client use this type. None of them
/// are recovered internally; they propagate to the immediate caller and leave
/// prior builder state untouched.
#[derive(Error, Debug)]
pub enum Error {
    /// Wire data violates the descriptor shape.
    ///
    /// Raised while parsing component, service, parameter or resource
    /// descriptors: a required key is missing, a type name is unknown, or the
    /// required/default pairing is inconsistent. Never raised during
    /// invocation.
    #[error("Malformed descriptor for '{element}': {reason}")]
    MalformedDescriptor {
        /// Name of the offending parameter, service, component or resource
        element: String,
        /// What is wrong with it
        reason: String,
    },

    /// A supplied value does not satisfy its parameter's declared type.
    ///
    /// Raised at `set()` time, before any call state is mutated.
    #[error("Invalid value for parameter '{parameter}': {reason}")]
    Validation {
        /// The parameter the value was meant for
        parameter: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A required parameter has no value at creation or invocation time.
    ///
    /// Raised before any network call is made.
    #[error("Required parameter '{parameter}' is missing")]
    MissingParameter {
        /// Name of the unset parameter
        parameter: String,
    },

    /// The requested HTTP method is inconsistent with the request.
    ///
    /// Raised when a body is set but the method is neither `POST` nor `PUT`,
    /// when no body is set and the method is not one of `GET`, `POST`, `PUT`,
    /// `DELETE`, or when a method name is not recognized at all.
    #[error("Protocol error: {reason}")]
    Protocol {
        /// Description of the inconsistency
        reason: String,
    },

    /// The server did not confirm a resource creation request.
    #[error("Resource could not be created: {reason}")]
    ResourceCreation {
        /// Why the creation response was not accepted
        reason: String,
    },

    /// The server answered with a status other than the expected one.
    ///
    /// Only raised where a specific status is expected (descriptor fetches,
    /// deletes). Service invocations return the raw result instead.
    #[error("Server returned status {status}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response payload, unconverted
        data: Value,
    },

    /// A named element does not exist.
    #[error("{kind} '{name}' not defined")]
    NotFound {
        /// Kind of element ("Service", "Parameter", ...)
        kind: &'static str,
        /// The name that was looked up
        name: String,
    },

    /// The transport failed to deliver a request.
    #[error("Request to '{uri}' failed")]
    Transport {
        /// URI of the failed request
        uri: String,
        /// Underlying error cause
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Serialization/deserialization error.
    ///
    /// Raised when JSON conversion of a request or response fails.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error.
    ///
    /// Raised when client configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },
}

impl Error {
    /// Creates a [`Error::MalformedDescriptor`].
    #[must_use]
    pub fn malformed(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDescriptor {
            element: element.into(),
            reason: reason.into(),
        }
    }

    /// Creates a [`Error::Validation`].
    #[must_use]
    pub fn validation(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates a [`Error::Protocol`].
    #[must_use]
    pub fn protocol(reason: impl Into<String>) -> Self {
        Self::Protocol {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a malformed descriptor error.
    ///
    /// # Examples
    ///
    /// ```
    /// use glu_core::Error;
    ///
    /// let err = Error::malformed("text", "missing key 'type'");
    /// assert!(err.is_malformed_descriptor());
    /// assert!(!err.is_validation_error());
    /// ```
    #[must_use]
    pub const fn is_malformed_descriptor(&self) -> bool {
        matches!(self, Self::MalformedDescriptor { .. })
    }

    /// Returns `true` if this is a value validation error.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns `true` if a required parameter was missing.
    #[must_use]
    pub const fn is_missing_parameter(&self) -> bool {
        matches!(self, Self::MissingParameter { .. })
    }

    /// Returns `true` if this is a protocol (HTTP method) error.
    ///
    /// # Examples
    ///
    /// ```
    /// use glu_core::Error;
    ///
    /// let err = Error::protocol("body requires POST or PUT");
    /// assert!(err.is_protocol_error());
    /// ```
    #[must_use]
    pub const fn is_protocol_error(&self) -> bool {
        matches!(self, Self::Protocol { .. })
    }

    /// Returns `true` if resource creation was not confirmed.
    #[must_use]
    pub const fn is_resource_creation_error(&self) -> bool {
        matches!(self, Self::ResourceCreation { .. })
    }

    /// Returns `true` if the server answered with an unexpected status.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Returns `true` if a named element was not found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if the transport failed.
    #[must_use]
    pub const fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Returns `true` if this is a bad command-line argument.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Result type alias for Glu operations.
///
/// # Examples
///
/// ```
/// use glu_core::{Error, Result};
///
/// fn positive(value: i64) -> Result<i64> {
///     if value < 0 {
///         return Err(Error::validation("value", "must be non-negative"));
///     }
///     Ok(value)
/// }
///
/// assert!(positive(5).is_ok());
/// assert!(positive(-1).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
