//! HTTP vocabulary shared by the client and its transports.
//!
//! The core performs no I/O. It only describes requests ([`HttpRequest`]),
//! results ([`HttpResult`]) and decides which method a service call uses
//! ([`infer_method`]).

use crate::{Error, Result, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

/// HTTP request methods known to the protocol.
///
/// `OPTIONS` and `HEAD` are recognized so that they can be named, but
/// [`infer_method`] rejects them for service calls.
///
/// # Examples
///
/// ```
/// use glu_core::HttpMethod;
///
/// let m: HttpMethod = "post".parse().unwrap();
/// assert_eq!(m, HttpMethod::Post);
/// assert!("PATCH".parse::<HttpMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `PUT`
    Put,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
    /// `OPTIONS`
    Options,
    /// `HEAD`
    Head,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "PUT" => Ok(Self::Put),
            "POST" => Ok(Self::Post),
            "DELETE" => Ok(Self::Delete),
            "OPTIONS" => Ok(Self::Options),
            "HEAD" => Ok(Self::Head),
            _ => Err(Error::protocol(format!("unknown request method '{s}'"))),
        }
    }
}

/// Status codes the protocol distinguishes.
#[derive(Debug, Clone, Copy)]
pub struct HttpStatus;

impl HttpStatus {
    /// 200 OK
    pub const OK: u16 = 200;
    /// 201 Created, with a `Location` header
    pub const CREATED: u16 = 201;
    /// 204 No Content
    pub const NO_CONTENT: u16 = 204;
    /// 307 Temporary Redirect, with a `Location` header
    pub const TEMPORARY_REDIRECT: u16 = 307;
    /// 400 Bad Request
    pub const BAD_REQUEST: u16 = 400;
    /// 404 Not Found
    pub const NOT_FOUND: u16 = 404;
    /// 405 Method Not Allowed
    pub const METHOD_NOT_ALLOWED: u16 = 405;
    /// 500 Internal Server Error
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// Decides the HTTP method for a service call.
///
/// | requested | body set | result |
/// |-----------|----------|--------|
/// | none      | yes      | `POST` |
/// | none      | no       | `GET`  |
/// | `POST`/`PUT` | yes   | as requested |
/// | other     | yes      | error  |
/// | `GET`/`POST`/`PUT`/`DELETE` | no | as requested |
/// | other     | no       | error  |
///
/// # Errors
///
/// Returns [`Error::Protocol`] when the requested method is inconsistent with
/// whether a body is set.
///
/// # Examples
///
/// ```
/// use glu_core::{HttpMethod, infer_method};
///
/// assert_eq!(infer_method(None, false).unwrap(), HttpMethod::Get);
/// assert_eq!(infer_method(None, true).unwrap(), HttpMethod::Post);
/// assert!(infer_method(Some(HttpMethod::Get), true).is_err());
/// ```
pub fn infer_method(requested: Option<HttpMethod>, has_body: bool) -> Result<HttpMethod> {
    match (requested, has_body) {
        (None, true) => Ok(HttpMethod::Post),
        (None, false) => Ok(HttpMethod::Get),
        (Some(m @ (HttpMethod::Post | HttpMethod::Put)), true) => Ok(m),
        (Some(m), true) => Err(Error::protocol(format!(
            "body requires POST or PUT, not {m}"
        ))),
        (
            Some(m @ (HttpMethod::Get | HttpMethod::Post | HttpMethod::Put | HttpMethod::Delete)),
            false,
        ) => Ok(m),
        (Some(m), false) => Err(Error::protocol(format!(
            "request method {m} is not allowed for service access"
        ))),
    }
}

/// A request handed to a [`Transport`](crate::traits::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Absolute URL or server-relative path.
    pub uri: String,
    /// Request body, if any.
    pub body: Option<String>,
    /// Request method.
    pub method: HttpMethod,
    /// If set, any other response status is an [`Error::Server`].
    pub expected_status: Option<u16>,
    /// Extra request headers.
    pub headers: BTreeMap<String, String>,
}

impl HttpRequest {
    /// Creates a request with no body, headers or status expectation.
    #[must_use]
    pub fn new(method: HttpMethod, uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            body: None,
            method,
            expected_status: None,
            headers: BTreeMap::new(),
        }
    }

    /// Shorthand for a `GET` request.
    #[must_use]
    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, uri)
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the request body to the JSON serialization of `value`.
    #[must_use]
    pub fn with_json(self, value: &Value) -> Self {
        self.with_body(value.to_string())
    }

    /// Requires a specific response status.
    #[must_use]
    pub const fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = Some(status);
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Percent-encodes text for use as one path segment.
///
/// The form encoder escapes everything but `[A-Za-z0-9*-._]` and turns
/// spaces into `+`, which in a path must be `%20` instead.
///
/// # Examples
///
/// ```
/// use glu_core::encode_path_segment;
///
/// assert_eq!(encode_path_segment("my resource"), "my%20resource");
/// assert_eq!(encode_path_segment("a/b?c"), "a%2Fb%3Fc");
/// ```
#[must_use]
pub fn encode_path_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// The outcome of a request: status code and payload, unconverted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResult {
    /// HTTP status code.
    pub status: u16,
    /// Response payload: parsed JSON, a plain string, or `Null` when empty.
    pub data: Value,
    /// Response headers that matter to the protocol (e.g. `Location`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl HttpResult {
    /// Creates a result without headers.
    #[must_use]
    pub fn new(status: u16, data: Value) -> Self {
        Self {
            status,
            data,
            headers: BTreeMap::new(),
        }
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Enforces a status expectation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Server`] carrying this result's status and payload if
    /// `expected` is set and differs from the actual status.
    pub fn check_expected(self, expected: Option<u16>) -> Result<Self> {
        match expected {
            Some(want) if want != self.status => Err(Error::Server {
                status: self.status,
                data: self.data,
            }),
            _ => Ok(self),
        }
    }

    /// Returns the `Location` header, if the server sent one.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("location"))
            .map(|(_, value)| value.as_str())
    }
}
