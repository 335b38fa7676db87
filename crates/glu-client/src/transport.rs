//! HTTP transport backed by reqwest.

use async_trait::async_trait;
use glu_core::traits::Transport;
use glu_core::{ClientConfig, Error, HttpMethod, HttpRequest, HttpResult, Result, Value};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::collections::BTreeMap;
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Sends requests to a Glu server over HTTP.
///
/// Server-relative URIs (`/code/Combiner`) are resolved against the
/// configured base URL; absolute URIs are used as they are. Response bodies
/// are parsed as JSON, falling back to a plain string; an empty body is
/// `Null`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    default_headers: BTreeMap<String, String>,
}

impl HttpTransport {
    /// Creates a transport for the server described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url).map_err(|e| Error::Config {
            message: format!("invalid base URL '{}': {e}", config.base_url),
        })?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url,
            default_headers: config.default_headers.clone(),
        })
    }

    /// Resolves a URI against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] if the URI cannot be resolved.
    pub fn resolve(&self, uri: &str) -> Result<Url> {
        self.base_url
            .join(uri)
            .map_err(|e| Error::protocol(format!("cannot resolve '{uri}': {e}")))
    }
}

const fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Options => reqwest::Method::OPTIONS,
        HttpMethod::Head => reqwest::Method::HEAD,
    }
}

/// Interprets a response body: JSON if it parses, else the raw text.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResult> {
        let url = self.resolve(&request.uri)?;
        let transport_error = |e: reqwest::Error| Error::Transport {
            uri: request.uri.clone(),
            source: Box::new(e),
        };

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), url)
            .header(ACCEPT, JSON_CONTENT_TYPE);
        for (name, value) in self.default_headers.iter().chain(&request.headers) {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body.clone());
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let text = response.text().await.map_err(transport_error)?;

        HttpResult {
            status,
            data: parse_body(&text),
            headers,
        }
        .check_expected(request.expected_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_relative_and_absolute() {
        let transport = HttpTransport::new(&ClientConfig::new("http://localhost:8001")).unwrap();
        assert_eq!(
            transport.resolve("/code/Combiner").unwrap().as_str(),
            "http://localhost:8001/code/Combiner"
        );
        assert_eq!(
            transport
                .resolve("/resource/r1/foobar?text=hi")
                .unwrap()
                .as_str(),
            "http://localhost:8001/resource/r1/foobar?text=hi"
        );
        assert_eq!(
            transport.resolve("http://other:9/x").unwrap().as_str(),
            "http://other:9/x"
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = HttpTransport::new(&ClientConfig::new("ftp://nowhere")).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("  \n"), Value::Null);
        assert_eq!(parse_body(r#"{"a": 1}"#), json!({"a": 1}));
        assert_eq!(parse_body("42"), json!(42));
        assert_eq!(parse_body("plain text"), json!("plain text"));
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(to_reqwest_method(HttpMethod::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest_method(HttpMethod::Delete), reqwest::Method::DELETE);
    }
}
