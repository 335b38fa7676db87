//! Invoking a resource's services.
//!
//! Positional parameters become path segments, in declared order, right
//! after `<resource>/<service>`. All other parameters go in the query string,
//! sorted by name. A service with `text` and a positional `num`:
//!
//! | set                  | request URI                           |
//! |----------------------|---------------------------------------|
//! | `text=hi`            | `/resource/r1/foobar?text=hi`         |
//! | `text=hi`, `num=3`   | `/resource/r1/foobar/3?text=hi`       |
//!
//! Unset trailing positionals are omitted. An unset optional positional that
//! precedes a set one is filled with its default.
//!
//! A path segment is never empty. Once a positional's value (set or
//! defaulted) is the empty string, the path stops there: that positional,
//! if it was set, and every set positional after it go in the query string
//! instead. With positionals `a` (default `""`) and `b`:
//!
//! | set           | request URI              |
//! |---------------|--------------------------|
//! | `b=7`         | `/resource/r1/svc?b=7`   |
//! | `a=""`        | `/resource/r1/svc?a=`    |
//! | `a=x`, `b=7`  | `/resource/r1/svc/x/7`   |

use crate::server::Session;
use glu_core::value::to_param_string;
use glu_core::{
    Error, HttpMethod, HttpRequest, HttpResult, ParameterDefinition, Result, ServiceDefinition,
    Value, encode_path_segment, infer_method,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use url::form_urlencoded;

/// A resource service, ready to be called.
///
/// Obtained from [`Resource::service`](crate::Resource::service). Each
/// instance collects its own parameter values and is meant to be filled and
/// called by a single caller; get a fresh one for an unrelated call.
#[derive(Debug, Clone)]
pub struct AccessibleService {
    definition: ServiceDefinition,
    resource_uri: String,
    session: Arc<Session>,
    values: BTreeMap<String, String>,
    input: Option<String>,
}

impl AccessibleService {
    pub(crate) fn new(
        definition: ServiceDefinition,
        resource_uri: impl Into<String>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            definition,
            resource_uri: resource_uri.into(),
            session,
            values: BTreeMap::new(),
            input: None,
        }
    }

    /// Returns the service definition.
    #[must_use]
    pub const fn definition(&self) -> &ServiceDefinition {
        &self.definition
    }

    /// Returns the service name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// Returns the string forms of the values set so far.
    #[must_use]
    pub const fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Returns the request body, if one was set.
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// Sets a parameter value.
    ///
    /// The value is validated against the parameter's type and its string
    /// form is stored for URI assembly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown parameter and
    /// [`Error::Validation`] for a value that does not fit; nothing is stored.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self> {
        let rendered = self.render(name, &value.into())?;
        self.values.insert(name.to_string(), rendered);
        Ok(self)
    }

    /// Sets several parameter values at once.
    ///
    /// # Errors
    ///
    /// Fails like [`set`](Self::set) on the first bad entry; nothing is
    /// stored unless every entry is valid.
    pub fn set_params<K, V, I>(&mut self, params: I) -> Result<&mut Self>
    where
        K: AsRef<str>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let staged = params
            .into_iter()
            .map(|(name, value)| {
                let name = name.as_ref();
                Ok((name.to_string(), self.render(name, &value.into())?))
            })
            .collect::<Result<Vec<_>>>()?;
        self.values.extend(staged);
        Ok(self)
    }

    /// Sets the request body.
    ///
    /// A body makes the call default to `POST`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] if a body was already set.
    pub fn set_input(&mut self, body: impl Into<String>) -> Result<&mut Self> {
        if self.input.is_some() {
            return Err(Error::protocol(format!(
                "input for service '{}' was already set",
                self.name()
            )));
        }
        self.input = Some(body.into());
        Ok(self)
    }

    /// Assembles the request URI from the values set so far.
    #[must_use]
    pub fn request_uri(&self) -> String {
        let mut uri = format!("{}/{}", self.resource_uri, self.name());

        let positional = self.definition.positional_param_names();
        let last_set = positional
            .iter()
            .rposition(|name| self.values.contains_key(name));
        let mut in_path = 0;
        if let Some(last) = last_set {
            for name in &positional[..=last] {
                let segment = self.values.get(name).cloned().unwrap_or_else(|| {
                    self.definition
                        .parameter(name)
                        .and_then(ParameterDefinition::default_value)
                        .map(to_param_string)
                        .unwrap_or_default()
                });
                if segment.is_empty() {
                    break;
                }
                uri.push('/');
                uri.push_str(&encode_path_segment(&segment));
                in_path += 1;
            }
        }
        let path_names = &positional[..in_path];

        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut has_query = false;
        for (name, value) in &self.values {
            if !path_names.contains(name) {
                query.append_pair(name, value);
                has_query = true;
            }
        }
        if has_query {
            uri.push('?');
            uri.push_str(&query.finish());
        }
        uri
    }

    /// Calls the service.
    ///
    /// Without an explicit `method` the call is a `GET`, or a `POST` when a
    /// body is set. The server's answer is returned as-is, whatever its
    /// status.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingParameter`] if a required parameter has no value;
    ///   no request is sent in that case
    /// - [`Error::Protocol`] if `method` does not fit the body
    /// - [`Error::Transport`] if the request cannot be delivered
    pub async fn access(&self, method: Option<HttpMethod>) -> Result<HttpResult> {
        if let Some(missing) = self
            .definition
            .parameters()
            .values()
            .find(|p| p.is_required() && !self.values.contains_key(p.name()))
        {
            return Err(Error::MissingParameter {
                parameter: missing.name().to_string(),
            });
        }

        let method = infer_method(method, self.input.is_some())?;
        let mut request = HttpRequest::new(method, self.request_uri());
        if let Some(body) = &self.input {
            request = request.with_body(body.clone());
        }

        tracing::info!("Accessing service '{}' via {}", self.name(), method);
        self.session.send(request).await
    }

    fn render(&self, name: &str, value: &Value) -> Result<String> {
        let param = self
            .definition
            .parameter(name)
            .ok_or_else(|| Error::NotFound {
                kind: "Parameter",
                name: name.to_string(),
            })?;
        Ok(to_param_string(&param.validate(value)?))
    }
}
