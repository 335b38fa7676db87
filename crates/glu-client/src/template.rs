//! Two-phase resource creation.

use crate::Resource;
use crate::server::Session;
use glu_core::component::{RCP_DESC_KEY, RCP_SUGGESTED_NAME_KEY};
use glu_core::{
    ComponentDescriptor, Error, HttpMethod, HttpRequest, ParameterDefinition, Result, Value,
};
use serde_json::{Map, json};
use std::collections::BTreeMap;
use std::sync::Arc;

const STATUS_KEY: &str = "status";
const CREATED_STATUS: &str = "created";
const NAME_KEY: &str = "name";

/// Collects parameter values for a new resource, then creates it.
///
/// Values are validated as they are set; [`create_resource`] only checks
/// that every required parameter has one. A template is meant to be filled
/// and used by a single caller.
///
/// [`create_resource`]: Self::create_resource
#[derive(Debug)]
pub struct ResourceTemplate {
    component: Arc<ComponentDescriptor>,
    session: Arc<Session>,
    param_values: BTreeMap<String, Value>,
    creation_values: BTreeMap<String, Value>,
}

impl ResourceTemplate {
    pub(crate) const fn new(component: Arc<ComponentDescriptor>, session: Arc<Session>) -> Self {
        Self {
            component,
            session,
            param_values: BTreeMap::new(),
            creation_values: BTreeMap::new(),
        }
    }

    /// Returns the component's parameters.
    #[must_use]
    pub fn parameters(&self) -> &BTreeMap<String, ParameterDefinition> {
        self.component.parameters()
    }

    /// Looks up one of the component's parameters.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterDefinition> {
        self.component.parameter(name)
    }

    /// Definition of the resource description creation parameter.
    #[must_use]
    pub fn description_param(&self) -> &ParameterDefinition {
        &self.component.resource_creation_params().description
    }

    /// Definition of the suggested-name creation parameter.
    #[must_use]
    pub fn suggested_name_param(&self) -> &ParameterDefinition {
        &self.component.resource_creation_params().suggested_name
    }

    /// Returns the values set so far, coerced to their declared types.
    #[must_use]
    pub const fn values(&self) -> &BTreeMap<String, Value> {
        &self.param_values
    }

    /// Sets a parameter value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown parameter and
    /// [`Error::Validation`] if the value does not fit the parameter's type.
    /// In both cases nothing is stored.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self> {
        let coerced = self.coerce(name, &value.into())?;
        self.param_values.insert(name.to_string(), coerced);
        Ok(self)
    }

    /// Sets several parameter values at once.
    ///
    /// # Errors
    ///
    /// Fails like [`set`](Self::set) on the first bad entry; no value from
    /// `params` is stored unless all of them are valid.
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
                Ok((name.to_string(), self.coerce(name, &value.into())?))
            })
            .collect::<Result<Vec<_>>>()?;
        self.param_values.extend(staged);
        Ok(self)
    }

    /// Sets the description of the new resource.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.creation_values
            .insert(RCP_DESC_KEY.to_string(), Value::String(description.into()));
        self
    }

    /// Suggests a name for the new resource. The server may choose another.
    pub fn set_suggested_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.creation_values
            .insert(RCP_SUGGESTED_NAME_KEY.to_string(), Value::String(name.into()));
        self
    }

    /// Creates the resource on the server and returns a proxy for it.
    ///
    /// The values are POSTed to the component URI. The server must answer
    /// with `status: "created"` and the chosen `name`; the resource is then
    /// fetched fresh from its canonical path.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingParameter`] if a required parameter has no value;
    ///   no request is sent in that case
    /// - [`Error::ResourceCreation`] if the server does not confirm creation
    /// - any error from fetching the new resource
    pub async fn create_resource(&self) -> Result<Resource> {
        if let Some(missing) = self
            .component
            .parameters()
            .values()
            .find(|p| p.is_required() && !self.param_values.contains_key(p.name()))
        {
            return Err(Error::MissingParameter {
                parameter: missing.name().to_string(),
            });
        }

        let body = json!({
            "params": Map::from_iter(self.param_values.clone()),
            "resource_creation_params": Map::from_iter(self.creation_values.clone()),
        });
        tracing::info!("Creating resource from component '{}'", self.component.name());
        let result = self
            .session
            .send(HttpRequest::new(HttpMethod::Post, self.component.uri()).with_json(&body))
            .await?;

        let name = confirmed_name(&result.data)?;
        tracing::info!("Resource '{}' created", name);
        self.session.fetch_resource(name).await
    }

    fn coerce(&self, name: &str, value: &Value) -> Result<Value> {
        self.component
            .parameter(name)
            .ok_or_else(|| Error::NotFound {
                kind: "Parameter",
                name: name.to_string(),
            })?
            .validate(value)
    }
}

fn confirmed_name(data: &Value) -> Result<&str> {
    match data.get(STATUS_KEY).and_then(Value::as_str) {
        Some(CREATED_STATUS) => {}
        Some(other) => {
            return Err(Error::ResourceCreation {
                reason: format!("server reported status '{other}'"),
            });
        }
        None => {
            return Err(Error::ResourceCreation {
                reason: "response carries no status".to_string(),
            });
        }
    }
    data.get(NAME_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::ResourceCreation {
            reason: "response does not name the new resource".to_string(),
        })
}
