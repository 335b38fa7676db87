//! Component and resource descriptors.
//!
//! A [`ComponentDescriptor`] is the full published shape of a component: its
//! own (resource-creation-time) parameters, the two fixed creation parameters
//! `desc` and `suggested_name`, and its services. A [`ResourceDescriptor`] is
//! the shape of a live resource: a description, its URI and its bound
//! services.

use crate::parameter::{DESC_KEY, required_str};
use crate::service::{
    PARAMS_KEY, URI_KEY, parameters_to_value, parse_parameters, parse_services, required_map,
    services_to_value,
};
use crate::{Error, ParameterDefinition, Result, ServiceDefinition, Value};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use std::collections::BTreeMap;

/// Wire key holding the component name.
pub const NAME_KEY: &str = "name";
/// Wire key holding the documentation URI.
pub const DOC_KEY: &str = "doc";
/// Wire key holding the fixed resource-creation parameters.
pub const RCP_KEY: &str = "resource_creation_params";
/// Wire key holding the service map.
pub const SERVICES_KEY: &str = "services";
/// Name of the fixed resource description creation parameter.
pub const RCP_DESC_KEY: &str = "desc";
/// Name of the fixed suggested-name creation parameter.
pub const RCP_SUGGESTED_NAME_KEY: &str = "suggested_name";

/// The two fixed resource-creation parameters every component carries.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceCreationParams {
    /// Definition of the `desc` parameter.
    pub description: ParameterDefinition,
    /// Definition of the `suggested_name` parameter.
    pub suggested_name: ParameterDefinition,
}

impl ResourceCreationParams {
    /// The standard pair: both optional strings with empty defaults.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            description: ParameterDefinition::optional_string(
                RCP_DESC_KEY,
                "Description of the new resource",
                "",
            ),
            suggested_name: ParameterDefinition::optional_string(
                RCP_SUGGESTED_NAME_KEY,
                "Suggested name for the new resource",
                "",
            ),
        }
    }

    /// Looks a creation parameter up by its wire key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParameterDefinition> {
        match key {
            RCP_DESC_KEY => Some(&self.description),
            RCP_SUGGESTED_NAME_KEY => Some(&self.suggested_name),
            _ => None,
        }
    }

    fn parse(owner: &str, raw: &Value) -> Result<Self> {
        let map = raw
            .as_object()
            .ok_or_else(|| Error::malformed(owner, format!("'{RCP_KEY}' must be a map")))?;
        let get = |key: &str| {
            map.get(key)
                .ok_or_else(|| {
                    Error::malformed(owner, format!("creation parameter '{key}' missing"))
                })
                .and_then(|raw| ParameterDefinition::parse(key, raw))
        };
        Ok(Self {
            description: get(RCP_DESC_KEY)?,
            suggested_name: get(RCP_SUGGESTED_NAME_KEY)?,
        })
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(RCP_DESC_KEY.to_string(), self.description.to_value());
        map.insert(
            RCP_SUGGESTED_NAME_KEY.to_string(),
            self.suggested_name.to_value(),
        );
        Value::Object(map)
    }
}

/// The published shape of a component.
///
/// # Examples
///
/// ```
/// use glu_core::ComponentDescriptor;
/// use serde_json::json;
///
/// let raw = json!({
///     "name": "Combiner",
///     "desc": "Combines things",
///     "doc": "/meta/doc/Combiner",
///     "uri": "/code/Combiner",
///     "params": {},
///     "resource_creation_params": {
///         "desc": {"desc": "Description", "required": false, "type": "string", "default": ""},
///         "suggested_name": {"desc": "Name", "required": false, "type": "string", "default": ""}
///     },
///     "services": {}
/// });
///
/// let comp = ComponentDescriptor::parse(&raw).unwrap();
/// assert_eq!(comp.name(), "Combiner");
/// assert!(comp.resource_creation_param("suggested_name").is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDescriptor {
    name: String,
    description: String,
    doc_uri: String,
    uri: String,
    parameters: BTreeMap<String, ParameterDefinition>,
    creation_params: ResourceCreationParams,
    services: BTreeMap<String, ServiceDefinition>,
}

impl ComponentDescriptor {
    /// Assembles a descriptor from already-built parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDescriptor`] if two parameters share a name.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        doc_uri: impl Into<String>,
        uri: impl Into<String>,
        parameters: impl IntoIterator<Item = ParameterDefinition>,
        creation_params: ResourceCreationParams,
        services: impl IntoIterator<Item = ServiceDefinition>,
    ) -> Result<Self> {
        let name = name.into();
        let mut by_name = BTreeMap::new();
        for param in parameters {
            let pname = param.name().to_string();
            if by_name.insert(pname.clone(), param).is_some() {
                return Err(Error::malformed(
                    &name,
                    format!("parameter '{pname}' defined more than once"),
                ));
            }
        }
        let mut service_map = BTreeMap::new();
        for service in services {
            let sname = service.name().to_string();
            if service_map.insert(sname.clone(), service).is_some() {
                return Err(Error::malformed(
                    &name,
                    format!("service '{sname}' defined more than once"),
                ));
            }
        }
        Ok(Self {
            name,
            description: description.into(),
            doc_uri: doc_uri.into(),
            uri: uri.into(),
            parameters: by_name,
            creation_params,
            services: service_map,
        })
    }

    /// Parses a component descriptor from its wire map.
    ///
    /// Parsing is all-or-nothing: a malformed parameter or service anywhere
    /// in the map aborts the parse.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDescriptor`] if a required key is missing or
    /// any nested definition is malformed.
    pub fn parse(raw: &Value) -> Result<Self> {
        let map = raw
            .as_object()
            .ok_or_else(|| Error::malformed("<component>", "component descriptor is not a map"))?;
        let name = required_str("<component>", map, NAME_KEY)?;
        let description = required_str(name, map, DESC_KEY)?;
        let doc_uri = required_str(name, map, DOC_KEY)?;
        let uri = required_str(name, map, URI_KEY)?;
        let parameters = parse_parameters(name, required_map(name, map, PARAMS_KEY)?)?;
        let creation_params =
            ResourceCreationParams::parse(name, required_map(name, map, RCP_KEY)?)?;
        let services = parse_services(name, required_map(name, map, SERVICES_KEY)?)?;

        Self::new(
            name,
            description,
            doc_uri,
            uri,
            parameters,
            creation_params,
            services.into_values(),
        )
    }

    /// Returns the component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the URI of the long-form documentation.
    #[must_use]
    pub fn doc_uri(&self) -> &str {
        &self.doc_uri
    }

    /// Returns the component URI; resources are created by posting here.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Looks up one of the component's own parameters.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterDefinition> {
        self.parameters.get(name)
    }

    /// Returns the component's own parameters.
    #[must_use]
    pub const fn parameters(&self) -> &BTreeMap<String, ParameterDefinition> {
        &self.parameters
    }

    /// Returns the fixed resource-creation parameters.
    #[must_use]
    pub const fn resource_creation_params(&self) -> &ResourceCreationParams {
        &self.creation_params
    }

    /// Looks up a fixed creation parameter (`desc` or `suggested_name`).
    #[must_use]
    pub fn resource_creation_param(&self, key: &str) -> Option<&ParameterDefinition> {
        self.creation_params.get(key)
    }

    /// Looks up one service.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&ServiceDefinition> {
        self.services.get(name)
    }

    /// Returns all services, keyed by name.
    #[must_use]
    pub const fn services(&self) -> &BTreeMap<String, ServiceDefinition> {
        &self.services
    }

    /// Emits the wire map for this descriptor.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(NAME_KEY.to_string(), Value::from(self.name.as_str()));
        map.insert(DESC_KEY.to_string(), Value::from(self.description.as_str()));
        map.insert(DOC_KEY.to_string(), Value::from(self.doc_uri.as_str()));
        map.insert(URI_KEY.to_string(), Value::from(self.uri.as_str()));
        map.insert(PARAMS_KEY.to_string(), parameters_to_value(&self.parameters));
        map.insert(RCP_KEY.to_string(), self.creation_params.to_value());
        map.insert(SERVICES_KEY.to_string(), services_to_value(&self.services));
        Value::Object(map)
    }
}

/// The published shape of a live resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDescriptor {
    name: String,
    description: String,
    uri: String,
    services: BTreeMap<String, ServiceDefinition>,
}

impl ResourceDescriptor {
    /// Assembles a descriptor from already-built parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        uri: impl Into<String>,
        services: BTreeMap<String, ServiceDefinition>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            uri: uri.into(),
            services,
        }
    }

    /// Parses a resource descriptor.
    ///
    /// `name` is the name the resource was fetched under; a `name` key in the
    /// map, if present, takes precedence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDescriptor`] if `desc`, `uri` or `services`
    /// is missing, or any service is malformed.
    pub fn parse(name: &str, raw: &Value) -> Result<Self> {
        let map = raw
            .as_object()
            .ok_or_else(|| Error::malformed(name, "resource descriptor is not a map"))?;
        let name = map.get(NAME_KEY).and_then(Value::as_str).unwrap_or(name);
        let description = required_str(name, map, DESC_KEY)?;
        let uri = required_str(name, map, URI_KEY)?;
        let services = parse_services(name, required_map(name, map, SERVICES_KEY)?)?;
        Ok(Self::new(name, description, uri, services))
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the resource URI; services are reached below it.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the resource's services, keyed by name.
    #[must_use]
    pub const fn services(&self) -> &BTreeMap<String, ServiceDefinition> {
        &self.services
    }

    /// Emits the wire map for this descriptor.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(NAME_KEY.to_string(), Value::from(self.name.as_str()));
        map.insert(DESC_KEY.to_string(), Value::from(self.description.as_str()));
        map.insert(URI_KEY.to_string(), Value::from(self.uri.as_str()));
        map.insert(SERVICES_KEY.to_string(), services_to_value(&self.services));
        Value::Object(map)
    }
}

/// Directory entry returned by the component and resource listings.
///
/// The listings map each name to a short `{desc, uri}` record rather than the
/// full descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescUri {
    /// Short description.
    pub desc: String,
    /// Where the full descriptor lives.
    pub uri: String,
}

/// Parses a `name → {desc, uri}` listing.
///
/// # Errors
///
/// Returns [`Error::MalformedDescriptor`] if the listing is not a map of
/// `{desc, uri}` records.
pub fn parse_listing(raw: &Value) -> Result<BTreeMap<String, DescUri>> {
    let map = raw
        .as_object()
        .ok_or_else(|| Error::malformed("<listing>", "listing is not a map"))?;
    map.iter()
        .map(|(name, entry)| {
            let entry = entry
                .as_object()
                .ok_or_else(|| Error::malformed(name, "listing entry is not a map"))?;
            Ok((
                name.clone(),
                DescUri {
                    desc: required_str(name, entry, DESC_KEY)?.to_string(),
                    uri: required_str(name, entry, URI_KEY)?.to_string(),
                },
            ))
        })
        .collect()
}
