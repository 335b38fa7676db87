//! Service definitions.
//!
//! A service is one invocable operation. Components and resources publish
//! their services with the same per-service wire shape, so both use
//! [`parse_services`].

use crate::parameter::{DESC_KEY, required_key, required_str};
use crate::{Error, ParameterDefinition, Result, Value};
use serde_json::Map;
use std::collections::BTreeMap;
use std::fmt;

/// Wire key holding a service's URI.
pub const URI_KEY: &str = "uri";
/// Wire key holding a parameter map.
pub const PARAMS_KEY: &str = "params";
/// Wire key holding the ordered positional parameter names.
pub const POSITIONAL_PARAMS_KEY: &str = "positional_params";

/// Describes a server-exposed method.
///
/// Invariant: every positional name is a key of the parameter map, and no
/// name appears twice in the positional list.
///
/// # Examples
///
/// ```
/// use glu_core::ServiceDefinition;
/// use serde_json::json;
///
/// let raw = json!({
///     "desc": "Combine things",
///     "uri": "/code/Combiner/foobar",
///     "params": {
///         "text": {"desc": "Some text", "required": true, "type": "string"},
///         "num": {"desc": "A number", "required": false, "type": "number", "default": 10}
///     },
///     "positional_params": ["num"]
/// });
///
/// let svc = ServiceDefinition::parse("foobar", &raw).unwrap();
/// assert_eq!(svc.positional_param_names(), ["num"]);
/// assert!(svc.parameter("text").unwrap().is_required());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDefinition {
    name: String,
    description: String,
    uri: String,
    parameters: BTreeMap<String, ParameterDefinition>,
    positional: Vec<String>,
}

impl ServiceDefinition {
    /// Creates a service definition from already-built parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDescriptor`] if two parameters share a name,
    /// or a positional name is unknown or repeated.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        uri: impl Into<String>,
        parameters: impl IntoIterator<Item = ParameterDefinition>,
        positional: impl IntoIterator<Item = String>,
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

        let positional: Vec<String> = positional.into_iter().collect();
        for (i, pos) in positional.iter().enumerate() {
            if !by_name.contains_key(pos) {
                return Err(Error::malformed(
                    &name,
                    format!("positional parameter '{pos}' is not a defined parameter"),
                ));
            }
            if positional[..i].contains(pos) {
                return Err(Error::malformed(
                    &name,
                    format!("positional parameter '{pos}' listed more than once"),
                ));
            }
        }

        Ok(Self {
            name,
            description: description.into(),
            uri: uri.into(),
            parameters: by_name,
            positional,
        })
    }

    /// Parses a service definition from its wire map.
    ///
    /// `params` and `positional_params` are optional; when absent the service
    /// has no parameters and an empty positional list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDescriptor`] if `desc` or `uri` is missing,
    /// or if any parameter definition is malformed. A failure in one
    /// parameter aborts the whole parse.
    pub fn parse(name: &str, raw: &Value) -> Result<Self> {
        let map = raw
            .as_object()
            .ok_or_else(|| Error::malformed(name, "service definition is not a map"))?;

        let description = required_str(name, map, DESC_KEY)?;
        let uri = required_str(name, map, URI_KEY)?;
        let parameters = match map.get(PARAMS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(params) => parse_parameters(name, params)?,
        };
        let positional = match map.get(POSITIONAL_PARAMS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        Error::malformed(name, "positional parameter names must be strings")
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(Error::malformed(
                    name,
                    format!("'{POSITIONAL_PARAMS_KEY}' must be a list"),
                ));
            }
        };

        Self::new(name, description, uri, parameters, positional)
    }

    /// Returns the service name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the URI at which the service is described.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Looks up one parameter definition.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterDefinition> {
        self.parameters.get(name)
    }

    /// Returns all parameter definitions, keyed by name.
    #[must_use]
    pub const fn parameters(&self) -> &BTreeMap<String, ParameterDefinition> {
        &self.parameters
    }

    /// Returns the positional parameter names in call order.
    #[must_use]
    pub fn positional_param_names(&self) -> &[String] {
        &self.positional
    }

    /// Returns `true` if the named parameter is positional.
    #[must_use]
    pub fn is_positional(&self, name: &str) -> bool {
        self.positional.iter().any(|p| p == name)
    }

    /// Emits the wire map for this definition.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(DESC_KEY.to_string(), Value::from(self.description.as_str()));
        map.insert(URI_KEY.to_string(), Value::from(self.uri.as_str()));
        if !self.parameters.is_empty() {
            map.insert(PARAMS_KEY.to_string(), parameters_to_value(&self.parameters));
        }
        if !self.positional.is_empty() {
            map.insert(
                POSITIONAL_PARAMS_KEY.to_string(),
                Value::from(self.positional.clone()),
            );
        }
        Value::Object(map)
    }
}

impl fmt::Display for ServiceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Service: {}", self.name)?;
        writeln!(f, "    Description:           {}", self.description)?;
        writeln!(f, "    Positional parameters: {:?}", self.positional)?;
        write!(f, "    Parameters:")?;
        for param in self.parameters.values() {
            write!(f, "\n        {param}")?;
        }
        Ok(())
    }
}

/// Parses a `name → ParamDef` map.
///
/// # Errors
///
/// Returns [`Error::MalformedDescriptor`] if `raw` is not a map or any entry
/// is malformed.
pub fn parse_parameters(owner: &str, raw: &Value) -> Result<Vec<ParameterDefinition>> {
    let map = raw
        .as_object()
        .ok_or_else(|| Error::malformed(owner, format!("'{PARAMS_KEY}' must be a map")))?;
    map.iter()
        .map(|(pname, pdef)| ParameterDefinition::parse(pname, pdef))
        .collect()
}

/// Parses a `name → ServiceDef` map.
///
/// # Errors
///
/// Returns [`Error::MalformedDescriptor`] if `raw` is not a map or any
/// service is malformed.
pub fn parse_services(owner: &str, raw: &Value) -> Result<BTreeMap<String, ServiceDefinition>> {
    let map = raw
        .as_object()
        .ok_or_else(|| Error::malformed(owner, "'services' must be a map"))?;
    map.iter()
        .map(|(sname, sdef)| Ok((sname.clone(), ServiceDefinition::parse(sname, sdef)?)))
        .collect()
}

/// Emits a `name → ParamDef` wire map.
#[must_use]
pub fn parameters_to_value(params: &BTreeMap<String, ParameterDefinition>) -> Value {
    Value::Object(
        params
            .iter()
            .map(|(name, p)| (name.clone(), p.to_value()))
            .collect(),
    )
}

/// Emits a `name → ServiceDef` wire map.
#[must_use]
pub fn services_to_value(services: &BTreeMap<String, ServiceDefinition>) -> Value {
    Value::Object(
        services
            .iter()
            .map(|(name, s)| (name.clone(), s.to_value()))
            .collect(),
    )
}

/// Looks up a mandatory map-valued key.
pub(crate) fn required_map<'a>(
    element: &str,
    map: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a Value> {
    let value = required_key(element, map, key)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(Error::malformed(
            element,
            format!("value of key '{key}' must be a map"),
        ))
    }
}
