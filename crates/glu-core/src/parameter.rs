//! Parameter definitions and value coercion.
//!
//! A [`ParameterDefinition`] describes one scalar parameter of a component or
//! service: its [`ParameterType`], whether it is required, its description,
//! and (for optional parameters only) a default value. Definitions are
//! parsed from the wire map the server publishes and are immutable afterwards.
//!
//! Two kinds of checks live here and are kept apart:
//!
//! - **shape** checks, run by [`ParameterDefinition::parse`], reject broken
//!   descriptors with [`Error::MalformedDescriptor`];
//! - **value** checks, run by [`ParameterDefinition::validate`], reject bad
//!   caller input with [`Error::Validation`].
//!
//! # Examples
//!
//! ```
//! use glu_core::{ParameterDefinition, ParameterType};
//! use serde_json::json;
//!
//! let raw = json!({"desc": "Count", "required": false, "type": "number", "default": 10});
//! let param = ParameterDefinition::parse("num", &raw).unwrap();
//!
//! assert_eq!(param.param_type(), ParameterType::Number);
//! assert_eq!(param.validate(&json!("42")).unwrap(), json!(42));
//! assert!(param.validate(&json!("abc")).is_err());
//! ```

use crate::value::{Value, kind_name};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number};
use std::fmt;
use std::str::FromStr;

/// Wire key holding the parameter description.
pub const DESC_KEY: &str = "desc";
/// Wire key holding the required flag.
pub const REQUIRED_KEY: &str = "required";
/// Wire key holding the type name.
pub const TYPE_KEY: &str = "type";
/// Wire key holding the default value.
pub const DEFAULT_KEY: &str = "default";

/// Strings accepted as `true` by boolean coercion (compared lowercase).
pub const TRUTHY_STRINGS: [&str; 5] = ["y", "yes", "t", "true", "1"];

/// Type names reserved by the protocol but not supported by this library.
const RESERVED_TYPES: [&str; 2] = ["date", "time"];

/// The closed set of parameter types.
///
/// # Examples
///
/// ```
/// use glu_core::ParameterType;
///
/// let t: ParameterType = "boolean".parse().unwrap();
/// assert_eq!(t, ParameterType::Boolean);
/// assert_eq!(t.as_str(), "boolean");
/// assert!("date".parse::<ParameterType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    /// Free-form text.
    String,
    /// Text that should not be echoed back to users.
    Password,
    /// Truth value; strings are coerced leniently.
    Boolean,
    /// Decimal number; strings are parsed.
    Number,
    /// Text holding a URI.
    Uri,
}

impl ParameterType {
    /// All supported types, in wire order.
    pub const ALL: [Self; 5] = [
        Self::String,
        Self::Password,
        Self::Boolean,
        Self::Number,
        Self::Uri,
    ];

    /// Returns the wire name of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Password => "password",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Uri => "uri",
        }
    }

    /// Coerces a candidate value according to this type's rule.
    ///
    /// - `string`, `password`, `uri`: the value must already be a string.
    /// - `boolean`: booleans pass through; strings are `true` when they match
    ///   one of [`TRUTHY_STRINGS`] case-insensitively and `false` otherwise.
    /// - `number`: numbers pass through; strings are parsed as decimals.
    ///
    /// # Errors
    ///
    /// Returns the reason the value was rejected. Callers attach the
    /// parameter name.
    pub fn coerce(&self, value: &Value) -> std::result::Result<Value, String> {
        match (self, value) {
            (Self::String | Self::Password | Self::Uri, Value::String(_))
            | (Self::Boolean, Value::Bool(_))
            | (Self::Number, Value::Number(_)) => Ok(value.clone()),
            (Self::Boolean, Value::String(s)) => Ok(Value::Bool(is_truthy(s))),
            (Self::Number, Value::String(s)) => parse_decimal(s)
                .map(Value::Number)
                .ok_or_else(|| format!("'{s}' is not a decimal number")),
            _ => Err(format!(
                "type mismatch: expected {}, got {}",
                self.as_str(),
                kind_name(value)
            )),
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "password" => Ok(Self::Password),
            "boolean" => Ok(Self::Boolean),
            "number" => Ok(Self::Number),
            "uri" => Ok(Self::Uri),
            other if RESERVED_TYPES.contains(&other) => Err(format!(
                "type '{other}' is reserved but not supported by this client library"
            )),
            other => Err(format!("unknown type '{other}'")),
        }
    }
}

fn is_truthy(s: &str) -> bool {
    let lower = s.to_lowercase();
    TRUTHY_STRINGS.contains(&lower.as_str())
}

/// Parses a decimal string into a JSON number.
///
/// Integers keep their integer representation so `"10"` compares equal to
/// `10`. Non-finite results (`"inf"`, `"NaN"`) are rejected.
fn parse_decimal(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(i.into());
    }
    if let Ok(u) = s.parse::<u64>() {
        return Some(u.into());
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
}

/// Describes one scalar parameter.
///
/// Invariant: `default` is present if and only if `required` is `false`, and
/// a present default already satisfies the type's coercion rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDefinition {
    name: String,
    param_type: ParameterType,
    required: bool,
    description: String,
    default: Option<Value>,
}

impl ParameterDefinition {
    /// Creates a required parameter definition.
    ///
    /// # Examples
    ///
    /// ```
    /// use glu_core::{ParameterDefinition, ParameterType};
    ///
    /// let p = ParameterDefinition::required("text", ParameterType::String, "Some text");
    /// assert!(p.is_required());
    /// assert!(p.default_value().is_none());
    /// ```
    #[must_use]
    pub fn required(
        name: impl Into<String>,
        param_type: ParameterType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: true,
            description: description.into(),
            default: None,
        }
    }

    /// Creates an optional parameter definition with a default value.
    ///
    /// The default is coerced by the parameter's type rule and stored in its
    /// coerced form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDescriptor`] if the default does not satisfy
    /// the type.
    ///
    /// # Examples
    ///
    /// ```
    /// use glu_core::{ParameterDefinition, ParameterType};
    /// use serde_json::json;
    ///
    /// let p = ParameterDefinition::optional("num", ParameterType::Number, "A number", "10").unwrap();
    /// assert_eq!(p.default_value(), Some(&json!(10)));
    ///
    /// assert!(ParameterDefinition::optional("num", ParameterType::Number, "", "ten").is_err());
    /// ```
    pub fn optional(
        name: impl Into<String>,
        param_type: ParameterType,
        description: impl Into<String>,
        default: impl Into<Value>,
    ) -> Result<Self> {
        let name = name.into();
        let default = param_type
            .coerce(&default.into())
            .map_err(|reason| Error::malformed(&name, format!("invalid default value: {reason}")))?;
        Ok(Self {
            name,
            param_type,
            required: false,
            description: description.into(),
            default: Some(default),
        })
    }

    /// Creates an optional string parameter.
    ///
    /// Infallible because a string default always satisfies the `string`
    /// type.
    #[must_use]
    pub fn optional_string(
        name: impl Into<String>,
        description: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: ParameterType::String,
            required: false,
            description: description.into(),
            default: Some(Value::String(default.into())),
        }
    }

    /// Parses a parameter definition from its wire map.
    ///
    /// The map needs the keys `desc`, `required` and `type`. A `default` must
    /// be present when `required` is false and absent when it is true. The
    /// `required` flag may be sent as a boolean or as a boolean-like string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDescriptor`] naming this parameter if any of
    /// the shape rules is violated.
    pub fn parse(name: &str, raw: &Value) -> Result<Self> {
        let map = raw
            .as_object()
            .ok_or_else(|| Error::malformed(name, "parameter definition is not a map"))?;

        let description = required_str(name, map, DESC_KEY)?;
        let required = match required_key(name, map, REQUIRED_KEY)? {
            Value::Bool(b) => *b,
            Value::String(s) => is_truthy(s),
            other => {
                return Err(Error::malformed(
                    name,
                    format!("'{REQUIRED_KEY}' must be a boolean, got {}", kind_name(other)),
                ));
            }
        };
        let param_type: ParameterType = required_str(name, map, TYPE_KEY)?
            .parse()
            .map_err(|reason: String| Error::malformed(name, reason))?;

        let default = map.get(DEFAULT_KEY).filter(|v| !v.is_null());
        match (required, default) {
            (true, None) => Ok(Self::required(name, param_type, description)),
            (true, Some(_)) => Err(Error::malformed(
                name,
                "required parameter must not specify a default value",
            )),
            (false, None) => Err(Error::malformed(
                name,
                "no default value specified for optional parameter",
            )),
            (false, Some(default)) => {
                Self::optional(name, param_type, description, default.clone())
            }
        }
    }

    /// Validates and coerces a candidate value for this parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming this parameter if the value does
    /// not satisfy the type's coercion rule.
    pub fn validate(&self, value: &Value) -> Result<Value> {
        self.param_type
            .coerce(value)
            .map_err(|reason| Error::validation(&self.name, reason))
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameter type.
    #[must_use]
    pub const fn param_type(&self) -> ParameterType {
        self.param_type
    }

    /// Returns whether a value must be supplied.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the default value; `None` for required parameters.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Emits the wire map for this definition.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(DESC_KEY.to_string(), Value::from(self.description.as_str()));
        map.insert(REQUIRED_KEY.to_string(), Value::Bool(self.required));
        map.insert(TYPE_KEY.to_string(), Value::from(self.param_type.as_str()));
        if let Some(default) = &self.default {
            map.insert(DEFAULT_KEY.to_string(), default.clone());
        }
        Value::Object(map)
    }
}

impl fmt::Display for ParameterDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.name, self.param_type)?;
        match &self.default {
            Some(default) => write!(f, ", default {default}")?,
            None => f.write_str(", required")?,
        }
        write!(f, "): {}", self.description)
    }
}

/// Looks up a key every descriptor of this kind must carry.
pub(crate) fn required_key<'a>(
    element: &str,
    map: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a Value> {
    map.get(key)
        .ok_or_else(|| Error::malformed(element, format!("expected key '{key}' missing")))
}

/// Looks up a mandatory string-valued key.
pub(crate) fn required_str<'a>(
    element: &str,
    map: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a str> {
    required_key(element, map, key)?.as_str().ok_or_else(|| {
        Error::malformed(element, format!("value of key '{key}' must be a string"))
    })
}
