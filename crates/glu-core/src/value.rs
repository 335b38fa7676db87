//! The tagged value model.
//!
//! Parameter values, defaults and nested return payloads all use one closed
//! variant type: [`serde_json::Value`], re-exported as [`Value`]. This module
//! adds the few helpers the protocol needs on top of it.

pub use serde_json::Value;

/// Returns a short name for the kind of a value, for error messages.
///
/// # Examples
///
/// ```
/// use glu_core::value::{kind_name, Value};
///
/// assert_eq!(kind_name(&Value::Bool(true)), "boolean");
/// assert_eq!(kind_name(&Value::from("x")), "string");
/// ```
#[must_use]
pub const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

/// Renders a scalar value the way it is placed into a request URI.
///
/// Strings are used verbatim (no surrounding quotes), booleans become
/// `true`/`false`, and numbers use their canonical decimal form. Composite
/// values fall back to their compact JSON text.
///
/// # Examples
///
/// ```
/// use glu_core::value::{to_param_string, Value};
/// use serde_json::json;
///
/// assert_eq!(to_param_string(&json!("hi")), "hi");
/// assert_eq!(to_param_string(&json!(10)), "10");
/// assert_eq!(to_param_string(&json!(true)), "true");
/// ```
#[must_use]
pub fn to_param_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
