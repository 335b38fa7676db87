//! Output formatters for CLI commands.
//!
//! Every command produces a serializable result and hands it here, so the
//! three output modes stay consistent across commands.

use anyhow::Result;
use colored::Colorize;
use glu_core::cli::OutputFormat;
use serde::Serialize;

/// Formats data according to the specified output format.
///
/// # Errors
///
/// Returns an error if the data cannot be serialized.
///
/// # Examples
///
/// ```
/// use glu_cli::formatters::format_output;
/// use glu_core::cli::OutputFormat;
/// use serde_json::json;
///
/// let output = format_output(&json!({"status": 200}), OutputFormat::Text)?;
/// assert_eq!(output, r#"{"status":200}"#);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Formats data as indented JSON.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Formats data as single-line JSON.
    pub fn format_compact<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string(data)?)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize, json};

    /// Formats data as one line of uncolored JSON, suitable for piping.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        json::format_compact(data)
    }
}

/// Pretty (human-readable) output formatting.
///
/// Maps become `key: value` lines, lists become `- item` lines, nested
/// structures are indented by two spaces per level.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    /// Formats data as colorized, indented output.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        match &value {
            Value::Object(_) | Value::Array(_) => write_block(&mut out, &value, 0),
            scalar => out.push_str(&format_scalar(scalar)),
        }
        Ok(out.trim_end().to_string())
    }

    fn format_scalar(value: &Value) -> String {
        match value {
            Value::Null => "null".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            Value::Array(a) if a.is_empty() => "[]".to_string(),
            Value::Object(o) if o.is_empty() => "{}".to_string(),
            Value::Array(_) | Value::Object(_) => String::new(),
        }
    }

    fn is_nested(value: &Value) -> bool {
        match value {
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
            _ => false,
        }
    }

    fn write_block(out: &mut String, value: &Value, indent: usize) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Object(map) => {
                for (key, item) in map {
                    out.push_str(&format!("{pad}{}:", key.blue().bold()));
                    if is_nested(item) {
                        out.push('\n');
                        write_block(out, item, indent + 1);
                    } else {
                        out.push_str(&format!(" {}\n", format_scalar(item)));
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    if is_nested(item) {
                        out.push_str(&format!("{pad}-\n"));
                        write_block(out, item, indent + 1);
                    } else {
                        out.push_str(&format!("{pad}- {}\n", format_scalar(item)));
                    }
                }
            }
            scalar => out.push_str(&format!("{pad}{}\n", format_scalar(scalar))),
        }
    }
}
