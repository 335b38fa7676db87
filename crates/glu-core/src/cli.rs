//! CLI-specific types and utilities.
//!
//! Strong types for the command-line surface: how results are printed, what
//! the process exits with, and how `name=value` parameter assignments are
//! read from arguments.
//!
//! # Examples
//!
//! ```
//! use glu_core::cli::{ExitCode, OutputFormat, ParamAssignment};
//!
//! let format = OutputFormat::Pretty;
//! assert_eq!(format.as_str(), "pretty");
//!
//! assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
//!
//! let assignment: ParamAssignment = "text=hello world".parse().unwrap();
//! assert_eq!(assignment.name(), "text");
//! assert_eq!(assignment.value(), "hello world");
//! ```

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// CLI output format.
///
/// All formats carry the same information with different presentation.
///
/// # Examples
///
/// ```
/// use glu_core::cli::OutputFormat;
///
/// let format: OutputFormat = "json".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Indented JSON
    Json,
    /// One line of JSON per result, for pipes
    Text,
    /// Colored `key: value` layout
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Name accepted by `--format`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::InvalidArgument(format!(
                "unknown output format '{s}', use json, text or pretty"
            ))),
        }
    }
}

/// Process exit status of the `glu` binary.
///
/// # Examples
///
/// ```
/// use glu_core::Error;
/// use glu_core::cli::ExitCode;
///
/// let err = Error::MissingParameter { parameter: "text".to_string() };
/// assert_eq!(ExitCode::for_error(&err), ExitCode::INVALID_INPUT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// 0: the command did what was asked.
    pub const SUCCESS: Self = Self(0);

    /// 1: anything not covered below.
    pub const ERROR: Self = Self(1);

    /// 2: bad arguments, parameter values or configuration.
    pub const INVALID_INPUT: Self = Self(2);

    /// 3: the server failed or could not be reached.
    pub const SERVER_ERROR: Self = Self(3);

    /// 4: a name the server does not know.
    pub const NOT_FOUND: Self = Self(4);

    /// Wraps a raw status.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        Self(code)
    }

    /// Raw status for `std::process::exit`.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// `true` for status 0.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Picks the exit code that reports `err`.
    #[must_use]
    pub const fn for_error(err: &Error) -> Self {
        match err {
            Error::Validation { .. }
            | Error::MissingParameter { .. }
            | Error::Protocol { .. }
            | Error::InvalidArgument(_)
            | Error::Config { .. } => Self::INVALID_INPUT,
            Error::Server { .. }
            | Error::Transport { .. }
            | Error::ResourceCreation { .. }
            | Error::MalformedDescriptor { .. } => Self::SERVER_ERROR,
            Error::NotFound { .. } => Self::NOT_FOUND,
            Error::Serialization { .. } => Self::ERROR,
        }
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A `name=value` parameter assignment given on the command line.
///
/// The value is kept as a string; it is coerced to the parameter's declared
/// type when it is set on a template or service. Everything after the first
/// `=` belongs to the value, so values may themselves contain `=`.
///
/// # Examples
///
/// ```
/// use glu_core::cli::ParamAssignment;
///
/// let a: ParamAssignment = "query=a=b".parse().unwrap();
/// assert_eq!(a.name(), "query");
/// assert_eq!(a.value(), "a=b");
///
/// assert!("novalue".parse::<ParamAssignment>().is_err());
/// assert!("=x".parse::<ParamAssignment>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamAssignment {
    name: String,
    value: String,
}

impl ParamAssignment {
    /// Parses a `name=value` assignment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if there is no `=`, the name is
    /// empty, or the name contains control characters.
    pub fn new(s: &str) -> crate::Result<Self> {
        let (name, value) = s.split_once('=').ok_or_else(|| {
            Error::InvalidArgument(format!("expected name=value, got '{s}'"))
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "parameter name cannot be empty in '{s}'"
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(Error::InvalidArgument(
                "parameter name cannot contain control characters".to_string(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Splits the assignment into `(name, value)`.
    #[must_use]
    pub fn into_pair(self) -> (String, String) {
        (self.name, self.value)
    }
}

impl fmt::Display for ParamAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl FromStr for ParamAssignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
