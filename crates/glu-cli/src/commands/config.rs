//! `glu config`: the persistent settings file.
//!
//! The file is TOML and lives at:
//! - Linux: `~/.config/glu/config.toml`
//! - macOS: `~/Library/Application Support/glu/config.toml`
//! - Windows: `%APPDATA%\glu\config.toml`

use crate::actions::ConfigAction;
use anyhow::{Context, Result, bail};
use glu_core::cli::{ExitCode, OutputFormat};
use glu_core::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

const KEYS: [&str; 4] = [
    "server.url",
    "server.timeout_seconds",
    "general.default_format",
    "general.log_level",
];

/// CLI configuration.
///
/// # Examples
///
/// ```toml
/// [server]
/// url = "http://localhost:8001"
/// timeout_seconds = 30
///
/// [general]
/// default_format = "pretty"
/// log_level = "info"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    /// Which server to talk to
    #[serde(default)]
    pub server: ServerConfig,

    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server base URL
    pub url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

/// Output and logging defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Used when `--format` is not given
    pub default_format: String,

    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::default().to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the format or log level is unknown, or the server
    /// settings would not produce a valid client configuration.
    pub fn validate(&self) -> Result<()> {
        self.output_format()?;

        if !LOG_LEVELS.contains(&self.general.log_level.as_str()) {
            bail!(
                "invalid log_level '{}', must be one of: {}",
                self.general.log_level,
                LOG_LEVELS.join(", ")
            );
        }

        self.client_config(None)?;
        Ok(())
    }

    /// Returns the configured default output format.
    ///
    /// # Errors
    ///
    /// Returns an error if `general.default_format` is not a known format.
    pub fn output_format(&self) -> Result<OutputFormat> {
        self.general
            .default_format
            .parse()
            .context("invalid general.default_format")
    }

    /// Builds the client configuration, optionally overriding the server URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration is invalid.
    pub fn client_config(&self, server: Option<&str>) -> Result<ClientConfig> {
        let url = server.unwrap_or(&self.server.url);
        let config = ClientConfig::builder()
            .base_url(url)
            .request_timeout(Duration::from_secs(self.server.timeout_seconds))
            .build();
        config
            .validate()
            .with_context(|| format!("invalid server configuration for '{url}'"))?;
        Ok(config)
    }
}

/// Returns the default configuration file path.
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("no configuration directory on this platform")?;
    Ok(config_dir.join("glu").join("config.toml"))
}

/// Loads the configuration from the default path, or returns defaults.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Loads the configuration from `path`, or returns defaults if it is absent.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).context("failed to read config file")?;
    let config: Config = toml::from_str(&content).context("failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

/// Validates and writes the configuration to `path`, creating parent
/// directories as needed.
pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    config.validate()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    let toml_str = toml::to_string_pretty(config).context("failed to serialize config")?;
    fs::write(path, toml_str).context("failed to write config file")?;

    debug!("Saved config to {}", path.display());
    Ok(())
}

fn get_config_value_by_key(config: &Config, key: &str) -> Option<String> {
    match key {
        "server.url" => Some(config.server.url.clone()),
        "server.timeout_seconds" => Some(config.server.timeout_seconds.to_string()),
        "general.default_format" => Some(config.general.default_format.clone()),
        "general.log_level" => Some(config.general.log_level.clone()),
        _ => None,
    }
}

fn set_config_value_by_key(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "server.url" => config.server.url = value.to_string(),
        "server.timeout_seconds" => {
            config.server.timeout_seconds = value
                .parse()
                .context("invalid value for timeout_seconds, must be a number")?;
        }
        "general.default_format" => config.general.default_format = value.to_string(),
        "general.log_level" => config.general.log_level = value.to_string(),
        _ => bail!(
            "unknown configuration key '{key}', available keys: {}",
            KEYS.join(", ")
        ),
    }
    Ok(())
}

/// Outcome of `glu config init`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InitResult {
    /// Whether a new file was written
    pub created: bool,
    /// Status message
    pub message: String,
    /// Configuration file path
    pub path: String,
}

/// A single configuration value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfigValue {
    /// Configuration key
    pub key: String,
    /// Configuration value
    pub value: String,
}

/// Runs the config command against the default configuration file.
pub fn run(action: ConfigAction, output_format: OutputFormat) -> Result<ExitCode> {
    run_at(&config_path()?, action, output_format)
}

/// Runs the config command against the file at `path`.
///
/// # Examples
///
/// ```
/// use glu_cli::ConfigAction;
/// use glu_cli::commands::config;
/// use glu_core::cli::{ExitCode, OutputFormat};
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("config.toml");
/// let code = config::run_at(&path, ConfigAction::Init, OutputFormat::Json)?;
/// assert_eq!(code, ExitCode::SUCCESS);
/// assert!(path.exists());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn run_at(path: &Path, action: ConfigAction, output_format: OutputFormat) -> Result<ExitCode> {
    info!("Config action {action:?} on {}", path.display());

    let output = match action {
        ConfigAction::Init => serde_json::to_value(init_config(path)?)?,
        ConfigAction::Show => serde_json::to_value(load_config_from(path)?)?,
        ConfigAction::Get { key } => serde_json::to_value(get_config(path, key)?)?,
        ConfigAction::Set { key, value } => serde_json::to_value(set_config(path, key, value)?)?,
    };

    let formatted = crate::formatters::format_output(&output, output_format)
        .context("failed to format configuration output")?;
    println!("{formatted}");
    Ok(ExitCode::SUCCESS)
}

/// Creates a default configuration file; an existing file is left alone.
fn init_config(path: &Path) -> Result<InitResult> {
    let display = path.display().to_string();
    if path.exists() {
        return Ok(InitResult {
            created: false,
            message: "left existing file untouched".to_string(),
            path: display,
        });
    }

    save_config_to(path, &Config::default())?;
    Ok(InitResult {
        created: true,
        message: "wrote default configuration".to_string(),
        path: display,
    })
}

fn get_config(path: &Path, key: String) -> Result<ConfigValue> {
    let config = load_config_from(path)?;
    match get_config_value_by_key(&config, &key) {
        Some(value) => Ok(ConfigValue { key, value }),
        None => bail!(
            "configuration key '{key}' not found, available keys: {}",
            KEYS.join(", ")
        ),
    }
}

fn set_config(path: &Path, key: String, value: String) -> Result<ConfigValue> {
    let mut config = load_config_from(path)?;
    set_config_value_by_key(&mut config, &key, &value)?;
    save_config_to(path, &config)?;
    Ok(ConfigValue { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.url, "http://localhost:8001");
        assert_eq!(config.server.timeout_seconds, 30);
        assert_eq!(config.general.default_format, "pretty");
        assert_eq!(config.general.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_format() {
        let mut config = Config::default();
        config.general.default_format = "yaml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = Config::default();
        config.general.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_server() {
        let mut config = Config::default();
        config.server.url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_client_config_override() {
        let config = Config::default();
        let client = config.client_config(Some("https://glu.example.com")).unwrap();
        assert_eq!(client.base_url, "https://glu.example.com");
        assert_eq!(client.request_timeout, Duration::from_secs(30));

        let client = config.client_config(None).unwrap();
        assert_eq!(client.base_url, "http://localhost:8001");
    }

    #[test]
    fn test_config_deserialization_fills_missing_sections() {
        let config: Config = toml::from_str(
            r#"
            [server]
            url = "http://glu:9000"
            timeout_seconds = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.server.url, "http://glu:9000");
        assert_eq!(config.server.timeout_seconds, 5);
        assert_eq!(config.general, GeneralConfig::default());
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut config = Config::default();
        assert_eq!(
            get_config_value_by_key(&config, "server.timeout_seconds"),
            Some("30".to_string())
        );
        assert_eq!(get_config_value_by_key(&config, "server.nope"), None);

        set_config_value_by_key(&mut config, "server.timeout_seconds", "90").unwrap();
        assert_eq!(config.server.timeout_seconds, 90);
        set_config_value_by_key(&mut config, "general.default_format", "json").unwrap();
        assert_eq!(config.general.default_format, "json");

        assert!(set_config_value_by_key(&mut config, "server.timeout_seconds", "soon").is_err());
        assert!(set_config_value_by_key(&mut config, "general.cache_dir", "/tmp").is_err());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general]\ndefault_format = \"yaml\"\nlog_level = \"info\"\n").unwrap();
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_init_set_get_round() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let first = init_config(&path).unwrap();
        assert!(first.created);
        let second = init_config(&path).unwrap();
        assert!(!second.created);

        set_config(&path, "server.url".to_string(), "http://glu:1234".to_string()).unwrap();
        let value = get_config(&path, "server.url".to_string()).unwrap();
        assert_eq!(value.value, "http://glu:1234");

        assert!(get_config(&path, "server.port".to_string()).is_err());
    }

    #[test]
    fn test_set_refuses_to_save_invalid_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        init_config(&path).unwrap();

        assert!(set_config(&path, "general.log_level".to_string(), "loud".to_string()).is_err());
        assert_eq!(load_config_from(&path).unwrap().general.log_level, "info");
    }

    #[test]
    fn test_run_at_reports_success() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(
            run_at(&path, ConfigAction::Show, OutputFormat::Json).unwrap(),
            ExitCode::SUCCESS
        );
        assert!(
            run_at(
                &path,
                ConfigAction::Get {
                    key: "bogus".to_string()
                },
                OutputFormat::Json
            )
            .is_err()
        );
    }
}
