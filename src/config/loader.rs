//! Configuration file loading with precedence handling.
//!
//! Precedence chain (lowest to highest):
//! defaults → config file → environment variables → CLI flags.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TLV_CONFIG";
/// Environment override for the item height.
pub const ITEM_HEIGHT_ENV: &str = "TLV_ITEM_HEIGHT";
/// Environment override for the overscan buffer.
pub const BUFFER_ENV: &str = "TLV_BUFFER";
/// Environment override for the search debounce delay, in milliseconds.
pub const DEBOUNCE_ENV: &str = "TLV_DEBOUNCE_MS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (permission issues, not a directory, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting parsed but is outside its valid range.
    ///
    /// Raised for bad environment overrides and by [`ResolvedConfig::validate`].
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Setting name, as written in the file or environment.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - unspecified fields keep their defaults.
/// Corresponds to `~/.config/tlv/config.toml`.
///
/// ```toml
/// item_height = 6
/// buffer = 8
/// debounce_ms = 250
/// data_path = "/data/timeline-data.json"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Fixed height of one timeline item, in terminal rows.
    #[serde(default)]
    pub item_height: Option<f64>,

    /// Items rendered beyond each viewport edge.
    #[serde(default)]
    pub buffer: Option<usize>,

    /// Quiet period before search text is applied.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Catalogue used when no path is given on the command line.
    #[serde(default)]
    pub data_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Item height in rows.
    pub item_height: f64,
    /// Overscan buffer in items.
    pub buffer: usize,
    /// Search debounce delay.
    pub debounce: Duration,
    /// Log file for tracing output.
    pub log_file_path: PathBuf,
    /// Default catalogue path.
    pub data_path: Option<PathBuf>,
}

/// Default item height in rows: title, meta line, description, spacer.
pub const DEFAULT_ITEM_HEIGHT: f64 = 4.0;
/// Default overscan buffer.
pub const DEFAULT_BUFFER: usize = 5;
/// Default search debounce delay.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            item_height: DEFAULT_ITEM_HEIGHT,
            buffer: DEFAULT_BUFFER,
            debounce: DEFAULT_DEBOUNCE,
            log_file_path: default_log_path(),
            data_path: None,
        }
    }
}

impl ResolvedConfig {
    /// Reject settings the window calculator cannot use.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !self.item_height.is_finite() || self.item_height <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "item_height".to_string(),
                reason: format!("must be a positive number, got {}", self.item_height),
            });
        }
        Ok(self)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/tlv/tlv.log` on Linux, or the platform's state
/// directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("tlv").join("tlv.log"),
        None => PathBuf::from("tlv.log"),
    }
}

/// Resolve default config file path.
///
/// Returns `~/.config/tlv/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tlv").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TLV_CONFIG` environment variable
/// 3. Default path `~/.config/tlv/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed,
/// or if `TLV_CONFIG` is not valid UTF-8.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    match std::env::var(CONFIG_ENV) {
        Ok(env_path) => return load_config_file(PathBuf::from(env_path)),
        Err(std::env::VarError::NotUnicode(raw)) => {
            return Err(ConfigError::InvalidPath(raw.to_string_lossy().into_owned()));
        }
        Err(std::env::VarError::NotPresent) => {}
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        item_height: config.item_height.unwrap_or(defaults.item_height),
        buffer: config.buffer.unwrap_or(defaults.buffer),
        debounce: config
            .debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.debounce),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        data_path: config.data_path.or(defaults.data_path),
    }
}

fn env_value<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                field: name.to_string(),
                reason: format!("{e} (got {raw:?})"),
            }),
        Err(_) => Ok(None),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `TLV_ITEM_HEIGHT`, `TLV_BUFFER`, and `TLV_DEBOUNCE_MS`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if a set variable does not parse.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Some(height) = env_value::<f64>(ITEM_HEIGHT_ENV)? {
        config.item_height = height;
    }
    if let Some(buffer) = env_value::<usize>(BUFFER_ENV)? {
        config.buffer = buffer;
    }
    if let Some(ms) = env_value::<u64>(DEBOUNCE_ENV)? {
        config.debounce = Duration::from_millis(ms);
    }
    Ok(config)
}

/// Settings given explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--item-height`
    pub item_height: Option<f64>,
    /// `--buffer`
    pub buffer: Option<usize>,
    /// `--debounce-ms`
    pub debounce_ms: Option<u64>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence. Only flags the user actually set
/// are applied.
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: &CliOverrides) -> ResolvedConfig {
    if let Some(height) = cli.item_height {
        config.item_height = height;
    }
    if let Some(buffer) = cli.buffer {
        config.buffer = buffer;
    }
    if let Some(ms) = cli.debounce_ms {
        config.debounce = Duration::from_millis(ms);
    }
    config
}

/// Run the whole precedence chain and validate the result.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    cli: &CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let config = apply_env_overrides(merge_config(file))?;
    apply_cli_overrides(config, cli).validate()
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
