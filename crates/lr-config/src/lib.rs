//! Configuration management for LR.
//!
//! Parses `lr.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [reload]
//! namespace = "core"
//! inject_file_types = ["css", "png", "jpg", "jpeg", "svg", "gif", "webp", "map"]
//!
//! [stream]
//! once = false
//! matches = ["**/*.css"]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override default namespace.
    pub namespace: Option<String>,
    /// Override once mode for stream sessions.
    pub once: Option<bool>,
    /// Override stream match patterns.
    pub matches: Option<Vec<String>>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "lr.toml";

/// Injectable file types used when `reload.inject_file_types` is absent.
const DEFAULT_INJECT_FILE_TYPES: &[&str] =
    &["css", "png", "jpg", "jpeg", "svg", "gif", "webp", "map"];

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reload decision configuration.
    pub reload: ReloadConfig,
    /// Stream session defaults.
    pub stream: StreamConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Reload decision configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// Namespace for changes that carry none.
    pub namespace: String,
    /// File extensions that can be injected without a reload.
    pub inject_file_types: Vec<String>,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            namespace: "core".to_owned(),
            inject_file_types: DEFAULT_INJECT_FILE_TYPES
                .iter()
                .map(|ext| (*ext).to_owned())
                .collect(),
        }
    }
}

/// Stream session defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Resolve multi-file sessions with one full reload.
    pub once: bool,
    /// Glob patterns a streamed path must match (empty accepts all).
    pub matches: Vec<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `lr.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(namespace) = &settings.namespace {
            self.reload.namespace.clone_from(namespace);
        }
        if let Some(once) = settings.once {
            self.stream.once = once;
        }
        if let Some(matches) = &settings.matches {
            self.stream.matches.clone_from(matches);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_reload()?;
        self.validate_stream()?;
        Ok(())
    }

    /// Validate reload configuration.
    fn validate_reload(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.reload.namespace, "reload.namespace")?;

        for ext in &self.reload.inject_file_types {
            require_non_empty(ext.trim_start_matches('.'), "reload.inject_file_types entry")?;
        }

        Ok(())
    }

    /// Validate stream configuration.
    fn validate_stream(&self) -> Result<(), ConfigError> {
        for pattern in &self.stream.matches {
            glob::Pattern::new(pattern).map_err(|e| {
                ConfigError::Validation(format!(
                    "stream.matches pattern {pattern:?} is invalid: {e}"
                ))
            })?;
        }

        Ok(())
    }
}
