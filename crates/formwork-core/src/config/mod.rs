//! # Formwork Configuration
//!
//! Host-level settings for the framework core, loaded from a JSON, YAML or
//! TOML file (format picked from the file extension). Every field has a
//! default, so an empty file is a valid configuration.
//!
//! ```toml
//! log_level = "debug"
//! registration_mode = "transactional"
//!
//! [plugins]
//! disabled = ["core-layout"]
//! ```
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::kernel::constants::DEFAULT_LOG_LEVEL;
use crate::plugin_system::RegistrationMode;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported config format for '{path}'")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to parse {format} config: {message}")]
    Parse { format: &'static str, message: String },

    #[error("Failed to serialize config to {format}: {message}")]
    Serialize { format: &'static str, message: String },
}

/// Plugin-related settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    /// Plugins the host should skip when loading its plugin set
    pub disabled: Vec<String>,
}

/// Top-level framework configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkConfig {
    /// Log level name (`error`, `warn`, `info`, `debug`, `trace`, `off`)
    pub log_level: String,
    pub registration_mode: RegistrationMode,
    pub plugins: PluginSettings,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            registration_mode: RegistrationMode::default(),
            plugins: PluginSettings::default(),
        }
    }
}

impl FrameworkConfig {
    /// Parse configuration text in the given format
    pub fn parse(data: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Json => serde_json::from_str(data).map_err(|e| ConfigError::Parse {
                format: "JSON",
                message: e.to_string(),
            }),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => {
                // serde_yaml reads an empty document as null rather than an empty map
                if data.trim().is_empty() {
                    return Ok(Self::default());
                }
                serde_yaml::from_str(data).map_err(|e| ConfigError::Parse {
                    format: "YAML",
                    message: e.to_string(),
                })
            }
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data).map_err(|e| ConfigError::Parse {
                format: "TOML",
                message: e.to_string(),
            }),
        }
    }

    /// Load configuration from a file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data, format)
    }

    /// Serialize to string based on format
    pub fn serialize(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
                format: "JSON",
                message: e.to_string(),
            }),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(self).map_err(|e| ConfigError::Serialize {
                format: "YAML",
                message: e.to_string(),
            }),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
                format: "TOML",
                message: e.to_string(),
            }),
        }
    }

    /// The configured log level, or the default level if it doesn't parse
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or_else(|_| {
            log::warn!(
                "Unknown log level '{}', falling back to '{}'",
                self.log_level,
                DEFAULT_LOG_LEVEL
            );
            LevelFilter::from_str(DEFAULT_LOG_LEVEL).unwrap_or(LevelFilter::Info)
        })
    }

    pub fn is_plugin_disabled(&self, name: &str) -> bool {
        self.plugins.disabled.iter().any(|disabled| disabled == name)
    }
}
