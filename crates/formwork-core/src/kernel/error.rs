//! # Formwork Kernel Errors
//!
//! [`Error`] gathers the errors of every subsystem so that hosts can use a
//! single `Result` type.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::config::ConfigError;
use crate::plugin_system::error::PluginSystemError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("Plugin system error: {0}")]
    PluginSystem(#[from] PluginSystemError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The plugin is listed in `plugins.disabled`
    #[error("Plugin '{plugin_id}' is disabled by configuration")]
    PluginDisabled { plugin_id: String },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
