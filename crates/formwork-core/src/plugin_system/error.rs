//! # Formwork Plugin System Errors
//!
//! Defines [`PluginSystemError`], returned by every fallible lifecycle call of
//! the [`PluginSystem`](crate::plugin_system::PluginSystem). Failures raised by
//! a plugin's own callbacks are wrapped, never rewritten: the original
//! [`PluginError`] stays available as the error `source` and through
//! [`PluginSystemError::plugin_error`].
use crate::plugin_system::traits::PluginError;

#[derive(Debug, thiserror::Error)]
pub enum PluginSystemError {
    #[error("Plugin '{plugin_id}' depends on '{dependency}', which is not loaded")]
    MissingDependency {
        plugin_id: String,
        dependency: String,
    },

    #[error("Plugin '{plugin_id}' failed to register its components: {source}")]
    RegistrationFailed {
        plugin_id: String,
        #[source]
        source: PluginError,
    },

    #[error("Plugin '{plugin_id}' failed during load: {source}")]
    LoadHookFailed {
        plugin_id: String,
        #[source]
        source: PluginError,
    },

    #[error("Plugin '{plugin_id}' is not loaded")]
    NotLoaded { plugin_id: String },

    #[error("Cannot unload plugin '{plugin_id}': plugin '{dependent}' depends on it")]
    HasDependents { plugin_id: String, dependent: String },

    #[error("Plugin '{plugin_id}' failed during unload: {source}")]
    UnloadHookFailed {
        plugin_id: String,
        #[source]
        source: PluginError,
    },

    #[error("Circular dependency detected between plugins: {}", .0.join(", "))]
    CyclicDependency(Vec<String>),
}

impl PluginSystemError {
    /// Name of the plugin the failing call was about, if there is a single one
    pub fn plugin_id(&self) -> Option<&str> {
        match self {
            Self::MissingDependency { plugin_id, .. }
            | Self::RegistrationFailed { plugin_id, .. }
            | Self::LoadHookFailed { plugin_id, .. }
            | Self::NotLoaded { plugin_id }
            | Self::HasDependents { plugin_id, .. }
            | Self::UnloadHookFailed { plugin_id, .. } => Some(plugin_id),
            Self::CyclicDependency(_) => None,
        }
    }

    /// The error raised by the plugin's own callback, if that is what failed
    pub fn plugin_error(&self) -> Option<&PluginError> {
        match self {
            Self::RegistrationFailed { source, .. }
            | Self::LoadHookFailed { source, .. }
            | Self::UnloadHookFailed { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Take ownership of the plugin's original error
    pub fn into_plugin_error(self) -> Result<PluginError, Self> {
        match self {
            Self::RegistrationFailed { source, .. }
            | Self::LoadHookFailed { source, .. }
            | Self::UnloadHookFailed { source, .. } => Ok(source),
            other => Err(other),
        }
    }
}
