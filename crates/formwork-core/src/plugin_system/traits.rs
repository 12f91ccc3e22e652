use async_trait::async_trait;

use crate::component_registry::ComponentRegistry;

/// Error type returned by plugin callbacks.
///
/// The plugin system never rewrites these; they reach the caller of
/// `load_plugin`/`unload_plugin` as the `source` of a `PluginSystemError`.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Plugin registration error: {0}")]
    Registration(String),
    #[error("Plugin hook error: {0}")]
    Hook(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Core trait that all plugins must implement.
///
/// A plugin is a named bundle of component registrations plus optional
/// lifecycle hooks. `R` is the renderer handle type of the target registry.
#[async_trait]
pub trait Plugin<R>: Send + Sync {
    /// Unique name of the plugin
    fn name(&self) -> &str;

    /// Version string, informational only
    fn version(&self) -> &str;

    /// Plugins that must already be loaded before this one can load
    fn dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    /// Advisory metadata; never checked by the plugin system
    fn peer_dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    /// Register this plugin's components.
    ///
    /// Called exactly once per successful load. Registrations made before an
    /// error is returned are kept unless the plugin system runs in
    /// transactional mode.
    fn register(&self, registry: &mut ComponentRegistry<R>) -> Result<(), PluginError>;

    /// Runs after `register` succeeded; an error rolls the load back
    async fn on_load(&self) -> Result<(), PluginError> {
        Ok(())
    }

    /// Runs before the plugin is removed; an error keeps it loaded
    async fn on_unload(&self) -> Result<(), PluginError> {
        Ok(())
    }
}
