use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::component_registry::ComponentRegistry;
use crate::config::FrameworkConfig;
use crate::kernel::constants;
use crate::kernel::error::{Error, Result};
use crate::plugin_system::{Plugin, PluginSystem};

/// A host application: one component registry plus the plugin system that
/// fills it, configured from a [`FrameworkConfig`].
pub struct Application<R> {
    config: FrameworkConfig,
    registry: RwLock<ComponentRegistry<R>>,
    plugins: PluginSystem<R>,
}

impl<R: Send + Sync + 'static> Application<R> {
    /// Creates an application with an empty registry
    pub fn new(config: FrameworkConfig) -> Self {
        log::info!("Initializing {} v{}", constants::APP_NAME, constants::APP_VERSION);
        log::debug!("Plugin registration mode: {:?}", config.registration_mode);

        let plugins = PluginSystem::with_mode(config.registration_mode);
        Application {
            config,
            registry: RwLock::new(ComponentRegistry::new()),
            plugins,
        }
    }

    /// Creates an application from a JSON, YAML or TOML config file
    pub fn from_config_file(path: &Path) -> Result<Self> {
        log::info!("Loading configuration from {}", path.display());
        let config = FrameworkConfig::load(path)?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &FrameworkConfig {
        &self.config
    }

    /// The component registry. Hold the read guard only as long as needed;
    /// plugin loads take the write side.
    pub fn registry(&self) -> &RwLock<ComponentRegistry<R>> {
        &self.registry
    }

    pub fn plugins(&self) -> &PluginSystem<R> {
        &self.plugins
    }

    pub fn is_disabled(&self, name: &str) -> bool {
        self.config.is_plugin_disabled(name)
    }

    /// Loads one plugin into the application's registry
    pub async fn load_plugin(&self, plugin: Arc<dyn Plugin<R>>) -> Result<()> {
        if self.is_disabled(plugin.name()) {
            return Err(Error::PluginDisabled {
                plugin_id: plugin.name().to_string(),
            });
        }
        let mut registry = self.registry.write().await;
        self.plugins.load_plugin(plugin, &mut registry).await?;
        Ok(())
    }

    /// Loads a set of plugins in dependency order, skipping the ones disabled
    /// by configuration. Returns the names of the plugins loaded.
    pub async fn load_plugins(&self, plugins: Vec<Arc<dyn Plugin<R>>>) -> Result<Vec<String>> {
        let enabled: Vec<_> = plugins
            .into_iter()
            .filter(|plugin| {
                let disabled = self.is_disabled(plugin.name());
                if disabled {
                    log::info!("Skipping disabled plugin '{}'", plugin.name());
                }
                !disabled
            })
            .collect();

        let mut registry = self.registry.write().await;
        let loaded = self.plugins.load_all(enabled, &mut registry).await?;
        log::info!("{} plugin(s) loaded, {} component key(s) registered", loaded.len(), registry.len());
        Ok(loaded)
    }

    pub async fn unload_plugin(&self, name: &str) -> Result<()> {
        self.plugins.unload_plugin(name).await?;
        Ok(())
    }

    /// Unloads every plugin, dependents first
    pub async fn shutdown(&self) -> Result<()> {
        log::info!("Shutting down {}", constants::APP_NAME);
        self.plugins.unload_all().await?;
        Ok(())
    }
}
