use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::{IndexMap, IndexSet};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::component_registry::ComponentRegistry;
use crate::plugin_system::dependency::load_order;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::traits::Plugin;

pub type Result<T> = std::result::Result<T, PluginSystemError>;

/// How a plugin's `register` callback reaches the target registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationMode {
    /// `register` writes straight into the target registry. Registrations made
    /// before a failure are left in place.
    #[default]
    Direct,
    /// `register` writes into a shadow of the target registry. Its
    /// registrations are replayed onto the target only once `register` and
    /// `on_load` have both succeeded.
    Transactional,
}

struct PluginTables<R> {
    /// Plugins whose `register` callback succeeded, in registration order
    plugins: IndexMap<String, Arc<dyn Plugin<R>>>,
    /// Active plugins, in load order. Always a subset of `plugins`' keys.
    loaded: IndexSet<String>,
}

impl<R> PluginTables<R> {
    fn dependents_of(&self, name: &str) -> Vec<String> {
        self.plugins
            .iter()
            .filter(|(id, _)| self.loaded.contains(id.as_str()))
            .filter(|(_, plugin)| plugin.dependencies().iter().any(|dep| dep == name))
            .map(|(id, _)| id.clone())
            .collect()
    }
}

/// Loads and unloads plugins against a component registry.
///
/// The system keeps no registry of its own; each load call is given the
/// registry to register into. Lifecycle calls (`load_plugin`, `unload_plugin`,
/// `load_all`, `unload_all`) are serialized through an async mutex, so
/// overlapping calls run one after the other in the order they were issued.
/// Read accessors never wait on a lifecycle call in progress.
pub struct PluginSystem<R> {
    tables: RwLock<PluginTables<R>>,
    lifecycle: Mutex<()>,
    mode: RegistrationMode,
}

impl<R> fmt::Debug for PluginSystem<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.read();
        f.debug_struct("PluginSystem")
            .field("mode", &self.mode)
            .field("plugins", &tables.plugins.keys().collect::<Vec<_>>())
            .field("loaded", &tables.loaded)
            .finish()
    }
}

impl<R: Send + Sync + 'static> Default for PluginSystem<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a plugin in `plugins` only while its `on_load` is in flight.
///
/// Dropping the guard without `disarm` removes the plugin again. That covers
/// both an `on_load` error and a load future dropped mid-hook.
struct PendingLoad<'a, R> {
    tables: &'a RwLock<PluginTables<R>>,
    name: &'a str,
    armed: bool,
}

impl<'a, R> PendingLoad<'a, R> {
    fn insert(tables: &'a RwLock<PluginTables<R>>, name: &'a str, plugin: Arc<dyn Plugin<R>>) -> Self {
        tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .plugins
            .insert(name.to_string(), plugin);
        Self {
            tables,
            name,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<R> Drop for PendingLoad<'_, R> {
    fn drop(&mut self) {
        if self.armed {
            debug!("Rolling back unfinished load of plugin '{}'", self.name);
            self.tables
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .plugins
                .shift_remove(self.name);
        }
    }
}

impl<R> PluginSystem<R> {
    // A panicking plugin callback never runs while the tables are locked,
    // so a poisoned lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, PluginTables<R>> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PluginTables<R>> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Send + Sync + 'static> PluginSystem<R> {
    /// Create a plugin system using direct registration
    pub fn new() -> Self {
        Self::with_mode(RegistrationMode::Direct)
    }

    pub fn with_mode(mode: RegistrationMode) -> Self {
        Self {
            tables: RwLock::new(PluginTables {
                plugins: IndexMap::new(),
                loaded: IndexSet::new(),
            }),
            lifecycle: Mutex::new(()),
            mode,
        }
    }

    pub fn registration_mode(&self) -> RegistrationMode {
        self.mode
    }

    /// Load a plugin into `registry`.
    ///
    /// Loading an already loaded plugin is a no-op. Every dependency must be
    /// loaded beforehand. If `register` or `on_load` fails the plugin is left
    /// unloaded and the plugin's error is returned. Dropping the returned
    /// future before it completes leaves the plugin unloaded as well.
    pub async fn load_plugin(&self, plugin: Arc<dyn Plugin<R>>, registry: &mut ComponentRegistry<R>) -> Result<()> {
        let _lifecycle = self.lifecycle.lock().await;
        self.load_locked(plugin, registry).await
    }

    async fn load_locked(&self, plugin: Arc<dyn Plugin<R>>, registry: &mut ComponentRegistry<R>) -> Result<()> {
        let name = plugin.name().to_string();

        {
            let tables = self.read();
            if tables.loaded.contains(&name) {
                warn!("Plugin '{}' is already loaded; ignoring repeated load", name);
                return Ok(());
            }
            if let Some(dependency) = plugin
                .dependencies()
                .into_iter()
                .find(|dep| !tables.loaded.contains(dep))
            {
                return Err(PluginSystemError::MissingDependency { plugin_id: name, dependency });
            }
        }

        debug!("Registering components for plugin '{}'", name);
        let mut scratch = match self.mode {
            RegistrationMode::Direct => None,
            RegistrationMode::Transactional => Some(registry.shadow()),
        };
        let registered = match scratch.as_mut() {
            Some(scratch) => plugin.register(scratch),
            None => plugin.register(registry),
        };
        if let Err(source) = registered {
            return Err(PluginSystemError::RegistrationFailed { plugin_id: name, source });
        }

        let pending = PendingLoad::insert(&self.tables, &name, Arc::clone(&plugin));

        if let Err(source) = plugin.on_load().await {
            drop(pending);
            return Err(PluginSystemError::LoadHookFailed { plugin_id: name, source });
        }

        if let Some(scratch) = scratch {
            registry.commit_shadow(scratch);
        }
        self.write().loaded.insert(name.clone());
        pending.disarm();
        info!("Loaded plugin '{}' v{}", name, plugin.version());
        Ok(())
    }

    /// Unload a loaded plugin.
    ///
    /// Fails without side effects if the plugin is unknown or if another
    /// loaded plugin depends on it. Components it registered stay in the
    /// registry.
    pub async fn unload_plugin(&self, name: &str) -> Result<()> {
        let _lifecycle = self.lifecycle.lock().await;
        self.unload_locked(name).await
    }

    async fn unload_locked(&self, name: &str) -> Result<()> {
        let plugin = {
            let tables = self.read();
            let plugin = tables
                .plugins
                .get(name)
                .cloned()
                .ok_or_else(|| PluginSystemError::NotLoaded { plugin_id: name.to_string() })?;
            if let Some(dependent) = tables.dependents_of(name).into_iter().next() {
                return Err(PluginSystemError::HasDependents {
                    plugin_id: name.to_string(),
                    dependent,
                });
            }
            plugin
        };

        if let Err(source) = plugin.on_unload().await {
            return Err(PluginSystemError::UnloadHookFailed {
                plugin_id: name.to_string(),
                source,
            });
        }

        let mut tables = self.write();
        tables.loaded.shift_remove(name);
        tables.plugins.shift_remove(name);
        info!("Unloaded plugin '{}'", name);
        Ok(())
    }

    /// Load a batch of plugins, dependencies first.
    ///
    /// The batch is ordered before anything is loaded, so a dependency cycle
    /// fails the whole call without side effects. Loading stops at the first
    /// failure; plugins loaded before it stay loaded. Returns the names of the
    /// plugins in the order they were processed.
    pub async fn load_all(
        &self,
        plugins: Vec<Arc<dyn Plugin<R>>>,
        registry: &mut ComponentRegistry<R>,
    ) -> Result<Vec<String>> {
        let _lifecycle = self.lifecycle.lock().await;

        let mut seen = HashSet::new();
        let plugins: Vec<_> = plugins
            .into_iter()
            .filter(|plugin| {
                let first = seen.insert(plugin.name().to_string());
                if !first {
                    warn!("Plugin '{}' appears more than once in the batch; keeping the first", plugin.name());
                }
                first
            })
            .collect();

        let nodes: Vec<(String, Vec<String>)> = plugins
            .iter()
            .map(|plugin| (plugin.name().to_string(), plugin.dependencies()))
            .collect();
        let order = load_order(&nodes)?;

        let mut processed = Vec::with_capacity(order.len());
        for i in order {
            self.load_locked(Arc::clone(&plugins[i]), registry).await?;
            processed.push(nodes[i].0.clone());
        }
        Ok(processed)
    }

    /// Unload every loaded plugin, most recently loaded first.
    ///
    /// Stops at the first failure.
    pub async fn unload_all(&self) -> Result<()> {
        let _lifecycle = self.lifecycle.lock().await;

        let names: Vec<String> = self.read().loaded.iter().rev().cloned().collect();
        for name in names {
            self.unload_locked(&name).await?;
        }
        Ok(())
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.read().loaded.contains(name)
    }

    pub fn get_plugin(&self, name: &str) -> Option<Arc<dyn Plugin<R>>> {
        self.read().plugins.get(name).cloned()
    }

    /// Names of the active plugins, in load order
    pub fn loaded_plugins(&self) -> Vec<String> {
        self.read().loaded.iter().cloned().collect()
    }

    /// Every plugin whose registration succeeded (including one whose
    /// `on_load` is still running)
    pub fn all_plugins(&self) -> Vec<Arc<dyn Plugin<R>>> {
        self.read().plugins.values().cloned().collect()
    }

    /// Loaded plugins that list `name` as a dependency
    pub fn dependents_of(&self, name: &str) -> Vec<String> {
        self.read().dependents_of(name)
    }
}
