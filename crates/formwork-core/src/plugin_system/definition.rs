use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};

use crate::component_registry::ComponentRegistry;
use crate::plugin_system::traits::{Plugin, PluginError};

type RegisterFn<R> = Arc<dyn Fn(&mut ComponentRegistry<R>) -> Result<(), PluginError> + Send + Sync>;
type HookFn = Arc<dyn Fn() -> BoxFuture<'static, Result<(), PluginError>> + Send + Sync>;

/// A plugin assembled from closures.
///
/// Useful for plugins built at runtime and in tests, where a dedicated type
/// implementing [`Plugin`] would be overkill.
///
/// ```ignore
/// let plugin = PluginDefinition::new("charts", "1.0.0", |registry| {
///     registry.register("bar-chart", renderer, None);
///     Ok(())
/// })
/// .with_dependency("core-widgets")
/// .on_load(|| async { Ok(()) });
/// ```
pub struct PluginDefinition<R> {
    name: String,
    version: String,
    dependencies: Vec<String>,
    peer_dependencies: Vec<String>,
    register: RegisterFn<R>,
    on_load: Option<HookFn>,
    on_unload: Option<HookFn>,
}

impl<R> PluginDefinition<R> {
    pub fn new<F>(name: impl Into<String>, version: impl Into<String>, register: F) -> Self
    where
        F: Fn(&mut ComponentRegistry<R>) -> Result<(), PluginError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            version: version.into(),
            dependencies: Vec::new(),
            peer_dependencies: Vec::new(),
            register: Arc::new(register),
            on_load: None,
            on_unload: None,
        }
    }

    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.dependencies.push(name.into());
        self
    }

    pub fn with_dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_peer_dependency(mut self, name: impl Into<String>) -> Self {
        self.peer_dependencies.push(name.into());
        self
    }

    pub fn on_load<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), PluginError>> + Send + 'static,
    {
        self.on_load = Some(Arc::new(move || hook().boxed()));
        self
    }

    pub fn on_unload<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), PluginError>> + Send + 'static,
    {
        self.on_unload = Some(Arc::new(move || hook().boxed()));
        self
    }
}

impl<R> fmt::Debug for PluginDefinition<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDefinition")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("dependencies", &self.dependencies)
            .field("peer_dependencies", &self.peer_dependencies)
            .field("on_load", &self.on_load.is_some())
            .field("on_unload", &self.on_unload.is_some())
            .finish()
    }
}

#[async_trait]
impl<R: 'static> Plugin<R> for PluginDefinition<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn dependencies(&self) -> Vec<String> {
        self.dependencies.clone()
    }

    fn peer_dependencies(&self) -> Vec<String> {
        self.peer_dependencies.clone()
    }

    fn register(&self, registry: &mut ComponentRegistry<R>) -> Result<(), PluginError> {
        (self.register)(registry)
    }

    async fn on_load(&self) -> Result<(), PluginError> {
        match &self.on_load {
            Some(hook) => hook().await,
            None => Ok(()),
        }
    }

    async fn on_unload(&self) -> Result<(), PluginError> {
        match &self.on_unload {
            Some(hook) => hook().await,
            None => Ok(()),
        }
    }
}
