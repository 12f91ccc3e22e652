#![cfg(test)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::component_registry::{ComponentMeta, ComponentRegistry};
use crate::plugin_system::traits::{Plugin, PluginError};

/// Renderer handle used throughout the plugin tests: "<plugin>/<type>"
pub type TestRenderer = String;

#[derive(Clone)]
pub enum HookBehavior {
    Success,
    Failure(String),
    /// Suspends for a while before succeeding
    Delay(Duration),
}

// --- Mock Plugin ---
pub struct MockPlugin {
    name: String,
    version: String,
    deps: Vec<String>,
    /// (type, namespace) pairs to register
    components: Vec<(String, Option<String>)>,
    /// Register this many components, then fail
    fail_register_after: Option<usize>,
    load_behavior: HookBehavior,
    unload_behavior: HookBehavior,
    pub register_calls: Arc<AtomicUsize>,
    pub load_calls: Arc<AtomicUsize>,
    pub unload_calls: Arc<AtomicUsize>,
    tracker: Option<Arc<StdMutex<Vec<String>>>>,
}

impl MockPlugin {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            deps: vec![],
            components: vec![],
            fail_register_after: None,
            load_behavior: HookBehavior::Success,
            unload_behavior: HookBehavior::Success,
            register_calls: Arc::new(AtomicUsize::new(0)),
            load_calls: Arc::new(AtomicUsize::new(0)),
            unload_calls: Arc::new(AtomicUsize::new(0)),
            tracker: None,
        }
    }

    pub fn with_deps(mut self, deps: &[&str]) -> Self {
        self.deps = deps.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn with_component(mut self, component_type: &str, namespace: Option<&str>) -> Self {
        self.components.push((component_type.to_string(), namespace.map(str::to_string)));
        self
    }

    pub fn with_register_failure_after(mut self, count: usize) -> Self {
        self.fail_register_after = Some(count);
        self
    }

    pub fn with_load_behavior(mut self, behavior: HookBehavior) -> Self {
        self.load_behavior = behavior;
        self
    }

    pub fn with_unload_behavior(mut self, behavior: HookBehavior) -> Self {
        self.unload_behavior = behavior;
        self
    }

    pub fn with_tracker(mut self, tracker: Arc<StdMutex<Vec<String>>>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    fn track(&self, event: &str) {
        if let Some(tracker) = &self.tracker {
            tracker.lock().unwrap().push(format!("{}:{}", event, self.name));
        }
    }

    pub fn renderer_for(&self, component_type: &str) -> TestRenderer {
        format!("{}/{}", self.name, component_type)
    }

    async fn run_hook(behavior: &HookBehavior) -> Result<(), PluginError> {
        match behavior {
            HookBehavior::Success => Ok(()),
            HookBehavior::Failure(msg) => Err(PluginError::Hook(msg.clone())),
            HookBehavior::Delay(duration) => {
                tokio::time::sleep(*duration).await;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl Plugin<TestRenderer> for MockPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn dependencies(&self) -> Vec<String> {
        self.deps.clone()
    }

    fn register(&self, registry: &mut ComponentRegistry<TestRenderer>) -> Result<(), PluginError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.track("register");
        for (i, (component_type, namespace)) in self.components.iter().enumerate() {
            if self.fail_register_after == Some(i) {
                return Err(PluginError::Registration(format!("{} gave up at {}", self.name, component_type)));
            }
            let meta = namespace.as_ref().map(|ns| ComponentMeta::new().in_namespace(ns.clone()));
            registry.register(component_type.clone(), self.renderer_for(component_type), meta);
        }
        if self.fail_register_after == Some(self.components.len()) {
            return Err(PluginError::Registration(format!("{} failed after registering", self.name)));
        }
        Ok(())
    }

    async fn on_load(&self) -> Result<(), PluginError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        let result = Self::run_hook(&self.load_behavior).await;
        self.track("load");
        result
    }

    async fn on_unload(&self) -> Result<(), PluginError> {
        self.unload_calls.fetch_add(1, Ordering::SeqCst);
        let result = Self::run_hook(&self.unload_behavior).await;
        self.track("unload");
        result
    }
}

pub fn shared(plugin: MockPlugin) -> Arc<dyn Plugin<TestRenderer>> {
    Arc::new(plugin)
}
