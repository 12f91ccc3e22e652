#![cfg(test)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::component_registry::{ComponentMeta, ComponentRegistry, DynRenderer, InputDescriptor, InputType};
use crate::plugin_system::{Plugin, PluginError};

/// Stand-in for a renderer implementation living in a UI toolkit
#[derive(Debug, PartialEq)]
pub struct FakeRenderer {
    pub element: &'static str,
}

pub fn renderer(element: &'static str) -> DynRenderer {
    Arc::new(FakeRenderer { element })
}

/// Registers the form primitives under the `forms` namespace
pub struct FormsPlugin {
    pub loads: Arc<AtomicUsize>,
}

impl FormsPlugin {
    pub fn new() -> Self {
        Self {
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Plugin<DynRenderer> for FormsPlugin {
    fn name(&self) -> &str {
        "forms"
    }

    fn version(&self) -> &str {
        "2.1.0"
    }

    fn register(&self, registry: &mut ComponentRegistry<DynRenderer>) -> Result<(), PluginError> {
        registry.register(
            "text-field",
            renderer("input"),
            Some(
                ComponentMeta::new()
                    .in_namespace("forms")
                    .with_label("Text field")
                    .with_category("Inputs")
                    .with_input(InputDescriptor::new("placeholder", InputType::String))
                    .with_input(InputDescriptor::new("required", InputType::Boolean).with_default(json!(false))),
            ),
        );
        registry.register(
            "submit",
            renderer("button"),
            Some(
                ComponentMeta::new()
                    .in_namespace("forms")
                    .with_label("Submit button")
                    .with_category("Actions")
                    .with_default_children(json!("Submit")),
            ),
        );
        Ok(())
    }

    async fn on_load(&self) -> Result<(), PluginError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Overrides `submit` with a styled variant; depends on `forms`
pub struct ThemePlugin {
    pub fail_on_load: bool,
}

#[async_trait]
impl Plugin<DynRenderer> for ThemePlugin {
    fn name(&self) -> &str {
        "theme"
    }

    fn version(&self) -> &str {
        "0.3.0"
    }

    fn dependencies(&self) -> Vec<String> {
        vec!["forms".to_string()]
    }

    fn register(&self, registry: &mut ComponentRegistry<DynRenderer>) -> Result<(), PluginError> {
        registry.register(
            "submit",
            renderer("styled-button"),
            Some(
                ComponentMeta::new()
                    .in_namespace("theme")
                    .with_label("Styled submit")
                    .with_category("Actions"),
            ),
        );
        Ok(())
    }

    async fn on_load(&self) -> Result<(), PluginError> {
        if self.fail_on_load {
            return Err(PluginError::Hook("theme assets missing".to_string()));
        }
        Ok(())
    }
}

pub fn element_of(registry: &ComponentRegistry<DynRenderer>, component_type: &str, namespace: Option<&str>) -> Option<&'static str> {
    registry
        .get(component_type, namespace)
        .and_then(|handle| handle.downcast_ref::<FakeRenderer>())
        .map(|r| r.element)
}
