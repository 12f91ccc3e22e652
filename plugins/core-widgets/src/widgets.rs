use async_trait::async_trait;
use log::info;
use serde_json::json;

use formwork_core::component_registry::{ComponentMeta, ComponentRegistry, DynRenderer, InputDescriptor, InputType};
use formwork_core::plugin_system::{Plugin, PluginError};

use crate::ElementRenderer;

pub const NAMESPACE: &str = "ui";

/// Text, button and input widgets
#[derive(Debug, Default)]
pub struct CoreWidgetsPlugin;

#[async_trait]
impl Plugin<DynRenderer> for CoreWidgetsPlugin {
    fn name(&self) -> &str {
        "core-widgets"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn register(&self, registry: &mut ComponentRegistry<DynRenderer>) -> Result<(), PluginError> {
        registry.register(
            "text",
            ElementRenderer::handle("span"),
            Some(
                ComponentMeta::new()
                    .in_namespace(NAMESPACE)
                    .with_label("Text")
                    .with_icon("type")
                    .with_category("Basic")
                    .with_input(InputDescriptor::new("text", InputType::String).with_label("Content").required())
                    .with_default_props(json!({ "text": "Text" })),
            ),
        );

        registry.register(
            "button",
            ElementRenderer::handle("button"),
            Some(
                ComponentMeta::new()
                    .in_namespace(NAMESPACE)
                    .with_label("Button")
                    .with_icon("square")
                    .with_category("Basic")
                    .with_input(
                        InputDescriptor::new("variant", InputType::Enum)
                            .with_option("Primary", json!("primary"))
                            .with_option("Secondary", json!("secondary"))
                            .with_default(json!("primary")),
                    )
                    .with_input(InputDescriptor::new("disabled", InputType::Boolean).advanced())
                    .with_default_children(json!("Click me")),
            ),
        );

        registry.register(
            "input",
            ElementRenderer::handle("input"),
            Some(
                ComponentMeta::new()
                    .in_namespace(NAMESPACE)
                    .with_label("Input")
                    .with_icon("text-cursor")
                    .with_category("Form")
                    .with_input(InputDescriptor::new("name", InputType::String).required())
                    .with_input(InputDescriptor::new("placeholder", InputType::String))
                    .with_input(InputDescriptor::new("maxLength", InputType::Number).advanced()),
            ),
        );

        Ok(())
    }

    async fn on_load(&self) -> Result<(), PluginError> {
        info!("Core widgets available under '{}'", NAMESPACE);
        Ok(())
    }
}
