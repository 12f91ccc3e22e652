use async_trait::async_trait;
use serde_json::json;

use formwork_core::component_registry::{
    ComponentExample, ComponentMeta, ComponentRegistry, DynRenderer, InputDescriptor, InputType,
};
use formwork_core::plugin_system::{Plugin, PluginError};

use crate::ElementRenderer;

pub const NAMESPACE: &str = "layout";

/// Grid, card and stack containers. Its examples are built from the core
/// widgets, hence the dependency.
#[derive(Debug, Default)]
pub struct CoreLayoutPlugin;

fn container(label: &str, icon: &str) -> ComponentMeta {
    ComponentMeta::new()
        .in_namespace(NAMESPACE)
        .with_label(label)
        .with_icon(icon)
        .with_category("Layout")
        .with_default_children(json!([]))
}

#[async_trait]
impl Plugin<DynRenderer> for CoreLayoutPlugin {
    fn name(&self) -> &str {
        "core-layout"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn dependencies(&self) -> Vec<String> {
        vec!["core-widgets".to_string()]
    }

    fn register(&self, registry: &mut ComponentRegistry<DynRenderer>) -> Result<(), PluginError> {
        registry.register(
            "grid",
            ElementRenderer::handle("div"),
            Some(
                container("Grid", "layout-grid")
                    .with_input(InputDescriptor::new("columns", InputType::Number).with_default(json!(2)))
                    .with_input(InputDescriptor::new("gap", InputType::Number).advanced())
                    .with_example(ComponentExample {
                        name: "Two buttons".to_string(),
                        description: None,
                        schema: json!({
                            "type": "layout:grid",
                            "props": { "columns": 2 },
                            "children": [
                                { "type": "ui:button", "children": "Save" },
                                { "type": "ui:button", "children": "Cancel" }
                            ]
                        }),
                    }),
            ),
        );

        registry.register(
            "card",
            ElementRenderer::handle("section"),
            Some(container("Card", "panel-top").with_input(InputDescriptor::new("title", InputType::String))),
        );

        registry.register(
            "stack",
            ElementRenderer::handle("div"),
            Some(
                container("Stack", "rows").with_input(
                    InputDescriptor::new("direction", InputType::Enum)
                        .with_option("Vertical", json!("vertical"))
                        .with_option("Horizontal", json!("horizontal"))
                        .with_default(json!("vertical")),
                ),
            ),
        );

        Ok(())
    }
}
