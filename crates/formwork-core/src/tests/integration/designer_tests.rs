#![cfg(test)]

use std::sync::Arc;

use serde_json::json;

use crate::component_registry::{ComponentRegistry, DynRenderer};
use crate::plugin_system::{Plugin, PluginSystem};

use super::common::{element_of, FormsPlugin, ThemePlugin};

async fn loaded_registry() -> ComponentRegistry<DynRenderer> {
    let system = PluginSystem::new();
    let mut registry = ComponentRegistry::new();
    // Given dependent first; load_all orders them
    let plugins: Vec<Arc<dyn Plugin<DynRenderer>>> =
        vec![Arc::new(ThemePlugin { fail_on_load: false }), Arc::new(FormsPlugin::new())];
    system.load_all(plugins, &mut registry).await.unwrap();
    registry
}

#[tokio::test]
async fn test_renderer_handles_are_returned_verbatim() {
    let registry = loaded_registry().await;

    assert_eq!(element_of(&registry, "text-field", None), Some("input"));
    assert_eq!(element_of(&registry, "submit", Some("forms")), Some("button"));
    assert_eq!(element_of(&registry, "submit", Some("theme")), Some("styled-button"));
    // Bare alias follows the most recent registration
    assert_eq!(element_of(&registry, "submit", None), Some("styled-button"));
}

#[tokio::test]
async fn test_palette_grouping() {
    let registry = loaded_registry().await;
    let palette = registry.configs_by_category();

    let categories: Vec<_> = palette.keys().copied().collect();
    assert_eq!(categories, vec![Some("Inputs"), Some("Actions")]);

    let actions: Vec<_> = palette[&Some("Actions")].iter().map(|c| c.display_label()).collect();
    assert_eq!(actions, vec!["Styled submit"]);
}

#[tokio::test]
async fn test_enumeration_lists_aliases_and_qualified_keys() {
    let registry = loaded_registry().await;

    assert_eq!(
        registry.all_types(),
        vec!["text-field", "submit", "forms:text-field", "forms:submit", "theme:submit"]
    );
    assert_eq!(registry.namespace_types("forms"), vec!["text-field", "submit"]);
}

#[tokio::test]
async fn test_metadata_exports_as_designer_json() {
    let registry = loaded_registry().await;
    let config = registry.get_config("text-field", Some("forms")).unwrap();

    let exported = serde_json::to_value(config.meta()).unwrap();
    assert_eq!(exported["namespace"], json!("forms"));
    assert_eq!(exported["label"], json!("Text field"));
    assert_eq!(exported["inputs"][0]["name"], json!("placeholder"));
    assert_eq!(exported["inputs"][0]["type"], json!("string"));
    assert_eq!(exported["inputs"][1]["defaultValue"], json!(false));

    let submit = registry.get_config("submit", Some("forms")).unwrap();
    assert_eq!(submit.default_children, Some(json!("Submit")));
}
