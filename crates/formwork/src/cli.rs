use formwork_core::component_registry::{ComponentRegistry, DynRenderer};
use formwork_core::plugin_system::PluginSystem;

/// One line per registered key: `<key> <label>`.
///
/// With a namespace, only that namespace's qualified keys are listed.
pub fn component_lines(registry: &ComponentRegistry<DynRenderer>, namespace: Option<&str>) -> Vec<String> {
    let keys = match namespace {
        Some(ns) => registry
            .all_keys()
            .into_iter()
            .filter(|key| key.namespace() == Some(ns))
            .collect(),
        None => registry.all_keys(),
    };

    keys.iter()
        .map(|key| {
            let label = registry
                .get_config(key.component_type(), key.namespace())
                .map(|config| config.display_label())
                .unwrap_or_default();
            format!("{:<16} {}", key.to_string(), label)
        })
        .collect()
}

/// `name version` per loaded plugin, in load order
pub fn plugin_lines(plugins: &PluginSystem<DynRenderer>) -> Vec<String> {
    plugins
        .loaded_plugins()
        .iter()
        .filter_map(|name| plugins.get_plugin(name))
        .map(|plugin| format!("{} {}", plugin.name(), plugin.version()))
        .collect()
}
