//! Built-in Formwork plugins.
//!
//! [`CoreWidgetsPlugin`] registers the basic form widgets under the `ui`
//! namespace and [`CoreLayoutPlugin`] the layout containers under `layout`.
//! Both hand out [`ElementRenderer`] handles, which a host renderer downcasts
//! from the registry's opaque [`DynRenderer`].
use std::sync::Arc;

use formwork_core::component_registry::DynRenderer;
use formwork_core::plugin_system::Plugin;

mod layout;
mod widgets;

pub use layout::CoreLayoutPlugin;
pub use widgets::CoreWidgetsPlugin;

/// Renderer handle naming the HTML element a component renders to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRenderer {
    pub tag: &'static str,
}

impl ElementRenderer {
    pub(crate) fn handle(tag: &'static str) -> DynRenderer {
        Arc::new(ElementRenderer { tag })
    }
}

/// Every plugin shipped with Formwork, in no particular order
pub fn builtin_plugins() -> Vec<Arc<dyn Plugin<DynRenderer>>> {
    let widgets: Arc<dyn Plugin<DynRenderer>> = Arc::new(CoreWidgetsPlugin);
    let layout: Arc<dyn Plugin<DynRenderer>> = Arc::new(CoreLayoutPlugin);
    vec![widgets, layout]
}
