//! # Formwork Core
//!
//! Component registry and plugin lifecycle for a visual UI designer. Plugins
//! register renderer handles and design-time metadata into a
//! [`ComponentRegistry`]; the [`PluginSystem`] loads and unloads them while
//! enforcing their dependencies. [`Application`] wires the two together from a
//! [`FrameworkConfig`].
pub mod component_registry;
pub mod config;
pub mod kernel;
pub mod plugin_system;

// Re-export key public types/traits for easier use by the binary and plugins
pub use component_registry::{ComponentConfig, ComponentKey, ComponentMeta, ComponentRegistry, DynRenderer};
pub use config::{ConfigFormat, FrameworkConfig};
pub use kernel::bootstrap::Application;
pub use kernel::error::Error as KernelError;
pub use plugin_system::{Plugin, PluginDefinition, PluginError, PluginSystem, PluginSystemError, RegistrationMode};

#[cfg(test)]
mod tests;
