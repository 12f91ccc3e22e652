//! # Formwork Plugin System
//!
//! Plugins are named bundles of component registrations plus optional
//! lifecycle hooks. This module loads and unloads them against a
//! [`ComponentRegistry`](crate::component_registry::ComponentRegistry),
//! enforcing dependency presence and rolling failed loads back.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`traits`]**: the [`Plugin`] trait and the [`PluginError`] its callbacks return.
//! - **[`definition`]**: [`PluginDefinition`], a closure-backed [`Plugin`] builder.
//! - **[`system`]**: [`PluginSystem`], the lifecycle orchestrator, and
//!   [`RegistrationMode`].
//! - **[`dependency`]**: ordering of plugin batches so dependencies load first.
//! - **[`error`]**: [`PluginSystemError`](error::PluginSystemError).
//!
//! ## Lifecycle
//!
//! A load checks that every dependency is already loaded, runs `register`,
//! records the plugin, then awaits `on_load`. A failure in either callback
//! removes the plugin again and hands the plugin's error back to the caller.
//! An unload is refused while any loaded plugin depends on the target.
pub mod definition;
pub mod dependency;
pub mod error;
pub mod system;
pub mod traits;

pub use definition::PluginDefinition;
pub use error::PluginSystemError;
pub use system::{PluginSystem, RegistrationMode};
pub use traits::{Plugin, PluginError};

// Test module declaration
#[cfg(test)]
mod tests;
