//! # Formwork Kernel
//!
//! Wiring layer of the framework core. [`bootstrap::Application`] owns one
//! component registry and one plugin system, built from a
//! [`FrameworkConfig`](crate::config::FrameworkConfig), and hands them out by
//! reference. There is no process-wide instance; hosts create as many
//! applications as they need.
//!
//! [`error::Error`] is the umbrella error type wrapping the plugin system and
//! configuration errors.
pub mod bootstrap;
pub mod constants;
pub mod error;
