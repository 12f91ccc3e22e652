//! # Formwork Component Registry
//!
//! Maps component type names to opaque renderer handles and the design-time
//! metadata a visual designer needs (label, icon, category, input descriptors,
//! default props and children, examples).
//!
//! ## Key Submodules:
//!
//! - **[`registry`]**: [`ComponentRegistry`], the keyed store itself.
//! - **[`component`]**: entry and metadata types ([`ComponentConfig`], [`ComponentMeta`],
//!   [`InputDescriptor`]).
//! - **[`key`]**: [`ComponentKey`], the `(namespace, type)` composite key.
//!
//! ## Lookup policy
//!
//! A component registered with a namespace is reachable both as `namespace:type`
//! and through the bare `type` alias, which always points at the most recent
//! registration of that type. Lookups that pass a namespace are strict and never
//! fall back to the alias; lookups without one always go through the alias.
pub mod component;
pub mod key;
pub mod registry;

pub use component::{
    ComponentConfig, ComponentExample, ComponentMeta, DynRenderer, InputDescriptor, InputOption,
    InputType,
};
pub use key::ComponentKey;
pub use registry::{ComponentRegistry, RegisterOutcome};
