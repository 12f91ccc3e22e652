use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::component_registry::key::{normalize_namespace, ComponentKey};

/// Convenience opaque renderer handle for hosts that don't want a concrete type.
///
/// The registry never looks inside it; downcasting is the renderer's business.
pub type DynRenderer = Arc<dyn Any + Send + Sync>;

/// Kind of editor a designer should offer for a component input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    String,
    Number,
    Boolean,
    Enum,
    Array,
    Object,
    Color,
    Date,
    Code,
    File,
    Slot,
}

/// A selectable value for `InputType::Enum` inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputOption {
    pub label: String,
    pub value: Value,
}

/// Describes one configurable property of a component for the designer palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub name: String,
    #[serde(rename = "type", default)]
    pub input_type: InputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InputOption>,
    /// Hidden behind an "advanced" toggle in the designer
    #[serde(default)]
    pub advanced: bool,
}

impl InputDescriptor {
    pub fn new(name: impl Into<String>, input_type: InputType) -> Self {
        Self {
            name: name.into(),
            input_type,
            label: None,
            description: None,
            default_value: None,
            required: false,
            options: Vec::new(),
            advanced: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_option(mut self, label: impl Into<String>, value: Value) -> Self {
        self.options.push(InputOption { label: label.into(), value });
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn advanced(mut self) -> Self {
        self.advanced = true;
        self
    }
}

/// A sample schema snippet shown in the designer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentExample {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: Value,
}

/// Design-time metadata passed alongside a renderer at registration.
///
/// Every field is optional; `ComponentMeta::default()` registers a bare,
/// unlabelled component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<InputDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_props: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_children: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ComponentExample>,
}

impl ComponentMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_input(mut self, input: InputDescriptor) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn with_default_props(mut self, props: Value) -> Self {
        self.default_props = Some(props);
        self
    }

    pub fn with_default_children(mut self, children: Value) -> Self {
        self.default_children = Some(children);
        self
    }

    pub fn with_example(mut self, example: ComponentExample) -> Self {
        self.examples.push(example);
        self
    }
}

/// A registered component: the renderer handle plus its design-time metadata
#[derive(Debug, Clone)]
pub struct ComponentConfig<R> {
    pub component_type: String,
    pub namespace: Option<String>,
    /// Opaque handle forwarded verbatim to the renderer
    pub renderer: R,
    pub label: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
    pub inputs: Vec<InputDescriptor>,
    pub default_props: Option<Value>,
    pub default_children: Option<Value>,
    pub examples: Vec<ComponentExample>,
}

impl<R> ComponentConfig<R> {
    pub(crate) fn new(component_type: String, renderer: R, meta: ComponentMeta) -> Self {
        let namespace = normalize_namespace(meta.namespace.as_deref()).map(str::to_string);
        Self {
            component_type,
            namespace,
            renderer,
            label: meta.label,
            icon: meta.icon,
            category: meta.category,
            inputs: meta.inputs,
            default_props: meta.default_props,
            default_children: meta.default_children,
            examples: meta.examples,
        }
    }

    /// The key this entry was registered under (qualified if it has a namespace)
    pub fn key(&self) -> ComponentKey {
        ComponentKey::new(self.component_type.clone(), self.namespace.as_deref())
    }

    /// Copies the design-time metadata back out, without the renderer
    pub fn meta(&self) -> ComponentMeta {
        ComponentMeta {
            namespace: self.namespace.clone(),
            label: self.label.clone(),
            icon: self.icon.clone(),
            category: self.category.clone(),
            inputs: self.inputs.clone(),
            default_props: self.default_props.clone(),
            default_children: self.default_children.clone(),
            examples: self.examples.clone(),
        }
    }

    /// Label to show in a palette, falling back to the type name
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.component_type)
    }
}
