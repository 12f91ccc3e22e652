use std::fmt;

use crate::kernel::constants::QUALIFIED_KEY_SEPARATOR;

/// Composite key identifying a registered component.
///
/// Keys are kept as a `(namespace, type)` pair instead of a concatenated
/// string, so a component type that itself contains the separator can never
/// collide with a namespaced key. The string form is only produced for display
/// and enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentKey {
    namespace: Option<String>,
    component_type: String,
}

impl ComponentKey {
    /// Key for an un-namespaced component type (the bare alias).
    pub fn bare(component_type: impl Into<String>) -> Self {
        Self {
            namespace: None,
            component_type: component_type.into(),
        }
    }

    /// Key for a component type registered under a namespace.
    pub fn qualified(namespace: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            component_type: component_type.into(),
        }
    }

    /// Builds a key from an optional namespace. An empty namespace is treated as absent.
    pub fn new(component_type: impl Into<String>, namespace: Option<&str>) -> Self {
        match normalize_namespace(namespace) {
            Some(ns) => Self::qualified(ns, component_type),
            None => Self::bare(component_type),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn component_type(&self) -> &str {
        &self.component_type
    }

    pub fn is_qualified(&self) -> bool {
        self.namespace.is_some()
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}{}{}", ns, QUALIFIED_KEY_SEPARATOR, self.component_type),
            None => write!(f, "{}", self.component_type),
        }
    }
}

/// Empty namespaces count as "no namespace".
pub(crate) fn normalize_namespace(namespace: Option<&str>) -> Option<&str> {
    namespace.filter(|ns| !ns.is_empty())
}
