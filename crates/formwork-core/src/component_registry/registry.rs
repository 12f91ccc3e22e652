use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::component_registry::component::{ComponentConfig, ComponentMeta};
use crate::component_registry::key::{normalize_namespace, ComponentKey};

/// Result of a `register` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The key was not registered before
    Inserted,
    /// An existing entry under the same key was overwritten
    Replaced,
}

/// Keyed store of component renderers and their design-time metadata.
///
/// Two maps back the registry:
/// - `qualified` holds namespaced registrations keyed by `(namespace, type)`;
/// - `aliases` holds, for every type, the entry from the most recent
///   `register` call for that type, namespaced or not.
///
/// Lookups with a namespace only consult `qualified`; lookups without one only
/// consult `aliases`. Entries are never removed.
pub struct ComponentRegistry<R> {
    qualified: IndexMap<ComponentKey, Arc<ComponentConfig<R>>>,
    aliases: IndexMap<String, Arc<ComponentConfig<R>>>,
    /// Set on shadows only: entries registered since the shadow was taken, in order
    journal: Option<Vec<Arc<ComponentConfig<R>>>>,
}

impl<R> fmt::Debug for ComponentRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("types", &self.all_types())
            .finish()
    }
}

impl<R> Default for ComponentRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ComponentRegistry<R> {
    /// Create a new, empty registry
    pub fn new() -> Self {
        Self {
            qualified: IndexMap::new(),
            aliases: IndexMap::new(),
            journal: None,
        }
    }

    /// Copy of this registry that records what is registered into it.
    ///
    /// Reads see everything registered here so far. Nothing reaches this
    /// registry until the shadow is passed to [`commit_shadow`](Self::commit_shadow).
    /// Renderers are shared, not cloned.
    pub fn shadow(&self) -> Self {
        Self {
            qualified: self.qualified.clone(),
            aliases: self.aliases.clone(),
            journal: Some(Vec::new()),
        }
    }

    /// Replay the registrations recorded by a shadow, in their original order.
    ///
    /// Logs exactly what the same `register` calls made here directly would
    /// have logged. A registry that is not a shadow is merged with
    /// [`merge_from`](Self::merge_from) instead.
    pub fn commit_shadow(&mut self, shadow: ComponentRegistry<R>) {
        match shadow.journal {
            Some(journal) => {
                for entry in journal {
                    self.insert_entry(entry);
                }
            }
            None => self.merge_from(shadow),
        }
    }

    /// Register a renderer under `component_type`, optionally namespaced via `meta`.
    ///
    /// Re-registering an existing key logs a warning and overwrites it. The bare
    /// alias for `component_type` is always repointed at the new entry.
    pub fn register(
        &mut self,
        component_type: impl Into<String>,
        renderer: R,
        meta: Option<ComponentMeta>,
    ) -> RegisterOutcome {
        let component_type = component_type.into();
        debug_assert!(!component_type.is_empty(), "component type must not be empty");

        let entry = Arc::new(ComponentConfig::new(
            component_type,
            renderer,
            meta.unwrap_or_default(),
        ));
        self.insert_entry(entry)
    }

    fn insert_entry(&mut self, entry: Arc<ComponentConfig<R>>) -> RegisterOutcome {
        if let Some(journal) = self.journal.as_mut() {
            journal.push(Arc::clone(&entry));
        }
        // A shadow stays quiet; the commit logs
        let recording = self.journal.is_some();
        let key = entry.key();
        let replaced = if key.is_qualified() {
            self.qualified.insert(key.clone(), Arc::clone(&entry)).is_some()
        } else {
            self.aliases.contains_key(key.component_type())
        };

        if !recording {
            if replaced {
                warn!("Component '{}' is already registered; overwriting the previous registration", key);
            } else {
                debug!("Registered component '{}'", key);
            }
        }

        self.aliases.insert(entry.component_type.clone(), entry);

        if replaced {
            RegisterOutcome::Replaced
        } else {
            RegisterOutcome::Inserted
        }
    }

    fn lookup(&self, component_type: &str, namespace: Option<&str>) -> Option<&Arc<ComponentConfig<R>>> {
        match normalize_namespace(namespace) {
            // Strict: no fallback to the bare alias
            Some(ns) => self.qualified.get(&ComponentKey::qualified(ns, component_type)),
            None => self.aliases.get(component_type),
        }
    }

    /// Resolve a renderer handle
    pub fn get(&self, component_type: &str, namespace: Option<&str>) -> Option<&R> {
        self.lookup(component_type, namespace).map(|entry| &entry.renderer)
    }

    /// Check whether a component is registered, using the same policy as `get`
    pub fn has(&self, component_type: &str, namespace: Option<&str>) -> bool {
        self.lookup(component_type, namespace).is_some()
    }

    /// Get the full entry (renderer and metadata), using the same policy as `get`
    pub fn get_config(&self, component_type: &str, namespace: Option<&str>) -> Option<&ComponentConfig<R>> {
        self.lookup(component_type, namespace).map(|entry| entry.as_ref())
    }

    /// Shared handle to an entry, for callers that outlive a borrow of the registry
    pub fn get_shared(&self, component_type: &str, namespace: Option<&str>) -> Option<Arc<ComponentConfig<R>>> {
        self.lookup(component_type, namespace).cloned()
    }

    /// Every stored key: bare aliases first, then qualified keys.
    ///
    /// A namespaced registration shows up twice, once per map.
    pub fn all_keys(&self) -> Vec<ComponentKey> {
        self.aliases
            .keys()
            .map(|t| ComponentKey::bare(t.clone()))
            .chain(self.qualified.keys().cloned())
            .collect()
    }

    /// String form of `all_keys`, e.g. `["a", "b", "ns:b"]`
    pub fn all_types(&self) -> Vec<String> {
        self.all_keys().iter().map(ToString::to_string).collect()
    }

    /// Every stored entry, in the same order as `all_keys`
    pub fn all_configs(&self) -> Vec<&ComponentConfig<R>> {
        self.aliases
            .values()
            .chain(self.qualified.values())
            .map(|entry| entry.as_ref())
            .collect()
    }

    /// Types registered under `namespace`
    pub fn namespace_types(&self, namespace: &str) -> Vec<&str> {
        self.qualified
            .keys()
            .filter(|key| key.namespace() == Some(namespace))
            .map(ComponentKey::component_type)
            .collect()
    }

    /// Group the alias view by category for a designer palette.
    ///
    /// Groups keep first-seen order; uncategorized entries are grouped under `None`.
    pub fn configs_by_category(&self) -> IndexMap<Option<&str>, Vec<&ComponentConfig<R>>> {
        let mut groups: IndexMap<Option<&str>, Vec<&ComponentConfig<R>>> = IndexMap::new();
        for entry in self.aliases.values() {
            groups.entry(entry.category.as_deref()).or_default().push(entry.as_ref());
        }
        groups
    }

    /// Number of stored keys (aliases plus qualified keys)
    pub fn len(&self) -> usize {
        self.aliases.len() + self.qualified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty() && self.qualified.is_empty()
    }

    /// Apply everything registered in `other` on top of this registry.
    ///
    /// The end state equals replaying `other`'s registrations here in their
    /// original order: qualified entries overwrite, and each bare alias ends up
    /// pointing at `other`'s most recent entry for that type.
    pub fn merge_from(&mut self, other: ComponentRegistry<R>) {
        for (key, entry) in other.qualified {
            if self.qualified.insert(key.clone(), entry).is_some() {
                warn!("Component '{}' is already registered; overwriting the previous registration", key);
            }
        }
        for (component_type, entry) in other.aliases {
            // Only a bare registration owns the alias as its qualified key
            if entry.namespace.is_none() && self.aliases.contains_key(&component_type) {
                warn!(
                    "Component '{}' is already registered; overwriting the previous registration",
                    component_type
                );
            }
            self.aliases.insert(component_type, entry);
        }
    }
}
