use std::collections::HashMap;

use crate::component::component_model::{Component, ScrollContainer};
use crate::component::dynamic::{DynamicComponent, DynamicValue};
use crate::component::tab::TabComponent;

/// One declared component of a screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentEntry {
    Static(Component),
    Dynamic(DynamicComponent),
    Scroll(ScrollContainer),
    Tab(TabComponent),
}

/// Explicit component registry for a screen model: a mapping from
/// component key to its declared [`ComponentEntry`], built at
/// declaration time. Consumers address components by key rather than
/// by language-level member reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    entries: HashMap<String, ComponentEntry>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ComponentEntry> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ComponentEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The fully qualified identifier for a static or scroll-container
    /// entry. `None` for unknown keys and for entry kinds that carry no
    /// settable identifier (tabs) or need a value (dynamic).
    pub fn resolve(&self, key: &str) -> Option<String> {
        match self.entries.get(key)? {
            ComponentEntry::Static(c) => Some(c.id.clone()),
            ComponentEntry::Scroll(s) => Some(s.id.clone()),
            ComponentEntry::Dynamic(_) | ComponentEntry::Tab(_) => None,
        }
    }

    /// The fully qualified identifier for a dynamic entry supplemented
    /// with `value`.
    pub fn resolve_dynamic(&self, key: &str, value: impl Into<DynamicValue>) -> Option<String> {
        match self.entries.get(key)? {
            ComponentEntry::Dynamic(d) => Some(d.resolve(value).id),
            _ => None,
        }
    }

    pub fn static_component(&self, key: &str) -> Option<&Component> {
        match self.entries.get(key)? {
            ComponentEntry::Static(c) => Some(c),
            _ => None,
        }
    }

    pub fn dynamic(&self, key: &str) -> Option<&DynamicComponent> {
        match self.entries.get(key)? {
            ComponentEntry::Dynamic(d) => Some(d),
            _ => None,
        }
    }

    pub fn scroll(&self, key: &str) -> Option<&ScrollContainer> {
        match self.entries.get(key)? {
            ComponentEntry::Scroll(s) => Some(s),
            _ => None,
        }
    }

    pub fn tab(&self, key: &str) -> Option<&TabComponent> {
        match self.entries.get(key)? {
            ComponentEntry::Tab(t) => Some(t),
            _ => None,
        }
    }
}

pub struct RegistryBuilder {
    entries: HashMap<String, ComponentEntry>,
}

impl RegistryBuilder {
    pub fn static_component(mut self, key: impl Into<String>, id: impl Into<String>) -> Self {
        self.entries
            .insert(key.into(), ComponentEntry::Static(Component::new(id)));
        self
    }

    pub fn dynamic(mut self, key: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.entries
            .insert(key.into(), ComponentEntry::Dynamic(DynamicComponent::new(prefix)));
        self
    }

    pub fn scroll(mut self, key: impl Into<String>, id: impl Into<String>) -> Self {
        self.entries
            .insert(key.into(), ComponentEntry::Scroll(ScrollContainer::new(id)));
        self
    }

    pub fn tab(mut self, key: impl Into<String>, tab: TabComponent) -> Self {
        self.entries.insert(key.into(), ComponentEntry::Tab(tab));
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }
}
