/// Joins an identifier prefix and suffix with `_`, dropping empty
/// segments. A prefix-only or suffix-only input yields the non-empty
/// part with no separator; two empty inputs yield the empty string.
pub fn compose(prefix: &str, suffix: &str) -> String {
    match (prefix.is_empty(), suffix.is_empty()) {
        (false, false) => format!("{}_{}", prefix, suffix),
        (false, true) => prefix.to_string(),
        (true, false) => suffix.to_string(),
        (true, true) => String::new(),
    }
}

/// A logical automation component within the application's view
/// hierarchy: an element with a fully qualified identifier, either
/// declared statically or produced by resolving a
/// [`DynamicComponent`](crate::component::dynamic::DynamicComponent)
/// with a runtime value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component {
    pub id: String,
}

impl Component {
    pub fn new(id: impl Into<String>) -> Self {
        Component { id: id.into() }
    }
}

impl From<&str> for Component {
    fn from(id: &str) -> Self {
        Component::new(id)
    }
}

/// Marks an element as a scrollable region that the scroll-search loop
/// can drag inside. The container's own identifier never shadows its
/// descendants' identities; children stay addressable on their own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScrollContainer {
    pub id: String,
}

impl ScrollContainer {
    pub fn new(id: impl Into<String>) -> Self {
        ScrollContainer { id: id.into() }
    }
}

impl From<&str> for ScrollContainer {
    fn from(id: &str) -> Self {
        ScrollContainer::new(id)
    }
}
