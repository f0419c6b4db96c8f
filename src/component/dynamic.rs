use crate::component::component_model::{Component, compose};

/// The runtime half of a dynamic identifier.
///
/// This is a closed dispatch over the value kinds a suffix can be
/// derived from: plain text, signed and unsigned integers rendered as
/// decimal strings, and an explicit custom hook for anything else
/// (a UUID, a model key) whose native rendering is not the identifier
/// you want.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DynamicValue {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Custom(String),
}

impl DynamicValue {
    /// Explicit hook for types without a built-in conversion.
    pub fn custom(value: impl Into<String>) -> Self {
        DynamicValue::Custom(value.into())
    }

    /// The suffix this value contributes to a composed identifier.
    pub fn render(&self) -> String {
        match self {
            DynamicValue::Text(s) => s.clone(),
            DynamicValue::Signed(n) => n.to_string(),
            DynamicValue::Unsigned(n) => n.to_string(),
            DynamicValue::Custom(s) => s.clone(),
        }
    }
}

impl From<&str> for DynamicValue {
    fn from(s: &str) -> Self {
        DynamicValue::Text(s.to_string())
    }
}

impl From<String> for DynamicValue {
    fn from(s: String) -> Self {
        DynamicValue::Text(s)
    }
}

impl From<i32> for DynamicValue {
    fn from(n: i32) -> Self {
        DynamicValue::Signed(n as i64)
    }
}

impl From<i64> for DynamicValue {
    fn from(n: i64) -> Self {
        DynamicValue::Signed(n)
    }
}

impl From<u32> for DynamicValue {
    fn from(n: u32) -> Self {
        DynamicValue::Unsigned(n as u64)
    }
}

impl From<u64> for DynamicValue {
    fn from(n: u64) -> Self {
        DynamicValue::Unsigned(n)
    }
}

impl From<usize> for DynamicValue {
    fn from(n: usize) -> Self {
        DynamicValue::Unsigned(n as u64)
    }
}

/// A component whose identifier is only partially knowable at
/// declaration time: a static prefix that gets supplemented with a
/// runtime value. Useful for list rows, where each row can carry a
/// fully unique identifier when the value is a row index or model key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DynamicComponent {
    pub prefix: String,
}

impl DynamicComponent {
    pub fn new(prefix: impl Into<String>) -> Self {
        DynamicComponent {
            prefix: prefix.into(),
        }
    }

    /// Resolves a fully qualified [`Component`] by combining the prefix
    /// with the rendered value. Empty segments degrade gracefully; this
    /// never fails, it only produces better or worse identifiers.
    pub fn resolve(&self, value: impl Into<DynamicValue>) -> Component {
        Component::new(compose(&self.prefix, &value.into().render()))
    }
}

impl From<&str> for DynamicComponent {
    fn from(prefix: &str) -> Self {
        DynamicComponent::new(prefix)
    }
}
