/// Identifies a tab bar item. The platform does not let applications
/// assign identifiers to tab bar buttons, so a tab is addressed by its
/// display label and, optionally, its ordinal position in the bar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TabComponent {
    /// Display name of the tab. Must match the button's label at runtime.
    pub name: String,

    /// Ordinal position within the tab bar, when declared.
    pub index: Option<usize>,
}

impl TabComponent {
    /// A tab looked up by label match.
    pub fn named(name: impl Into<String>) -> Self {
        TabComponent {
            name: name.into(),
            index: None,
        }
    }

    /// A tab looked up by position, keeping the label for diagnostics.
    pub fn at(index: usize, name: impl Into<String>) -> Self {
        TabComponent {
            name: name.into(),
            index: Some(index),
        }
    }

    /// The lookup strategy this tab resolves to. Positional when an
    /// index was declared, label match otherwise. Resolved at lookup
    /// time, not at composition time: there is no identifier string to
    /// compose for a tab.
    pub fn query(&self) -> TabQuery {
        match self.index {
            Some(index) => TabQuery::Index(index),
            None => TabQuery::Name(self.name.clone()),
        }
    }
}

/// How a tab bar button is located in the live bar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TabQuery {
    Index(usize),
    Name(String),
}
