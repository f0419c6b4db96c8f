use serde::{Deserialize, Serialize};

use crate::failure::DriverError;

/// A query describing how to locate one live element in the
/// application's accessibility tree. Queries are descriptions, not
/// cached element references: UI element identity is ephemeral across
/// frames, so the backend re-evaluates the query on every use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementQuery {
    /// Any descendant whose automation identifier equals `id`.
    Identifier { id: String },

    /// The tab bar button at a given ordinal position.
    TabIndex { index: usize },

    /// The tab bar button whose label equals `name`.
    TabName { name: String },
}

impl ElementQuery {
    pub fn identifier(id: impl Into<String>) -> Self {
        ElementQuery::Identifier { id: id.into() }
    }

    /// Human-readable form for failure messages and traces.
    pub fn describe(&self) -> String {
        match self {
            ElementQuery::Identifier { id } => format!("\"{}\"", id),
            ElementQuery::TabIndex { index } => format!("tab[{}]", index),
            ElementQuery::TabName { name } => format!("tab \"{}\"", name),
        }
    }
}

/// One drag gesture inside a container, in coordinates normalized to
/// the container's bounds (0.0–1.0 on each axis).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragGesture {
    pub from: (f64, f64),
    pub to: (f64, f64),

    /// Press-and-hold before the drag starts, in seconds.
    pub press_secs: f64,

    /// Hold at the destination before release, in seconds.
    pub hold_secs: f64,
}

/// The fixed interface to the external UI-automation platform.
///
/// Everything behind this trait is opaque to the engine: how elements
/// are matched, how gestures are synthesized, how the application is
/// launched. Implementations only evaluate queries against the live
/// tree and dispatch interaction requests.
pub trait Driver {
    /// Launch the application under test.
    fn launch(&mut self) -> Result<(), DriverError>;

    /// Whether the queried element currently exists. Non-blocking; the
    /// engine owns all waiting.
    fn exists(&mut self, query: &ElementQuery) -> Result<bool, DriverError>;

    /// Tap the queried element.
    fn tap(&mut self, query: &ElementQuery) -> Result<(), DriverError>;

    /// Perform one drag gesture inside the queried container's bounds.
    fn drag(&mut self, container: &ElementQuery, gesture: &DragGesture) -> Result<(), DriverError>;

    /// Number of buttons currently in the platform tab bar.
    fn tab_bar_count(&mut self) -> Result<usize, DriverError>;
}
