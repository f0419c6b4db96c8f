//! The declaration surface exposed to application view code.
//!
//! View code tags its rendered elements with the identifiers a screen
//! model declares. The screen root gets a dedicated invisible marker
//! carrying the screen identifier, so the assignment never shadows the
//! identifiers of descendant elements.

use crate::component::component_model::Component;
use crate::screen::registry::ComponentEntry;
use crate::screen::screen_model::Screen;

/// The marker element a rendered screen root must carry for navigation
/// assertions to find it.
pub fn screen_marker<S: Screen>() -> Component {
    Component::new(S::IDENTIFIER)
}

/// Every (key, identifier) assignment the view layer must make for the
/// statically addressable elements of `S`: static components and scroll
/// containers. Dynamic components are resolved per value at render
/// time; tabs carry no settable identifier at all.
///
/// Sorted by key so the output is stable for snapshotting and seeding.
pub fn assignments<S: Screen>() -> Vec<(String, String)> {
    let registry = S::default().components();
    let mut out: Vec<(String, String)> = registry
        .entries()
        .filter_map(|(key, entry)| match entry {
            ComponentEntry::Static(c) => Some((key.to_string(), c.id.clone())),
            ComponentEntry::Scroll(s) => Some((key.to_string(), s.id.clone())),
            ComponentEntry::Dynamic(_) | ComponentEntry::Tab(_) => None,
        })
        .collect();
    out.sort();
    out
}
