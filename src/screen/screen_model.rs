use crate::component::dynamic::DynamicValue;
use crate::screen::registry::Registry;

/// A page model for one screen of the application.
///
/// A screen model is a stateless descriptor: it is re-instantiated on
/// demand and exists only to be introspected for its identifier and its
/// declared components. `IDENTIFIER` must be unique across the app; it
/// is the marker the navigator waits on to prove the screen is visible.
pub trait Screen: Default {
    /// Unique identifier attached to the screen root so navigation can
    /// assert that the screen is on screen.
    const IDENTIFIER: &'static str;

    /// The component registry declared for this screen, keyed by
    /// component tag. Built fresh on each call; screens carry no state.
    fn components(&self) -> Registry {
        Registry::default()
    }
}

/// Computes the fully qualified identifier for a static or
/// scroll-container component declared under `key` on screen `S`.
pub fn resolve<S: Screen>(key: &str) -> Option<String> {
    S::default().components().resolve(key)
}

/// Computes the fully qualified identifier for the dynamic component
/// declared under `key` on screen `S`, supplemented with `value`.
pub fn resolve_dynamic<S: Screen>(key: &str, value: impl Into<DynamicValue>) -> Option<String> {
    S::default().components().resolve_dynamic(key, value)
}
