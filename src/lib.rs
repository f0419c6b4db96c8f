//! Identifier-driven UI-test automation helpers.
//!
//! Application code declares stable automation identifiers for its
//! screens and elements; test code resolves those identifiers into
//! live element queries, waits for existence, and drives navigation
//! between screens with pre/post assertions, with bounded-retry
//! scrolling for targets outside the visible viewport.
//!
//! The platform's element matching, gesture synthesis, and app launch
//! live behind the [`Driver`] trait; everything above it is
//! backend-agnostic.

pub mod cli;
pub mod component;
pub mod failure;
pub mod flow;
pub mod navigate;
pub mod screen;
pub mod session;
pub mod trace;

pub use component::component_model::{Component, ScrollContainer, compose};
pub use component::dynamic::{DynamicComponent, DynamicValue};
pub use component::tab::{TabComponent, TabQuery};
pub use failure::{AutomationError, CallSite, DriverError, Side};
pub use navigate::navigator::{NavigationPhase, Navigator};
pub use navigate::scroll::{ScrollDirection, scroll_until_visible};
pub use screen::registry::{ComponentEntry, Registry};
pub use screen::screen_model::{Screen, resolve, resolve_dynamic};
pub use session::driver::{DragGesture, Driver, ElementQuery};
pub use session::scripted::{ScriptedDriver, TapEffect};
pub use session::session::{Session, SessionConfig};
