use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::component::component_model::ScrollContainer;
use crate::component::dynamic::DynamicValue;
use crate::failure::{AutomationError, CallSite};
use crate::navigate::navigator::Navigator;
use crate::screen::screen_model::Screen;
use crate::session::driver::{DragGesture, ElementQuery};
use crate::session::session::Session;
use crate::trace::trace::TraceEvent;

/// Direction the content should move toward the viewport. Scrolling
/// `Down` reveals content below the fold, so the drag gesture itself
/// travels upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

const PRESS_SECS: f64 = 0.1;
const HOLD_SECS: f64 = 0.1;

/// The drag path for one scroll gesture, in coordinates normalized to
/// the container's bounds. Start positions are inset from the edges so
/// the gesture does not land in regions the platform reserves for edge
/// swipes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScrollTransaction {
    from: (f64, f64),
    to: (f64, f64),
}

impl ScrollTransaction {
    fn vertical(start: f64, end: f64) -> Self {
        ScrollTransaction {
            from: (0.5, start),
            to: (0.5, end),
        }
    }

    fn horizontal(start: f64, end: f64) -> Self {
        ScrollTransaction {
            from: (start, 0.5),
            to: (end, 0.5),
        }
    }

    pub(crate) fn new(direction: ScrollDirection) -> Self {
        match direction {
            ScrollDirection::Up => Self::vertical(0.25, 1.0),
            ScrollDirection::Down => Self::vertical(0.9, 0.0),
            ScrollDirection::Left => Self::horizontal(0.25, 1.0),
            ScrollDirection::Right => Self::horizontal(0.9, 0.0),
        }
    }

    pub(crate) fn gesture(&self) -> DragGesture {
        DragGesture {
            from: self.from,
            to: self.to,
            press_secs: PRESS_SECS,
            hold_secs: HOLD_SECS,
        }
    }
}

/// Scrolls inside `container` in the given direction until `target`
/// comes into existence or `timeout` elapses.
///
/// If the target already exists, no gesture is issued and the container
/// is not resolved at all. Otherwise the container is awaited, then one
/// drag per iteration, re-checking existence after each, until the
/// wall-clock deadline passes.
#[track_caller]
pub fn scroll_until_visible(
    session: &mut Session,
    container: &ScrollContainer,
    target: &ElementQuery,
    direction: ScrollDirection,
    timeout: Duration,
) -> Result<(), AutomationError> {
    let site = CallSite::here();
    scroll_until_visible_at(session, container, target, direction, timeout, site)
}

pub(crate) fn scroll_until_visible_at(
    session: &mut Session,
    container: &ScrollContainer,
    target: &ElementQuery,
    direction: ScrollDirection,
    timeout: Duration,
    site: CallSite,
) -> Result<(), AutomationError> {
    // Fast path: a target that already exists needs no scrolling, so
    // the container is not even looked up.
    if session.exists(target)? {
        return Ok(());
    }

    let container_query = ElementQuery::identifier(&container.id);
    let await_timeout = session.config().await_timeout;
    let interval = session.config().poll_interval;
    session.await_exists_at(
        &container_query,
        await_timeout,
        Some(format!("Scroll container not found: \"{}\"", container.id)),
        site,
    )?;

    let gesture = ScrollTransaction::new(direction).gesture();
    let deadline = Instant::now() + timeout;
    let mut ordinal: u32 = 0;

    loop {
        if session.exists(target)? {
            return Ok(());
        }
        if Instant::now() >= deadline {
            break;
        }
        ordinal += 1;
        session.drag(&container_query, &gesture)?;
        session.record(
            TraceEvent::new("gesture_issued")
                .with_target(&container.id)
                .with_ordinal(ordinal),
        );
        thread::sleep(interval);
    }

    Err(session.fail(AutomationError::ScrollTimeout {
        target: target.describe(),
        container: container.id.clone(),
        site,
    }))
}

impl<S: Screen> Navigator<S> {
    /// Scrolls the scroll container declared under `container_key`
    /// until the static component declared under `target_key` exists.
    #[track_caller]
    pub fn scroll_to(
        &self,
        session: &mut Session,
        direction: ScrollDirection,
        target_key: &str,
        container_key: &str,
    ) -> Result<(), AutomationError> {
        let site = CallSite::here();
        let registry = S::default().components();
        let Some(target_id) = registry.resolve(target_key) else {
            return Err(session.fail(unknown_component::<S>(target_key, site)));
        };
        self.scroll_to_id(session, direction, target_id, container_key, site)
    }

    /// Scrolls the scroll container declared under `container_key`
    /// until the dynamic component declared under `target_key`,
    /// resolved with `value`, exists.
    #[track_caller]
    pub fn scroll_to_value(
        &self,
        session: &mut Session,
        direction: ScrollDirection,
        target_key: &str,
        value: impl Into<DynamicValue>,
        container_key: &str,
    ) -> Result<(), AutomationError> {
        let site = CallSite::here();
        let registry = S::default().components();
        let Some(target_id) = registry.resolve_dynamic(target_key, value) else {
            return Err(session.fail(unknown_component::<S>(target_key, site)));
        };
        self.scroll_to_id(session, direction, target_id, container_key, site)
    }

    fn scroll_to_id(
        &self,
        session: &mut Session,
        direction: ScrollDirection,
        target_id: String,
        container_key: &str,
        site: CallSite,
    ) -> Result<(), AutomationError> {
        let registry = S::default().components();
        let Some(container) = registry.scroll(container_key).cloned() else {
            return Err(session.fail(unknown_component::<S>(container_key, site)));
        };
        let target = ElementQuery::identifier(target_id);
        let timeout = session.config().scroll_timeout;
        scroll_until_visible_at(session, &container, &target, direction, timeout, site)
    }
}

fn unknown_component<S: Screen>(key: &str, site: CallSite) -> AutomationError {
    AutomationError::UnknownComponent {
        screen: S::IDENTIFIER.to_string(),
        key: key.to_string(),
        site,
    }
}
