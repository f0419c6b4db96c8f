use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use crate::failure::{AutomationError, CallSite, Side};
use crate::screen::screen_model::Screen;
use crate::session::session::Session;
use crate::trace::trace::TraceEvent;

/// Where a navigation step currently stands. `Failed` absorbs; the
/// other phases advance strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    Idle,
    SourceAsserted,
    ActionsRun,
    DestinationAsserted,
    Failed,
}

impl NavigationPhase {
    pub fn name(&self) -> &'static str {
        match self {
            NavigationPhase::Idle => "idle",
            NavigationPhase::SourceAsserted => "source_asserted",
            NavigationPhase::ActionsRun => "actions_run",
            NavigationPhase::DestinationAsserted => "destination_asserted",
            NavigationPhase::Failed => "failed",
        }
    }
}

fn record_phase(session: &Session, source: &str, destination: &str, phase: NavigationPhase) {
    session.record(
        TraceEvent::new("navigation_phase")
            .with_outcome(phase.name())
            .with_screens(source, destination),
    );
}

/// The untyped navigation engine shared by the typed [`Navigator`] and
/// the flow runner: assert the source screen, run the transition
/// actions, assert the destination screen. Every assertion failure
/// aborts the step; continuing with an unproven screen state would
/// invalidate everything downstream.
pub(crate) fn perform_navigation<F>(
    session: &mut Session,
    source: &str,
    destination: &str,
    only_if_needed: bool,
    timeout: Duration,
    site: CallSite,
    actions: F,
) -> Result<(), AutomationError>
where
    F: FnOnce(&mut Session) -> Result<(), AutomationError>,
{
    record_phase(session, source, destination, NavigationPhase::Idle);

    if session.screen_id_visible(source, timeout)? {
        record_phase(session, source, destination, NavigationPhase::SourceAsserted);
        if let Err(e) = actions(session) {
            record_phase(session, source, destination, NavigationPhase::Failed);
            return Err(e);
        }
        record_phase(session, source, destination, NavigationPhase::ActionsRun);
    } else if !only_if_needed {
        record_phase(session, source, destination, NavigationPhase::Failed);
        return Err(session.fail(AutomationError::NavigationAssertion {
            side: Side::Source,
            screen: source.to_string(),
            site,
        }));
    }
    // only_if_needed with an absent source: skip the actions and treat
    // the step as already at its destination, which the assertion below
    // still has to prove.

    if !session.screen_id_visible(destination, timeout)? {
        record_phase(session, source, destination, NavigationPhase::Failed);
        return Err(session.fail(AutomationError::NavigationAssertion {
            side: Side::Destination,
            screen: destination.to_string(),
            site,
        }));
    }
    record_phase(session, source, destination, NavigationPhase::DestinationAsserted);
    session.record(TraceEvent::new("navigation_completed").with_screens(source, destination));
    Ok(())
}

/// A composable helper for navigating between screens.
///
/// A navigator is scoped to its `Source` screen and created fresh for
/// each step: [`Navigator::navigate`] consumes one transition and hands
/// back a navigator scoped to the destination, so steps chain without
/// re-declaring where they start. It holds no UI state beyond the
/// only-if-needed flag; elements are freshly queried on every use.
pub struct Navigator<S: Screen> {
    only_if_needed: bool,
    _screen: PhantomData<S>,
}

impl<S: Screen> Default for Navigator<S> {
    fn default() -> Self {
        Navigator::new()
    }
}

// Manual impl: screen models are identified by their IDENTIFIER and
// need not implement Debug themselves.
impl<S: Screen> fmt::Debug for Navigator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("screen", &S::IDENTIFIER)
            .field("only_if_needed", &self.only_if_needed)
            .finish()
    }
}

impl<S: Screen> Navigator<S> {
    pub fn new() -> Self {
        Navigator {
            only_if_needed: false,
            _screen: PhantomData,
        }
    }

    /// A navigator that treats an absent source screen as already at
    /// the destination instead of failing: the actions are skipped and
    /// only the destination assertion runs.
    pub fn if_needed() -> Self {
        Navigator {
            only_if_needed: true,
            _screen: PhantomData,
        }
    }

    pub(crate) fn only_if_needed(&self) -> bool {
        self.only_if_needed
    }

    /// Navigate from `S` to `D` by running `actions` (typically:
    /// locate, await, and tap an element). The source screen's
    /// existence is asserted before the actions and the destination's
    /// after, which is what makes navigators composable and failures
    /// actionable.
    #[track_caller]
    pub fn navigate<D, F>(
        &self,
        session: &mut Session,
        actions: F,
    ) -> Result<Navigator<D>, AutomationError>
    where
        D: Screen,
        F: FnOnce(&mut Session, &S) -> Result<(), AutomationError>,
    {
        let site = CallSite::here();
        let timeout = session.config().await_timeout;
        self.navigate_at(session, timeout, site, actions)
    }

    /// Like [`Navigator::navigate`] with an explicit per-step deadline
    /// for both screen assertions.
    #[track_caller]
    pub fn navigate_with_timeout<D, F>(
        &self,
        session: &mut Session,
        timeout: Duration,
        actions: F,
    ) -> Result<Navigator<D>, AutomationError>
    where
        D: Screen,
        F: FnOnce(&mut Session, &S) -> Result<(), AutomationError>,
    {
        let site = CallSite::here();
        self.navigate_at(session, timeout, site, actions)
    }

    pub(crate) fn navigate_at<D, F>(
        &self,
        session: &mut Session,
        timeout: Duration,
        site: CallSite,
        actions: F,
    ) -> Result<Navigator<D>, AutomationError>
    where
        D: Screen,
        F: FnOnce(&mut Session, &S) -> Result<(), AutomationError>,
    {
        let screen = S::default();
        perform_navigation(
            session,
            S::IDENTIFIER,
            D::IDENTIFIER,
            self.only_if_needed,
            timeout,
            site,
            |session| actions(session, &screen),
        )?;
        Ok(Navigator::new())
    }
}
