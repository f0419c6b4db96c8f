use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::component::component_model::Component;
use crate::component::dynamic::DynamicValue;
use crate::component::tab::{TabComponent, TabQuery};
use crate::failure::{AutomationError, CallSite};
use crate::screen::screen_model::Screen;
use crate::session::driver::{DragGesture, Driver, ElementQuery};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

/// Per-session tunables. Timeouts are wall-clock deadlines checked on
/// each poll iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Deadline for existence waits. Default 10s.
    pub await_timeout: Duration,

    /// Deadline for the scroll-search loop. Default 30s.
    pub scroll_timeout: Duration,

    /// Sleep between existence polls. Default 100ms.
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            await_timeout: Duration::from_secs(10),
            scroll_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(100),
        }
    }
}

/// The automation session for one test run: the single live handle to
/// the application under test, created once and passed explicitly
/// through every lookup, wait, and navigation call.
///
/// All waiting here is fail-fast: a missed deadline is reported to the
/// trace channel and returned as an error, never swallowed.
pub struct Session {
    driver: Box<dyn Driver>,
    config: SessionConfig,
    trace: Option<TraceLogger>,
}

impl Session {
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Session {
            driver,
            config: SessionConfig::default(),
            trace: None,
        }
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach a JSONL trace sink. See [`TraceLogger`].
    pub fn with_trace(mut self, path: impl AsRef<Path>) -> Self {
        self.trace = Some(TraceLogger::new(path));
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub(crate) fn record(&self, event: TraceEvent) {
        if let Some(trace) = &self.trace {
            trace.log(&event);
        }
    }

    /// Report a failure to the trace channel, then hand it back for
    /// propagation.
    pub(crate) fn fail(&self, error: AutomationError) -> AutomationError {
        let mut event = TraceEvent::new("failure").with_message(error.to_string());
        if let Some(site) = error.site() {
            event = event.with_site(site);
        }
        self.record(event);
        error
    }

    /// Launch the application under test.
    pub fn launch(&mut self) -> Result<(), AutomationError> {
        self.driver.launch()?;
        self.record(TraceEvent::new("session_launched"));
        Ok(())
    }

    /// Query construction for a component. Non-blocking; existence is
    /// not asserted.
    pub fn find(&self, component: &Component) -> ElementQuery {
        ElementQuery::identifier(&component.id)
    }

    /// One existence check, no waiting.
    pub fn exists(&mut self, query: &ElementQuery) -> Result<bool, AutomationError> {
        Ok(self.driver.exists(query)?)
    }

    /// Polls until the queried element exists or `timeout` elapses.
    /// Always checks at least once; returns no earlier than the
    /// deadline when the element never appears.
    fn poll_exists(&mut self, query: &ElementQuery, timeout: Duration) -> Result<bool, AutomationError> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.driver.exists(query)? {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            thread::sleep(self.config.poll_interval);
        }
    }

    /// Waits for the queried element to exist, failing fast at the
    /// deadline with an identifier-based message.
    #[track_caller]
    pub fn await_exists(&mut self, query: &ElementQuery, timeout: Duration) -> Result<(), AutomationError> {
        let site = CallSite::here();
        self.await_exists_at(query, timeout, None, site)
    }

    /// Like [`Session::await_exists`], with a caller-supplied failure
    /// message.
    #[track_caller]
    pub fn await_exists_with(
        &mut self,
        query: &ElementQuery,
        timeout: Duration,
        message: &str,
    ) -> Result<(), AutomationError> {
        let site = CallSite::here();
        self.await_exists_at(query, timeout, Some(message.to_string()), site)
    }

    pub(crate) fn await_exists_at(
        &mut self,
        query: &ElementQuery,
        timeout: Duration,
        message: Option<String>,
        site: CallSite,
    ) -> Result<(), AutomationError> {
        let started = Instant::now();
        let found = self.poll_exists(query, timeout)?;
        self.record(
            TraceEvent::new("element_awaited")
                .with_target(query.describe())
                .with_outcome(if found { "found" } else { "timed_out" })
                .with_elapsed(started.elapsed()),
        );
        if found {
            Ok(())
        } else {
            Err(self.fail(AutomationError::NotFound {
                identifier: query.describe(),
                message,
                timeout,
                site,
            }))
        }
    }

    /// Waits for the component's element and taps it. Waiting first is
    /// the point: tapping elements that are not there yet is a common
    /// source of flaky failures in slow execution environments.
    #[track_caller]
    pub fn tap(&mut self, component: &Component) -> Result<(), AutomationError> {
        let site = CallSite::here();
        let query = self.find(component);
        self.tap_query_at(&query, site)
    }

    /// Waits for the queried element and taps it.
    #[track_caller]
    pub fn tap_query(&mut self, query: &ElementQuery) -> Result<(), AutomationError> {
        let site = CallSite::here();
        self.tap_query_at(query, site)
    }

    pub(crate) fn tap_query_at(
        &mut self,
        query: &ElementQuery,
        site: CallSite,
    ) -> Result<(), AutomationError> {
        let timeout = self.config.await_timeout;
        self.await_exists_at(query, timeout, None, site)?;
        self.driver.tap(query)?;
        self.record(TraceEvent::new("tapped").with_target(query.describe()));
        Ok(())
    }

    /// Dispatch one drag gesture inside the queried container.
    pub fn drag(
        &mut self,
        container: &ElementQuery,
        gesture: &DragGesture,
    ) -> Result<(), AutomationError> {
        self.driver.drag(container, gesture)?;
        Ok(())
    }

    /// Polls for the screen's root marker without failing; the
    /// navigator uses this to distinguish "absent" from "broken".
    pub(crate) fn screen_id_visible(
        &mut self,
        identifier: &str,
        timeout: Duration,
    ) -> Result<bool, AutomationError> {
        let query = ElementQuery::identifier(identifier);
        let started = Instant::now();
        let found = self.poll_exists(&query, timeout)?;
        self.record(
            TraceEvent::new("screen_checked")
                .with_target(identifier)
                .with_outcome(if found { "visible" } else { "absent" })
                .with_elapsed(started.elapsed()),
        );
        Ok(found)
    }

    /// Asserts that screen `S` is visible within `timeout`.
    #[track_caller]
    pub fn assert_screen<S: Screen>(&mut self, timeout: Duration) -> Result<(), AutomationError> {
        let site = CallSite::here();
        self.assert_screen_id_at(S::IDENTIFIER, timeout, site)
    }

    /// Asserts that the screen marked by `identifier` is visible.
    #[track_caller]
    pub fn assert_screen_id(
        &mut self,
        identifier: &str,
        timeout: Duration,
    ) -> Result<(), AutomationError> {
        let site = CallSite::here();
        self.assert_screen_id_at(identifier, timeout, site)
    }

    pub(crate) fn assert_screen_id_at(
        &mut self,
        identifier: &str,
        timeout: Duration,
        site: CallSite,
    ) -> Result<(), AutomationError> {
        let query = ElementQuery::identifier(identifier);
        let message = format!("Screen not found matching identifier: \"{}\"", identifier);
        self.await_exists_at(&query, timeout, Some(message), site)
    }

    /// Waits for the static component declared under `key` on screen
    /// `S` and returns its query.
    #[track_caller]
    pub fn element<S: Screen>(&mut self, key: &str) -> Result<ElementQuery, AutomationError> {
        let site = CallSite::here();
        let query = self.assumed_element_at::<S>(key, site)?;
        let timeout = self.config.await_timeout;
        self.await_exists_at(&query, timeout, None, site)?;
        Ok(query)
    }

    /// Waits for the dynamic component declared under `key` on screen
    /// `S`, resolved with `value`, and returns its query.
    #[track_caller]
    pub fn element_value<S: Screen>(
        &mut self,
        key: &str,
        value: impl Into<DynamicValue>,
    ) -> Result<ElementQuery, AutomationError> {
        let site = CallSite::here();
        let registry = S::default().components();
        let Some(id) = registry.resolve_dynamic(key, value) else {
            return Err(self.fail(AutomationError::UnknownComponent {
                screen: S::IDENTIFIER.to_string(),
                key: key.to_string(),
                site,
            }));
        };
        let query = ElementQuery::identifier(id);
        let timeout = self.config.await_timeout;
        self.await_exists_at(&query, timeout, None, site)?;
        Ok(query)
    }

    /// Query for a declared component without waiting for it to exist.
    /// Useful as a scroll-search target, where non-existence is the
    /// expected starting state.
    #[track_caller]
    pub fn assumed_element<S: Screen>(&self, key: &str) -> Result<ElementQuery, AutomationError> {
        let site = CallSite::here();
        self.assumed_element_at::<S>(key, site)
    }

    fn assumed_element_at<S: Screen>(
        &self,
        key: &str,
        site: CallSite,
    ) -> Result<ElementQuery, AutomationError> {
        let registry = S::default().components();
        match registry.resolve(key) {
            Some(id) => Ok(ElementQuery::identifier(id)),
            None => Err(self.fail(AutomationError::UnknownComponent {
                screen: S::IDENTIFIER.to_string(),
                key: key.to_string(),
                site,
            })),
        }
    }

    /// Resolves a tab component into a query against the live tab bar.
    ///
    /// An index outside `[0, tab_bar_count)` is structurally impossible
    /// rather than not-yet-existing, so it fails immediately with no
    /// waiting. Name-based tabs defer matching to lookup time.
    #[track_caller]
    pub fn tab_element(&mut self, tab: &TabComponent) -> Result<ElementQuery, AutomationError> {
        let site = CallSite::here();
        self.tab_element_at(tab, site)
    }

    pub(crate) fn tab_element_at(
        &mut self,
        tab: &TabComponent,
        site: CallSite,
    ) -> Result<ElementQuery, AutomationError> {
        match tab.query() {
            TabQuery::Index(index) => {
                let count = self.driver.tab_bar_count()?;
                if index >= count {
                    return Err(self.fail(AutomationError::TabOutOfBounds {
                        name: tab.name.clone(),
                        index,
                        count,
                        site,
                    }));
                }
                Ok(ElementQuery::TabIndex { index })
            }
            TabQuery::Name(name) => Ok(ElementQuery::TabName { name }),
        }
    }

    /// Number of buttons currently in the platform tab bar.
    pub fn tab_bar_count(&mut self) -> Result<usize, AutomationError> {
        Ok(self.driver.tab_bar_count()?)
    }
}
