use crate::component::tab::TabComponent;
use crate::failure::{AutomationError, CallSite};
use crate::navigate::navigator::{Navigator, perform_navigation};
use crate::screen::screen_model::Screen;
use crate::session::session::Session;
use crate::trace::trace::TraceEvent;

impl<S: Screen> Navigator<S> {
    /// Navigate to the screen behind a tab bar button.
    ///
    /// The tab is resolved against the live bar before any waiting, so
    /// a structurally impossible reference (an index past the end of
    /// the bar) fails immediately rather than timing out. The button is
    /// then awaited and tapped inside an ordinary navigation step, with
    /// the destination screen asserted afterwards.
    #[track_caller]
    pub fn navigate_to_tab<D: Screen>(
        &self,
        session: &mut Session,
        tab: &TabComponent,
    ) -> Result<Navigator<D>, AutomationError> {
        let site = CallSite::here();
        self.navigate_to_tab_at(session, tab, site)
    }

    /// Like [`Navigator::navigate_to_tab`], resolving the tab from the
    /// source screen's registry by key.
    #[track_caller]
    pub fn navigate_to_tab_key<D: Screen>(
        &self,
        session: &mut Session,
        key: &str,
    ) -> Result<Navigator<D>, AutomationError> {
        let site = CallSite::here();
        let registry = S::default().components();
        let Some(tab) = registry.tab(key).cloned() else {
            return Err(session.fail(AutomationError::UnknownComponent {
                screen: S::IDENTIFIER.to_string(),
                key: key.to_string(),
                site,
            }));
        };
        self.navigate_to_tab_at(session, &tab, site)
    }

    fn navigate_to_tab_at<D: Screen>(
        &self,
        session: &mut Session,
        tab: &TabComponent,
        site: CallSite,
    ) -> Result<Navigator<D>, AutomationError> {
        let query = session.tab_element_at(tab, site)?;
        let timeout = session.config().await_timeout;
        let name = tab.name.clone();

        perform_navigation(
            session,
            S::IDENTIFIER,
            D::IDENTIFIER,
            self.only_if_needed(),
            timeout,
            site,
            |session| {
                session.tap_query_at(&query, site)?;
                session.record(
                    TraceEvent::new("tab_selected")
                        .with_target(query.describe())
                        .with_message(name),
                );
                Ok(())
            },
        )?;
        Ok(Navigator::new())
    }
}

/// Convenience entry point for tests that start a chain at a tab
/// switch: `navigate_to_tab::<Current, Destination>(&mut session, "second_tab")`.
#[track_caller]
pub fn navigate_to_tab<S: Screen, D: Screen>(
    session: &mut Session,
    key: &str,
) -> Result<Navigator<D>, AutomationError> {
    Navigator::<S>::new().navigate_to_tab_key(session, key)
}
