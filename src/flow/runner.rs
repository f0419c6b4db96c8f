use std::time::Duration;

use crate::component::dynamic::DynamicValue;
use crate::failure::{AutomationError, CallSite};
use crate::flow::flow_model::{DynamicSuffix, FlowResult, FlowSpec, FlowStep, ScreenSpec};
use crate::navigate::navigator::perform_navigation;
use crate::navigate::scroll::scroll_until_visible_at;
use crate::screen::registry::Registry;
use crate::session::driver::ElementQuery;
use crate::session::session::Session;

/// Executes a [`FlowSpec`] step by step against a session, using the
/// same navigation engine the typed API uses. Execution stops at the
/// first failing step.
pub struct FlowRunner;

impl FlowRunner {
    #[track_caller]
    pub fn run(flow: &FlowSpec, session: &mut Session) -> FlowResult {
        let site = CallSite::here();
        for (i, step) in flow.steps.iter().enumerate() {
            if let Err(e) = Self::execute_step(step, flow, session, site) {
                return FlowResult {
                    flow_name: flow.name.clone(),
                    passed: false,
                    steps_run: i + 1,
                    error: Some(format!("Step {} failed: {}", i, e)),
                };
            }
        }
        FlowResult {
            flow_name: flow.name.clone(),
            passed: true,
            steps_run: flow.steps.len(),
            error: None,
        }
    }

    fn execute_step(
        step: &FlowStep,
        flow: &FlowSpec,
        session: &mut Session,
        site: CallSite,
    ) -> Result<(), AutomationError> {
        match step {
            FlowStep::ExpectScreen {
                screen,
                timeout_secs,
            } => {
                let spec = Self::screen(flow, screen, site)?;
                let timeout = timeout_secs
                    .map(Duration::from_secs)
                    .unwrap_or(session.config().await_timeout);
                session.assert_screen_id_at(&spec.identifier, timeout, site)
            }

            FlowStep::Navigate {
                from,
                to,
                tap,
                value,
                only_if_needed,
            } => {
                let source = Self::screen(flow, from, site)?;
                let destination = Self::screen(flow, to, site)?;
                let target_id =
                    Self::resolve_id(&source.registry(), source, tap, value.as_ref(), site)?;
                let query = ElementQuery::identifier(target_id);
                let timeout = session.config().await_timeout;
                perform_navigation(
                    session,
                    &source.identifier,
                    &destination.identifier,
                    *only_if_needed,
                    timeout,
                    site,
                    |session| session.tap_query_at(&query, site),
                )
            }

            FlowStep::ScrollTo {
                screen,
                container,
                target,
                value,
                direction,
                timeout_secs,
            } => {
                let spec = Self::screen(flow, screen, site)?;
                let registry = spec.registry();
                let Some(container) = registry.scroll(container).cloned() else {
                    return Err(session.fail(Self::unknown_component(spec, container, site)));
                };
                let target_id = Self::resolve_id(&registry, spec, target, value.as_ref(), site)?;
                let target = ElementQuery::identifier(target_id);
                let timeout = timeout_secs
                    .map(Duration::from_secs)
                    .unwrap_or(session.config().scroll_timeout);
                scroll_until_visible_at(session, &container, &target, *direction, timeout, site)
            }

            FlowStep::SelectTab {
                from,
                to,
                tab,
                only_if_needed,
            } => {
                let source = Self::screen(flow, from, site)?;
                let destination = Self::screen(flow, to, site)?;
                let registry = source.registry();
                let Some(tab) = registry.tab(tab).cloned() else {
                    return Err(session.fail(Self::unknown_component(source, tab, site)));
                };
                // Structural resolution first: a tab index past the end
                // of the bar fails here, before any waiting.
                let query = session.tab_element_at(&tab, site)?;
                let timeout = session.config().await_timeout;
                perform_navigation(
                    session,
                    &source.identifier,
                    &destination.identifier,
                    *only_if_needed,
                    timeout,
                    site,
                    |session| session.tap_query_at(&query, site),
                )
            }
        }
    }

    fn screen<'a>(
        flow: &'a FlowSpec,
        name: &str,
        site: CallSite,
    ) -> Result<&'a ScreenSpec, AutomationError> {
        flow.screen(name).ok_or(AutomationError::UnknownScreen {
            name: name.to_string(),
            site,
        })
    }

    fn resolve_id(
        registry: &Registry,
        spec: &ScreenSpec,
        key: &str,
        value: Option<&DynamicSuffix>,
        site: CallSite,
    ) -> Result<String, AutomationError> {
        let resolved = match value {
            Some(suffix) => registry.resolve_dynamic(key, DynamicValue::from(suffix)),
            None => registry.resolve(key),
        };
        resolved.ok_or_else(|| Self::unknown_component(spec, key, site))
    }

    fn unknown_component(spec: &ScreenSpec, key: &str, site: CallSite) -> AutomationError {
        AutomationError::UnknownComponent {
            screen: spec.identifier.clone(),
            key: key.to_string(),
            site,
        }
    }
}
