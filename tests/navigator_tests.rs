mod common;

use std::time::{Duration, Instant};

use common::screens::{DetailScreen, FirstTabScreen, SecondTabScreen};
use common::scripted_session;
use screen_automation::navigate::tabs::navigate_to_tab;
use screen_automation::{
    AutomationError, Navigator, ScrollDirection, ScriptedDriver, Side, TapEffect,
};

fn first_tab_app() -> ScriptedDriver {
    let driver = ScriptedDriver::new();
    driver.seed_screen::<FirstTabScreen>();
    driver.on_tap_id(
        "first-tab-detail-button",
        TapEffect::transition("first-tab-screen", "detail-screen"),
    );
    driver
}

// =========================================================================
// The navigation step: source → actions → destination
// =========================================================================

#[test]
fn navigate_asserts_both_ends_of_the_transition() {
    let driver = first_tab_app();
    let mut session = scripted_session(&driver);

    Navigator::<FirstTabScreen>::new()
        .navigate::<DetailScreen, _>(&mut session, |session, _| {
            let button = session.element::<FirstTabScreen>("detail_button")?;
            session.tap_query(&button)
        })
        .expect("first tab is visible and the tap reveals the detail screen");

    assert!(driver.is_visible("detail-screen"));
}

#[test]
fn absent_source_screen_fails_the_step() {
    let driver = ScriptedDriver::new();
    let mut session = scripted_session(&driver);

    let err = Navigator::<FirstTabScreen>::new()
        .navigate::<DetailScreen, _>(&mut session, |_, _| {
            panic!("actions must not run when the source is unproven")
        })
        .expect_err("source marker is not on screen");

    match err {
        AutomationError::NavigationAssertion { side, screen, .. } => {
            assert_eq!(side, Side::Source);
            assert_eq!(screen, "first-tab-screen");
        }
        other => panic!("expected NavigationAssertion, got {:?}", other),
    }
}

#[test]
fn missing_destination_after_actions_fails_the_step() {
    let driver = ScriptedDriver::new();
    driver.seed_screen::<FirstTabScreen>();
    // The button exists but tapping it reveals nothing.
    let mut session = scripted_session(&driver);

    let err = Navigator::<FirstTabScreen>::new()
        .navigate::<DetailScreen, _>(&mut session, |session, _| {
            let button = session.element::<FirstTabScreen>("detail_button")?;
            session.tap_query(&button)
        })
        .expect_err("detail screen never appears");

    match err {
        AutomationError::NavigationAssertion { side, screen, .. } => {
            assert_eq!(side, Side::Destination);
            assert_eq!(screen, "detail-screen");
        }
        other => panic!("expected NavigationAssertion, got {:?}", other),
    }
    assert_eq!(driver.tap_count(), 1, "the actions did run");
}

#[test]
fn action_failures_propagate_as_navigator_failures() {
    let driver = ScriptedDriver::new();
    driver.seed_screen::<FirstTabScreen>();
    let mut session = scripted_session(&driver);

    let err = Navigator::<FirstTabScreen>::new()
        .navigate::<DetailScreen, _>(&mut session, |session, _| {
            // Waits on an element that is not there.
            let button = session.element::<FirstTabScreen>("missing_key")?;
            session.tap_query(&button)
        })
        .expect_err("the action itself fails");
    assert!(matches!(err, AutomationError::UnknownComponent { .. }));
}

#[test]
fn only_if_needed_skips_actions_when_source_is_absent() {
    let driver = ScriptedDriver::new();
    // Already at the destination; the source screen is long gone.
    driver.seed_screen::<DetailScreen>();
    let mut session = scripted_session(&driver);

    Navigator::<FirstTabScreen>::if_needed()
        .navigate::<DetailScreen, _>(&mut session, |_, _| {
            panic!("actions must be skipped when already at the destination")
        })
        .expect("treated as already-at-destination");

    assert_eq!(driver.tap_count(), 0);
}

#[test]
fn only_if_needed_still_asserts_the_destination() {
    let driver = ScriptedDriver::new();
    let mut session = scripted_session(&driver);

    let err = Navigator::<FirstTabScreen>::if_needed()
        .navigate::<DetailScreen, _>(&mut session, |_, _| Ok(()))
        .expect_err("neither screen is on screen");
    assert!(matches!(
        err,
        AutomationError::NavigationAssertion {
            side: Side::Destination,
            ..
        }
    ));
}

#[test]
fn navigator_debug_names_its_screen() {
    let rendered = format!("{:?}", Navigator::<FirstTabScreen>::new());
    assert!(rendered.contains("first-tab-screen"), "was: {}", rendered);
}

// =========================================================================
// Chaining
// =========================================================================

#[test]
fn navigators_chain_across_screens() {
    let driver = first_tab_app();
    driver.on_tap_id(
        "detail-back-button",
        TapEffect::transition("detail-screen", "first-tab-screen"),
    );
    let mut session = scripted_session(&driver);

    let on_detail: Navigator<DetailScreen> = Navigator::<FirstTabScreen>::new()
        .navigate(&mut session, |session, _| {
            let button = session.element::<FirstTabScreen>("detail_button")?;
            session.tap_query(&button)
        })
        .expect("push the detail screen");

    // The detail screen's marker replaced the first tab's; the back
    // button needs to be on screen for the return leg.
    driver.show("detail-back-button");

    let _back_home: Navigator<FirstTabScreen> = on_detail
        .navigate(&mut session, |session, _| {
            let button = session.element::<DetailScreen>("back_button")?;
            session.tap_query(&button)
        })
        .expect("pop back to the first tab");

    assert!(driver.is_visible("first-tab-screen"));
}

// =========================================================================
// Scroll-assisted navigation (below-the-fold row)
// =========================================================================

#[test]
fn scrolls_to_a_below_the_fold_row_then_navigates() {
    let driver = ScriptedDriver::new();
    driver.seed_screen::<SecondTabScreen>();
    driver.reveal_after("second-tab-dynamic-row_200", 2);
    driver.on_tap_id(
        "second-tab-dynamic-row_200",
        TapEffect::transition("second-tab-screen", "detail-screen"),
    );
    let mut session = scripted_session(&driver);

    let navigator = Navigator::<SecondTabScreen>::new();
    navigator
        .scroll_to_value(&mut session, ScrollDirection::Down, "row_item", 200, "table")
        .expect("downward drags reveal the row");
    assert!(driver.gesture_count() > 0);

    navigator
        .navigate::<DetailScreen, _>(&mut session, |session, _| {
            let row = session.element_value::<SecondTabScreen>("row_item", 200)?;
            session.tap_query(&row)
        })
        .expect("row is now visible and tappable");
    assert!(driver.is_visible("detail-screen"));
}

#[test]
fn scroll_to_rejects_undeclared_container_keys() {
    let driver = ScriptedDriver::new();
    driver.seed_screen::<SecondTabScreen>();
    let mut session = scripted_session(&driver);

    let err = Navigator::<SecondTabScreen>::new()
        .scroll_to_value(
            &mut session,
            ScrollDirection::Down,
            "row_item",
            1,
            "not_a_container",
        )
        .expect_err("container key is not declared");
    assert!(matches!(err, AutomationError::UnknownComponent { .. }));
}

// =========================================================================
// Tab navigation
// =========================================================================

#[test]
fn tab_switch_is_an_ordinary_navigation_step() {
    let driver = ScriptedDriver::new();
    driver.seed_screen::<FirstTabScreen>();
    driver.tabs(&["First", "Second"]);
    driver.on_tap_tab_index(
        1,
        TapEffect::transition("first-tab-screen", "second-tab-screen"),
    );
    let mut session = scripted_session(&driver);

    let _on_second: Navigator<SecondTabScreen> =
        navigate_to_tab::<FirstTabScreen, SecondTabScreen>(&mut session, "second_tab")
            .expect("tab 1 exists and reveals the second tab screen");
    assert!(driver.is_visible("second-tab-screen"));
}

#[test]
fn ghost_tab_fails_structurally_without_waiting() {
    let driver = ScriptedDriver::new();
    driver.seed_screen::<FirstTabScreen>();
    driver.tabs(&["First", "Second"]);
    let mut session = scripted_session(&driver);

    let started = Instant::now();
    let err = Navigator::<FirstTabScreen>::new()
        .navigate_to_tab_key::<SecondTabScreen>(&mut session, "ghost_tab")
        .expect_err("a third tab does not exist in a two-button bar");
    let elapsed = started.elapsed();

    assert!(
        elapsed < Duration::from_millis(150),
        "structural failure must not wait out a timeout: {:?}",
        elapsed
    );
    assert!(matches!(
        err,
        AutomationError::TabOutOfBounds {
            index: 2,
            count: 2,
            ..
        }
    ));
    assert_eq!(driver.tap_count(), 0);
}
