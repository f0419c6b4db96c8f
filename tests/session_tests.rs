mod common;

use std::time::{Duration, Instant};

use common::screens::{FirstTabScreen, SecondTabScreen};
use common::scripted_session;
use screen_automation::{
    AutomationError, ElementQuery, ScriptedDriver, TabComponent, TapEffect,
};

// =========================================================================
// Launch and lookup
// =========================================================================

#[test]
fn launch_starts_the_application_under_test() {
    let driver = ScriptedDriver::new();
    let mut session = scripted_session(&driver);

    session.launch().expect("launch must succeed");
    assert!(driver.launched());
}

#[test]
fn find_is_pure_query_construction() {
    let driver = ScriptedDriver::new();
    let session = scripted_session(&driver);

    let query = session.find(&"first-tab-detail-button".into());
    assert_eq!(query, ElementQuery::identifier("first-tab-detail-button"));
    // No existence check happened.
    assert_eq!(driver.poll_count(), 0);
}

#[test]
fn exists_checks_exactly_once() {
    let driver = ScriptedDriver::new();
    driver.show("present");
    let mut session = scripted_session(&driver);

    assert!(session.exists(&ElementQuery::identifier("present")).unwrap());
    assert!(!session.exists(&ElementQuery::identifier("absent")).unwrap());
    assert_eq!(driver.poll_count(), 2);
}

// =========================================================================
// Existence-awaiting
// =========================================================================

#[test]
fn await_exists_returns_once_element_appears() {
    let driver = ScriptedDriver::new();
    driver.appear_after("late-element", 3);
    let mut session = scripted_session(&driver);

    session
        .await_exists(
            &ElementQuery::identifier("late-element"),
            Duration::from_millis(250),
        )
        .expect("element appears well before the deadline");
    assert!(driver.is_visible("late-element"));
}

#[test]
fn await_exists_fails_at_the_deadline_not_before() {
    let driver = ScriptedDriver::new();
    let mut session = scripted_session(&driver);

    let timeout = Duration::from_millis(250);
    let started = Instant::now();
    let err = session
        .await_exists(&ElementQuery::identifier("never"), timeout)
        .expect_err("element never appears");
    let elapsed = started.elapsed();

    assert!(elapsed >= timeout, "returned early: {:?}", elapsed);
    assert!(
        elapsed < Duration::from_secs(2),
        "hung far past the deadline: {:?}",
        elapsed
    );
    match err {
        AutomationError::NotFound { identifier, .. } => {
            assert!(identifier.contains("never"));
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn await_exists_with_reports_the_custom_message() {
    let driver = ScriptedDriver::new();
    let mut session = scripted_session(&driver);

    let err = session
        .await_exists_with(
            &ElementQuery::identifier("never"),
            Duration::from_millis(50),
            "Login button missing",
        )
        .expect_err("element never appears");
    assert!(err.to_string().contains("Login button missing"));
}

#[test]
fn failure_points_at_the_test_call_site() {
    let driver = ScriptedDriver::new();
    let mut session = scripted_session(&driver);

    let err = session
        .await_exists(
            &ElementQuery::identifier("never"),
            Duration::from_millis(50),
        )
        .expect_err("element never appears");
    let site = err.site().expect("NotFound carries a call site");
    assert!(site.file.ends_with("session_tests.rs"));
}

// =========================================================================
// Tapping
// =========================================================================

#[test]
fn tap_waits_for_existence_first() {
    let driver = ScriptedDriver::new();
    driver.appear_after("slow-button", 2);
    let mut session = scripted_session(&driver);

    session
        .tap(&"slow-button".into())
        .expect("button appears before the deadline");
    assert_eq!(driver.recorded_taps(), vec!["id:slow-button".to_string()]);
}

#[test]
fn tap_effects_swap_screen_markers() {
    let driver = ScriptedDriver::new();
    driver.show("first-tab-detail-button");
    driver.on_tap_id(
        "first-tab-detail-button",
        TapEffect::transition("first-tab-screen", "detail-screen"),
    );
    driver.show("first-tab-screen");
    let mut session = scripted_session(&driver);

    session.tap(&"first-tab-detail-button".into()).unwrap();
    assert!(driver.is_visible("detail-screen"));
    assert!(!driver.is_visible("first-tab-screen"));
}

// =========================================================================
// Screen assertions
// =========================================================================

#[test]
fn assert_screen_finds_the_root_marker() {
    let driver = ScriptedDriver::new();
    driver.seed_screen::<FirstTabScreen>();
    let mut session = scripted_session(&driver);

    session
        .assert_screen::<FirstTabScreen>(Duration::from_millis(100))
        .expect("marker is on screen");
}

#[test]
fn assert_screen_failure_names_the_identifier() {
    let driver = ScriptedDriver::new();
    let mut session = scripted_session(&driver);

    let err = session
        .assert_screen::<FirstTabScreen>(Duration::from_millis(50))
        .expect_err("marker never appears");
    let message = err.to_string();
    assert!(message.contains("Screen not found"));
    assert!(message.contains("first-tab-screen"));
}

// =========================================================================
// Registry-backed element lookup
// =========================================================================

#[test]
fn element_awaits_a_declared_static_component() {
    let driver = ScriptedDriver::new();
    driver.seed_screen::<FirstTabScreen>();
    let mut session = scripted_session(&driver);

    let query = session
        .element::<FirstTabScreen>("detail_button")
        .expect("declared and on screen");
    assert_eq!(query, ElementQuery::identifier("first-tab-detail-button"));
}

#[test]
fn element_value_awaits_a_resolved_dynamic_component() {
    let driver = ScriptedDriver::new();
    driver.show("second-tab-dynamic-row_3");
    let mut session = scripted_session(&driver);

    let query = session
        .element_value::<SecondTabScreen>("row_item", 3)
        .expect("row 3 is on screen");
    assert_eq!(query, ElementQuery::identifier("second-tab-dynamic-row_3"));
}

#[test]
fn unknown_component_key_fails_without_waiting() {
    let driver = ScriptedDriver::new();
    driver.seed_screen::<FirstTabScreen>();
    let mut session = scripted_session(&driver);

    let err = session
        .element::<FirstTabScreen>("missing_key")
        .expect_err("key is not declared");
    match err {
        AutomationError::UnknownComponent { screen, key, .. } => {
            assert_eq!(screen, "first-tab-screen");
            assert_eq!(key, "missing_key");
        }
        other => panic!("expected UnknownComponent, got {:?}", other),
    }
}

// =========================================================================
// Tab lookup bounds
// =========================================================================

#[test]
fn tab_index_within_bounds_resolves() {
    let driver = ScriptedDriver::new();
    driver.tabs(&["First", "Second"]);
    let mut session = scripted_session(&driver);

    let query = session
        .tab_element(&TabComponent::at(1, "Second"))
        .expect("index 1 of 2 is valid");
    assert_eq!(query, ElementQuery::TabIndex { index: 1 });
}

#[test]
fn tab_name_lookup_defers_matching_to_the_bar() {
    let driver = ScriptedDriver::new();
    driver.tabs(&["First", "Second"]);
    let mut session = scripted_session(&driver);

    let query = session
        .tab_element(&TabComponent::named("Second"))
        .expect("name lookup is never structural");
    assert_eq!(
        query,
        ElementQuery::TabName {
            name: "Second".to_string()
        }
    );
    assert!(session.exists(&query).unwrap());
}

#[test]
fn out_of_range_tab_index_fails_immediately() {
    let driver = ScriptedDriver::new();
    driver.tabs(&["First", "Second"]);
    let mut session = scripted_session(&driver);

    let started = Instant::now();
    let err = session
        .tab_element(&TabComponent::at(2, "No u"))
        .expect_err("index 2 of a 2-button bar is structurally impossible");
    let elapsed = started.elapsed();

    assert!(
        elapsed < Duration::from_millis(150),
        "structural failure must not wait: {:?}",
        elapsed
    );
    match err {
        AutomationError::TabOutOfBounds {
            name,
            index,
            count,
            ..
        } => {
            assert_eq!(name, "No u");
            assert_eq!(index, 2);
            assert_eq!(count, 2);
        }
        other => panic!("expected TabOutOfBounds, got {:?}", other),
    }
}
