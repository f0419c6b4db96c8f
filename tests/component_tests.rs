mod common;

use common::screens::{FirstTabScreen, SecondTabScreen};
use screen_automation::screen::markers;
use screen_automation::{
    Component, ComponentEntry, DynamicComponent, DynamicValue, Screen, TabComponent, TabQuery,
    compose, resolve, resolve_dynamic,
};

// =========================================================================
// Identifier composition
// =========================================================================

#[test]
fn compose_joins_nonempty_segments_with_underscore() {
    assert_eq!(compose("prefix", "suffix"), "prefix_suffix");
}

#[test]
fn compose_drops_empty_suffix() {
    assert_eq!(compose("prefix", ""), "prefix");
}

#[test]
fn compose_drops_empty_prefix() {
    assert_eq!(compose("", "suffix"), "suffix");
}

#[test]
fn compose_of_two_empty_segments_is_empty() {
    assert_eq!(compose("", ""), "");
}

// =========================================================================
// Dynamic value dispatch
// =========================================================================

#[test]
fn signed_integer_renders_as_decimal() {
    let row = DynamicComponent::new("row");
    assert_eq!(row.resolve(42i64).id, "row_42");
    assert_eq!(row.resolve(-7i32).id, "row_-7");
}

#[test]
fn unsigned_integer_renders_as_decimal() {
    let row = DynamicComponent::new("row");
    assert_eq!(row.resolve(42u64).id, "row_42");
    assert_eq!(row.resolve(3usize).id, "row_3");
}

#[test]
fn text_renders_verbatim() {
    let cell = DynamicComponent::new("cell");
    assert_eq!(cell.resolve("alpha").id, "cell_alpha");
}

#[test]
fn custom_hook_overrides_native_representation() {
    // A value whose native rendering is not the wanted identifier.
    let cell = DynamicComponent::new("cell");
    assert_eq!(cell.resolve(DynamicValue::custom("ABC")).id, "cell_ABC");
}

#[test]
fn empty_prefix_degrades_to_suffix_only() {
    let anonymous = DynamicComponent::new("");
    assert_eq!(anonymous.resolve(9u32).id, "9");
}

#[test]
fn empty_suffix_degrades_to_prefix_only() {
    let row = DynamicComponent::new("row");
    assert_eq!(row.resolve("").id, "row");
}

// =========================================================================
// Tab lookup strategies
// =========================================================================

#[test]
fn tab_with_index_resolves_to_positional_query() {
    let tab = TabComponent::at(1, "Second");
    assert_eq!(tab.query(), TabQuery::Index(1));
}

#[test]
fn tab_without_index_resolves_to_label_query() {
    let tab = TabComponent::named("Second");
    assert_eq!(tab.query(), TabQuery::Name("Second".to_string()));
}

// =========================================================================
// Screen registry resolution
// =========================================================================

#[test]
fn registry_resolves_static_and_scroll_identifiers() {
    assert_eq!(
        resolve::<FirstTabScreen>("detail_button").as_deref(),
        Some("first-tab-detail-button")
    );
    assert_eq!(
        resolve::<SecondTabScreen>("table").as_deref(),
        Some("second-table-table-view")
    );
}

#[test]
fn registry_resolves_dynamic_row_identifier() {
    // End-to-end scenario: prefix "second-tab-dynamic-row", value 3.
    assert_eq!(
        resolve_dynamic::<SecondTabScreen>("row_item", 3).as_deref(),
        Some("second-tab-dynamic-row_3")
    );
}

#[test]
fn registry_returns_none_for_unknown_key() {
    assert_eq!(resolve::<FirstTabScreen>("missing"), None);
    assert_eq!(resolve_dynamic::<FirstTabScreen>("missing", 1), None);
}

#[test]
fn registry_entry_kinds_do_not_cross_resolve() {
    let registry = SecondTabScreen.components();
    // A dynamic entry has no identifier without a value.
    assert_eq!(registry.resolve("row_item"), None);
    // A scroll entry is not dynamic.
    assert_eq!(registry.resolve_dynamic("table", 1), None);
    assert!(matches!(
        registry.get("table"),
        Some(ComponentEntry::Scroll(_))
    ));
}

#[test]
fn registry_typed_getters_match_declarations() {
    let registry = FirstTabScreen.components();
    assert_eq!(
        registry.static_component("detail_button"),
        Some(&Component::new("first-tab-detail-button"))
    );
    let ghost = registry.tab("ghost_tab").expect("ghost tab declared");
    assert_eq!(ghost.name, "No u");
    assert_eq!(ghost.index, Some(2));
}

// =========================================================================
// View-layer markers
// =========================================================================

#[test]
fn screen_marker_carries_the_screen_identifier() {
    assert_eq!(
        markers::screen_marker::<FirstTabScreen>().id,
        "first-tab-screen"
    );
}

#[test]
fn assignments_cover_static_and_scroll_components_only() {
    let assignments = markers::assignments::<SecondTabScreen>();
    // Dynamic rows and tabs carry no declaration-time identifier.
    assert_eq!(
        assignments,
        vec![("table".to_string(), "second-table-table-view".to_string())]
    );
}
