//! Screen models for the sample application the integration tests
//! drive: a two-tab app where the first tab pushes a detail screen and
//! the second tab hosts a long table of dynamically identified rows.

use screen_automation::{Registry, Screen, TabComponent};

#[derive(Default)]
pub struct FirstTabScreen;

impl Screen for FirstTabScreen {
    const IDENTIFIER: &'static str = "first-tab-screen";

    fn components(&self) -> Registry {
        Registry::builder()
            .static_component("detail_button", "first-tab-detail-button")
            .tab("second_tab", TabComponent::at(1, "Second"))
            .tab("ghost_tab", TabComponent::at(2, "No u"))
            .build()
    }
}

#[derive(Default)]
pub struct SecondTabScreen;

impl Screen for SecondTabScreen {
    const IDENTIFIER: &'static str = "second-tab-screen";

    fn components(&self) -> Registry {
        Registry::builder()
            .scroll("table", "second-table-table-view")
            .dynamic("row_item", "second-tab-dynamic-row")
            .tab("first_tab", TabComponent::at(0, "First"))
            .build()
    }
}

#[derive(Default)]
pub struct DetailScreen;

impl Screen for DetailScreen {
    const IDENTIFIER: &'static str = "detail-screen";

    fn components(&self) -> Registry {
        Registry::builder()
            .static_component("back_button", "detail-back-button")
            .build()
    }
}
