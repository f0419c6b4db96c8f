use serde::{Deserialize, Serialize};

use crate::component::dynamic::DynamicValue;
use crate::component::tab::TabComponent;
use crate::navigate::scroll::ScrollDirection;
use crate::screen::registry::Registry;

/// A declarative navigation flow, loaded from YAML: the screens it
/// touches and the steps to drive between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSpec {
    pub name: String,

    #[serde(default)]
    pub screens: Vec<ScreenSpec>,

    pub steps: Vec<FlowStep>,
}

impl FlowSpec {
    pub fn screen(&self, name: &str) -> Option<&ScreenSpec> {
        self.screens.iter().find(|s| s.name == name)
    }
}

/// A screen declaration in flow form: the same shape a typed
/// [`Screen`](crate::screen::screen_model::Screen) impl declares in
/// code, expressed as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenSpec {
    pub name: String,
    pub identifier: String,

    #[serde(default)]
    pub components: Vec<ComponentSpec>,
}

impl ScreenSpec {
    /// Build the component registry this declaration describes.
    pub fn registry(&self) -> Registry {
        let mut builder = Registry::builder();
        for component in &self.components {
            builder = match component {
                ComponentSpec::Static { key, id } => builder.static_component(key, id),
                ComponentSpec::Dynamic { key, prefix } => builder.dynamic(key, prefix),
                ComponentSpec::Scroll { key, id } => builder.scroll(key, id),
                ComponentSpec::Tab { key, name, index } => builder.tab(
                    key,
                    match index {
                        Some(index) => TabComponent::at(*index, name),
                        None => TabComponent::named(name),
                    },
                ),
            };
        }
        builder.build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentSpec {
    Static {
        key: String,
        id: String,
    },
    Dynamic {
        key: String,
        prefix: String,
    },
    Scroll {
        key: String,
        id: String,
    },
    Tab {
        key: String,
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },
}

/// A dynamic-component suffix as written in a flow file: either an
/// integer or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DynamicSuffix {
    Signed(i64),
    Text(String),
}

impl From<&DynamicSuffix> for DynamicValue {
    fn from(suffix: &DynamicSuffix) -> Self {
        match suffix {
            DynamicSuffix::Signed(n) => DynamicValue::Signed(*n),
            DynamicSuffix::Text(s) => DynamicValue::Text(s.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FlowStep {
    /// Assert that a screen is visible.
    ExpectScreen {
        screen: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_secs: Option<u64>,
    },

    /// One navigator step: assert `from`, tap `tap` (a component key on
    /// `from`, with `value` when the component is dynamic), assert `to`.
    Navigate {
        from: String,
        to: String,
        tap: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<DynamicSuffix>,
        #[serde(default)]
        only_if_needed: bool,
    },

    /// Scroll a container on `screen` until a target component exists.
    ScrollTo {
        screen: String,
        container: String,
        target: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<DynamicSuffix>,
        #[serde(default = "default_direction")]
        direction: ScrollDirection,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_secs: Option<u64>,
    },

    /// Switch tabs: assert `from`, resolve and tap the tab declared
    /// under `tab` on `from`, assert `to`.
    SelectTab {
        from: String,
        to: String,
        tab: String,
        #[serde(default)]
        only_if_needed: bool,
    },
}

fn default_direction() -> ScrollDirection {
    ScrollDirection::Down
}

/// The outcome of running one flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowResult {
    pub flow_name: String,
    pub passed: bool,
    pub steps_run: usize,
    pub error: Option<String>,
}
