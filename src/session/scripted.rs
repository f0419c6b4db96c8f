use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::failure::DriverError;
use crate::screen::markers;
use crate::screen::screen_model::Screen;
use crate::session::driver::{DragGesture, Driver, ElementQuery};

/// What tapping an element does to the scripted UI: identifiers to
/// bring on screen and identifiers to take off. A screen transition is
/// expressed as hiding the source marker and showing the destination's.
#[derive(Debug, Clone, Default)]
pub struct TapEffect {
    pub show: Vec<String>,
    pub hide: Vec<String>,
}

impl TapEffect {
    pub fn show(id: impl Into<String>) -> Self {
        TapEffect {
            show: vec![id.into()],
            hide: Vec::new(),
        }
    }

    pub fn transition(hide: impl Into<String>, show: impl Into<String>) -> Self {
        TapEffect {
            show: vec![show.into()],
            hide: vec![hide.into()],
        }
    }

    pub fn and_show(mut self, id: impl Into<String>) -> Self {
        self.show.push(id.into());
        self
    }

    pub fn and_hide(mut self, id: impl Into<String>) -> Self {
        self.hide.push(id.into());
        self
    }
}

#[derive(Default)]
struct ScriptedState {
    launched: bool,
    visible: HashSet<String>,
    /// identifier -> unsuccessful polls remaining before it appears
    appear_after: HashMap<String, u32>,
    /// identifier -> drag gestures remaining before it appears
    reveal_after: HashMap<String, u32>,
    tabs: Vec<String>,
    tap_effects: HashMap<String, TapEffect>,
    taps: Vec<String>,
    gestures: Vec<DragGesture>,
    polls: u64,
}

/// A deterministic in-process [`Driver`] for exercising the engine
/// without a device: elements appear after a scripted number of polls
/// or drag gestures, and taps swap scripted sets of identifiers on and
/// off screen. The driver is cheaply cloneable; clones share state, so
/// a test can keep one clone for inspection after handing another to
/// the session.
#[derive(Clone, Default)]
pub struct ScriptedDriver {
    state: Arc<Mutex<ScriptedState>>,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        ScriptedDriver::default()
    }

    fn lock(&self) -> MutexGuard<'_, ScriptedState> {
        // A panic mid-test must not cascade into every later access.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn query_key(query: &ElementQuery) -> String {
        match query {
            ElementQuery::Identifier { id } => format!("id:{}", id),
            ElementQuery::TabIndex { index } => format!("tab#{}", index),
            ElementQuery::TabName { name } => format!("tab:{}", name),
        }
    }

    /// Make an identifier exist immediately.
    pub fn show(&self, id: impl Into<String>) {
        self.lock().visible.insert(id.into());
    }

    pub fn hide(&self, id: &str) {
        self.lock().visible.remove(id);
    }

    /// Make an identifier appear only after `polls` unsuccessful
    /// existence checks.
    pub fn appear_after(&self, id: impl Into<String>, polls: u32) {
        self.lock().appear_after.insert(id.into(), polls);
    }

    /// Make an identifier appear only after `gestures` drag gestures.
    pub fn reveal_after(&self, id: impl Into<String>, gestures: u32) {
        self.lock().reveal_after.insert(id.into(), gestures);
    }

    /// Declare the tab bar's buttons, in order of their labels.
    pub fn tabs(&self, names: &[&str]) {
        self.lock().tabs = names.iter().map(|n| n.to_string()).collect();
    }

    /// Script what tapping the element with `id` does.
    pub fn on_tap_id(&self, id: &str, effect: TapEffect) {
        self.lock()
            .tap_effects
            .insert(format!("id:{}", id), effect);
    }

    /// Script what tapping the tab bar button at `index` does.
    pub fn on_tap_tab_index(&self, index: usize, effect: TapEffect) {
        self.lock()
            .tap_effects
            .insert(format!("tab#{}", index), effect);
    }

    /// Script what tapping the tab bar button labeled `name` does.
    pub fn on_tap_tab_name(&self, name: &str, effect: TapEffect) {
        self.lock()
            .tap_effects
            .insert(format!("tab:{}", name), effect);
    }

    /// Put screen `S` on screen: its root marker plus every statically
    /// addressable component it declares.
    pub fn seed_screen<S: Screen>(&self) {
        let mut state = self.lock();
        state.visible.insert(S::IDENTIFIER.to_string());
        for (_, id) in markers::assignments::<S>() {
            state.visible.insert(id);
        }
    }

    pub fn launched(&self) -> bool {
        self.lock().launched
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.lock().visible.contains(id)
    }

    pub fn poll_count(&self) -> u64 {
        self.lock().polls
    }

    pub fn tap_count(&self) -> usize {
        self.lock().taps.len()
    }

    pub fn recorded_taps(&self) -> Vec<String> {
        self.lock().taps.clone()
    }

    pub fn gesture_count(&self) -> usize {
        self.lock().gestures.len()
    }

    pub fn recorded_gestures(&self) -> Vec<DragGesture> {
        self.lock().gestures.clone()
    }
}

impl Driver for ScriptedDriver {
    fn launch(&mut self) -> Result<(), DriverError> {
        self.lock().launched = true;
        Ok(())
    }

    fn exists(&mut self, query: &ElementQuery) -> Result<bool, DriverError> {
        let mut state = self.lock();
        state.polls += 1;
        match query {
            ElementQuery::Identifier { id } => {
                // Tick the appear-after countdown for this identifier.
                if let Some(remaining) = state.appear_after.get_mut(id) {
                    if *remaining == 0 {
                        state.appear_after.remove(id);
                        state.visible.insert(id.clone());
                    } else {
                        *remaining -= 1;
                    }
                }
                Ok(state.visible.contains(id))
            }
            ElementQuery::TabIndex { index } => Ok(*index < state.tabs.len()),
            ElementQuery::TabName { name } => Ok(state.tabs.iter().any(|t| t == name)),
        }
    }

    fn tap(&mut self, query: &ElementQuery) -> Result<(), DriverError> {
        let key = Self::query_key(query);
        let mut state = self.lock();
        state.taps.push(key.clone());
        if let Some(effect) = state.tap_effects.get(&key).cloned() {
            for id in &effect.hide {
                state.visible.remove(id);
            }
            for id in &effect.show {
                state.visible.insert(id.clone());
            }
        }
        Ok(())
    }

    fn drag(&mut self, _container: &ElementQuery, gesture: &DragGesture) -> Result<(), DriverError> {
        let mut state = self.lock();
        state.gestures.push(*gesture);
        let revealed: Vec<String> = state
            .reveal_after
            .iter_mut()
            .filter_map(|(id, remaining)| {
                if *remaining <= 1 {
                    Some(id.clone())
                } else {
                    *remaining -= 1;
                    None
                }
            })
            .collect();
        for id in revealed {
            state.reveal_after.remove(&id);
            state.visible.insert(id);
        }
        Ok(())
    }

    fn tab_bar_count(&mut self) -> Result<usize, DriverError> {
        Ok(self.lock().tabs.len())
    }
}
