#![allow(dead_code)]

pub mod screens;

use std::time::Duration;

use screen_automation::{ScriptedDriver, Session, SessionConfig};

/// Short deadlines so timeout paths finish quickly under test.
pub fn test_config() -> SessionConfig {
    SessionConfig {
        await_timeout: Duration::from_millis(250),
        scroll_timeout: Duration::from_millis(500),
        poll_interval: Duration::from_millis(10),
    }
}

/// A session over a clone of the given scripted driver, so the test
/// keeps its own handle for scripting and inspection.
pub fn scripted_session(driver: &ScriptedDriver) -> Session {
    Session::new(Box::new(driver.clone())).with_config(test_config())
}
