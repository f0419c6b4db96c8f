use serde::Serialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::failure::CallSite;

/// One line of the session trace. Events share a single shape with
/// optional fields so the JSONL stream stays greppable by `event`.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub event: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

impl TraceEvent {
    pub fn new(event: &'static str) -> Self {
        TraceEvent {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis(),
            event,
            target: None,
            outcome: None,
            elapsed_ms: None,
            source: None,
            destination: None,
            ordinal: None,
            message: None,
            site: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_outcome(mut self, outcome: &'static str) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed_ms = Some(elapsed.as_millis() as u64);
        self
    }

    pub fn with_screens(mut self, source: impl Into<String>, destination: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self.destination = Some(destination.into());
        self
    }

    pub fn with_ordinal(mut self, ordinal: u32) -> Self {
        self.ordinal = Some(ordinal);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_site(mut self, site: CallSite) -> Self {
        self.site = Some(site.to_string());
        self
    }
}
