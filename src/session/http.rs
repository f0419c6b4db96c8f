use std::time::Duration;

use serde_json::{Value, json};

use crate::failure::DriverError;
use crate::session::driver::{DragGesture, Driver, ElementQuery};

/// A [`Driver`] speaking JSON over HTTP to an automation server in the
/// Appium style: one endpoint per operation, `{"ok": ...}` envelopes.
pub struct HttpDriver {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpDriver {
    pub fn new(base_url: impl Into<String>) -> Result<Self, DriverError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DriverError::Http {
                context: "building HTTP client".into(),
                source: e,
            })?;
        Ok(HttpDriver {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn post(&self, path: &str, body: Value) -> Result<Value, DriverError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| DriverError::Http {
                context: format!("POST {}", path),
                source: e,
            })?;

        let payload: Value = response.json().map_err(|e| DriverError::Http {
            context: format!("decoding response from {}", path),
            source: e,
        })?;

        if payload["ok"].as_bool() != Some(true) {
            let detail = payload["error"]
                .as_str()
                .unwrap_or("no error detail")
                .to_string();
            return Err(DriverError::Backend(detail));
        }
        Ok(payload)
    }
}

impl Driver for HttpDriver {
    fn launch(&mut self) -> Result<(), DriverError> {
        self.post("/session/launch", json!({}))?;
        Ok(())
    }

    fn exists(&mut self, query: &ElementQuery) -> Result<bool, DriverError> {
        let payload = self.post("/element/exists", json!({ "query": query }))?;
        payload["exists"]
            .as_bool()
            .ok_or_else(|| DriverError::Protocol {
                command: "exists".into(),
                error: "response missing 'exists' field".into(),
            })
    }

    fn tap(&mut self, query: &ElementQuery) -> Result<(), DriverError> {
        self.post("/element/tap", json!({ "query": query }))?;
        Ok(())
    }

    fn drag(&mut self, container: &ElementQuery, gesture: &DragGesture) -> Result<(), DriverError> {
        self.post(
            "/element/drag",
            json!({ "container": container, "gesture": gesture }),
        )?;
        Ok(())
    }

    fn tab_bar_count(&mut self) -> Result<usize, DriverError> {
        let payload = self.post("/tabbar/count", json!({}))?;
        payload["count"]
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| DriverError::Protocol {
                command: "tab_count".into(),
                error: "response missing 'count' field".into(),
            })
    }
}
