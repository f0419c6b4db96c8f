use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::failure::DriverError;
use crate::session::driver::{DragGesture, Driver, ElementQuery};

/// Request sent to the automation bridge over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum BridgeRequest<'a> {
    Launch,
    Exists {
        query: &'a ElementQuery,
    },
    Tap {
        query: &'a ElementQuery,
    },
    Drag {
        container: &'a ElementQuery,
        gesture: &'a DragGesture,
    },
    TabCount,
    Quit,
}

impl BridgeRequest<'_> {
    fn name(&self) -> &'static str {
        match self {
            BridgeRequest::Launch => "launch",
            BridgeRequest::Exists { .. } => "exists",
            BridgeRequest::Tap { .. } => "tap",
            BridgeRequest::Drag { .. } => "drag",
            BridgeRequest::TabCount => "tab_count",
            BridgeRequest::Quit => "quit",
        }
    }
}

/// Response read from the bridge's stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct BridgeResponse {
    pub ok: bool,
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default)]
    pub exists: Option<bool>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A [`Driver`] backed by a long-lived bridge subprocess that holds the
/// platform automation connection open. Commands go out as NDJSON over
/// stdin; responses come back one line per request on stdout.
pub struct RemoteDriver {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
}

impl RemoteDriver {
    /// Spawn the bridge and wait for its ready signal.
    pub fn spawn(command: &str, args: &[String]) -> Result<Self, DriverError> {
        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DriverError::Spawn {
                command: command.to_string(),
                source: e,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| DriverError::Io {
            context: "capturing bridge stdin".into(),
            source: std::io::Error::other("stdin not piped"),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| DriverError::Io {
            context: "capturing bridge stdout".into(),
            source: std::io::Error::other("stdout not piped"),
        })?;

        let mut reader = BufReader::new(stdout);
        let mut line = String::new();
        reader.read_line(&mut line).map_err(|e| DriverError::Io {
            context: "reading bridge ready signal".into(),
            source: e,
        })?;

        let response: BridgeResponse =
            serde_json::from_str(line.trim()).map_err(|e| DriverError::Json {
                context: "bridge ready signal".into(),
                source: e,
            })?;

        if !response.ok || response.ready != Some(true) {
            return Err(DriverError::Protocol {
                command: "spawn".into(),
                error: "bridge did not report ready".into(),
            });
        }

        Ok(RemoteDriver {
            child,
            stdin,
            reader,
        })
    }

    fn send(&mut self, request: &BridgeRequest) -> Result<BridgeResponse, DriverError> {
        let name = request.name();
        let line = serde_json::to_string(request).map_err(|e| DriverError::Json {
            context: format!("encoding '{}' request", name),
            source: e,
        })?;

        writeln!(self.stdin, "{}", line).map_err(|e| DriverError::Io {
            context: format!("writing '{}' request", name),
            source: e,
        })?;
        self.stdin.flush().map_err(|e| DriverError::Io {
            context: format!("flushing '{}' request", name),
            source: e,
        })?;

        let mut reply = String::new();
        self.reader.read_line(&mut reply).map_err(|e| DriverError::Io {
            context: format!("reading '{}' response", name),
            source: e,
        })?;

        let response: BridgeResponse =
            serde_json::from_str(reply.trim()).map_err(|e| DriverError::Json {
                context: format!("decoding '{}' response", name),
                source: e,
            })?;

        if !response.ok {
            return Err(DriverError::Backend(
                response
                    .error
                    .unwrap_or_else(|| format!("'{}' failed with no error detail", name)),
            ));
        }
        Ok(response)
    }

    /// Ask the bridge to shut down cleanly.
    pub fn quit(mut self) -> Result<(), DriverError> {
        self.send(&BridgeRequest::Quit)?;
        let _ = self.child.wait();
        Ok(())
    }
}

impl Drop for RemoteDriver {
    fn drop(&mut self) {
        // Best-effort cleanup if quit() was never called.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Driver for RemoteDriver {
    fn launch(&mut self) -> Result<(), DriverError> {
        self.send(&BridgeRequest::Launch)?;
        Ok(())
    }

    fn exists(&mut self, query: &ElementQuery) -> Result<bool, DriverError> {
        let response = self.send(&BridgeRequest::Exists { query })?;
        response.exists.ok_or_else(|| DriverError::Protocol {
            command: "exists".into(),
            error: "response missing 'exists' field".into(),
        })
    }

    fn tap(&mut self, query: &ElementQuery) -> Result<(), DriverError> {
        self.send(&BridgeRequest::Tap { query })?;
        Ok(())
    }

    fn drag(&mut self, container: &ElementQuery, gesture: &DragGesture) -> Result<(), DriverError> {
        self.send(&BridgeRequest::Drag { container, gesture })?;
        Ok(())
    }

    fn tab_bar_count(&mut self) -> Result<usize, DriverError> {
        let response = self.send(&BridgeRequest::TabCount)?;
        response.count.ok_or_else(|| DriverError::Protocol {
            command: "tab_count".into(),
            error: "response missing 'count' field".into(),
        })
    }
}
