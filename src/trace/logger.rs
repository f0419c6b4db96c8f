use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use crate::trace::trace::TraceEvent;

/// Append-only JSONL sink for session activity. This is also the
/// test-failure channel: every failure is written here before it
/// propagates to the caller.
///
/// Trouble opening or writing the file downgrades to a warning on
/// stderr; tracing must never take a test run down with it.
pub struct TraceLogger {
    file: Option<Mutex<File>>,
}

impl TraceLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match File::options().create(true).append(true).open(path) {
            Ok(file) => TraceLogger {
                file: Some(Mutex::new(file)),
            },
            Err(e) => {
                eprintln!(
                    "Warning: could not open trace file '{}': {}",
                    path.display(),
                    e
                );
                TraceLogger { file: None }
            }
        }
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some(file) = &self.file else {
            return; // tracing disabled
        };

        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Warning: failed to serialize trace event: {}", e);
                return;
            }
        };

        match file.lock() {
            Ok(mut file) => {
                if let Err(e) = writeln!(file, "{}", line) {
                    eprintln!("Warning: failed to write trace event: {}", e);
                }
            }
            Err(e) => eprintln!("Warning: trace logger lock poisoned: {}", e),
        }
    }
}
