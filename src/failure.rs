use std::fmt;
use std::panic::Location;
use std::time::Duration;

/// File and line of the test code that initiated a failing call.
///
/// Captured through `#[track_caller]` on the public API so that a failing
/// assertion points at the test, not at library internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    /// Capture the caller's location. Only meaningful when every frame
    /// between the test code and this call is `#[track_caller]`.
    #[track_caller]
    pub fn here() -> Self {
        let location = Location::caller();
        CallSite {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Which end of a navigation transition failed its existence assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => write!(f, "Source"),
            Side::Destination => write!(f, "Destination"),
        }
    }
}

#[derive(Debug)]
pub enum AutomationError {
    /// An element did not come into existence before its deadline.
    NotFound {
        identifier: String,
        message: Option<String>,
        timeout: Duration,
        site: CallSite,
    },

    /// A tab index outside the live tab bar's bounds. Structural, never
    /// a timing issue: reported immediately without waiting.
    TabOutOfBounds {
        name: String,
        index: usize,
        count: usize,
        site: CallSite,
    },

    /// A screen was absent at a navigator transition boundary.
    NavigationAssertion {
        side: Side,
        screen: String,
        site: CallSite,
    },

    /// The scroll-search loop exhausted its deadline without the target
    /// ever appearing.
    ScrollTimeout {
        target: String,
        container: String,
        site: CallSite,
    },

    /// A screen name referenced by a flow step has no declaration.
    UnknownScreen { name: String, site: CallSite },

    /// A component key has no entry (or the wrong kind of entry) in the
    /// screen's registry.
    UnknownComponent {
        screen: String,
        key: String,
        site: CallSite,
    },

    /// Transport-level failure talking to the automation backend.
    Driver(DriverError),
}

impl fmt::Display for AutomationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutomationError::NotFound {
                identifier,
                message,
                timeout,
                site,
            } => match message {
                Some(message) => write!(f, "{} (waited {:?}, {})", message, timeout, site),
                None => write!(
                    f,
                    "Element not found with identifier: \"{}\" (waited {:?}, {})",
                    identifier, timeout, site
                ),
            },
            AutomationError::TabOutOfBounds {
                name,
                index,
                count,
                site,
            } => write!(
                f,
                "\"{}\" tab not found: index {} outside tab bar with {} buttons ({})",
                name, index, count, site
            ),
            AutomationError::NavigationAssertion { side, screen, site } => {
                write!(f, "{} screen not found: \"{}\" ({})", side, screen, site)
            }
            AutomationError::ScrollTimeout {
                target,
                container,
                site,
            } => write!(
                f,
                "Scrolling timed out. Element {} not found in \"{}\" ({})",
                target, container, site
            ),
            AutomationError::UnknownScreen { name, site } => {
                write!(f, "No screen declared with name \"{}\" ({})", name, site)
            }
            AutomationError::UnknownComponent { screen, key, site } => write!(
                f,
                "Screen \"{}\" declares no component for key \"{}\" ({})",
                screen, key, site
            ),
            AutomationError::Driver(e) => write!(f, "Driver error: {}", e),
        }
    }
}

impl std::error::Error for AutomationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AutomationError::Driver(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DriverError> for AutomationError {
    fn from(e: DriverError) -> Self {
        AutomationError::Driver(e)
    }
}

impl AutomationError {
    /// The call site carried by this failure, if it has one.
    pub fn site(&self) -> Option<CallSite> {
        match self {
            AutomationError::NotFound { site, .. }
            | AutomationError::TabOutOfBounds { site, .. }
            | AutomationError::NavigationAssertion { site, .. }
            | AutomationError::ScrollTimeout { site, .. }
            | AutomationError::UnknownScreen { site, .. }
            | AutomationError::UnknownComponent { site, .. } => Some(*site),
            AutomationError::Driver(_) => None,
        }
    }
}

/// Faults in the transport between this crate and the automation backend.
#[derive(Debug)]
pub enum DriverError {
    /// The bridge subprocess failed to spawn
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// Reading from or writing to the bridge subprocess failed
    Io {
        context: String,
        source: std::io::Error,
    },

    /// The backend answered, but not with what the protocol requires
    Protocol { command: String, error: String },

    /// Encoding a request or decoding a response failed
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// HTTP transport failure (http driver only)
    Http {
        context: String,
        source: reqwest::Error,
    },

    /// The backend reported a failure executing the request
    Backend(String),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Spawn { command, source } => {
                write!(f, "Failed to spawn automation bridge '{}': {}", command, source)
            }
            DriverError::Io { context, source } => {
                write!(f, "Bridge I/O error ({}): {}", context, source)
            }
            DriverError::Protocol { command, error } => {
                write!(f, "Protocol error for '{}': {}", command, error)
            }
            DriverError::Json { context, source } => {
                write!(f, "JSON error ({}): {}", context, source)
            }
            DriverError::Http { context, source } => {
                write!(f, "HTTP error ({}): {}", context, source)
            }
            DriverError::Backend(msg) => {
                write!(f, "Backend reported failure: {}", msg)
            }
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Spawn { source, .. } | DriverError::Io { source, .. } => Some(source),
            DriverError::Json { source, .. } => Some(source),
            DriverError::Http { source, .. } => Some(source),
            _ => None,
        }
    }
}
