//! Observable events for tablestore
//!
//! Only front-end layers emit events; the relational core is silent.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    BootStart,
    BootComplete,
    /// Ready to read requests
    Serving,
    ShutdownStart,
    ShutdownComplete,

    // Configuration
    ConfigLoaded,
    /// Bootstrap script fully applied
    ScriptReplayed,

    // Requests
    RequestHandled,
    RequestRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "TABLESTORE_STARTUP_BEGIN",
            Event::BootComplete => "TABLESTORE_STARTUP_COMPLETE",
            Event::Serving => "TABLESTORE_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ScriptReplayed => "SCRIPT_REPLAYED",
            Event::RequestHandled => "REQUEST_COMPLETE",
            Event::RequestRejected => "REQUEST_REJECTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_event_names_unique() {
        let events = [
            Event::BootStart,
            Event::BootComplete,
            Event::Serving,
            Event::ShutdownStart,
            Event::ShutdownComplete,
            Event::ConfigLoaded,
            Event::ScriptReplayed,
            Event::RequestHandled,
            Event::RequestRejected,
        ];
        let names: HashSet<_> = events.iter().map(Event::as_str).collect();
        assert_eq!(names.len(), events.len());
    }
}
