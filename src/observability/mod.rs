//! Observability for tablestore
//!
//! Structured JSON-lines logging with typed lifecycle events.
//!
//! # Usage
//!
//! ```ignore
//! use tablestore::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Warn);
//! log_event_with_fields(Event::ConfigLoaded, &[("log_level", "warn")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event at INFO
pub fn log_event(event: Event) {
    Logger::info(event.as_str(), &[]);
}

/// Log a lifecycle event with fields at INFO
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::info(event.as_str(), fields);
}
