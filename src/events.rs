//! Diagnostic event stream
//!
//! Materializers emit an event on every fallback or ambiguity decision so
//! operators can audit the generated output. Sinks decide surfacing:
//! - `ConsoleSink`: verbosity-gated terminal output
//! - `BufferSink`: records events for inspection (used heavily in tests)
//! - `NoopSink`: silent operation

use std::sync::Mutex;

/// Severity of a diagnostic event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Detail only shown with increased verbosity
    Verbose,
    /// Normal operator-facing output
    Log,
    /// A fallback or ambiguity decision the operator should review
    Warn,
}

/// A single diagnostic event
#[derive(Debug, Clone)]
pub struct Event {
    pub severity: Severity,
    pub message: String,
}

impl Event {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Trait for receiving diagnostic events
pub trait EventSink {
    /// Handle a diagnostic event
    fn emit(&self, event: Event);

    /// Emit a verbose-level message
    fn verbose(&self, message: String) {
        self.emit(Event::new(Severity::Verbose, message));
    }

    /// Emit a log-level message
    fn log(&self, message: String) {
        self.emit(Event::new(Severity::Log, message));
    }

    /// Emit a warning
    fn warn(&self, message: String) {
        self.emit(Event::new(Severity::Warn, message));
    }
}

/// No-op event sink for silent operation
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: Event) {}
}

/// Event sink that records all events for later inspection
#[derive(Default)]
pub struct BufferSink {
    events: Mutex<Vec<Event>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Messages of recorded events at the given severity
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.severity == severity)
            .map(|e| e.message.clone())
            .collect()
    }
}

impl EventSink for BufferSink {
    fn emit(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

/// Event sink that prints to the terminal, gated by verbosity
///
/// Verbosity 0 shows warnings and log lines; 1+ adds verbose detail.
pub struct ConsoleSink {
    verbosity: u8,
}

impl ConsoleSink {
    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }
}

impl EventSink for ConsoleSink {
    fn emit(&self, event: Event) {
        match event.severity {
            Severity::Warn => eprintln!("warning: {}", event.message),
            Severity::Log => println!("{}", event.message),
            Severity::Verbose => {
                if self.verbosity > 0 {
                    println!("{}", event.message);
                }
            }
        }
    }
}
