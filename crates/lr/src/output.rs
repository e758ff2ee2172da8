//! Terminal output utilities.
//!
//! Status and errors go to stderr; events and classifications go to stdout
//! so they can be piped.

use console::{Style, Term};
use lr_engine::{EventSink, ReloadEvent};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    data: Term,
    red: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            data: Term::stdout(),
            red: Style::new().red(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a line of machine-readable output.
    pub(crate) fn data(&self, line: &str) {
        let _ = self.data.write_line(line);
    }
}

/// Event sink that prints each event as a JSON line on stdout.
pub(crate) struct JsonLinesSink {
    output: Output,
}

impl JsonLinesSink {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            output: Output::new(),
        }
    }
}

impl EventSink for JsonLinesSink {
    fn emit(&self, event: ReloadEvent) {
        match serde_json::to_string(&event) {
            Ok(line) => self.output.data(&line),
            Err(e) => tracing::warn!(event = event.name(), error = %e, "Failed to serialize event"),
        }
    }
}
