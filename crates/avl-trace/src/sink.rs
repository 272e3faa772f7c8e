//! Decision trace sinks.
//!
//! The tree reports every structural decision it makes to a [`LogSink`].
//! Messages arrive synchronously and in a fixed order: pre-order for the
//! descent, post-order for the rebalance unwind. A consumer can replay them
//! one by one to animate an operation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Message category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Action,
    Success,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Action => "action",
            Severity::Success => "success",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver of the decision trace.
///
/// Implementations must not feed back into the tree: the resulting shape is
/// identical whatever sink is installed.
pub trait LogSink {
    fn log(&mut self, message: &str, severity: Severity);
}

impl<F> LogSink for F
where
    F: FnMut(&str, Severity),
{
    fn log(&mut self, message: &str, severity: Severity) {
        self(message, severity)
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn log(&mut self, _message: &str, _severity: Severity) {}
}

/// One recorded trace message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    pub severity: Severity,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Keeps the trace in memory.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    entries: Vec<LogEntry>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|e| e.severity == severity).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the recorded entries and leaves the recorder empty.
    pub fn take(&mut self) -> Vec<LogEntry> {
        std::mem::take(&mut self.entries)
    }
}

impl LogSink for Recorder {
    fn log(&mut self, message: &str, severity: Severity) {
        self.entries.push(LogEntry {
            message: message.to_string(),
            severity,
        });
    }
}

/// Forwards the trace to `tracing` under the `avl_trace` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => {
                tracing::info!(target: "avl_trace", severity = severity.as_str(), "{message}")
            }
            Severity::Warning => {
                tracing::warn!(target: "avl_trace", severity = severity.as_str(), "{message}")
            }
            Severity::Action => {
                tracing::debug!(target: "avl_trace", severity = severity.as_str(), "{message}")
            }
        }
    }
}

/// Sends every message to two sinks in turn.
#[derive(Clone, Debug, Default)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: LogSink, B: LogSink> LogSink for Tee<A, B> {
    fn log(&mut self, message: &str, severity: Severity) {
        self.0.log(message, severity);
        self.1.log(message, severity);
    }
}
