//! The logger capability injected through the pipeline.

use std::fmt::Display;
use std::sync::Mutex;

/// Receives informational messages and recovered errors.
///
/// The pipeline never surfaces recoverable failures as return values; they
/// all pass through here. A broken stylesheet must degrade, not crash.
pub trait Logger {
    /// Logs an informational message.
    fn log(&self, message: &str);

    /// Reports a recovered error.
    fn error(&self, error: &dyn Display);
}

/// A logger that writes to stderr.
#[derive(Debug, Default)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        eprintln!("[css-modules-dts] {message}");
    }

    fn error(&self, error: &dyn Display) {
        eprintln!("[css-modules-dts] error: {error}");
    }
}

/// A logger that discards everything.
#[derive(Debug, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _message: &str) {}

    fn error(&self, _error: &dyn Display) {}
}

/// A logger that records messages, for tests and capturing hosts.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    messages: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingLogger {
    /// Creates an empty recording logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all logged messages so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Returns all reported errors so far.
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn error(&self, error: &dyn Display) {
        self.errors.lock().unwrap().push(error.to_string());
    }
}
