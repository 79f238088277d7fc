#![deny(missing_docs)]
//! Shared logging utilities for the tubewatch workspace.
//!
//! Components never reach for the global logger themselves. They are handed a
//! [`LogSink`] when constructed and log through the `watch_*` macros, which
//! format the message and forward it to that sink. The binary passes a
//! [`FacadeSink`] (backed by the `log` facade); tests pass a [`MemorySink`]
//! and inspect what was recorded.

use std::sync::Mutex;

pub use log::Level;

/// Destination for log lines emitted by a single run.
pub trait LogSink: Send + Sync {
    /// Records one already formatted line at `level`.
    fn record(&self, level: Level, message: &str);

    /// Records a debug-level line.
    fn debug(&self, message: &str) {
        self.record(Level::Debug, message);
    }

    /// Records an info-level line.
    fn info(&self, message: &str) {
        self.record(Level::Info, message);
    }

    /// Records a warn-level line.
    fn warn(&self, message: &str) {
        self.record(Level::Warn, message);
    }

    /// Records an error-level line.
    fn error(&self, message: &str) {
        self.record(Level::Error, message);
    }
}

/// Sink that forwards every line to the `log` facade under a fixed target.
#[derive(Debug, Clone, Copy)]
pub struct FacadeSink {
    target: &'static str,
}

impl FacadeSink {
    /// Creates a sink logging under `target`.
    pub const fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for FacadeSink {
    fn default() -> Self {
        Self::new("tubewatch")
    }
}

impl LogSink for FacadeSink {
    fn record(&self, level: Level, message: &str) {
        log::log!(target: self.target, level, "{message}");
    }
}

/// Sink that keeps every line in memory, for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded lines, oldest first.
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Returns the messages recorded at exactly `level`.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    /// Returns true if any recorded line at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.messages_at(level).iter().any(|m| m.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn record(&self, level: Level, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

/// Logs a debug-level message to the given sink.
#[macro_export]
macro_rules! watch_debug {
    ($sink:expr, $($arg:tt)*) => {{
        $crate::LogSink::debug($sink, &format!($($arg)*));
    }};
}

/// Logs an info-level message to the given sink.
#[macro_export]
macro_rules! watch_info {
    ($sink:expr, $($arg:tt)*) => {{
        $crate::LogSink::info($sink, &format!($($arg)*));
    }};
}

/// Logs a warn-level message to the given sink.
#[macro_export]
macro_rules! watch_warn {
    ($sink:expr, $($arg:tt)*) => {{
        $crate::LogSink::warn($sink, &format!($($arg)*));
    }};
}

/// Logs an error-level message to the given sink.
#[macro_export]
macro_rules! watch_error {
    ($sink:expr, $($arg:tt)*) => {{
        $crate::LogSink::error($sink, &format!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        watch_info!(&sink, "first {}", 1);
        watch_error!(&sink, "second");
        watch_debug!(&sink, "third");

        let lines = sink.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], (Level::Info, "first 1".to_string()));
        assert_eq!(lines[1].0, Level::Error);
        assert!(sink.contains(Level::Debug, "third"));
        assert!(!sink.contains(Level::Info, "third"));
    }

    #[test]
    fn macros_accept_trait_objects() {
        let memory = MemorySink::new();
        let sink: &dyn LogSink = &memory;
        watch_warn!(sink, "careful: {}", "x");
        assert_eq!(memory.messages_at(Level::Warn), vec!["careful: x".to_string()]);
    }

    #[test]
    fn facade_sink_does_not_panic_without_logger() {
        initialize_for_tests();
        let sink = FacadeSink::default();
        watch_info!(&sink, "hello");
    }
}
