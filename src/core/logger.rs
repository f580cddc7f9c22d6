//! Logging backend
//!
//! A synchronous, single-sink logger. Per entry it checks the minimum level,
//! fires hooks, runs the active formatter once and writes the resulting bytes
//! to its appender. A fatal entry additionally runs the deferred exit handlers
//! and terminates the process.

use super::{
    appender::Appender,
    error::Result,
    formatter::Formatter,
    hooks::{ExitHandler, ExitHandlers, HookFn, HookRegistry},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    text_formatter::TextFormatter,
};
use crate::appenders::ConsoleAppender;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Function called to terminate the process after a fatal entry
pub type ExitFn = Arc<dyn Fn(i32) + Send + Sync>;

/// Exit code used after a fatal entry.
pub const FATAL_EXIT_CODE: i32 = 1;

fn process_exit(code: i32) {
    std::process::exit(code)
}

pub struct Logger {
    min_level: RwLock<LogLevel>,
    formatter: RwLock<Arc<dyn Formatter>>,
    appender: Mutex<Box<dyn Appender>>,
    hooks: HookRegistry,
    exit_handlers: ExitHandlers,
    exit_fn: ExitFn,
    /// Metrics for observability (lines written, failures)
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger writing full text lines to stdout at `Info` and above
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level()
    }

    /// Replace the formatter used for all subsequent entries
    pub fn set_formatter(&self, formatter: Arc<dyn Formatter>) {
        *self.formatter.write() = formatter;
    }

    pub fn formatter(&self) -> Arc<dyn Formatter> {
        Arc::clone(&self.formatter.read())
    }

    pub fn add_hook(&self, name: impl Into<String>, hook: HookFn) {
        self.hooks.register(name, hook);
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Register a cleanup callback run right before a fatal exit
    pub fn defer_exit_handler(&self, handler: ExitHandler) {
        self.exit_handlers.defer(handler);
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_entry(LogEntry::new(level, message));
    }

    /// Emit a prepared entry
    ///
    /// Entries below the minimum level are dropped without running hooks. A
    /// hook failure is reported and counted but never stops the line. A
    /// formatter failure means nothing is written for this entry.
    pub fn log_entry(&self, entry: LogEntry) {
        let is_fatal = entry.level == LogLevel::Fatal;

        if self.is_enabled(entry.level) {
            let hook_failures = self.hooks.fire(&entry);
            if hook_failures > 0 {
                self.metrics.record_hook_failures(hook_failures as u64);
            }

            // Clone the Arc so formatting runs without holding the lock
            let formatter = self.formatter();
            match formatter.format(&entry) {
                Ok(bytes) => self.write(&bytes),
                Err(e) => {
                    eprintln!(
                        "[LOGGER ERROR] Formatter '{}' failed, entry not written: {}",
                        formatter.name(),
                        e
                    );
                    self.metrics.record_format_error();
                }
            }
        }

        if is_fatal {
            self.exit(FATAL_EXIT_CODE);
        }
    }

    fn write(&self, bytes: &[u8]) {
        let mut appender = self.appender.lock();
        match appender.write_line(bytes) {
            Ok(()) => {
                self.metrics.record_written();
            }
            Err(e) => {
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
                self.metrics.record_write_error();
            }
        }
    }

    /// Flush, run exit handlers, then call the exit function
    fn exit(&self, code: i32) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush before exit: {}", e);
        }
        self.exit_handlers.run_all();
        (self.exit_fn)(code);
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Log at fatal level, then run exit handlers and terminate
    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    /// Get the logger metrics
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Shared handle to the counters, for formatters that record into them
    pub fn shared_metrics(&self) -> Arc<LoggerMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn flush(&self) -> Result<()> {
        self.appender.lock().flush()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped lines (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use step_logger::prelude::*;
/// use std::sync::Arc;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .appender(WriterAppender::new(buffer.clone()))
///     .formatter(Arc::new(LineFormatter::new(LayoutMode::Plain, SecretRegistry::new())))
///     .build();
///
/// logger.debug("fetching dependencies");
/// assert_eq!(buffer.contents(), "fetching dependencies\n");
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    appender: Option<Box<dyn Appender>>,
    formatter: Option<Arc<dyn Formatter>>,
    exit_fn: Option<ExitFn>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            appender: None,
            formatter: None,
            exit_fn: None,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the sink; defaults to [`ConsoleAppender`]
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appender = Some(Box::new(appender));
        self
    }

    /// Set the initial formatter; defaults to [`TextFormatter`]
    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Replace the process termination used after a fatal entry
    ///
    /// Defaults to [`std::process::exit`]. Mostly useful in tests.
    #[must_use = "builder methods return a new value"]
    pub fn exit_with(mut self, exit_fn: ExitFn) -> Self {
        self.exit_fn = Some(exit_fn);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            min_level: RwLock::new(self.min_level),
            formatter: RwLock::new(
                self.formatter
                    .unwrap_or_else(|| Arc::new(TextFormatter::new())),
            ),
            appender: Mutex::new(
                self.appender
                    .unwrap_or_else(|| Box::new(ConsoleAppender::new())),
            ),
            hooks: HookRegistry::new(),
            exit_handlers: ExitHandlers::new(),
            exit_fn: self.exit_fn.unwrap_or_else(|| Arc::new(process_exit)),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::{SharedBuffer, WriterAppender};
    use crate::core::{LayoutMode, LineFormatter, LoggerError, SecretRegistry};
    use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

    struct FailingAppender;

    impl Appender for FailingAppender {
        fn write_line(&mut self, _line: &[u8]) -> Result<()> {
            Err(LoggerError::writer("sink closed"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct FailingFormatter;

    impl Formatter for FailingFormatter {
        fn format(&self, _entry: &LogEntry) -> Result<Vec<u8>> {
            Err(LoggerError::formatter("failing", "no"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn plain_logger(buffer: &SharedBuffer) -> LoggerBuilder {
        Logger::builder()
            .appender(WriterAppender::new(buffer.clone()))
            .formatter(Arc::new(LineFormatter::new(
                LayoutMode::Plain,
                SecretRegistry::new(),
            )))
    }

    #[test]
    fn test_builder_default() {
        let logger = LoggerBuilder::default().build();
        assert_eq!(logger.min_level(), LogLevel::Info);
        assert_eq!(logger.formatter().name(), "text");
        assert_eq!(logger.metrics().dropped_count(), 0);
    }

    #[test]
    fn test_min_level_filters_declared_level() {
        let buffer = SharedBuffer::new();
        let logger = plain_logger(&buffer).build();

        logger.debug("hidden");
        // promotion happens at render time only, filtering uses the declared level
        logger.debug("[ERROR] also hidden");
        logger.info("shown");

        assert_eq!(buffer.lines(), vec!["shown"]);

        logger.set_min_level(LogLevel::Debug);
        logger.debug("now shown");
        assert_eq!(buffer.lines(), vec!["shown", "now shown"]);
    }

    #[test]
    fn test_set_formatter_applies_to_next_entry() {
        let buffer = SharedBuffer::new();
        let logger = plain_logger(&buffer).build();

        logger.info("plain");
        logger.set_formatter(Arc::new(LineFormatter::new(
            LayoutMode::Default,
            SecretRegistry::new(),
        )));
        logger.info("columns");

        assert_eq!(buffer.lines(), vec!["plain", "info         - columns"]);
    }

    #[test]
    fn test_hooks_see_filtered_entries_only() {
        let buffer = SharedBuffer::new();
        let logger = plain_logger(&buffer).build();
        let seen = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&seen);
        logger.add_hook(
            "count",
            Arc::new(move |_entry: &LogEntry| -> Result<()> {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );

        logger.trace("filtered");
        logger.info("passes");
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(logger.hooks().names(), vec!["count"]);
    }

    #[test]
    fn test_failing_hook_still_writes_line() {
        let buffer = SharedBuffer::new();
        let logger = plain_logger(&buffer).build();
        logger.add_hook(
            "broken",
            Arc::new(|_entry: &LogEntry| -> Result<()> { Err(LoggerError::hook("broken", "down")) }),
        );

        logger.info("still here");
        assert_eq!(buffer.lines(), vec!["still here"]);
        assert_eq!(logger.metrics().hook_failures(), 1);
    }

    #[test]
    fn test_formatter_failure_writes_nothing() {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .appender(WriterAppender::new(buffer.clone()))
            .formatter(Arc::new(FailingFormatter))
            .build();

        logger.info("lost");
        assert!(buffer.contents().is_empty());
        assert_eq!(logger.metrics().format_errors(), 1);
        assert_eq!(logger.metrics().lines_written(), 0);
    }

    #[test]
    fn test_write_failure_is_counted() {
        let logger = Logger::builder().appender(FailingAppender).build();
        logger.error("nowhere to go");
        assert_eq!(logger.metrics().write_errors(), 1);
    }

    #[test]
    fn test_fatal_runs_exit_handlers_then_exits() {
        let buffer = SharedBuffer::new();
        let exit_code = Arc::new(AtomicI32::new(-1));
        let order = Arc::new(Mutex::new(Vec::new()));

        let code = Arc::clone(&exit_code);
        let exit_order = Arc::clone(&order);
        let logger = plain_logger(&buffer)
            .exit_with(Arc::new(move |c: i32| {
                exit_order.lock().push("exit");
                code.store(c, Ordering::SeqCst);
            }))
            .build();

        for name in ["cleanup-a", "cleanup-b"] {
            let order = Arc::clone(&order);
            logger.defer_exit_handler(Box::new(move || order.lock().push(name)));
        }

        logger.fatal("giving up");

        assert_eq!(buffer.lines(), vec!["giving up"]);
        assert_eq!(*order.lock(), vec!["cleanup-a", "cleanup-b", "exit"]);
        assert_eq!(exit_code.load(Ordering::SeqCst), FATAL_EXIT_CODE);
    }

    #[test]
    fn test_non_fatal_levels_do_not_exit() {
        let buffer = SharedBuffer::new();
        let exited = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&exited);
        let logger = plain_logger(&buffer)
            .exit_with(Arc::new(move |_code: i32| {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
            .build();

        // rendered as error, but declared info: no exit
        logger.info("FATAL ERROR in tool output");
        logger.error("bad");
        assert_eq!(exited.load(Ordering::SeqCst), 0);
    }
}
