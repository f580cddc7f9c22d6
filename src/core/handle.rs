//! Logger handle carrying persistent fields

use super::{
    log_context::{FieldValue, LogContext},
    log_entry::LogEntry,
    log_level::LogLevel,
    logger::Logger,
};
use std::sync::Arc;

/// A backend reference plus the fields stamped on every entry it emits
///
/// Handles are immutable: [`LogHandle::with_field`] returns a new handle and
/// leaves the original untouched, so a handle can be shared freely between
/// threads.
///
/// # Example
///
/// ```
/// use step_logger::prelude::*;
/// use std::sync::Arc;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder()
///     .appender(WriterAppender::new(buffer.clone()))
///     .formatter(Arc::new(LineFormatter::new(LayoutMode::Default, SecretRegistry::new())))
///     .build();
///
/// let handle = LogHandle::new(Arc::new(logger)).with_field("stepName", "build");
/// handle.info("compiling");
/// assert_eq!(buffer.contents(), "info  build  - compiling\n");
/// ```
#[derive(Clone)]
pub struct LogHandle {
    logger: Arc<Logger>,
    fields: LogContext,
}

impl LogHandle {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self {
            logger,
            fields: LogContext::new(),
        }
    }

    /// Derive a handle with one more field (or an overwritten one)
    #[must_use]
    pub fn with_field<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self {
            logger: Arc::clone(&self.logger),
            fields: self.fields.clone().with_field(key, value),
        }
    }

    pub fn fields(&self) -> &LogContext {
        &self.fields
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Build an entry carrying this handle's fields without emitting it
    pub fn entry(&self, level: LogLevel, message: impl Into<String>) -> LogEntry {
        LogEntry::new(level, message).with_fields(self.fields.clone())
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.logger.is_enabled(level) && level != LogLevel::Fatal {
            return;
        }
        self.logger.log_entry(self.entry(level, message));
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
}

impl std::fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogHandle")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
