//! # Step Logger
//!
//! Log-output shaping for build and CI tools. Every line passes through a
//! formatter that can drop everything but the message, prefix a time of day,
//! lay out fixed-width level and step columns, or fall back to full
//! `key=value` text. On the way out, messages that carry `ERROR`, `ERR!` or
//! `WARN` markers are rendered at the matching severity and registered
//! secrets are masked.
//!
//! ## Features
//!
//! - **Selectable layouts**: `plain`, `timestamp`, `default` and `full`
//! - **Severity promotion**: marker words in a message raise its rendered level
//! - **Secret scrubbing**: registered values never reach the sink
//! - **Step tagging**: a `stepName` column follows the current build step
//! - **Hooks and exit handlers**: observe entries, clean up before a fatal exit
//!
//! ## Example
//!
//! ```
//! use step_logger::prelude::*;
//!
//! let buffer = SharedBuffer::new();
//! let logger = Logger::builder().appender(WriterAppender::new(buffer.clone())).build();
//! let ctx = LoggingContext::with_logger("core", logger);
//!
//! ctx.set_formatter("default");
//! ctx.set_step_name("test");
//! ctx.entry().info("npm ERR! missing script");
//!
//! assert_eq!(buffer.contents(), "error test   - npm ERR! missing script\n");
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, SharedBuffer, WriterAppender};
    pub use crate::core::{
        Appender, FieldValue, Formatter, HookFn, LayoutMode, LineFormatter, LogContext, LogEntry,
        LogHandle, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
        LoggingContext, Result, SecretRegistry, TextFormatter, TimestampFormat,
    };
}

pub use appenders::{ConsoleAppender, SharedBuffer, WriterAppender};
pub use core::{
    promote, Appender, FieldValue, Formatter, HookFn, LayoutMode, LineFormatter, LogContext,
    LogEntry, LogHandle, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, LoggingContext, Result, SecretRegistry, TextFormatter, TimestampFormat,
    LIBRARY_FIELD, STEP_NAME_FIELD,
};
