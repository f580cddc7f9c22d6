//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod formatter;
pub mod handle;
pub mod hooks;
pub mod layout;
pub mod lifecycle;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod secrets;
pub mod severity;
pub mod text_formatter;
pub mod timestamp;

pub use appender::Appender;
pub use config::{LoggerConfig, LIBRARY_REPOSITORY};
pub use error::{LoggerError, Result};
pub use formatter::{Formatter, LineFormatter};
pub use handle::LogHandle;
pub use hooks::{ExitHandler, ExitHandlers, HookFn, HookRegistry};
pub use layout::{LayoutMode, LEVEL_WIDTH, STEP_WIDTH};
pub use lifecycle::LoggingContext;
pub use log_context::{FieldValue, LogContext};
pub use log_entry::{LogEntry, LIBRARY_FIELD, STEP_NAME_FIELD};
pub use log_level::LogLevel;
pub use logger::{ExitFn, Logger, LoggerBuilder, FATAL_EXIT_CODE};
pub use metrics::LoggerMetrics;
pub use secrets::{SecretRegistry, SECRET_MASK};
pub use severity::{promote, ERROR_MARKERS, WARN_MARKER};
pub use text_formatter::TextFormatter;
pub use timestamp::TimestampFormat;
