//! Logging macros with `format!`-style arguments
//!
//! The target can be anything with a `log(LogLevel, String)` method: a
//! [`Logger`](crate::core::Logger) or a [`LogHandle`](crate::core::LogHandle).
//!
//! # Examples
//!
//! ```
//! use step_logger::prelude::*;
//! use step_logger::info;
//!
//! let buffer = SharedBuffer::new();
//! let ctx = LoggingContext::with_logger(
//!     "core",
//!     Logger::builder().appender(WriterAppender::new(buffer.clone())).build(),
//! );
//! ctx.set_formatter("plain");
//!
//! let step = 3;
//! info!(ctx.entry(), "step {} of {}", step, 5);
//! assert_eq!(buffer.contents(), "step 3 of 5\n");
//! ```

/// Log a formatted message at an explicit level.
///
/// ```
/// # use step_logger::prelude::*;
/// # let handle = LogHandle::new(std::sync::Arc::new(Logger::new()));
/// use step_logger::log;
/// log!(handle, LogLevel::Info, "Simple message");
/// log!(handle, LogLevel::Error, "exit code {}", 2);
/// ```
#[macro_export]
macro_rules! log {
    ($target:expr, $level:expr, $($arg:tt)+) => {
        $target.log($level, format!($($arg)+))
    };
}

#[macro_export]
macro_rules! trace {
    ($target:expr, $($arg:tt)+) => {
        $crate::log!($target, $crate::LogLevel::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($target:expr, $($arg:tt)+) => {
        $crate::log!($target, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($target:expr, $($arg:tt)+) => {
        $crate::log!($target, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($target:expr, $($arg:tt)+) => {
        $crate::log!($target, $crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($target:expr, $($arg:tt)+) => {
        $crate::log!($target, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal message; the process exits afterwards.
#[macro_export]
macro_rules! fatal {
    ($target:expr, $($arg:tt)+) => {
        $crate::log!($target, $crate::LogLevel::Fatal, $($arg)+)
    };
}
