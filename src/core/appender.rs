//! Appender trait for the log output destination

use super::error::Result;

/// Sink receiving fully formatted, newline-terminated lines
pub trait Appender: Send + Sync {
    fn write_line(&mut self, line: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
