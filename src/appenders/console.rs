//! Console appender implementation

use crate::core::{Appender, LoggerError, Result};
use std::io::Write;

/// Writes every line to the process's standard output
///
/// All levels go to stdout so the relayed tool output keeps its ordering.
#[derive(Debug, Default)]
pub struct ConsoleAppender;

impl ConsoleAppender {
    pub fn new() -> Self {
        Self
    }
}

impl Appender for ConsoleAppender {
    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(line)
            .map_err(|e| LoggerError::io_operation("writing to stdout", "line not written", e))
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_appender_writes() {
        let mut appender = ConsoleAppender::new();
        appender.write_line(b"console appender test line\n").unwrap();
        appender.flush().unwrap();
        assert_eq!(appender.name(), "console");
    }
}
