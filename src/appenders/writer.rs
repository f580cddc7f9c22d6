//! Appender over any `std::io::Write`

use crate::core::{Appender, LoggerError, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// Writes lines to an arbitrary writer: a file, a pipe, an in-memory buffer
pub struct WriterAppender<W: Write + Send + Sync> {
    writer: W,
    name: String,
}

impl<W: Write + Send + Sync> WriterAppender<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            name: "writer".to_string(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

impl WriterAppender<BufWriter<File>> {
    /// Append to a file, creating it if needed
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation(
                    format!("opening '{}'", path.display()),
                    "cannot open log file",
                    e,
                )
            })?;
        Ok(Self::new(BufWriter::new(file)).with_name("file"))
    }
}

impl<W: Write + Send + Sync> Appender for WriterAppender<W> {
    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        self.writer.write_all(line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<W: Write + Send + Sync> Drop for WriterAppender<W> {
    fn drop(&mut self) {
        // Ensure all buffered data reaches the writer
        let _ = self.writer.flush();
    }
}

/// Cloneable in-memory buffer, handy for capturing output
///
/// # Example
///
/// ```
/// use step_logger::appenders::{SharedBuffer, WriterAppender};
/// use step_logger::core::Appender;
///
/// let buffer = SharedBuffer::new();
/// let mut appender = WriterAppender::new(buffer.clone());
/// appender.write_line(b"hello\n").unwrap();
/// assert_eq!(buffer.contents(), "hello\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
