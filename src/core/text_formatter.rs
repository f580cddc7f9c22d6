//! Full key=value rendering of a log entry
//!
//! Renders every part of an entry as `key=value` pairs:
//!
//! `time="2025-01-08T11:30:45+01:00" level=info msg=compiling library=core stepName=build`
//!
//! Fields follow the fixed keys, sorted by name. Fields whose names collide
//! with a fixed key are kept under a `fields.` prefix.

use super::{
    error::Result,
    formatter::Formatter,
    log_entry::LogEntry,
    timestamp::TimestampFormat,
};

const TIME_KEY: &str = "time";
const LEVEL_KEY: &str = "level";
const MESSAGE_KEY: &str = "msg";

/// Generic multi-field formatter, used for the `full` layout
#[derive(Debug, Clone)]
pub struct TextFormatter {
    timestamp_format: TimestampFormat,
    include_timestamp: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            include_timestamp: true,
        }
    }

    /// Set the timestamp format used for the `time` key
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Leave out the `time` key entirely
    #[must_use]
    pub fn without_timestamp(mut self) -> Self {
        self.include_timestamp = false;
        self
    }

    /// Render an entry as a single newline-terminated line
    pub fn render(&self, entry: &LogEntry) -> String {
        let mut parts = Vec::with_capacity(3 + entry.fields.len());

        if self.include_timestamp {
            parts.push(format!(
                "{}={}",
                TIME_KEY,
                self.escape_value(&self.timestamp_format.format(&entry.timestamp))
            ));
        }
        parts.push(format!("{}={}", LEVEL_KEY, entry.level.to_str()));
        parts.push(format!("{}={}", MESSAGE_KEY, self.escape_value(&entry.message)));

        for (key, value) in entry.fields.fields() {
            let key = self.escape_key(key);
            let key = if matches!(key.as_str(), TIME_KEY | LEVEL_KEY | MESSAGE_KEY) {
                format!("fields.{}", key)
            } else {
                key
            };
            parts.push(format!("{}={}", key, self.escape_value(&value.to_string())));
        }

        let mut line = parts.join(" ");
        line.push('\n');
        line
    }

    /// Escape a key (drop spaces and special chars)
    fn escape_key(&self, key: &str) -> String {
        key.chars()
            .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
            .collect()
    }

    /// Quote a value unless it is made only of unambiguous characters
    fn escape_value(&self, value: &str) -> String {
        if self.needs_quoting(value) {
            self.quote_value(value)
        } else {
            value.to_string()
        }
    }

    fn needs_quoting(&self, value: &str) -> bool {
        value.is_empty()
            || !value.chars().all(|c| {
                c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '/' | '@' | '^' | '+')
            })
    }

    fn quote_value(&self, value: &str) -> String {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for TextFormatter {
    fn format(&self, entry: &LogEntry) -> Result<Vec<u8>> {
        Ok(self.render(entry).into_bytes())
    }

    fn name(&self) -> &str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, LIBRARY_FIELD, STEP_NAME_FIELD};
    use chrono::{TimeZone, Utc};

    fn entry(message: &str) -> LogEntry {
        LogEntry::new(LogLevel::Info, message)
            .with_timestamp(Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap())
    }

    #[test]
    fn test_text_format() {
        let entry = entry("compiling")
            .with_field(STEP_NAME_FIELD, "build")
            .with_field(LIBRARY_FIELD, "core");

        let time = TimestampFormat::Rfc3339.format(&entry.timestamp);
        assert_eq!(
            TextFormatter::new().render(&entry),
            format!("time=\"{}\" level=info msg=compiling library=core stepName=build\n", time)
        );
    }

    #[test]
    fn test_message_with_spaces_is_quoted() {
        let line = TextFormatter::new().without_timestamp().render(&entry("npm WARN deprecated"));
        assert_eq!(line, "level=info msg=\"npm WARN deprecated\"\n");
    }

    #[test]
    fn test_quotes_and_backslashes_escaped() {
        let line = TextFormatter::new()
            .without_timestamp()
            .render(&entry(r#"path "C:\tmp""#));
        assert_eq!(line, "level=info msg=\"path \\\"C:\\\\tmp\\\"\"\n");
    }

    #[test]
    fn test_empty_values_are_quoted() {
        let line = TextFormatter::new()
            .without_timestamp()
            .render(&entry("").with_field(STEP_NAME_FIELD, ""));
        assert_eq!(line, "level=info msg=\"\" stepName=\"\"\n");
    }

    #[test]
    fn test_colliding_field_names_are_prefixed() {
        let line = TextFormatter::new()
            .without_timestamp()
            .render(&entry("x").with_field("level", "custom"));
        assert_eq!(line, "level=info msg=x fields.level=custom\n");
    }

    #[test]
    fn test_unix_timestamp_format() {
        let line = TextFormatter::new()
            .with_timestamp_format(TimestampFormat::Unix)
            .render(&entry("x"));
        assert_eq!(line, "time=1736332245 level=info msg=x\n");
    }

    #[test]
    fn test_non_string_fields() {
        let line = TextFormatter::new()
            .without_timestamp()
            .render(&entry("x").with_field("attempt", 3).with_field("cached", false));
        assert_eq!(line, "level=info msg=x attempt=3 cached=false\n");
    }
}
