//! Log entry structure

use super::log_context::{FieldValue, LogContext};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field key carrying the current build step label.
pub const STEP_NAME_FIELD: &str = "stepName";

/// Field key carrying the library identifier.
pub const LIBRARY_FIELD: &str = "library";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "LogContext::is_empty")]
    pub fields: LogContext,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
            fields: LogContext::new(),
        }
    }

    pub fn with_fields(mut self, fields: LogContext) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.add_field(key, value);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn step_name(&self) -> Option<&FieldValue> {
        self.field(STEP_NAME_FIELD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_kept_verbatim() {
        // Relayed tool output is rendered as-is, including tabs.
        let entry = LogEntry::new(LogLevel::Info, "col1\tcol2");
        assert_eq!(entry.message, "col1\tcol2");
    }

    #[test]
    fn test_step_name_lookup() {
        let entry = LogEntry::new(LogLevel::Info, "compiling").with_field(STEP_NAME_FIELD, "build");
        assert_eq!(entry.step_name(), Some(&FieldValue::from("build")));

        let bare = LogEntry::new(LogLevel::Info, "compiling");
        assert!(bare.step_name().is_none());
    }

    #[test]
    fn test_serde_roundtrip_keeps_fields() {
        let entry = LogEntry::new(LogLevel::Warn, "careful").with_field(LIBRARY_FIELD, "core");
        let json = serde_json::to_string(&entry).expect("serialize");
        assert!(json.contains("\"level\":\"warn\""));

        let back: LogEntry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, entry);
    }
}
