//! Timestamp formatting utilities
//!
//! Entries carry a UTC instant. Human-readable forms are rendered in the
//! host's local time zone.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use step_logger::core::TimestampFormat;
/// use chrono::{DateTime, TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// let rendered = TimestampFormat::Rfc3339.format(&at);
/// assert_eq!(DateTime::parse_from_rfc3339(&rendered).unwrap(), at);
/// assert_eq!(TimestampFormat::Unix.format(&at), "1736332245");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local RFC 3339 at second precision: `2025-01-08T19:30:45+09:00`,
    /// or `2025-01-08T10:30:45Z` on a UTC host
    #[default]
    Rfc3339,

    /// Local time of day only: `10:30:45`
    TimeOfDay,

    /// Unix timestamp in seconds: `1736332245`
    Unix,
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        let local = datetime.with_timezone(&Local);
        match self {
            TimestampFormat::Rfc3339 => local.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimestampFormat::TimeOfDay => local.format("%H:%M:%S").to_string(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
        }
    }
}
