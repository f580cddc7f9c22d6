//! Severity promotion based on markers in the message text
//!
//! Build tools such as maven or npm print their own severity in plain text
//! (`[ERROR]`, `npm ERR!`, `[WARN]`). When their output is relayed through the
//! logger at a lower level, the rendered line is promoted so the level column
//! agrees with what the tool said.

use super::log_level::LogLevel;

/// Substrings that promote a line to [`LogLevel::Error`].
pub const ERROR_MARKERS: [&str; 2] = ["ERROR", "ERR!"];

/// Substring that promotes a line to [`LogLevel::Warn`].
pub const WARN_MARKER: &str = "WARN";

/// Returns the level a line should be rendered with.
///
/// Error markers are checked first and win over the warn marker. Matching is
/// case-sensitive and literal. A line without markers keeps `declared`.
///
/// ```
/// use step_logger::core::{promote, LogLevel};
///
/// assert_eq!(promote("npm ERR! code 1", LogLevel::Info), LogLevel::Error);
/// assert_eq!(promote("[WARN] deprecated", LogLevel::Debug), LogLevel::Warn);
/// assert_eq!(promote("all good", LogLevel::Debug), LogLevel::Debug);
/// ```
#[must_use]
pub fn promote(message: &str, declared: LogLevel) -> LogLevel {
    if ERROR_MARKERS.iter().any(|marker| message.contains(marker)) {
        LogLevel::Error
    } else if message.contains(WARN_MARKER) {
        LogLevel::Warn
    } else {
        declared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_markers_override_declared_level() {
        assert_eq!(promote("[ERROR] build failed", LogLevel::Debug), LogLevel::Error);
        assert_eq!(promote("npm ERR! missing script", LogLevel::Info), LogLevel::Error);
        // also a downgrade from fatal
        assert_eq!(promote("ERROR", LogLevel::Fatal), LogLevel::Error);
    }

    #[test]
    fn test_warn_marker() {
        assert_eq!(promote("npm WARN deprecated", LogLevel::Info), LogLevel::Warn);
        assert_eq!(promote("[WARNING] unchecked cast", LogLevel::Error), LogLevel::Warn);
    }

    #[test]
    fn test_error_wins_over_warn() {
        assert_eq!(promote("WARN: 1 ERROR found", LogLevel::Info), LogLevel::Error);
        assert_eq!(promote("ERR! then WARN", LogLevel::Info), LogLevel::Error);
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        assert_eq!(promote("error: lowercase", LogLevel::Info), LogLevel::Info);
        assert_eq!(promote("warn: lowercase", LogLevel::Info), LogLevel::Info);
        assert_eq!(promote("ERR without bang", LogLevel::Info), LogLevel::Info);
    }
}
