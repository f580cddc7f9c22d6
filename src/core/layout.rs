//! Line layouts
//!
//! One layout is chosen at startup and used for every subsequent line:
//! - Plain: message only
//! - Timestamped: time of day, level, step name, message
//! - Default: level, step name, message
//! - Full: everything, rendered by the generic multi-field formatter

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the level column in the column layouts.
pub const LEVEL_WIDTH: usize = 5;

/// Width of the step name column in the column layouts.
pub const STEP_WIDTH: usize = 6;

/// Layout used to render every log line
///
/// Parsed from its name with [`LayoutMode::from_name`]; unknown names fall back
/// to [`LayoutMode::Full`] rather than failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayoutMode {
    /// `<message>`
    ///
    /// Example: `npm WARN deprecated`
    Plain,

    /// `<HH:MM:SS> <level> <step> - <message>`
    ///
    /// Example: `10:30:45 info  build  - compiling`
    Timestamped,

    /// `<level> <step> - <message>`
    ///
    /// Example: `info  build  - compiling`
    Default,

    /// Full structured rendering with timestamp, level and all fields
    ///
    /// Example: `time="2025-01-08T10:30:45Z" level=info msg=compiling library=core`
    #[default]
    Full,
}

impl LayoutMode {
    /// Select a layout by name: `plain`, `timestamp`, `default` or `full`.
    ///
    /// Matching is exact. Anything else yields `Full`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "plain" => LayoutMode::Plain,
            "timestamp" => LayoutMode::Timestamped,
            "default" => LayoutMode::Default,
            _ => LayoutMode::Full,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayoutMode::Plain => "plain",
            LayoutMode::Timestamped => "timestamp",
            LayoutMode::Default => "default",
            LayoutMode::Full => "full",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for LayoutMode {
    fn from(name: &str) -> Self {
        LayoutMode::from_name(name)
    }
}

impl From<String> for LayoutMode {
    fn from(name: String) -> Self {
        LayoutMode::from_name(&name)
    }
}

impl From<LayoutMode> for String {
    fn from(mode: LayoutMode) -> Self {
        mode.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_modes() {
        assert_eq!(LayoutMode::from_name("plain"), LayoutMode::Plain);
        assert_eq!(LayoutMode::from_name("timestamp"), LayoutMode::Timestamped);
        assert_eq!(LayoutMode::from_name("default"), LayoutMode::Default);
        assert_eq!(LayoutMode::from_name("full"), LayoutMode::Full);
    }

    #[test]
    fn test_unknown_name_falls_back_to_full() {
        assert_eq!(LayoutMode::from_name("xyz"), LayoutMode::Full);
        assert_eq!(LayoutMode::from_name(""), LayoutMode::Full);
        // exact match only
        assert_eq!(LayoutMode::from_name("Plain"), LayoutMode::Full);
        assert_eq!(LayoutMode::from_name("timestamped"), LayoutMode::Full);
    }

    #[test]
    fn test_default_is_full() {
        assert_eq!(LayoutMode::default(), LayoutMode::Full);
    }

    #[test]
    fn test_name_roundtrip() {
        for mode in [
            LayoutMode::Plain,
            LayoutMode::Timestamped,
            LayoutMode::Default,
            LayoutMode::Full,
        ] {
            assert_eq!(LayoutMode::from_name(mode.name()), mode);
        }
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&LayoutMode::Timestamped).expect("serialize");
        assert_eq!(json, "\"timestamp\"");

        let mode: LayoutMode = serde_json::from_str("\"plain\"").expect("deserialize");
        assert_eq!(mode, LayoutMode::Plain);

        let mode: LayoutMode = serde_json::from_str("\"fancy\"").expect("deserialize unknown");
        assert_eq!(mode, LayoutMode::Full);
    }
}
