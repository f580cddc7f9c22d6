//! Logger configuration
//!
//! ```
//! use step_logger::core::{LayoutMode, LoggerConfig};
//!
//! let config = LoggerConfig::from_json(r#"{"library": "core", "format": "timestamp"}"#).unwrap();
//! assert_eq!(config.format, LayoutMode::Timestamped);
//! assert!(!config.verbose);
//! ```

use super::{error::Result, layout::LayoutMode};
use serde::{Deserialize, Serialize};

/// Library identifier injected at build time through the
/// `LIBRARY_REPOSITORY` environment variable; empty when not set.
pub const LIBRARY_REPOSITORY: &str = match option_env!("LIBRARY_REPOSITORY") {
    Some(library) => library,
    None => "",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Stamped as the `library` field on every entry
    pub library: String,
    /// Layout name; unknown names select the full layout
    pub format: LayoutMode,
    /// Emit debug entries as well
    pub verbose: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            library: LIBRARY_REPOSITORY.to_string(),
            format: LayoutMode::Full,
            verbose: false,
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::from_json("{}").unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.format, LayoutMode::Full);
        assert_eq!(config.library, LIBRARY_REPOSITORY);
    }

    #[test]
    fn test_unknown_format_is_full() {
        let config = LoggerConfig::from_json(r#"{"format": "xyz"}"#).unwrap();
        assert_eq!(config.format, LayoutMode::Full);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = LoggerConfig::from_json(r#"{"verbosity": true}"#).unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_full_config() {
        let config =
            LoggerConfig::from_json(r#"{"library": "core", "format": "plain", "verbose": true}"#)
                .unwrap();
        assert_eq!(config.library, "core");
        assert_eq!(config.format, LayoutMode::Plain);
        assert!(config.verbose);
    }
}
