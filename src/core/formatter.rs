//! Formatter trait and the layout-aware line formatter

use super::{
    error::{LoggerError, Result},
    layout::{LayoutMode, LEVEL_WIDTH, STEP_WIDTH},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    secrets::SecretRegistry,
    severity::promote,
    text_formatter::TextFormatter,
    timestamp::TimestampFormat,
};
use std::sync::Arc;

/// Turns a log entry into the bytes written to the sink
pub trait Formatter: Send + Sync {
    fn format(&self, entry: &LogEntry) -> Result<Vec<u8>>;
    fn name(&self) -> &str;
}

/// Formatter installed by the logging context
///
/// For every entry it promotes the level from markers in the message, renders
/// the selected [`LayoutMode`] and finally masks registered secrets on the
/// finished line. The `Full` layout is delegated to a fallback formatter; any
/// error from that delegate is returned unchanged and nothing is emitted, as is
/// delegate output that is not valid UTF-8.
///
/// # Example
///
/// ```
/// use step_logger::core::{Formatter, LayoutMode, LineFormatter, LogEntry, LogLevel, SecretRegistry};
///
/// let secrets = SecretRegistry::new();
/// secrets.register("sekret123");
///
/// let formatter = LineFormatter::new(LayoutMode::Plain, secrets);
/// let line = formatter
///     .format(&LogEntry::new(LogLevel::Info, "token=sekret123"))
///     .unwrap();
/// assert_eq!(line, b"token=****\n");
/// ```
#[derive(Clone)]
pub struct LineFormatter {
    layout: LayoutMode,
    secrets: SecretRegistry,
    fallback: Arc<dyn Formatter>,
    metrics: Option<Arc<LoggerMetrics>>,
}

impl LineFormatter {
    /// Formatter using [`TextFormatter`] for the `Full` layout
    pub fn new(layout: LayoutMode, secrets: SecretRegistry) -> Self {
        Self::with_fallback(layout, secrets, Arc::new(TextFormatter::new()))
    }

    pub fn with_fallback(
        layout: LayoutMode,
        secrets: SecretRegistry,
        fallback: Arc<dyn Formatter>,
    ) -> Self {
        Self {
            layout,
            secrets,
            fallback,
            metrics: None,
        }
    }

    /// Count promoted lines in `metrics`
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<LoggerMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn secrets(&self) -> &SecretRegistry {
        &self.secrets
    }

    pub fn fallback(&self) -> &Arc<dyn Formatter> {
        &self.fallback
    }

    /// Same secrets, fallback and metrics, different layout
    #[must_use]
    pub fn with_layout(&self, layout: LayoutMode) -> Self {
        Self {
            layout,
            ..self.clone()
        }
    }

    fn render(&self, entry: &LogEntry, level: LogLevel) -> Result<String> {
        let step = entry
            .step_name()
            .map(ToString::to_string)
            .unwrap_or_default();

        let line = match self.layout {
            LayoutMode::Plain => format!("{}\n", entry.message),
            LayoutMode::Timestamped => format!(
                "{} {:<lw$} {:<sw$} - {}\n",
                TimestampFormat::TimeOfDay.format(&entry.timestamp),
                level,
                step,
                entry.message,
                lw = LEVEL_WIDTH,
                sw = STEP_WIDTH,
            ),
            LayoutMode::Default => format!(
                "{:<lw$} {:<sw$} - {}\n",
                level,
                step,
                entry.message,
                lw = LEVEL_WIDTH,
                sw = STEP_WIDTH,
            ),
            LayoutMode::Full => {
                let promoted = entry.clone().with_level(level);
                let bytes = self.fallback.format(&promoted)?;
                String::from_utf8(bytes).map_err(|e| {
                    LoggerError::formatter(
                        self.fallback.name(),
                        format!("output is not valid UTF-8: {}", e.utf8_error()),
                    )
                })?
            }
        };

        Ok(line)
    }
}

impl Formatter for LineFormatter {
    fn format(&self, entry: &LogEntry) -> Result<Vec<u8>> {
        let level = promote(&entry.message, entry.level);
        let line = self.render(entry, level)?;

        if level != entry.level {
            if let Some(metrics) = &self.metrics {
                metrics.record_promotion();
            }
        }

        Ok(self.secrets.scrub(&line).into_bytes())
    }

    fn name(&self) -> &str {
        self.layout.name()
    }
}

impl std::fmt::Debug for LineFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineFormatter")
            .field("layout", &self.layout)
            .field("secrets", &self.secrets.len())
            .field("fallback", &self.fallback.name())
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}
