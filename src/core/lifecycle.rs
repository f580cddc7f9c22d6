//! Logging context: the handle every caller logs through
//!
//! A `LoggingContext` owns the backend, the secret registry and the current
//! [`LogHandle`]. The handle is created lazily on first use, tagged with the
//! library identifier, and replaced by a derived handle whenever a step name
//! is set. Tools that want a single process-wide context use
//! [`LoggingContext::global`].

use super::{
    config::{LoggerConfig, LIBRARY_REPOSITORY},
    error::Result,
    formatter::{Formatter, LineFormatter},
    handle::LogHandle,
    hooks::HookFn,
    layout::LayoutMode,
    log_entry::{LIBRARY_FIELD, STEP_NAME_FIELD},
    log_level::LogLevel,
    logger::Logger,
    secrets::SecretRegistry,
    text_formatter::TextFormatter,
};
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<LoggingContext> = OnceLock::new();

/// # Example
///
/// ```
/// use step_logger::prelude::*;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder().appender(WriterAppender::new(buffer.clone())).build();
/// let ctx = LoggingContext::with_logger("core", logger);
///
/// ctx.set_formatter("default");
/// ctx.set_step_name("build");
/// ctx.register_secret("sekret123");
///
/// ctx.entry().info("token=sekret123");
/// assert_eq!(buffer.contents(), "info  build  - token=****\n");
/// ```
pub struct LoggingContext {
    library: String,
    logger: Arc<Logger>,
    secrets: SecretRegistry,
    fallback: Arc<dyn Formatter>,
    layout: RwLock<LayoutMode>,
    handle: RwLock<Option<LogHandle>>,
}

impl LoggingContext {
    /// Context logging to stdout
    pub fn new(library: impl Into<String>) -> Self {
        Self::with_logger(library, Logger::new())
    }

    /// Context on top of a preconfigured backend
    pub fn with_logger(library: impl Into<String>, logger: Logger) -> Self {
        Self {
            library: library.into(),
            logger: Arc::new(logger),
            secrets: SecretRegistry::new(),
            fallback: Arc::new(TextFormatter::new()),
            layout: RwLock::new(LayoutMode::Full),
            handle: RwLock::new(None),
        }
    }

    /// Apply a configuration to a stdout context
    pub fn from_config(config: &LoggerConfig) -> Self {
        let ctx = Self::new(config.library.clone());
        ctx.apply(config);
        ctx
    }

    /// Load a JSON configuration and apply it to a stdout context
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_config(&LoggerConfig::from_json(json)?))
    }

    /// Apply the verbosity and layout of `config`
    ///
    /// The library identifier is fixed at construction and is not changed.
    pub fn apply(&self, config: &LoggerConfig) {
        self.set_verbose(config.verbose);
        self.set_layout(config.format);
    }

    /// Replace the renderer used for the `full` layout
    ///
    /// Takes effect for formatters installed afterwards.
    #[must_use]
    pub fn with_full_formatter(mut self, fallback: Arc<dyn Formatter>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Process-wide context, tagged with [`LIBRARY_REPOSITORY`]
    pub fn global() -> &'static LoggingContext {
        GLOBAL.get_or_init(|| LoggingContext::new(LIBRARY_REPOSITORY))
    }

    /// Current handle, created on first use
    ///
    /// Creating the handle tags it with the library identifier and installs the
    /// `full` layout on the backend.
    pub fn entry(&self) -> LogHandle {
        if let Some(handle) = self.handle.read().as_ref() {
            return handle.clone();
        }

        let mut slot = self.handle.write();
        slot.get_or_insert_with(|| self.create_handle()).clone()
    }

    fn create_handle(&self) -> LogHandle {
        self.install(LayoutMode::Full);
        LogHandle::new(Arc::clone(&self.logger)).with_field(LIBRARY_FIELD, self.library.as_str())
    }

    fn install(&self, layout: LayoutMode) {
        let formatter =
            LineFormatter::with_fallback(layout, self.secrets.clone(), Arc::clone(&self.fallback))
                .with_metrics(self.logger.shared_metrics());

        // held across the swap so the recorded layout matches the installed formatter
        let mut current = self.layout.write();
        self.logger.set_formatter(Arc::new(formatter));
        *current = layout;
    }

    /// Lower the minimum level to debug when `enabled`
    ///
    /// `false` leaves the level as it is; verbosity is never lowered here.
    pub fn set_verbose(&self, enabled: bool) {
        if enabled {
            self.logger.set_min_level(LogLevel::Debug);
        }
    }

    /// Select the layout by name: `plain`, `timestamp`, `default` or `full`
    ///
    /// Unrecognised names select `full`.
    pub fn set_formatter(&self, mode_name: &str) {
        self.set_layout(LayoutMode::from_name(mode_name));
    }

    pub fn set_layout(&self, layout: LayoutMode) {
        self.entry();
        self.install(layout);
    }

    pub fn layout(&self) -> LayoutMode {
        *self.layout.read()
    }

    /// Replace the current handle with one carrying `stepName=<step>`
    pub fn set_step_name(&self, step: impl Into<String>) {
        let mut slot = self.handle.write();
        let current = slot.get_or_insert_with(|| self.create_handle()).clone();
        *slot = Some(current.with_field(STEP_NAME_FIELD, step.into()));
    }

    /// Run `handler` right before the process exits after a fatal entry
    pub fn defer_exit_handler<F>(&self, handler: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.logger.defer_exit_handler(Box::new(handler));
    }

    /// Observe every emitted entry; see [`crate::core::hooks`] for the contract
    pub fn register_hook(&self, name: impl Into<String>, hook: HookFn) {
        self.logger.add_hook(name, hook);
    }

    /// Mask `secret` in every line from now on; empty values are ignored
    pub fn register_secret(&self, secret: impl Into<String>) {
        self.secrets.register(secret);
    }

    pub fn secrets(&self) -> &SecretRegistry {
        &self.secrets
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn library(&self) -> &str {
        &self.library
    }
}

impl std::fmt::Debug for LoggingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingContext")
            .field("library", &self.library)
            .field("layout", &self.layout())
            .field("secrets", &self.secrets.len())
            .finish_non_exhaustive()
    }
}
