//! Hook and exit handler registries
//!
//! Hooks observe every entry that passes the level filter, e.g. to export
//! metrics or forward errors to another system. They are fired synchronously,
//! in registration order, before the entry is formatted, and they see the
//! level the caller declared (not the promoted one).
//!
//! Exit handlers run once, in registration order, after a fatal entry has been
//! written and right before the process is terminated.
//!
//! Both run isolated: a failing or panicking callback is reported on stderr and
//! the remaining callbacks still run.

use super::{error::Result, log_entry::LogEntry};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Callback fired for every emitted entry
pub type HookFn = Arc<dyn Fn(&LogEntry) -> Result<()> + Send + Sync>;

/// Cleanup callback run before a fatal exit
pub type ExitHandler = Box<dyn FnOnce() + Send>;

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Named hooks, fired in registration order
#[derive(Default)]
pub struct HookRegistry {
    hooks: RwLock<Vec<(String, HookFn)>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, name: impl Into<String>, hook: HookFn) {
        self.hooks.write().push((name.into(), hook));
    }

    /// Fire every hook for `entry`, returning how many failed or panicked.
    pub fn fire(&self, entry: &LogEntry) -> usize {
        // Snapshot so a hook that logs does not run under our lock
        let hooks: Vec<(String, HookFn)> = self.hooks.read().clone();
        let mut failures = 0;

        for (name, hook) in hooks.iter() {
            match catch_unwind(AssertUnwindSafe(|| hook(entry))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Hook '{}' failed: {}", name, e);
                    failures += 1;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Hook '{}' panicked: {}. \
                         Other hooks continue to function.",
                        name,
                        panic_message(panic_info.as_ref())
                    );
                    failures += 1;
                }
            }
        }

        failures
    }

    pub fn names(&self) -> Vec<String> {
        self.hooks.read().iter().map(|(name, _)| name.clone()).collect()
    }
}

/// Cleanup callbacks, run at most once
#[derive(Default)]
pub struct ExitHandlers {
    handlers: Mutex<Vec<ExitHandler>>,
}

impl ExitHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defer(&self, handler: ExitHandler) {
        self.handlers.lock().push(handler);
    }

    /// Run and remove all handlers in registration order.
    ///
    /// Returns the number of handlers that panicked.
    pub fn run_all(&self) -> usize {
        let handlers = std::mem::take(&mut *self.handlers.lock());
        let mut panicked = 0;

        for (idx, handler) in handlers.into_iter().enumerate() {
            if let Err(panic_info) = catch_unwind(AssertUnwindSafe(handler)) {
                eprintln!(
                    "[LOGGER CRITICAL] Exit handler #{} panicked: {}",
                    idx,
                    panic_message(panic_info.as_ref())
                );
                panicked += 1;
            }
        }

        panicked
    }
}
