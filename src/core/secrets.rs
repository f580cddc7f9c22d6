//! Registry of sensitive values scrubbed from every rendered line

use parking_lot::RwLock;
use std::sync::Arc;

/// Replacement written in place of a secret.
pub const SECRET_MASK: &str = "****";

/// Append-only set of secrets
///
/// Clones share the same underlying list, so a secret registered through any
/// clone is scrubbed by every formatter holding one.
///
/// Secrets are plain text. Characters such as `.` or `*` carry no pattern
/// meaning; only exact occurrences are replaced.
///
/// Secrets are applied in registration order. When one secret is a substring
/// of another, registering the shorter one first masks part of the longer one
/// before it is looked for, so the longer value may then survive partially
/// masked rather than fully replaced.
///
/// # Example
///
/// ```
/// use step_logger::core::SecretRegistry;
///
/// let secrets = SecretRegistry::new();
/// secrets.register("hunter2");
/// assert_eq!(secrets.scrub("password=hunter2"), "password=****");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SecretRegistry {
    secrets: Arc<RwLock<Vec<String>>>,
}

impl SecretRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret; empty strings are ignored.
    ///
    /// Duplicates are kept, they only cost a redundant pass.
    pub fn register(&self, secret: impl Into<String>) {
        let secret = secret.into();
        if secret.is_empty() {
            return;
        }
        self.secrets.write().push(secret);
    }

    /// Replace every occurrence of every registered secret with [`SECRET_MASK`].
    pub fn scrub(&self, line: &str) -> String {
        let secrets = self.secrets.read();
        let mut scrubbed = line.to_string();
        for secret in secrets.iter() {
            if scrubbed.contains(secret.as_str()) {
                scrubbed = scrubbed.replace(secret.as_str(), SECRET_MASK);
            }
        }
        scrubbed
    }

    pub fn len(&self) -> usize {
        self.secrets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.read().is_empty()
    }
}
