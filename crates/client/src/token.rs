//! Credential token storage.
//!
//! The token is set externally on login, attached to every outbound
//! request while present, and purged on any authorization failure. It is
//! reached only through the [`TokenStore`] accessor handed to the client,
//! never through ambient global state, so the transport stays testable.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Scoped accessor for the single credential token.
///
/// Methods take `&self`; implementations are internally synchronized.
/// Storage failures are logged and swallowed - a token that cannot be
/// persisted degrades to an absent token, which every caller already
/// handles.
pub trait TokenStore: Send + Sync {
    /// The current token, if one is set.
    fn get(&self) -> Option<String>;

    /// Replace the stored token.
    fn set(&self, token: &str);

    /// Remove the stored token. Idempotent.
    fn clear(&self);
}

/// Token held in process memory. Used by tests and by embedders that
/// manage persistence themselves.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.slot().clone()
    }

    fn set(&self, token: &str) {
        *self.slot() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.slot() = None;
    }
}

/// Token persisted as a single-line file, surviving process restarts.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store backed by the given file. The file need not exist;
    /// a missing file reads as an absent token.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn set(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(err) = std::fs::write(&self.path, token) {
            warn!("failed to persist credential token: {}", err);
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!("failed to clear credential token: {}", err),
        }
    }
}
