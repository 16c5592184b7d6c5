//! Durable session storage behind an injected provider interface.
//!
//! Both the HTTP layer (token injection, 401 clearing) and the
//! [`SessionStore`](crate::session::store::SessionStore) go through the same
//! [`SessionProvider`] instance instead of each reaching into a shared
//! storage key, so the two layers stay decoupled and tests can swap the
//! backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use userhub_core::user::User;

/// File name of the durable session record (the `auth` storage key).
const SESSION_FILE: &str = "auth.json";

/// The session record as persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: Option<String>,
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Durable storage for the session record.
///
/// `save` and `clear` are best-effort: implementations log storage failures
/// and swallow them, because a persistence hiccup must not fail an
/// otherwise-successful request or action.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Load the persisted session, or `None` when absent or unreadable.
    async fn load(&self) -> Option<PersistedSession>;

    /// Replace the persisted session.
    async fn save(&self, session: &PersistedSession);

    /// Delete the persisted session entirely.
    async fn clear(&self);

    /// Current bearer token, when a session with one is persisted.
    async fn token(&self) -> Option<String> {
        self.load().await.and_then(|s| s.token)
    }
}

/// In-memory provider for tests and short-lived processes.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<PersistedSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a session already present.
    pub fn with_session(session: PersistedSession) -> Self {
        Self {
            inner: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionProvider for MemorySessionStore {
    async fn load(&self) -> Option<PersistedSession> {
        self.inner.read().await.clone()
    }

    async fn save(&self, session: &PersistedSession) {
        *self.inner.write().await = Some(session.clone());
    }

    async fn clear(&self) {
        *self.inner.write().await = None;
    }
}

/// Provider backed by a single JSON file (`auth.json`) in a caller-supplied
/// directory.
///
/// A missing or corrupt file loads as no session; write failures are logged
/// and swallowed.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store the session record under `dir` (created on first save).
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_FILE),
        }
    }

    /// Path of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionProvider for FileSessionStore {
    async fn load(&self) -> Option<PersistedSession> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Failed to read session file");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Corrupt session file, treating as absent");
                None
            }
        }
    }

    async fn save(&self, session: &PersistedSession) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = tokio::fs::create_dir_all(parent).await {
                tracing::warn!(path = %parent.display(), error = %err, "Failed to create session directory");
                return;
            }
        }

        let bytes = match serde_json::to_vec_pretty(session) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to serialize session");
                return;
            }
        };

        if let Err(err) = tokio::fs::write(&self.path, bytes).await {
            tracing::warn!(path = %self.path.display(), error = %err, "Failed to write session file");
        }
    }

    async fn clear(&self) {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Failed to remove session file");
            }
        }
    }
}
