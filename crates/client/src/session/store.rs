//! Session store: orchestrates auth actions and persists its state.

use std::sync::Arc;

use tokio::sync::RwLock;

use userhub_core::auth::{LoginRequest, ProtectedResponse};
use userhub_core::types::ActionResult;
use userhub_core::user::User;

use crate::api;
use crate::http::ApiClient;
use crate::session::provider::{PersistedSession, SessionProvider};

/// Snapshot of the session state.
///
/// `token`/`user` are set while authenticated, `loading` marks an action in
/// flight, and `error` holds the last action's failure message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    /// A session is authenticated exactly when it holds a token.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl From<PersistedSession> for SessionState {
    fn from(persisted: PersistedSession) -> Self {
        Self {
            token: persisted.token,
            user: persisted.user,
            loading: persisted.loading,
            error: persisted.error,
        }
    }
}

impl From<&SessionState> for PersistedSession {
    fn from(state: &SessionState) -> Self {
        Self {
            token: state.token.clone(),
            user: state.user.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }
}

/// Orchestrates login/logout/protected-fetch against the [`ApiClient`] and
/// persists every state mutation through the shared [`SessionProvider`].
///
/// Actions never return `Err` or panic: every outcome is an
/// [`ActionResult`]. The state lock is released across network awaits, so
/// [`snapshot`](Self::snapshot) is never blocked by an in-flight action.
pub struct SessionStore {
    client: Arc<ApiClient>,
    provider: Arc<dyn SessionProvider>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Build a store, restoring any persisted session.
    ///
    /// The persisted `loading` flag is forced back to `false`: a run that
    /// died mid-action must not leave the store permanently in flight.
    pub async fn restore(client: Arc<ApiClient>, provider: Arc<dyn SessionProvider>) -> Self {
        let state = match provider.load().await {
            Some(persisted) => {
                let mut state = SessionState::from(persisted);
                state.loading = false;
                state
            }
            None => SessionState::default(),
        };

        Self {
            client,
            provider,
            state: RwLock::new(state),
        }
    }

    /// Current state snapshot.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Whether a token is currently held.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    /// Authenticate with the backend.
    ///
    /// On success the token and user are stored and persisted. On failure
    /// the existing token/user are left untouched (a failed re-login does
    /// not log the caller out) and the error message is recorded. `loading`
    /// is reset on every exit path.
    pub async fn login(&self, credentials: &LoginRequest) -> ActionResult {
        self.enter_action().await;

        let result = api::auth::login(&self.client, credentials).await;

        let mut state = self.state.write().await;
        let outcome = match result {
            Ok(response) => {
                let payload = response.data;
                state.token = Some(payload.access_token);
                state.user = Some(payload.user);
                ActionResult::ok_empty()
            }
            Err(err) => {
                state.error = Some(err.message.clone());
                ActionResult::fail(err.message)
            }
        };
        state.loading = false;
        self.persist(&state).await;
        outcome
    }

    /// End the session.
    ///
    /// The logout endpoint is invoked best-effort and its outcome ignored;
    /// local state is cleared unconditionally, so calling this twice is a
    /// harmless no-op the second time.
    pub async fn logout(&self) -> ActionResult {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            self.persist(&state).await;
        }

        if let Err(err) = api::auth::logout(&self.client).await {
            tracing::debug!(error = %err, "logout request failed, clearing local session anyway");
        }

        let mut state = self.state.write().await;
        state.token = None;
        state.user = None;
        state.error = None;
        state.loading = false;
        self.persist(&state).await;
        ActionResult::ok_empty()
    }

    /// Fetch the protected resource.
    ///
    /// No client-side authentication precheck: enforcement is delegated to
    /// the server, and a `401` comes back through the wrapper's central
    /// handler (which drops the persisted session) before landing here.
    pub async fn get_protected(&self) -> ActionResult<ProtectedResponse> {
        self.enter_action().await;

        let result = api::auth::get_protected(&self.client).await;

        let mut state = self.state.write().await;
        let outcome = match result {
            Ok(response) => ActionResult::ok(response.data),
            Err(err) => {
                if err.status == 401 {
                    // The wrapper already cleared the persisted session;
                    // mirror it so this store does not resurrect a revoked
                    // token on the persist below.
                    state.token = None;
                    state.user = None;
                }
                state.error = Some(err.message.clone());
                ActionResult::fail(err.message)
            }
        };
        state.loading = false;
        self.persist(&state).await;
        outcome
    }

    /// Mark an action as in flight and clear the previous error.
    async fn enter_action(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
        self.persist(&state).await;
    }

    async fn persist(&self, state: &SessionState) {
        self.provider.save(&PersistedSession::from(state)).await;
    }
}
