//! UserHub client SDK.
//!
//! A thin, typed client for the UserHub auth + users REST API:
//!
//! - [`http::ApiClient`] -- the single point of outbound traffic. Injects
//!   the bearer token, normalizes every failure into one
//!   [`ApiError`](userhub_core::error::ApiError) shape, and clears the
//!   persisted session on `401`.
//! - [`session::store::SessionStore`] -- login/logout/protected-fetch
//!   actions with persisted state and uniform
//!   [`ActionResult`](userhub_core::types::ActionResult) outcomes.
//! - [`session::provider::SessionProvider`] -- the injected durable-storage
//!   seam shared by the two layers above.
//! - [`api`] -- typed endpoint functions, with cached reads and
//!   cache-coherent writes for the users resource via [`query::QueryClient`].
//!
//! Nothing here is a global: construct the client, query cache, and store
//! explicitly and pass them down.

pub mod api;
pub mod config;
pub mod http;
pub mod query;
mod request_log;
pub mod session;

pub use config::ClientConfig;
pub use http::ApiClient;
pub use query::{QueryClient, QueryConfig, QueryKey};
pub use session::provider::{
    FileSessionStore, MemorySessionStore, PersistedSession, SessionProvider,
};
pub use session::store::{SessionState, SessionStore};
