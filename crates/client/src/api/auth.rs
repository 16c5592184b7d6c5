//! Endpoint functions for the `/auth` resource and the protected probe.
//!
//! Prefer the [`SessionStore`](crate::session::store::SessionStore) actions,
//! which call these and keep the session state consistent.

use userhub_core::auth::{LoginRequest, LoginResponse, ProtectedResponse};
use userhub_core::error::ApiError;
use userhub_core::types::ApiResponse;

use crate::http::ApiClient;

/// `POST /auth/login` -- authenticate with email + password.
pub async fn login(
    client: &ApiClient,
    credentials: &LoginRequest,
) -> Result<ApiResponse<LoginResponse>, ApiError> {
    client.post("/auth/login", credentials).await
}

/// Best-effort logout.
///
/// The backend exposes no logout endpoint today; session teardown is purely
/// local. Kept async and fallible so a server-side call can be added later
/// without touching the session store, which already ignores the outcome.
pub async fn logout(_client: &ApiClient) -> Result<(), ApiError> {
    Ok(())
}

/// `GET /protected` -- fetch a resource that requires authentication.
pub async fn get_protected(client: &ApiClient) -> Result<ApiResponse<ProtectedResponse>, ApiError> {
    client.get("/protected").await
}
