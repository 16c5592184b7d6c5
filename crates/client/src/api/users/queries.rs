//! Cached reads for the `/users` resource.

use userhub_core::error::ApiError;
use userhub_core::types::UserId;
use userhub_core::user::User;

use crate::http::ApiClient;
use crate::query::{QueryClient, QueryKey};

/// Cache key for the users list.
pub fn users_key() -> QueryKey {
    QueryKey::scope("users")
}

/// Cache key for a single user.
pub fn user_key(id: UserId) -> QueryKey {
    QueryKey::item("users", id)
}

/// List users through the query cache.
pub async fn users(client: &ApiClient, queries: &QueryClient) -> Result<Vec<User>, ApiError> {
    queries
        .fetch(users_key(), || async move {
            super::list_users(client, None).await.map(|resp| resp.data)
        })
        .await
}

/// Fetch one user through the query cache.
pub async fn user(
    client: &ApiClient,
    queries: &QueryClient,
    id: UserId,
) -> Result<User, ApiError> {
    queries
        .fetch(user_key(id), || async move {
            super::get_user(client, id).await.map(|resp| resp.data)
        })
        .await
}
