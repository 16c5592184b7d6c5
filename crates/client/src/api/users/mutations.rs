//! Writes to the `/users` resource that keep the query cache coherent.
//!
//! Each mutation invalidates the cache entries its result affects: the list
//! for every write, plus the item entry for updates and deletes.

use userhub_core::error::ApiError;
use userhub_core::types::UserId;
use userhub_core::user::{CreateUserRequest, UpdateUserRequest, User};

use super::queries::{user_key, users_key};
use crate::http::ApiClient;
use crate::query::QueryClient;

/// Create a user and invalidate the cached list.
pub async fn create_user(
    client: &ApiClient,
    queries: &QueryClient,
    data: &CreateUserRequest,
) -> Result<User, ApiError> {
    let user = super::create_user(client, data).await?.data;
    queries.invalidate(&users_key()).await;
    Ok(user)
}

/// Update a user and invalidate the cached list and item.
pub async fn update_user(
    client: &ApiClient,
    queries: &QueryClient,
    id: UserId,
    data: &UpdateUserRequest,
) -> Result<User, ApiError> {
    let user = super::update_user(client, id, data).await?.data;
    queries.invalidate(&users_key()).await;
    queries.invalidate(&user_key(id)).await;
    Ok(user)
}

/// Delete a user and invalidate the cached list and item.
pub async fn delete_user(
    client: &ApiClient,
    queries: &QueryClient,
    id: UserId,
) -> Result<(), ApiError> {
    super::delete_user(client, id).await?;
    queries.invalidate(&users_key()).await;
    queries.invalidate(&user_key(id)).await;
    Ok(())
}
