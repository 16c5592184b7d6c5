//! Endpoint functions for the `/users` resource.
//!
//! Raw calls live here; [`queries`] adds cached reads and [`mutations`]
//! adds writes that invalidate the affected cache entries.

pub mod mutations;
pub mod queries;

use userhub_core::error::ApiError;
use userhub_core::types::{ApiResponse, PaginationParams, UserId};
use userhub_core::user::{CreateUserRequest, UpdateUserRequest, User};

use crate::http::ApiClient;

/// `GET /users` -- list users, optionally paginated.
pub async fn list_users(
    client: &ApiClient,
    params: Option<&PaginationParams>,
) -> Result<ApiResponse<Vec<User>>, ApiError> {
    match params {
        Some(params) => client.get_query("/users", params).await,
        None => client.get("/users").await,
    }
}

/// `GET /users/{id}` -- fetch a single user.
pub async fn get_user(client: &ApiClient, id: UserId) -> Result<ApiResponse<User>, ApiError> {
    client.get(&format!("/users/{id}")).await
}

/// `POST /users` -- create a user.
pub async fn create_user(
    client: &ApiClient,
    data: &CreateUserRequest,
) -> Result<ApiResponse<User>, ApiError> {
    client.post("/users", data).await
}

/// `PUT /users/{id}` -- update a user.
pub async fn update_user(
    client: &ApiClient,
    id: UserId,
    data: &UpdateUserRequest,
) -> Result<ApiResponse<User>, ApiError> {
    client.put(&format!("/users/{id}"), data).await
}

/// `DELETE /users/{id}` -- delete a user. The backend answers with
/// `data: null`.
pub async fn delete_user(client: &ApiClient, id: UserId) -> Result<ApiResponse<()>, ApiError> {
    client.delete(&format!("/users/{id}")).await
}
