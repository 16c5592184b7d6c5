//! Typed endpoint functions over [`ApiClient`](crate::http::ApiClient).

pub mod auth;
pub mod users;
