//! Shared primitive aliases, response envelopes, and the action-result
//! contract.

use serde::{Deserialize, Serialize};

/// All backend primary keys are 64-bit integers.
pub type UserId = i64;

/// Envelope the backend wraps every successful response body in.
///
/// Only `data` is guaranteed on the wire; `message` and `status` are
/// informational and absent from some endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Paginated collection envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Pagination query parameters. Absent fields are omitted from the query
/// string and the backend applies its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Uniform result every session-store action returns.
///
/// Actions never return `Err` and never panic: callers branch on `success`
/// and read `error` for the human-readable failure message. This keeps the
/// store boundary exception-free (see [`crate::error::ApiError`] for where
/// failures originate).
#[derive(Debug, Clone, Serialize)]
pub struct ActionResult<T = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActionResult<T> {
    /// Successful result carrying a payload.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed result carrying the error message.
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl ActionResult<()> {
    /// Successful result with no payload.
    pub fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }
}
