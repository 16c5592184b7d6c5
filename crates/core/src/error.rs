//! The uniform error value surfaced by the HTTP client layer.

use serde::{Deserialize, Serialize};

/// Fallback message used when neither the server nor the transport supplied
/// one.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Status recorded when a request produced no response at all (network
/// failure, timeout, or an unreadable body).
pub const NO_RESPONSE_STATUS: u16 = 500;

/// Normalized API failure.
///
/// Every failure that crosses the client boundary -- transport errors,
/// non-2xx responses, undecodable bodies -- is rewrapped into this single
/// shape. Callers never observe the underlying transport's error type.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[error("{message} (status {status})")]
pub struct ApiError {
    /// Human-readable message. Falls back through server-provided message,
    /// transport error text, then [`GENERIC_ERROR_MESSAGE`].
    pub message: String,
    /// HTTP status, or [`NO_RESPONSE_STATUS`] when no response was received.
    pub status: u16,
    /// Machine-readable error code, when the server supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Free-form extra context from the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Build an error from a status and message, with no server extras.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            code: None,
            details: None,
        }
    }
}

/// Error body shape the backend uses for non-2xx responses. Every field is
/// optional: some endpoints (and most proxies) return no body at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message_and_status() {
        let err = ApiError::new(404, "User with id 7 not found");
        assert_eq!(err.to_string(), "User with id 7 not found (status 404)");
    }

    #[test]
    fn error_body_tolerates_empty_object() {
        let body: ErrorBody = serde_json::from_str("{}").expect("deserialization should succeed");
        assert!(body.message.is_none());
        assert!(body.code.is_none());
        assert!(body.details.is_none());
    }

    #[test]
    fn error_body_captures_all_fields() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"message": "Invalid email", "code": "VALIDATION_ERROR", "details": {"field": "email"}}"#,
        )
        .expect("deserialization should succeed");
        assert_eq!(body.message.as_deref(), Some("Invalid email"));
        assert_eq!(body.code.as_deref(), Some("VALIDATION_ERROR"));
        assert_eq!(
            body.details,
            Some(serde_json::json!({"field": "email"}))
        );
    }
}
