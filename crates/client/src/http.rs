//! HTTP client wrapper: the single point of outbound REST traffic.
//!
//! Wraps a [`reqwest::Client`] and, for every request:
//! - attaches `Authorization: Bearer <token>` when the injected
//!   [`SessionProvider`] holds a token,
//! - records the request in the dev-mode [`RequestLog`],
//! - normalizes every failure (transport error, timeout, non-2xx response,
//!   undecodable body) into a single [`ApiError`] shape, and
//! - reacts to `401 Unauthorized` by clearing the persisted session.
//!
//! There is no global instance: construct an [`ApiClient`] explicitly and
//! pass it down (see the `api` modules for the typed endpoint functions).

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use userhub_core::error::{ApiError, ErrorBody, GENERIC_ERROR_MESSAGE, NO_RESPONSE_STATUS};

use crate::config::ClientConfig;
use crate::request_log::RequestLog;
use crate::session::provider::SessionProvider;

/// Configured HTTP client with auth injection and error normalization.
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: Arc<dyn SessionProvider>,
    log: RequestLog,
}

impl ApiClient {
    /// Build a client from configuration and the shared session provider.
    ///
    /// # Panics
    ///
    /// Panics if the underlying TLS backend cannot be initialized, same as
    /// `reqwest::Client::new()`.
    pub fn new(config: ClientConfig, session: Arc<dyn SessionProvider>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            config,
            session,
            log: RequestLog::new(),
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET` a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None, None).await
    }

    /// `GET` a JSON resource with query parameters.
    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        let query = to_value(query)?;
        self.request(Method::GET, path, Some(query), None).await
    }

    /// `POST` a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = to_value(body)?;
        self.request(Method::POST, path, None, Some(body)).await
    }

    /// `PUT` a JSON body.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = to_value(body)?;
        self.request(Method::PUT, path, None, Some(body)).await
    }

    /// `PATCH` a JSON body.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = to_value(body)?;
        self.request(Method::PATCH, path, None, Some(body)).await
    }

    /// `DELETE` a resource.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None, None).await
    }

    /// Dispatch pipeline shared by all verbs.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<Value>,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);

        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = self.session.token().await {
            request = request.bearer_auth(token);
        }
        if let Some(query) = &query {
            request = request.query(query);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let id = self
            .log
            .dispatched(&method, &url, query.as_ref(), body.as_ref());

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                // No response at all: network failure or timeout.
                self.log.request_failed(id, None, None);
                return Err(normalize_transport(err));
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(self.failure(id, status, response).await);
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                self.log.request_failed(id, Some(status), None);
                return Err(normalize_transport(err));
            }
        };

        let value: Value = match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) => {
                self.log.request_failed(id, Some(status), None);
                return Err(decode_error(err));
            }
        };

        self.log.response_received(id, status, &value);
        serde_json::from_value(value).map_err(decode_error)
    }

    /// Normalize a non-2xx response into an [`ApiError`], clearing the
    /// persisted session on `401`.
    async fn failure(
        &self,
        id: Option<Uuid>,
        status: StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        // Capture the transport-level status message before consuming the
        // body; it is the fallback when the server sent no message.
        let transport_message = response
            .error_for_status_ref()
            .err()
            .map(|err| err.to_string());

        let bytes = response.bytes().await.unwrap_or_default();
        let body_value: Option<Value> = serde_json::from_slice(&bytes).ok();
        self.log.request_failed(id, Some(status), body_value.as_ref());

        if status == StatusCode::UNAUTHORIZED {
            // Authentication loss is handled centrally, whatever the
            // endpoint. No navigation happens here: callers react to the
            // cleared session.
            self.session.clear().await;
        }

        let body: ErrorBody = body_value
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default();

        ApiError {
            message: body
                .message
                .or(transport_message)
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
            status: status.as_u16(),
            code: body.code,
            details: body.details,
        }
    }
}

/// Serialize a request payload, mapping failure into the uniform error.
fn to_value<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|err| {
        ApiError::new(
            NO_RESPONSE_STATUS,
            format!("Failed to serialize request body: {err}"),
        )
    })
}

/// Normalize a transport-level failure (no usable response).
fn normalize_transport(err: reqwest::Error) -> ApiError {
    let status = err
        .status()
        .map(|status| status.as_u16())
        .unwrap_or(NO_RESPONSE_STATUS);
    ApiError::new(status, err.to_string())
}

/// Normalize a JSON decode failure on a success response.
fn decode_error(err: serde_json::Error) -> ApiError {
    ApiError::new(
        NO_RESPONSE_STATUS,
        format!("Failed to decode response body: {err}"),
    )
}
