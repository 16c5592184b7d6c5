//! Development-mode request/response correlation log.
//!
//! Records every dispatched request and emits a `tracing` debug line when
//! its response or failure arrives, with method, URL, status, elapsed time,
//! and both bodies. Purely diagnostic: nothing here affects request
//! behavior, and the whole module short-circuits in release builds before
//! any bookkeeping happens.
//!
//! Entries are keyed by a per-request UUID generated at dispatch and carried
//! through the dispatch pipeline, so concurrent requests to the same URL
//! cannot cross wires. The pending set is bounded: if a completion never
//! arrives (entry count reaches [`MAX_PENDING`]), the oldest entry is
//! evicted.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Instant;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use uuid::Uuid;

/// Maximum number of in-flight entries retained before evicting the oldest.
const MAX_PENDING: usize = 64;

/// A dispatched request awaiting its response or failure.
#[derive(Debug)]
struct PendingRequest {
    id: Uuid,
    method: Method,
    url: String,
    started_at: Instant,
    params: Option<Value>,
    body: Option<Value>,
}

/// Correlation log shared by all requests of one [`ApiClient`](crate::http::ApiClient).
#[derive(Debug, Default)]
pub(crate) struct RequestLog {
    pending: Mutex<VecDeque<PendingRequest>>,
}

impl RequestLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a dispatched request, returning its correlation id.
    ///
    /// Returns `None` in release builds (the log is inert) and the
    /// completion hooks accept that as "nothing to do".
    pub(crate) fn dispatched(
        &self,
        method: &Method,
        url: &str,
        params: Option<&Value>,
        body: Option<&Value>,
    ) -> Option<Uuid> {
        if !cfg!(debug_assertions) {
            return None;
        }

        let id = Uuid::new_v4();
        let entry = PendingRequest {
            id,
            method: method.clone(),
            url: url.to_string(),
            started_at: Instant::now(),
            params: params.cloned(),
            body: body.cloned(),
        };

        // Logging must never panic: a poisoned lock just drops diagnostics.
        let Ok(mut pending) = self.pending.lock() else {
            return None;
        };
        if pending.len() >= MAX_PENDING {
            pending.pop_front();
        }
        pending.push_back(entry);
        Some(id)
    }

    /// Emit the diagnostic line for a successful response and consume the
    /// pending entry. An unmatched (evicted) id logs nothing.
    pub(crate) fn response_received(&self, id: Option<Uuid>, status: StatusCode, body: &Value) {
        let Some(entry) = self.take(id) else { return };
        let elapsed_ms = entry.started_at.elapsed().as_millis() as u64;

        tracing::debug!(
            target: "userhub_client::api",
            method = %entry.method,
            url = %entry.url,
            status = %status_display(status),
            elapsed_ms,
            request_params = ?entry.params,
            request_body = ?entry.body,
            response_body = %body,
            "api response",
        );
    }

    /// Emit the diagnostic line for a failed request (non-2xx response or no
    /// response at all) and consume the pending entry.
    pub(crate) fn request_failed(
        &self,
        id: Option<Uuid>,
        status: Option<StatusCode>,
        body: Option<&Value>,
    ) {
        let Some(entry) = self.take(id) else { return };
        let elapsed_ms = entry.started_at.elapsed().as_millis() as u64;
        let status = match status {
            Some(status) => status_display(status),
            None => "network error".to_string(),
        };

        tracing::debug!(
            target: "userhub_client::api",
            method = %entry.method,
            url = %entry.url,
            status = %status,
            elapsed_ms,
            request_params = ?entry.params,
            request_body = ?entry.body,
            response_body = ?body,
            "api request failed",
        );
    }

    /// Remove and return the pending entry for `id`, if still present.
    fn take(&self, id: Option<Uuid>) -> Option<PendingRequest> {
        let id = id?;
        let Ok(mut pending) = self.pending.lock() else {
            return None;
        };
        let index = pending.iter().position(|entry| entry.id == id)?;
        pending.remove(index)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.pending.lock().expect("lock should not be poisoned").len()
    }
}

/// `404 Not Found`-style display for a status code.
fn status_display(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
