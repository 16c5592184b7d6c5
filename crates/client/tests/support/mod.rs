//! Loopback mock backend shared by the integration tests.
//!
//! Serves the same wire shapes as the real backend: enveloped success
//! bodies (`{"data": ...}`), `{message, code?}` error bodies, and bearer
//! auth on the protected routes. Also exposes a few synthetic routes for
//! error-normalization and timeout tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use userhub_client::ClientConfig;

/// Credentials the mock backend accepts.
pub const VALID_EMAIL: &str = "a@b.com";
pub const VALID_PASSWORD: &str = "x";

/// Token minted on successful login and required on protected routes.
pub const ACCESS_TOKEN: &str = "tok1";

type ErrorResponse = (StatusCode, Json<Value>);

/// Shared mock-backend state: the users table plus per-route hit counters
/// for cache assertions.
#[derive(Clone)]
pub struct ServerState {
    pub users: Arc<Mutex<Vec<Value>>>,
    pub list_hits: Arc<AtomicU32>,
    pub detail_hits: Arc<AtomicU32>,
}

pub struct MockServer {
    pub addr: SocketAddr,
    pub state: ServerState,
}

impl MockServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client config pointed at this server, with a short timeout so the
    /// timeout test completes quickly.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url(),
            api_prefix: "/api".into(),
            request_timeout_secs: 1,
        }
    }

    pub fn list_hits(&self) -> u32 {
        self.state.list_hits.load(Ordering::SeqCst)
    }

    pub fn detail_hits(&self) -> u32 {
        self.state.detail_hits.load(Ordering::SeqCst)
    }
}

pub fn user_json(id: i64, name: &str, email: &str, role: &str) -> Value {
    json!({"id": id, "name": name, "email": email, "role": role})
}

/// Bind a mock backend on an ephemeral loopback port and serve it in the
/// background for the rest of the test.
pub async fn spawn() -> MockServer {
    let state = ServerState {
        users: Arc::new(Mutex::new(vec![user_json(1, "Ada", "ada@example.com", "admin")])),
        list_hits: Arc::new(AtomicU32::new(0)),
        detail_hits: Arc::new(AtomicU32::new(0)),
    };

    let app = Router::new()
        .route("/api/auth/login", axum::routing::post(login))
        .route("/api/protected", get(protected))
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/error/no-body", get(error_no_body))
        .route("/api/error/with-message", get(error_with_message))
        .route("/api/slow", get(slow))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("mock server should bind");
    let addr = listener.local_addr().expect("local addr should resolve");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock server should run");
    });

    MockServer { addr, state }
}

/// Require `Authorization: Bearer <ACCESS_TOKEN>`, mirroring the backend's
/// error messages so tests can tell "no header" from "bad token".
fn authorized(headers: &HeaderMap) -> Result<(), ErrorResponse> {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == format!("Bearer {ACCESS_TOKEN}") => Ok(()),
        Some(_) => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid or expired token"})),
        )),
        None => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Missing Authorization header"})),
        )),
    }
}

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, ErrorResponse> {
    if body["email"] == VALID_EMAIL && body["password"] == VALID_PASSWORD {
        Ok(Json(json!({
            "data": {
                "user": user_json(1, "Ada", VALID_EMAIL, "admin"),
                "access_token": ACCESS_TOKEN,
                "refresh_token": "r1",
            }
        })))
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid email or password", "code": "INVALID_CREDENTIALS"})),
        ))
    }
}

async fn protected(headers: HeaderMap) -> Result<Json<Value>, ErrorResponse> {
    authorized(&headers)?;
    Ok(Json(json!({"data": {"message": "This is a protected resource"}})))
}

async fn list_users(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ErrorResponse> {
    authorized(&headers)?;
    state.list_hits.fetch_add(1, Ordering::SeqCst);
    let users = state.users.lock().await;
    Ok(Json(json!({"data": users.clone()})))
}

async fn get_user(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Value>, ErrorResponse> {
    authorized(&headers)?;
    state.detail_hits.fetch_add(1, Ordering::SeqCst);
    let users = state.users.lock().await;
    match users.iter().find(|u| u["id"] == id) {
        Some(user) => Ok(Json(json!({"data": user}))),
        None => Err(not_found(id)),
    }
}

async fn create_user(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ErrorResponse> {
    authorized(&headers)?;
    let mut users = state.users.lock().await;
    let id = users
        .iter()
        .filter_map(|u| u["id"].as_i64())
        .max()
        .unwrap_or(0)
        + 1;
    let user = user_json(
        id,
        body["name"].as_str().unwrap_or(""),
        body["email"].as_str().unwrap_or(""),
        body["role"].as_str().unwrap_or("user"),
    );
    users.push(user.clone());
    Ok(Json(json!({"data": user})))
}

async fn update_user(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ErrorResponse> {
    authorized(&headers)?;
    let mut users = state.users.lock().await;
    let Some(user) = users.iter_mut().find(|u| u["id"] == id) else {
        return Err(not_found(id));
    };
    for field in ["name", "email", "role"] {
        if let Some(value) = body.get(field).filter(|v| !v.is_null()) {
            user[field] = value.clone();
        }
    }
    Ok(Json(json!({"data": user.clone()})))
}

async fn delete_user(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Value>, ErrorResponse> {
    authorized(&headers)?;
    let mut users = state.users.lock().await;
    let Some(index) = users.iter().position(|u| u["id"] == id) else {
        return Err(not_found(id));
    };
    users.remove(index);
    Ok(Json(json!({"data": null})))
}

fn not_found(id: i64) -> ErrorResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": format!("User with id {id} not found"), "code": "NOT_FOUND"})),
    )
}

/// 502 with an empty body: exercises the transport-message fallback.
async fn error_no_body() -> StatusCode {
    StatusCode::BAD_GATEWAY
}

/// 400 with a server-provided message: the message must win.
async fn error_with_message() -> ErrorResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"message": "X", "code": "BAD_INPUT", "details": {"field": "email"}})),
    )
}

/// Sleeps past the client timeout.
async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({"data": null}))
}
