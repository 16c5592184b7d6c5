//! Demo console for the UserHub client SDK.
//!
//! Wires the SDK together end-to-end: restores (or establishes) a session,
//! probes the protected endpoint, and lists users through the query cache.
//! Useful as a smoke test against a running backend and as a reference for
//! embedding the SDK.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use userhub_client::api::users::queries;
use userhub_client::{ApiClient, ClientConfig, FileSessionStore, QueryClient, SessionStore};
use userhub_core::auth::LoginRequest;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userhub_console=info,userhub_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ClientConfig::from_env();
    tracing::info!(
        base_url = %config.base_url,
        prefix = %config.api_prefix,
        "Loaded client configuration"
    );

    // --- Session storage ---
    let session_dir = std::env::var("SESSION_DIR").unwrap_or_else(|_| ".userhub".into());
    let provider = Arc::new(FileSessionStore::new(&session_dir));

    // --- SDK context ---
    let client = Arc::new(ApiClient::new(config, provider.clone()));
    let queries_client = QueryClient::with_defaults();
    let store = SessionStore::restore(Arc::clone(&client), provider).await;

    // --- Session ---
    if store.is_authenticated().await {
        tracing::info!("Restored persisted session");
    } else {
        let credentials = LoginRequest {
            email: std::env::var("USERHUB_EMAIL").expect("USERHUB_EMAIL must be set"),
            password: std::env::var("USERHUB_PASSWORD").expect("USERHUB_PASSWORD must be set"),
        };

        let result = store.login(&credentials).await;
        if !result.success {
            tracing::error!(error = ?result.error, "Login failed");
            std::process::exit(1);
        }
        tracing::info!("Logged in");
    }

    // --- Protected probe ---
    let protected = store.get_protected().await;
    if protected.success {
        if let Some(payload) = protected.data {
            tracing::info!(message = %payload.message, "Protected resource fetched");
        }
    } else {
        tracing::warn!(error = ?protected.error, "Protected fetch failed");
    }

    // --- Users listing (cached) ---
    match queries::users(&client, &queries_client).await {
        Ok(users) => {
            tracing::info!(count = users.len(), "Fetched users");
            for user in &users {
                tracing::info!(
                    id = user.id,
                    name = %user.name,
                    email = %user.email,
                    role = ?user.role,
                    "user"
                );
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "Users listing failed");
        }
    }
}
