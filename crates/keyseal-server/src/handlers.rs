use crate::error::ServerError;
use crate::state::AppState;
use axum::{Extension, Json, extract::State};
use keyseal_credentials::AuthenticatedKey;
use serde_json::json;

/// Issue a fresh credential and return the token as plain text.
pub async fn generate_token(State(state): State<AppState>) -> Result<String, ServerError> {
    let credential = state.issuer.issue().await?;
    Ok(credential.token)
}

/// Greeting for authenticated callers.
pub async fn hello(Extension(key): Extension<AuthenticatedKey>) -> &'static str {
    tracing::debug!(key = %key.fingerprint, "Greeting authenticated caller");
    "Hello, user!"
}

pub async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "service": "keyseal-server" }))
}
