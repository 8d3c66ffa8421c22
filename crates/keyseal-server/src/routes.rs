//! Router construction.

use crate::handlers;
use crate::middleware::require_credential;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Create the keyseal router.
pub fn create_router(state: AppState) -> Router {
    let protected = get(handlers::hello)
        .route_layer(from_fn_with_state(state.clone(), require_credential));

    Router::new()
        .route("/generate-token", get(handlers::generate_token))
        .route("/tokens", post(handlers::generate_token))
        .route("/hello", protected)
        .route("/healthz", get(handlers::healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
