//! API routes
//!
//! One public surface: the auth endpoints that establish a capability, and
//! a protected sub-router where the access gateway resolves the capability
//! before any handler runs.

pub mod auth;
pub mod clients;
pub mod orders;
pub mod parts;
pub mod photos;
pub mod report;
pub mod signature;

use axum::{Json, Router, middleware, response::IntoResponse, routing::get};
use serde_json::json;

use crate::{middleware::auth_middleware, state::AppState};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(auth::protected_router())
        .merge(orders::router())
        .merge(clients::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api = auth::public_router().merge(protected);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "field-service-api"
    }))
}
