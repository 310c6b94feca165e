//! Access gateway: capability resolution for every protected route
//!
//! The middleware resolves the bearer token once per request and stores the
//! caller's identity in the request extensions. Handlers never trust any
//! client-supplied identity; ownership checks further down always use the
//! identity resolved here.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// The caller, as proven by a resolved capability
#[derive(Debug, Clone)]
pub struct AuthTechnician {
    pub id: Uuid,
    pub email: String,
}

/// Pull the token out of an `Authorization: Bearer ...` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers()).ok_or(ApiError::InvalidCapability)?;

    let claims = state
        .jwt_service
        .resolve(token)
        .map_err(|_| ApiError::InvalidCapability)?;

    req.extensions_mut().insert(AuthTechnician {
        id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(req).await)
}
