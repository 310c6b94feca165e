//! Authentication routes: signup, login, current technician

use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthTechnician,
    models::{LoginRequest, ProfilePatch, SignupRequest, TechnicianResponse},
    state::AppState,
};

/// Response for signup and login
#[derive(Serialize)]
pub struct AuthResponse {
    pub technician: TechnicianResponse,
    pub token: String,
}

/// Routes reachable without a capability
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

/// Routes behind the access gateway
pub fn protected_router() -> Router<AppState> {
    Router::new().route("/auth/me", get(me).put(update_profile))
}

/// Register a new technician and issue a capability
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_technician = payload.validate().map_err(ApiError::Validation)?;

    let existing = state
        .technician_repository
        .find_by_email(&new_technician.email)
        .await
        .map_err(|e| ApiError::storage("checking for a registered email", e))?;
    if existing.is_some() {
        return Err(ApiError::DuplicateIdentity);
    }

    let technician = state
        .technician_repository
        .create(&new_technician)
        .await
        .map_err(|e| ApiError::storage("creating technician", e))?;

    let token = state
        .jwt_service
        .issue(technician.id, &technician.email)
        .map_err(|e| ApiError::storage("issuing capability", e))?;

    info!("technician {} registered", technician.id);

    let response = AuthResponse {
        technician: technician.into(),
        token,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Authenticate a technician. Unknown email and wrong password fail the
/// same way so callers cannot enumerate accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("email and password are required".into()));
    }

    let technician = state
        .technician_repository
        .find_by_email(&email)
        .await
        .map_err(|e| ApiError::storage("looking up technician", e))?
        .ok_or(ApiError::InvalidCredential)?;

    let valid = state
        .technician_repository
        .verify_password(&technician, &password)
        .map_err(|e| ApiError::storage("verifying password", e))?;
    if !valid {
        return Err(ApiError::InvalidCredential);
    }

    let token = state
        .jwt_service
        .issue(technician.id, &technician.email)
        .map_err(|e| ApiError::storage("issuing capability", e))?;

    info!("technician {} logged in", technician.id);

    let response = AuthResponse {
        technician: technician.into(),
        token,
    };

    Ok(Json(response))
}

/// Current technician, resolved from the capability
pub async fn me(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
) -> ApiResult<impl IntoResponse> {
    let technician = state
        .technician_repository
        .find_by_id(caller.id)
        .await
        .map_err(|e| ApiError::storage("loading technician profile", e))?
        .ok_or(ApiError::NotFound("technician"))?;

    Ok(Json(
        json!({ "technician": TechnicianResponse::from(technician) }),
    ))
}

/// Update the caller's profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
    Json(patch): Json<ProfilePatch>,
) -> ApiResult<impl IntoResponse> {
    let technician = state
        .technician_repository
        .update_profile(caller.id, &patch)
        .await
        .map_err(|e| ApiError::storage("updating technician profile", e))?
        .ok_or(ApiError::NotFound("technician"))?;

    Ok(Json(
        json!({ "technician": TechnicianResponse::from(technician) }),
    ))
}
