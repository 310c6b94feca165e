//! Photo routes, nested under an order
//!
//! Each handler re-validates that the referenced order exists and belongs
//! to the caller before touching photo rows.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthTechnician,
    models::CreatePhotoRequest,
    state::AppState,
};

async fn ensure_owned(state: &AppState, order_id: Uuid, caller: &AuthTechnician) -> ApiResult<()> {
    let owned = state
        .order_repository
        .owned(order_id, caller.id)
        .await
        .map_err(|e| ApiError::storage("checking order ownership", e))?;
    if !owned {
        return Err(ApiError::NotFound("service order"));
    }
    Ok(())
}

/// Photos for one order, newest first
pub async fn list_photos(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
    Path(order_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    ensure_owned(&state, order_id, &caller).await?;

    let photos = state
        .photo_repository
        .list_for_order(order_id)
        .await
        .map_err(|e| ApiError::storage("listing order photos", e))?;

    Ok(Json(json!({ "photos": photos })))
}

/// Attach an uploaded photo or video to the order
pub async fn add_photo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<CreatePhotoRequest>,
) -> ApiResult<impl IntoResponse> {
    ensure_owned(&state, order_id, &caller).await?;

    let new_photo = payload.validate().map_err(ApiError::Validation)?;

    let photo = state
        .photo_repository
        .add(order_id, &new_photo)
        .await
        .map_err(|e| ApiError::storage("adding order photo", e))?;

    Ok((StatusCode::CREATED, Json(json!({ "photo": photo }))))
}

/// Remove one photo from the order
pub async fn remove_photo(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
    Path((order_id, photo_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<impl IntoResponse> {
    ensure_owned(&state, order_id, &caller).await?;

    let removed = state
        .photo_repository
        .remove(order_id, photo_id)
        .await
        .map_err(|e| ApiError::storage("removing order photo", e))?;

    if !removed {
        return Err(ApiError::NotFound("photo"));
    }

    Ok(Json(json!({ "message": "photo deleted" })))
}
