//! Replaced-part routes, nested under an order
//!
//! Listing and mutation responses carry the freshly computed sum of the
//! order's part values; persisting that figure onto the order itself stays
//! a caller-driven update.

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
    models::{CreatePartRequest, parts_total},
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

/// Parts for one order, newest first, with the computed total
pub async fn list_parts(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
    Path(order_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    ensure_owned(&state, order_id, &caller).await?;

    let parts = state
        .part_repository
        .list_for_order(order_id)
        .await
        .map_err(|e| ApiError::storage("listing replaced parts", e))?;

    let total_value = parts_total(&parts);

    Ok(Json(json!({ "parts": parts, "total_value": total_value })))
}

/// Record a part swap on the order
pub async fn add_part(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<CreatePartRequest>,
) -> ApiResult<impl IntoResponse> {
    ensure_owned(&state, order_id, &caller).await?;

    let new_part = payload.validate().map_err(ApiError::Validation)?;

    let part = state
        .part_repository
        .add(order_id, &new_part)
        .await
        .map_err(|e| ApiError::storage("adding replaced part", e))?;

    let parts = state
        .part_repository
        .list_for_order(order_id)
        .await
        .map_err(|e| ApiError::storage("recomputing parts total", e))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "part": part, "total_value": parts_total(&parts) })),
    ))
}

/// Remove one part from the order
pub async fn remove_part(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
    Path((order_id, part_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<impl IntoResponse> {
    ensure_owned(&state, order_id, &caller).await?;

    let removed = state
        .part_repository
        .remove(order_id, part_id)
        .await
        .map_err(|e| ApiError::storage("removing replaced part", e))?;

    if !removed {
        return Err(ApiError::NotFound("part"));
    }

    let parts = state
        .part_repository
        .list_for_order(order_id)
        .await
        .map_err(|e| ApiError::storage("recomputing parts total", e))?;

    Ok(Json(json!({
        "message": "part deleted",
        "total_value": parts_total(&parts)
    })))
}
