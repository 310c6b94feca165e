//! Signature routes, nested under an order
//!
//! One signature per order: submission is a single conditional upsert, so
//! a second submission overwrites the first instead of conflicting.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthTechnician,
    models::UpsertSignatureRequest,
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

/// The order's signature; `null` when none was collected yet
pub async fn get_signature(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
    Path(order_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    ensure_owned(&state, order_id, &caller).await?;

    let signature = state
        .signature_repository
        .find_for_order(order_id)
        .await
        .map_err(|e| ApiError::storage("loading order signature", e))?;

    Ok(Json(json!({ "signature": signature })))
}

/// Store or replace the order's signature
pub async fn upsert_signature(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<UpsertSignatureRequest>,
) -> ApiResult<impl IntoResponse> {
    ensure_owned(&state, order_id, &caller).await?;

    let signature_data = payload.validate().map_err(ApiError::Validation)?;

    let signature = state
        .signature_repository
        .upsert(order_id, &signature_data)
        .await
        .map_err(|e| ApiError::storage("storing order signature", e))?;

    Ok(Json(json!({ "signature": signature })))
}
