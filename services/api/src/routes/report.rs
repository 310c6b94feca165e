//! Service-report route
//!
//! Read-only fan-in: order, technician and the three dependent collections
//! are fetched and folded into one document. Safe to call repeatedly.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthTechnician,
    report,
    state::AppState,
};

/// Assemble the printable report for one order
pub async fn get_report(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
    Path(order_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let order = state
        .order_repository
        .find(order_id, caller.id)
        .await
        .map_err(|e| ApiError::storage("loading service order", e))?
        .ok_or(ApiError::NotFound("service order"))?;

    let technician = state
        .technician_repository
        .find_by_id(caller.id)
        .await
        .map_err(|e| ApiError::storage("loading technician profile", e))?
        .ok_or(ApiError::NotFound("technician"))?;

    let photos = state
        .photo_repository
        .list_for_order(order_id)
        .await
        .map_err(|e| ApiError::storage("listing order photos", e))?;

    let parts = state
        .part_repository
        .list_for_order(order_id)
        .await
        .map_err(|e| ApiError::storage("listing replaced parts", e))?;

    let signature = state
        .signature_repository
        .find_for_order(order_id)
        .await
        .map_err(|e| ApiError::storage("loading order signature", e))?;

    let document = report::fold(
        &order,
        &technician,
        &photos,
        &parts,
        signature.as_ref(),
        Utc::now(),
    );

    Ok(Json(document))
}
