//! Service-order routes
//!
//! All handlers are ownership-scoped: an order that exists but belongs to
//! another technician is indistinguishable from a missing one.

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthTechnician,
    models::{CreateOrderRequest, OrderPatch},
    routes::{parts, photos, report, signature},
    state::AppState,
};

/// Order routes plus the nested dependent-record surfaces
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/service-orders", get(list_orders).post(create_order))
        .route(
            "/service-orders/:id",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route(
            "/service-orders/:id/photos",
            get(photos::list_photos).post(photos::add_photo),
        )
        .route(
            "/service-orders/:id/photos/:photo_id",
            delete(photos::remove_photo),
        )
        .route(
            "/service-orders/:id/parts",
            get(parts::list_parts).post(parts::add_part),
        )
        .route(
            "/service-orders/:id/parts/:part_id",
            delete(parts::remove_part),
        )
        .route(
            "/service-orders/:id/signature",
            get(signature::get_signature).post(signature::upsert_signature),
        )
        .route("/service-orders/:id/report", get(report::get_report))
}

/// All orders owned by the caller, newest first
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
) -> ApiResult<impl IntoResponse> {
    let orders = state
        .order_repository
        .list_for(caller.id)
        .await
        .map_err(|e| ApiError::storage("listing service orders", e))?;

    Ok(Json(json!({ "orders": orders })))
}

/// One order by id
pub async fn get_order(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let order = state
        .order_repository
        .find(id, caller.id)
        .await
        .map_err(|e| ApiError::storage("loading service order", e))?
        .ok_or(ApiError::NotFound("service order"))?;

    Ok(Json(json!({ "order": order })))
}

/// Create a new order owned by the caller
pub async fn create_order(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
    Json(payload): Json<CreateOrderRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_order = payload.validate().map_err(ApiError::Validation)?;

    let order = state
        .order_repository
        .create(caller.id, &new_order)
        .await
        .map_err(|e| ApiError::storage("creating service order", e))?;

    Ok((StatusCode::CREATED, Json(json!({ "order": order }))))
}

/// Partially update an order
pub async fn update_order(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
    Path(id): Path<Uuid>,
    Json(patch): Json<OrderPatch>,
) -> ApiResult<impl IntoResponse> {
    let order = state
        .order_repository
        .update(id, caller.id, &patch)
        .await
        .map_err(|e| ApiError::storage("updating service order", e))?
        .ok_or(ApiError::NotFound("service order"))?;

    Ok(Json(json!({ "order": order })))
}

/// Delete an order and everything that hangs off it
pub async fn delete_order(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state
        .order_repository
        .delete(id, caller.id)
        .await
        .map_err(|e| ApiError::storage("deleting service order", e))?;

    if !deleted {
        return Err(ApiError::NotFound("service order"));
    }

    Ok(Json(json!({ "message": "service order deleted" })))
}
