//! Client-directory routes
//!
//! Authenticated but unscoped: any technician may read or write any client
//! record. The creating technician is recorded on the row.

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthTechnician,
    models::{ClientPatch, ClientQuery, CreateClientRequest},
    state::AppState,
};

/// Client-directory routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
}

/// All clients ordered by name, optionally filtered by a search term
pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
) -> ApiResult<impl IntoResponse> {
    let term = query.q.as_deref().map(str::trim).filter(|t| !t.is_empty());

    let clients = state
        .client_repository
        .search(term)
        .await
        .map_err(|e| ApiError::storage("listing clients", e))?;

    Ok(Json(json!({ "clients": clients })))
}

/// One client by id
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let client = state
        .client_repository
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::storage("loading client", e))?
        .ok_or(ApiError::NotFound("client"))?;

    Ok(Json(json!({ "client": client })))
}

/// Create a new directory record
pub async fn create_client(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthTechnician>,
    Json(payload): Json<CreateClientRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_client = payload.validate().map_err(ApiError::Validation)?;

    let client = state
        .client_repository
        .create(caller.id, &new_client)
        .await
        .map_err(|e| ApiError::storage("creating client", e))?;

    Ok((StatusCode::CREATED, Json(json!({ "client": client }))))
}

/// Partially update a client
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ClientPatch>,
) -> ApiResult<impl IntoResponse> {
    let client = state
        .client_repository
        .update(id, &patch)
        .await
        .map_err(|e| ApiError::storage("updating client", e))?
        .ok_or(ApiError::NotFound("client"))?;

    Ok(Json(json!({ "client": client })))
}

/// Delete a client
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state
        .client_repository
        .delete(id)
        .await
        .map_err(|e| ApiError::storage("deleting client", e))?;

    if !deleted {
        return Err(ApiError::NotFound("client"));
    }

    Ok(Json(json!({ "message": "client deleted" })))
}
