//! Blob metadata REST endpoints
//!
//! File contents live in external object storage; only the metadata passes
//! through here.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use salon_bookings::{Blob, CreateBlobRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::{GatewayError, GatewayResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlobResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub blob_type: String,
    pub file_name: String,
    /// Public id of the owning stylist or customer.
    pub user_id: String,
    pub created_at: String,
}

impl From<Blob> for BlobResponse {
    fn from(blob: Blob) -> Self {
        Self {
            id: blob.public_id,
            blob_type: blob.blob_type,
            file_name: blob.file_name,
            user_id: blob.user_id,
            created_at: blob.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBlobBody {
    #[serde(rename = "type")]
    pub blob_type: String,
    pub file_name: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListBlobsQuery {
    pub user_id: Option<String>,
}

pub fn create_blob_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/blob", get(list_blobs).post(create_blob))
        .route("/blob/:id", get(get_blob))
}

#[utoipa::path(
    post,
    path = "/blob",
    tag = "blobs",
    request_body = CreateBlobBody,
    responses(
        (status = 201, description = "Metadata recorded", body = BlobResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 404, description = "Unknown owner", body = ErrorResponse)
    )
)]
pub async fn create_blob(
    State(state): State<Arc<GatewayState>>,
    ApiJson(body): ApiJson<CreateBlobBody>,
) -> GatewayResult<(StatusCode, Json<BlobResponse>)> {
    let blob = state
        .blob_service
        .create_blob(CreateBlobRequest {
            blob_type: body.blob_type,
            file_name: body.file_name,
            user_id: body.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(blob.into())))
}

#[utoipa::path(
    get,
    path = "/blob",
    tag = "blobs",
    params(ListBlobsQuery),
    responses(
        (status = 200, description = "Blobs owned by the user", body = Vec<BlobResponse>),
        (status = 400, description = "userId missing", body = ErrorResponse)
    )
)]
pub async fn list_blobs(
    State(state): State<Arc<GatewayState>>,
    ApiQuery(params): ApiQuery<ListBlobsQuery>,
) -> GatewayResult<Json<Vec<BlobResponse>>> {
    let user_id = params
        .user_id
        .filter(|user_id| !user_id.trim().is_empty())
        .ok_or_else(|| GatewayError::InvalidRequest("userId query parameter is required".to_string()))?;

    let blobs = state.blob_service.list_for_user(user_id.trim()).await?;
    Ok(Json(blobs.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/blob/{id}",
    tag = "blobs",
    params(("id" = String, Path, description = "Blob id")),
    responses(
        (status = 200, description = "The blob metadata", body = BlobResponse),
        (status = 404, description = "Unknown blob", body = ErrorResponse)
    )
)]
pub async fn get_blob(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> GatewayResult<Json<BlobResponse>> {
    let blob = state.blob_service.get_blob(&id).await?;
    Ok(Json(blob.into()))
}
