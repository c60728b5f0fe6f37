//! Shop REST endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use salon_bookings::{CreateShopRequest, Shop, StylistFilter, UpdateShopRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::stylist::StylistResponse;
use crate::error::GatewayResult;
use crate::extract::ApiJson;
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShopResponse {
    pub id: String,
    pub name: String,
    pub address: String,
    /// Public ids of the shop's stylists, oldest first.
    pub stylist_ids: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Shop> for ShopResponse {
    fn from(shop: Shop) -> Self {
        Self {
            id: shop.public_id,
            name: shop.name,
            address: shop.address,
            stylist_ids: shop.stylist_ids,
            created_at: shop.created_at,
            updated_at: shop.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateShopBody {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateShopBody {
    pub name: Option<String>,
    pub address: Option<String>,
}

pub fn create_shop_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/shop", get(list_shops).post(create_shop))
        .route("/shop/:id", get(get_shop).put(update_shop))
        .route("/shop/:id/stylists", get(list_shop_stylists))
}

#[utoipa::path(
    post,
    path = "/shop",
    tag = "shops",
    request_body = CreateShopBody,
    responses(
        (status = 201, description = "Shop created", body = ShopResponse),
        (status = 400, description = "Missing name or address", body = ErrorResponse)
    )
)]
pub async fn create_shop(
    State(state): State<Arc<GatewayState>>,
    ApiJson(body): ApiJson<CreateShopBody>,
) -> GatewayResult<(StatusCode, Json<ShopResponse>)> {
    let shop = state
        .shop_service
        .create_shop(CreateShopRequest {
            name: body.name,
            address: body.address,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(shop.into())))
}

#[utoipa::path(
    get,
    path = "/shop",
    tag = "shops",
    responses(
        (status = 200, description = "All shops", body = Vec<ShopResponse>)
    )
)]
pub async fn list_shops(State(state): State<Arc<GatewayState>>) -> GatewayResult<Json<Vec<ShopResponse>>> {
    let shops = state.shop_service.list_shops().await?;
    Ok(Json(shops.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/shop/{id}",
    tag = "shops",
    params(("id" = String, Path, description = "Shop id")),
    responses(
        (status = 200, description = "The shop", body = ShopResponse),
        (status = 404, description = "Unknown shop", body = ErrorResponse)
    )
)]
pub async fn get_shop(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> GatewayResult<Json<ShopResponse>> {
    let shop = state.shop_service.get_shop(&id).await?;
    Ok(Json(shop.into()))
}

#[utoipa::path(
    put,
    path = "/shop/{id}",
    tag = "shops",
    params(("id" = String, Path, description = "Shop id")),
    request_body = UpdateShopBody,
    responses(
        (status = 200, description = "Updated shop", body = ShopResponse),
        (status = 400, description = "Blank field", body = ErrorResponse),
        (status = 404, description = "Unknown shop", body = ErrorResponse)
    )
)]
pub async fn update_shop(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateShopBody>,
) -> GatewayResult<Json<ShopResponse>> {
    let shop = state
        .shop_service
        .update_shop(
            &id,
            UpdateShopRequest {
                name: body.name,
                address: body.address,
            },
        )
        .await?;

    Ok(Json(shop.into()))
}

#[utoipa::path(
    get,
    path = "/shop/{id}/stylists",
    tag = "shops",
    params(("id" = String, Path, description = "Shop id")),
    responses(
        (status = 200, description = "Stylists working at the shop", body = Vec<StylistResponse>),
        (status = 404, description = "Unknown shop", body = ErrorResponse)
    )
)]
pub async fn list_shop_stylists(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> GatewayResult<Json<Vec<StylistResponse>>> {
    let stylists = state
        .stylist_service
        .list_stylists(StylistFilter {
            shop_id: Some(id),
            service_type: None,
        })
        .await?;

    Ok(Json(stylists.into_iter().map(Into::into).collect()))
}
