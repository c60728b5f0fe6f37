//! Stylist REST endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use salon_bookings::{
    CreateStylistRequest, Credentials, IconUpload, ServiceEntry, ServiceOffer, ServiceType,
    SignedUpStylist, Stylist, StylistFilter, StylistSignupRequest, UpdateStylistRequest,
};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::blob::BlobResponse;
use super::booking::BookingResponse;
use crate::error::{GatewayError, GatewayResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::state::GatewayState;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOfferResponse {
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "HAIRCUT")]
    pub service_type: ServiceType,
    pub price: f64,
}

impl From<ServiceOffer> for ServiceOfferResponse {
    fn from(offer: ServiceOffer) -> Self {
        Self {
            service_type: offer.service_type,
            price: offer.price,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StylistResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub description: Option<String>,
    pub icon_path: Option<String>,
    pub services: Vec<ServiceOfferResponse>,
    pub email: String,
    pub shop_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Stylist> for StylistResponse {
    fn from(stylist: Stylist) -> Self {
        Self {
            id: stylist.public_id,
            first_name: stylist.first_name,
            last_name: stylist.last_name,
            description: stylist.description,
            icon_path: stylist.icon_path,
            services: stylist.services.into_iter().map(Into::into).collect(),
            email: stylist.email,
            shop_id: stylist.shop_public_id,
            created_at: stylist.created_at,
            updated_at: stylist.updated_at,
        }
    }
}

/// One row of a submitted price list. Form inputs send prices as strings, so
/// both `30` and `"30"` are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceEntryBody {
    #[serde(rename = "type")]
    #[schema(example = "HAIRCUT")]
    pub service_type: Option<String>,
    #[serde(deserialize_with = "number_or_string")]
    #[schema(value_type = Option<f64>, example = 30)]
    pub price: Option<f64>,
}

impl From<ServiceEntryBody> for ServiceEntry {
    fn from(body: ServiceEntryBody) -> Self {
        Self {
            service_type: body.service_type,
            price: body.price,
        }
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    match Option::<RawPrice>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawPrice::Number(price)) => Ok(Some(price)),
        Some(RawPrice::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawPrice::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("price '{text}' is not a number"))),
    }
}

/// Required fields are optional here so that absent and `null` values both
/// reach validation, which reports every missing field at once.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateStylistBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub description: Option<String>,
    pub icon_path: Option<String>,
    pub services: Option<Vec<ServiceEntryBody>>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub shop_id: Option<String>,
}

impl From<CreateStylistBody> for CreateStylistRequest {
    fn from(body: CreateStylistBody) -> Self {
        Self {
            first_name: body.first_name.unwrap_or_default(),
            last_name: body.last_name.unwrap_or_default(),
            description: body.description,
            icon_path: body.icon_path,
            services: body
                .services
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            email: body.email.unwrap_or_default(),
            password: body.password.unwrap_or_default(),
            shop_id: body.shop_id,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct IconBody {
    #[serde(rename = "type")]
    #[schema(example = "icon")]
    pub blob_type: String,
    #[schema(example = "portrait_20240101120000000.png")]
    pub file_name: String,
}

/// Stylist fields plus the metadata of an icon already uploaded to storage.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StylistSignupBody {
    #[serde(flatten)]
    pub stylist: CreateStylistBody,
    #[serde(default)]
    pub icon: Option<IconBody>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StylistSignupResponse {
    pub stylist: StylistResponse,
    pub icon: Option<BlobResponse>,
}

impl From<SignedUpStylist> for StylistSignupResponse {
    fn from(signed_up: SignedUpStylist) -> Self {
        Self {
            stylist: signed_up.stylist.into(),
            icon: signed_up.icon.map(Into::into),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateStylistBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub description: Option<String>,
    pub icon_path: Option<String>,
    /// Replaces the whole price list when present.
    pub services: Option<Vec<ServiceEntryBody>>,
    pub shop_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

impl From<LoginBody> for Credentials {
    fn from(body: LoginBody) -> Self {
        Self {
            email: body.email,
            password: body.password,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListStylistsQuery {
    /// Only stylists working at this shop.
    pub shop_id: Option<String>,
    /// Only stylists offering this service type.
    pub service_type: Option<String>,
}

pub fn create_stylist_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/stylist", get(list_stylists).post(create_stylist))
        .route("/stylist/signup", post(sign_up_stylist))
        .route("/stylist/login", post(login_stylist))
        .route("/stylist/:id", get(get_stylist).put(update_stylist))
        .route("/stylist/:id/bookings", get(list_stylist_bookings))
}

#[utoipa::path(
    post,
    path = "/stylist",
    tag = "stylists",
    request_body = CreateStylistBody,
    responses(
        (status = 201, description = "Stylist created", body = StylistResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 404, description = "Unknown shop", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn create_stylist(
    State(state): State<Arc<GatewayState>>,
    ApiJson(body): ApiJson<CreateStylistBody>,
) -> GatewayResult<(StatusCode, Json<StylistResponse>)> {
    let stylist = state.stylist_service.create_stylist(body.into()).await?;
    Ok((StatusCode::CREATED, Json(stylist.into())))
}

#[utoipa::path(
    post,
    path = "/stylist/signup",
    tag = "stylists",
    request_body = StylistSignupBody,
    responses(
        (status = 201, description = "Stylist and icon stored together", body = StylistSignupResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 404, description = "Unknown shop", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn sign_up_stylist(
    State(state): State<Arc<GatewayState>>,
    ApiJson(body): ApiJson<StylistSignupBody>,
) -> GatewayResult<(StatusCode, Json<StylistSignupResponse>)> {
    let request = StylistSignupRequest {
        stylist: body.stylist.into(),
        icon: body.icon.map(|icon| IconUpload {
            blob_type: icon.blob_type,
            file_name: icon.file_name,
        }),
    };

    let signed_up = state.stylist_service.sign_up(request).await?;
    Ok((StatusCode::CREATED, Json(signed_up.into())))
}

#[utoipa::path(
    post,
    path = "/stylist/login",
    tag = "stylists",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Credentials accepted", body = StylistResponse),
        (status = 401, description = "Wrong email or password", body = ErrorResponse)
    )
)]
pub async fn login_stylist(
    State(state): State<Arc<GatewayState>>,
    ApiJson(body): ApiJson<LoginBody>,
) -> GatewayResult<Json<StylistResponse>> {
    let stylist = state.stylist_service.authenticate(body.into()).await?;
    Ok(Json(stylist.into()))
}

#[utoipa::path(
    get,
    path = "/stylist",
    tag = "stylists",
    params(ListStylistsQuery),
    responses(
        (status = 200, description = "Matching stylists", body = Vec<StylistResponse>),
        (status = 400, description = "Unknown service type", body = ErrorResponse),
        (status = 404, description = "Unknown shop", body = ErrorResponse)
    )
)]
pub async fn list_stylists(
    State(state): State<Arc<GatewayState>>,
    ApiQuery(params): ApiQuery<ListStylistsQuery>,
) -> GatewayResult<Json<Vec<StylistResponse>>> {
    let service_type = params
        .service_type
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.trim().parse::<ServiceType>())
        .transpose()
        .map_err(GatewayError::InvalidRequest)?;

    let stylists = state
        .stylist_service
        .list_stylists(StylistFilter {
            shop_id: params.shop_id,
            service_type,
        })
        .await?;

    Ok(Json(stylists.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/stylist/{id}",
    tag = "stylists",
    params(("id" = String, Path, description = "Stylist id")),
    responses(
        (status = 200, description = "The stylist", body = StylistResponse),
        (status = 404, description = "Unknown stylist", body = ErrorResponse)
    )
)]
pub async fn get_stylist(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> GatewayResult<Json<StylistResponse>> {
    let stylist = state.stylist_service.get_stylist(&id).await?;
    Ok(Json(stylist.into()))
}

#[utoipa::path(
    put,
    path = "/stylist/{id}",
    tag = "stylists",
    params(("id" = String, Path, description = "Stylist id")),
    request_body = UpdateStylistBody,
    responses(
        (status = 200, description = "Updated stylist", body = StylistResponse),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 404, description = "Unknown stylist or shop", body = ErrorResponse)
    )
)]
pub async fn update_stylist(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateStylistBody>,
) -> GatewayResult<Json<StylistResponse>> {
    let request = UpdateStylistRequest {
        first_name: body.first_name,
        last_name: body.last_name,
        description: body.description,
        icon_path: body.icon_path,
        services: body
            .services
            .map(|services| services.into_iter().map(Into::into).collect()),
        shop_id: body.shop_id,
    };

    let stylist = state.stylist_service.update_stylist(&id, request).await?;
    Ok(Json(stylist.into()))
}

#[utoipa::path(
    get,
    path = "/stylist/{id}/bookings",
    tag = "stylists",
    params(("id" = String, Path, description = "Stylist id")),
    responses(
        (status = 200, description = "The stylist's bookings by appointment time", body = Vec<BookingResponse>),
        (status = 404, description = "Unknown stylist", body = ErrorResponse)
    )
)]
pub async fn list_stylist_bookings(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> GatewayResult<Json<Vec<BookingResponse>>> {
    let bookings = state.booking_service.list_for_stylist(&id).await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_accepts_numbers_and_numeric_strings() {
        let body: CreateStylistBody = serde_json::from_str(
            r#"{"services":[{"type":"HAIRCUT","price":30},{"type":"NAIL","price":" 12.5 "},{"type":"MAKE_UP","price":""}]}"#,
        )
        .unwrap();

        let prices: Vec<_> = body
            .services
            .unwrap_or_default()
            .iter()
            .map(|s| s.price)
            .collect();
        assert_eq!(prices, vec![Some(30.0), Some(12.5), None]);
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let result = serde_json::from_str::<CreateStylistBody>(
            r#"{"services":[{"type":"HAIRCUT","price":"cheap"}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn signup_body_reads_stylist_fields_and_icon() {
        let body: StylistSignupBody = serde_json::from_str(
            r#"{"firstName":"Ada","email":"ada@example.com","icon":{"type":"icon","fileName":"ada.png"}}"#,
        )
        .unwrap();

        assert_eq!(body.stylist.first_name.as_deref(), Some("Ada"));
        assert_eq!(body.stylist.email.as_deref(), Some("ada@example.com"));
        assert_eq!(body.icon.map(|icon| icon.file_name).as_deref(), Some("ada.png"));
    }

    #[test]
    fn null_fields_become_missing_values() {
        let body: CreateStylistBody = serde_json::from_str(
            r#"{"firstName":null,"lastName":"Lovelace","services":null,"email":null,"password":"pw"}"#,
        )
        .unwrap();

        let request = CreateStylistRequest::from(body);
        assert_eq!(request.first_name, "");
        assert_eq!(request.last_name, "Lovelace");
        assert!(request.services.is_empty());
        assert_eq!(request.email, "");
    }
}
