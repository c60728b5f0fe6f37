//! Customer REST endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use salon_bookings::{Customer, CustomerSignupRequest, UpdateCustomerRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::booking::BookingResponse;
use super::stylist::LoginBody;
use crate::error::GatewayResult;
use crate::extract::ApiJson;
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.public_id,
            email: customer.email,
            first_name: customer.first_name,
            last_name: customer.last_name,
            phone: customer.phone,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerSignupBody {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCustomerBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

pub fn create_customer_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/customer/signup", post(sign_up_customer))
        .route("/customer/login", post(login_customer))
        .route("/customer/:id", get(get_customer).put(update_customer))
        .route("/customer/:id/bookings", get(list_customer_bookings))
}

#[utoipa::path(
    post,
    path = "/customer/signup",
    tag = "customers",
    request_body = CustomerSignupBody,
    responses(
        (status = 201, description = "Customer registered", body = CustomerResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn sign_up_customer(
    State(state): State<Arc<GatewayState>>,
    ApiJson(body): ApiJson<CustomerSignupBody>,
) -> GatewayResult<(StatusCode, Json<CustomerResponse>)> {
    let customer = state
        .customer_service
        .sign_up(CustomerSignupRequest {
            email: body.email.unwrap_or_default(),
            password: body.password.unwrap_or_default(),
            first_name: body.first_name.unwrap_or_default(),
            last_name: body.last_name.unwrap_or_default(),
            phone: body.phone,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(customer.into())))
}

#[utoipa::path(
    post,
    path = "/customer/login",
    tag = "customers",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Credentials accepted", body = CustomerResponse),
        (status = 401, description = "Wrong email or password", body = ErrorResponse)
    )
)]
pub async fn login_customer(
    State(state): State<Arc<GatewayState>>,
    ApiJson(body): ApiJson<LoginBody>,
) -> GatewayResult<Json<CustomerResponse>> {
    let customer = state.customer_service.authenticate(body.into()).await?;
    Ok(Json(customer.into()))
}

#[utoipa::path(
    get,
    path = "/customer/{id}",
    tag = "customers",
    params(("id" = String, Path, description = "Customer id")),
    responses(
        (status = 200, description = "The customer", body = CustomerResponse),
        (status = 404, description = "Unknown customer", body = ErrorResponse)
    )
)]
pub async fn get_customer(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> GatewayResult<Json<CustomerResponse>> {
    let customer = state.customer_service.get_customer(&id).await?;
    Ok(Json(customer.into()))
}

#[utoipa::path(
    put,
    path = "/customer/{id}",
    tag = "customers",
    params(("id" = String, Path, description = "Customer id")),
    request_body = UpdateCustomerBody,
    responses(
        (status = 200, description = "Updated customer", body = CustomerResponse),
        (status = 400, description = "Blank name", body = ErrorResponse),
        (status = 404, description = "Unknown customer", body = ErrorResponse)
    )
)]
pub async fn update_customer(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateCustomerBody>,
) -> GatewayResult<Json<CustomerResponse>> {
    let customer = state
        .customer_service
        .update_customer(
            &id,
            UpdateCustomerRequest {
                first_name: body.first_name,
                last_name: body.last_name,
                phone: body.phone,
            },
        )
        .await?;

    Ok(Json(customer.into()))
}

#[utoipa::path(
    get,
    path = "/customer/{id}/bookings",
    tag = "customers",
    params(("id" = String, Path, description = "Customer id")),
    responses(
        (status = 200, description = "The customer's bookings by appointment time", body = Vec<BookingResponse>),
        (status = 404, description = "Unknown customer", body = ErrorResponse)
    )
)]
pub async fn list_customer_bookings(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> GatewayResult<Json<Vec<BookingResponse>>> {
    let bookings = state.booking_service.list_for_customer(&id).await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}
