//! Booking REST endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use salon_bookings::{Booking, BookingStatus, CreateBookingRequest, ServiceType};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::GatewayResult;
use crate::extract::ApiJson;
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: String,
    pub customer_id: String,
    pub stylist_id: String,
    #[schema(value_type = String, example = "HAIRCUT")]
    pub service_type: ServiceType,
    /// Price agreed when the booking was made.
    pub price: f64,
    pub scheduled_at: DateTime<Utc>,
    #[schema(value_type = String, example = "PENDING")]
    pub status: BookingStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.public_id,
            customer_id: booking.customer_public_id,
            stylist_id: booking.stylist_public_id,
            service_type: booking.service_type,
            price: booking.price,
            scheduled_at: booking.scheduled_at,
            status: booking.status,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingBody {
    pub customer_id: String,
    pub stylist_id: String,
    #[schema(value_type = String, example = "HAIRCUT")]
    pub service_type: ServiceType,
    /// RFC 3339 timestamp of the appointment.
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingStatusBody {
    #[schema(value_type = String, example = "CONFIRMED")]
    pub status: BookingStatus,
}

pub fn create_booking_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/booking", post(create_booking))
        .route("/booking/:id", get(get_booking))
        .route("/booking/:id/status", patch(update_booking_status))
}

#[utoipa::path(
    post,
    path = "/booking",
    tag = "bookings",
    request_body = CreateBookingBody,
    responses(
        (status = 201, description = "Booking created as PENDING", body = BookingResponse),
        (status = 400, description = "Service not offered by the stylist", body = ErrorResponse),
        (status = 404, description = "Unknown stylist or customer", body = ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<Arc<GatewayState>>,
    ApiJson(body): ApiJson<CreateBookingBody>,
) -> GatewayResult<(StatusCode, Json<BookingResponse>)> {
    let booking = state
        .booking_service
        .create_booking(CreateBookingRequest {
            customer_id: body.customer_id,
            stylist_id: body.stylist_id,
            service_type: body.service_type,
            scheduled_at: body.scheduled_at,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(booking.into())))
}

#[utoipa::path(
    get,
    path = "/booking/{id}",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking id")),
    responses(
        (status = 200, description = "The booking", body = BookingResponse),
        (status = 404, description = "Unknown booking", body = ErrorResponse)
    )
)]
pub async fn get_booking(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> GatewayResult<Json<BookingResponse>> {
    let booking = state.booking_service.get_booking(&id).await?;
    Ok(Json(booking.into()))
}

#[utoipa::path(
    patch,
    path = "/booking/{id}/status",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking id")),
    request_body = UpdateBookingStatusBody,
    responses(
        (status = 200, description = "Status changed", body = BookingResponse),
        (status = 400, description = "Transition not allowed", body = ErrorResponse),
        (status = 404, description = "Unknown booking", body = ErrorResponse),
        (status = 409, description = "Booking changed concurrently", body = ErrorResponse)
    )
)]
pub async fn update_booking_status(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateBookingStatusBody>,
) -> GatewayResult<Json<BookingResponse>> {
    let booking = state.booking_service.update_status(&id, body.status).await?;
    Ok(Json(booking.into()))
}
