//! # Salon Gateway Crate
//!
//! HTTP surface of the salon backend. Routes JSON requests to the services in
//! `salon-bookings` and translates their errors into status codes.
//!
//! ## Architecture
//!
//! - **REST**: one module per resource, each documented for OpenAPI
//! - **State**: the services shared by every handler
//! - **Middleware**: request logging, tracing spans and CORS
//!
//! ## Usage
//!
//! ```rust,no_run
//! use salon_gateway::{create_router, GatewayState};
//!
//! # async fn run(pool: salon_database::SqlitePool) -> std::io::Result<()> {
//! let app = create_router(GatewayState::new(pool));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await
//! # }
//! ```

pub mod error;
pub mod extract;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{ErrorResponse, GatewayError, GatewayResult};
pub use state::GatewayState;

use axum::{middleware as axum_middleware, routing::get, Json, Router};
use std::sync::Arc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Salon Booking API", description = "Shops, stylists, customers and their bookings"),
    paths(
        rest::health::health_check,
        rest::shop::create_shop,
        rest::shop::list_shops,
        rest::shop::get_shop,
        rest::shop::update_shop,
        rest::shop::list_shop_stylists,
        rest::stylist::create_stylist,
        rest::stylist::sign_up_stylist,
        rest::stylist::login_stylist,
        rest::stylist::list_stylists,
        rest::stylist::get_stylist,
        rest::stylist::update_stylist,
        rest::stylist::list_stylist_bookings,
        rest::customer::sign_up_customer,
        rest::customer::login_customer,
        rest::customer::get_customer,
        rest::customer::update_customer,
        rest::customer::list_customer_bookings,
        rest::booking::create_booking,
        rest::booking::get_booking,
        rest::booking::update_booking_status,
        rest::blob::create_blob,
        rest::blob::list_blobs,
        rest::blob::get_blob,
    ),
    components(
        schemas(
            ErrorResponse,
            rest::health::HealthResponse,
            rest::shop::ShopResponse,
            rest::shop::CreateShopBody,
            rest::shop::UpdateShopBody,
            rest::stylist::StylistResponse,
            rest::stylist::ServiceOfferResponse,
            rest::stylist::ServiceEntryBody,
            rest::stylist::CreateStylistBody,
            rest::stylist::IconBody,
            rest::stylist::StylistSignupBody,
            rest::stylist::StylistSignupResponse,
            rest::stylist::UpdateStylistBody,
            rest::stylist::LoginBody,
            rest::customer::CustomerResponse,
            rest::customer::CustomerSignupBody,
            rest::customer::UpdateCustomerBody,
            rest::booking::BookingResponse,
            rest::booking::CreateBookingBody,
            rest::booking::UpdateBookingStatusBody,
            rest::blob::BlobResponse,
            rest::blob::CreateBlobBody,
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "shops", description = "Salon shops"),
        (name = "stylists", description = "Stylists and their price lists"),
        (name = "customers", description = "Customer accounts"),
        (name = "bookings", description = "Appointments"),
        (name = "blobs", description = "Metadata of uploaded files"),
    )
)]
pub struct ApiDoc;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let arc_state = Arc::new(state);

    Router::new()
        .merge(rest::create_rest_routes().with_state(arc_state))
        .route("/api-docs/openapi.json", get(openapi_document))
        .layer(middleware::create_cors_middleware())
        .layer(middleware::create_trace_middleware())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
