//! REST API endpoints for the gateway

pub mod blob;
pub mod booking;
pub mod customer;
pub mod health;
pub mod shop;
pub mod stylist;

use axum::{routing::get, Router};
use crate::state::GatewayState;
use std::sync::Arc;

/// Create all REST API routes
pub fn create_rest_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(shop::create_shop_routes())
        .merge(stylist::create_stylist_routes())
        .merge(customer::create_customer_routes())
        .merge(booking::create_booking_routes())
        .merge(blob::create_blob_routes())
}
