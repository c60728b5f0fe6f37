//! Shared application state for the gateway

use std::sync::Arc;

use salon_bookings::{
    BlobService, BookingService, CustomerService, SalonServices, ShopService, StylistService,
};
use salon_database::SqlitePool;

/// Services shared by every request handler.
#[derive(Clone)]
pub struct GatewayState {
    pub pool: SqlitePool,
    pub shop_service: Arc<ShopService>,
    pub stylist_service: Arc<StylistService>,
    pub customer_service: Arc<CustomerService>,
    pub booking_service: Arc<BookingService>,
    pub blob_service: Arc<BlobService>,
}

impl GatewayState {
    pub fn new(pool: SqlitePool) -> Self {
        Self::from_services(pool.clone(), SalonServices::from_pool(pool))
    }

    pub fn from_services(pool: SqlitePool, services: SalonServices) -> Self {
        Self {
            pool,
            shop_service: services.shops,
            stylist_service: services.stylists,
            customer_service: services.customers,
            booking_service: services.bookings,
            blob_service: services.blobs,
        }
    }
}
