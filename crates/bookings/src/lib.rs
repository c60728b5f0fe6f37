//! # Salon Bookings Crate
//!
//! Domain services for the salon backend: shops, stylists with their price
//! lists, customers, bookings and the metadata of files users upload.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use salon_bookings::{CreateShopRequest, SalonServices};
//!
//! # async fn run(pool: salon_bookings::SqlitePool) -> salon_bookings::SalonResult<()> {
//! let services = SalonServices::from_pool(pool);
//! let _shop = services
//!     .shops
//!     .create_shop(CreateShopRequest {
//!         name: "Downtown Cuts".into(),
//!         address: "1 Main Street".into(),
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub mod services;
pub mod types;
pub mod utils;

pub use salon_database::{
    Blob, Booking, BookingStatus, Customer, ServiceOffer, ServiceType, Shop, SqlitePool, Stylist,
};
pub use services::{
    BlobService, BookingService, CustomerService, ShopService, SignedUpStylist, StylistService,
};
pub use types::*;

use salon_database::{
    BlobRepository, BookingRepository, CustomerRepository, StylistRepository,
};

/// Every service wired to the SQLite repositories of one pool.
#[derive(Clone)]
pub struct SalonServices {
    pub shops: Arc<ShopService>,
    pub stylists: Arc<StylistService>,
    pub customers: Arc<CustomerService>,
    pub bookings: Arc<BookingService>,
    pub blobs: Arc<BlobService>,
}

impl SalonServices {
    pub fn from_pool(pool: SqlitePool) -> Self {
        let stylist_repository = StylistRepository::new(pool.clone());
        let customer_repository = CustomerRepository::new(pool.clone());

        let shops = Arc::new(ShopService::from_pool(pool.clone()));
        let stylists = Arc::new(StylistService::new(stylist_repository.clone(), shops.clone()));
        let customers = Arc::new(CustomerService::from_pool(pool.clone()));
        let bookings = Arc::new(BookingService::new(
            BookingRepository::new(pool.clone()),
            stylist_repository.clone(),
            customer_repository.clone(),
        ));
        let blobs = Arc::new(BlobService::new(
            BlobRepository::new(pool),
            stylist_repository,
            customer_repository,
        ));

        Self {
            shops,
            stylists,
            customers,
            bookings,
            blobs,
        }
    }
}
