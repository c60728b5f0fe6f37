//! Business logic services for the salon.
//!
//! Each service is generic over the storage trait it needs, with the SQLite
//! repositories as the default. Cross-entity checks go through those traits:
//! the stylist service asks the shop service whether a shop exists, and the
//! booking and blob services look up stylists and customers.

pub mod blob_service;
pub mod booking_service;
pub mod customer_service;
pub mod shop_service;
pub mod stylist_service;
#[cfg(test)]
mod mock_repositories;

pub use blob_service::{BlobRepo, BlobService};
pub use booking_service::{BookingRepo, BookingService};
pub use customer_service::{CustomerRepo, CustomerService};
pub use shop_service::{ShopRepo, ShopService};
pub use stylist_service::{SignedUpStylist, StylistRepo, StylistService, ICON_FOLDER};
