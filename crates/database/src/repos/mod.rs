//! Database repository implementations

pub mod blob_repository;
pub mod booking_repository;
pub mod customer_repository;
pub mod shop_repository;
pub mod stylist_repository;

pub use blob_repository::BlobRepository;
pub use booking_repository::BookingRepository;
pub use customer_repository::CustomerRepository;
pub use shop_repository::ShopRepository;
pub use stylist_repository::StylistRepository;
