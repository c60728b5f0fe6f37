//! Domain entities for the database layer

pub mod blob;
pub mod booking;
pub mod customer;
pub mod shop;
pub mod stylist;

pub use blob::{Blob, BlobDescriptor, NewBlob};
pub use booking::{Booking, BookingStatus, NewBooking};
pub use customer::{Customer, CustomerUpdate, NewCustomer};
pub use shop::{NewShop, Shop, ShopUpdate};
pub use stylist::{NewStylist, ServiceOffer, ServiceType, Stylist, StylistQuery, StylistUpdate};
