//! Inputs accepted by the services.
//!
//! Text fields arrive as typed by the user; the services trim them and
//! report every blank required field at once.

use chrono::{DateTime, Utc};
use salon_database::ServiceType;

#[derive(Debug, Clone, Default)]
pub struct CreateShopRequest {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateShopRequest {
    pub name: Option<String>,
    pub address: Option<String>,
}

/// One row of the price list as submitted. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceEntry {
    pub service_type: Option<String>,
    pub price: Option<f64>,
}

impl ServiceEntry {
    pub fn new(service_type: ServiceType, price: f64) -> Self {
        Self {
            service_type: Some(service_type.as_str().to_string()),
            price: Some(price),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateStylistRequest {
    pub first_name: String,
    pub last_name: String,
    pub description: Option<String>,
    pub icon_path: Option<String>,
    pub services: Vec<ServiceEntry>,
    pub email: String,
    pub password: String,
    /// Public id of the shop the stylist works at.
    pub shop_id: Option<String>,
}

/// Metadata of an icon the client already uploaded to object storage.
#[derive(Debug, Clone, Default)]
pub struct IconUpload {
    pub blob_type: String,
    pub file_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct StylistSignupRequest {
    pub stylist: CreateStylistRequest,
    pub icon: Option<IconUpload>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateStylistRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub description: Option<String>,
    pub icon_path: Option<String>,
    pub services: Option<Vec<ServiceEntry>>,
    pub shop_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StylistFilter {
    pub shop_id: Option<String>,
    pub service_type: Option<ServiceType>,
}

#[derive(Debug, Clone, Default)]
pub struct CustomerSignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCustomerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateBookingRequest {
    pub customer_id: String,
    pub stylist_id: String,
    pub service_type: ServiceType,
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateBlobRequest {
    pub blob_type: String,
    pub file_name: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}
