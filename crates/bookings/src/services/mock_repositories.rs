//! In-memory repositories for exercising the services without a database.
//!
//! Public ids follow `<entity>_<id>` so mocks can refer to each other's rows.

use std::sync::Arc;

use chrono::Utc;
use salon_database::{
    Blob, BlobDescriptor, Booking, BookingStatus, Customer, CustomerUpdate, DatabaseError,
    DatabaseResult, NewBlob, NewBooking, NewCustomer, NewShop, NewStylist, Shop, ShopUpdate,
    Stylist, StylistQuery, StylistUpdate,
};
use tokio::sync::RwLock;

use super::blob_service::BlobRepo;
use super::booking_service::BookingRepo;
use super::customer_service::CustomerRepo;
use super::shop_service::ShopRepo;
use super::stylist_service::StylistRepo;

fn now() -> String {
    Utc::now().to_rfc3339()
}

#[derive(Clone, Default)]
pub struct MockShopRepository {
    shops: Arc<RwLock<Vec<Shop>>>,
}

impl MockShopRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShopRepo for MockShopRepository {
    async fn create(&self, request: &NewShop) -> DatabaseResult<Shop> {
        let mut shops = self.shops.write().await;
        let id = shops.len() as i64 + 1;
        let shop = Shop {
            id,
            public_id: format!("shop_{id}"),
            name: request.name.clone(),
            address: request.address.clone(),
            stylist_ids: Vec::new(),
            created_at: now(),
            updated_at: now(),
        };
        shops.push(shop.clone());
        Ok(shop)
    }

    async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Shop>> {
        let shops = self.shops.read().await;
        Ok(shops.iter().find(|s| s.public_id == public_id).cloned())
    }

    async fn find_id_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<i64>> {
        Ok(self.find_by_public_id(public_id).await?.map(|shop| shop.id))
    }

    async fn list(&self) -> DatabaseResult<Vec<Shop>> {
        Ok(self.shops.read().await.clone())
    }

    async fn update(&self, public_id: &str, update: &ShopUpdate) -> DatabaseResult<Option<Shop>> {
        let mut shops = self.shops.write().await;
        let Some(shop) = shops.iter_mut().find(|s| s.public_id == public_id) else {
            return Ok(None);
        };
        if let Some(name) = &update.name {
            shop.name = name.clone();
        }
        if let Some(address) = &update.address {
            shop.address = address.clone();
        }
        shop.updated_at = now();
        Ok(Some(shop.clone()))
    }
}

#[derive(Clone, Default)]
pub struct MockStylistRepository {
    stylists: Arc<RwLock<Vec<Stylist>>>,
    blobs: Arc<RwLock<Vec<Blob>>>,
}

impl MockStylistRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.stylists.read().await.len()
    }
}

impl StylistRepo for MockStylistRepository {
    async fn create_with_icon(
        &self,
        request: &NewStylist,
        icon: Option<&BlobDescriptor>,
    ) -> DatabaseResult<(Stylist, Option<Blob>)> {
        let mut stylists = self.stylists.write().await;
        if stylists.iter().any(|s| s.email == request.email) {
            return Err(DatabaseError::Duplicate(format!(
                "UNIQUE constraint failed: stylists.email ({})",
                request.email
            )));
        }

        let id = stylists.len() as i64 + 1;
        let stylist = Stylist {
            id,
            public_id: format!("stylist_{id}"),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            description: request.description.clone(),
            icon_path: request.icon_path.clone(),
            services: request.services.clone(),
            email: request.email.clone(),
            password_hash: request.password_hash.clone(),
            shop_id: request.shop_id,
            shop_public_id: request.shop_id.map(|shop_id| format!("shop_{shop_id}")),
            created_at: now(),
            updated_at: now(),
        };

        let blob = match icon {
            Some(descriptor) => {
                let mut blobs = self.blobs.write().await;
                let blob_id = blobs.len() as i64 + 1;
                let owned = descriptor.owned_by(&stylist.public_id);
                let blob = Blob {
                    id: blob_id,
                    public_id: format!("blob_{blob_id}"),
                    blob_type: owned.blob_type,
                    file_name: owned.file_name,
                    user_id: owned.user_id,
                    created_at: now(),
                };
                blobs.push(blob.clone());
                Some(blob)
            }
            None => None,
        };

        stylists.push(stylist.clone());
        Ok((stylist, blob))
    }

    async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Stylist>> {
        let stylists = self.stylists.read().await;
        Ok(stylists.iter().find(|s| s.public_id == public_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Stylist>> {
        let stylists = self.stylists.read().await;
        Ok(stylists.iter().find(|s| s.email == email).cloned())
    }

    async fn list(&self, query: &StylistQuery) -> DatabaseResult<Vec<Stylist>> {
        let stylists = self.stylists.read().await;
        Ok(stylists
            .iter()
            .filter(|s| query.shop_id.map_or(true, |shop_id| s.shop_id == Some(shop_id)))
            .filter(|s| {
                query
                    .service_type
                    .map_or(true, |service_type| s.offer_for(service_type).is_some())
            })
            .cloned()
            .collect())
    }

    async fn update(&self, public_id: &str, update: &StylistUpdate) -> DatabaseResult<Option<Stylist>> {
        let mut stylists = self.stylists.write().await;
        let Some(stylist) = stylists.iter_mut().find(|s| s.public_id == public_id) else {
            return Ok(None);
        };
        if let Some(first_name) = &update.first_name {
            stylist.first_name = first_name.clone();
        }
        if let Some(last_name) = &update.last_name {
            stylist.last_name = last_name.clone();
        }
        if let Some(description) = &update.description {
            stylist.description = Some(description.clone());
        }
        if let Some(icon_path) = &update.icon_path {
            stylist.icon_path = Some(icon_path.clone());
        }
        if let Some(services) = &update.services {
            stylist.services = services.clone();
        }
        if let Some(shop_id) = update.shop_id {
            stylist.shop_id = Some(shop_id);
            stylist.shop_public_id = Some(format!("shop_{shop_id}"));
        }
        stylist.updated_at = now();
        Ok(Some(stylist.clone()))
    }
}

#[derive(Clone, Default)]
pub struct MockCustomerRepository {
    customers: Arc<RwLock<Vec<Customer>>>,
}

impl MockCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomerRepo for MockCustomerRepository {
    async fn create(&self, request: &NewCustomer) -> DatabaseResult<Customer> {
        let mut customers = self.customers.write().await;
        if customers.iter().any(|c| c.email == request.email) {
            return Err(DatabaseError::Duplicate(format!(
                "UNIQUE constraint failed: customers.email ({})",
                request.email
            )));
        }

        let id = customers.len() as i64 + 1;
        let customer = Customer {
            id,
            public_id: format!("customer_{id}"),
            email: request.email.clone(),
            password_hash: request.password_hash.clone(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            phone: request.phone.clone(),
            created_at: now(),
            updated_at: now(),
        };
        customers.push(customer.clone());
        Ok(customer)
    }

    async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.iter().find(|c| c.public_id == public_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.iter().find(|c| c.email == email).cloned())
    }

    async fn update(&self, public_id: &str, update: &CustomerUpdate) -> DatabaseResult<Option<Customer>> {
        let mut customers = self.customers.write().await;
        let Some(customer) = customers.iter_mut().find(|c| c.public_id == public_id) else {
            return Ok(None);
        };
        if let Some(first_name) = &update.first_name {
            customer.first_name = first_name.clone();
        }
        if let Some(last_name) = &update.last_name {
            customer.last_name = last_name.clone();
        }
        if let Some(phone) = &update.phone {
            customer.phone = Some(phone.clone());
        }
        customer.updated_at = now();
        Ok(Some(customer.clone()))
    }
}

#[derive(Clone, Default)]
pub struct MockBookingRepository {
    bookings: Arc<RwLock<Vec<Booking>>>,
}

impl MockBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.bookings.read().await.len()
    }
}

impl BookingRepo for MockBookingRepository {
    async fn create(&self, request: &NewBooking) -> DatabaseResult<Booking> {
        let mut bookings = self.bookings.write().await;
        let id = bookings.len() as i64 + 1;
        let booking = Booking {
            id,
            public_id: format!("booking_{id}"),
            customer_id: request.customer_id,
            customer_public_id: format!("customer_{}", request.customer_id),
            stylist_id: request.stylist_id,
            stylist_public_id: format!("stylist_{}", request.stylist_id),
            service_type: request.service_type,
            price: request.price,
            scheduled_at: request.scheduled_at,
            status: BookingStatus::Pending,
            created_at: now(),
            updated_at: now(),
        };
        bookings.push(booking.clone());
        Ok(booking)
    }

    async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().find(|b| b.public_id == public_id).cloned())
    }

    async fn list_by_stylist(&self, stylist_id: i64) -> DatabaseResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().filter(|b| b.stylist_id == stylist_id).cloned().collect())
    }

    async fn list_by_customer(&self, customer_id: i64) -> DatabaseResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().filter(|b| b.customer_id == customer_id).cloned().collect())
    }

    async fn update_status(
        &self,
        public_id: &str,
        current: BookingStatus,
        next: BookingStatus,
    ) -> DatabaseResult<Option<Booking>> {
        let mut bookings = self.bookings.write().await;
        let Some(booking) = bookings
            .iter_mut()
            .find(|b| b.public_id == public_id && b.status == current)
        else {
            return Ok(None);
        };
        booking.status = next;
        booking.updated_at = now();
        Ok(Some(booking.clone()))
    }
}

#[derive(Clone, Default)]
pub struct MockBlobRepository {
    blobs: Arc<RwLock<Vec<Blob>>>,
}

impl MockBlobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobRepo for MockBlobRepository {
    async fn create(&self, request: &NewBlob) -> DatabaseResult<Blob> {
        let mut blobs = self.blobs.write().await;
        let id = blobs.len() as i64 + 1;
        let blob = Blob {
            id,
            public_id: format!("blob_{id}"),
            blob_type: request.blob_type.clone(),
            file_name: request.file_name.clone(),
            user_id: request.user_id.clone(),
            created_at: now(),
        };
        blobs.push(blob.clone());
        Ok(blob)
    }

    async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Blob>> {
        let blobs = self.blobs.read().await;
        Ok(blobs.iter().find(|b| b.public_id == public_id).cloned())
    }

    async fn list_by_user(&self, user_public_id: &str) -> DatabaseResult<Vec<Blob>> {
        let blobs = self.blobs.read().await;
        Ok(blobs.iter().filter(|b| b.user_id == user_public_id).cloned().collect())
    }
}
