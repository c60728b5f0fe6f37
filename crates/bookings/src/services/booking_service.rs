//! Booking service: creating appointments and moving them through their lifecycle.

use salon_database::{
    Booking, BookingRepository, BookingStatus, CustomerRepository, DatabaseResult, NewBooking,
    StylistRepository,
};
use tracing::info;

use super::customer_service::CustomerRepo;
use super::stylist_service::StylistRepo;
use crate::types::{CreateBookingRequest, SalonError, SalonResult};

/// Service for managing bookings
pub struct BookingService<B = BookingRepository, S = StylistRepository, C = CustomerRepository> {
    repository: B,
    stylists: S,
    customers: C,
}

impl<B, S, C> BookingService<B, S, C>
where
    B: BookingRepo,
    S: StylistRepo,
    C: CustomerRepo,
{
    pub fn new(repository: B, stylists: S, customers: C) -> Self {
        Self {
            repository,
            stylists,
            customers,
        }
    }

    /// Book a stylist's service for a customer. The price is taken from the
    /// stylist's current offer and the booking starts out `PENDING`.
    pub async fn create_booking(&self, request: CreateBookingRequest) -> SalonResult<Booking> {
        let customer = self
            .customers
            .find_by_public_id(&request.customer_id)
            .await?
            .ok_or_else(|| SalonError::not_found("customer", &request.customer_id))?;

        let stylist = self
            .stylists
            .find_by_public_id(&request.stylist_id)
            .await?
            .ok_or_else(|| SalonError::not_found("stylist", &request.stylist_id))?;

        let offer = stylist.offer_for(request.service_type).ok_or_else(|| {
            SalonError::validation(format!(
                "stylist {} does not offer {}",
                stylist.public_id,
                request.service_type.label()
            ))
        })?;

        let booking = self
            .repository
            .create(&NewBooking {
                customer_id: customer.id,
                stylist_id: stylist.id,
                service_type: request.service_type,
                price: offer.price,
                scheduled_at: request.scheduled_at,
            })
            .await?;

        info!(
            booking_id = %booking.public_id,
            stylist_id = %stylist.public_id,
            customer_id = %customer.public_id,
            service_type = %booking.service_type,
            "booking created"
        );
        Ok(booking)
    }

    pub async fn get_booking(&self, public_id: &str) -> SalonResult<Booking> {
        self.repository
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(|| SalonError::not_found("booking", public_id))
    }

    pub async fn list_for_stylist(&self, stylist_public_id: &str) -> SalonResult<Vec<Booking>> {
        let stylist = self
            .stylists
            .find_by_public_id(stylist_public_id)
            .await?
            .ok_or_else(|| SalonError::not_found("stylist", stylist_public_id))?;

        Ok(self.repository.list_by_stylist(stylist.id).await?)
    }

    pub async fn list_for_customer(&self, customer_public_id: &str) -> SalonResult<Vec<Booking>> {
        let customer = self
            .customers
            .find_by_public_id(customer_public_id)
            .await?
            .ok_or_else(|| SalonError::not_found("customer", customer_public_id))?;

        Ok(self.repository.list_by_customer(customer.id).await?)
    }

    pub async fn update_status(&self, public_id: &str, next: BookingStatus) -> SalonResult<Booking> {
        let booking = self.get_booking(public_id).await?;

        if booking.status.is_final() {
            return Err(SalonError::validation(format!(
                "booking is already {}",
                booking.status
            )));
        }

        if !booking.status.can_transition_to(next) {
            return Err(SalonError::validation(format!(
                "cannot change booking status from {} to {}",
                booking.status, next
            )));
        }

        let updated = self
            .repository
            .update_status(public_id, booking.status, next)
            .await?
            .ok_or_else(|| {
                SalonError::conflict(format!("booking {public_id} was changed by another request"))
            })?;

        info!(booking_id = %public_id, from = %booking.status, to = %next, "booking status changed");
        Ok(updated)
    }
}

/// Storage operations the booking service needs.
#[allow(async_fn_in_trait)]
pub trait BookingRepo {
    async fn create(&self, request: &NewBooking) -> DatabaseResult<Booking>;
    async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Booking>>;
    async fn list_by_stylist(&self, stylist_id: i64) -> DatabaseResult<Vec<Booking>>;
    async fn list_by_customer(&self, customer_id: i64) -> DatabaseResult<Vec<Booking>>;
    async fn update_status(
        &self,
        public_id: &str,
        current: BookingStatus,
        next: BookingStatus,
    ) -> DatabaseResult<Option<Booking>>;
}

impl BookingRepo for BookingRepository {
    async fn create(&self, request: &NewBooking) -> DatabaseResult<Booking> {
        self.create(request).await
    }

    async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Booking>> {
        self.find_by_public_id(public_id).await
    }

    async fn list_by_stylist(&self, stylist_id: i64) -> DatabaseResult<Vec<Booking>> {
        self.list_by_stylist(stylist_id).await
    }

    async fn list_by_customer(&self, customer_id: i64) -> DatabaseResult<Vec<Booking>> {
        self.list_by_customer(customer_id).await
    }

    async fn update_status(
        &self,
        public_id: &str,
        current: BookingStatus,
        next: BookingStatus,
    ) -> DatabaseResult<Option<Booking>> {
        self.update_status(public_id, current, next).await
    }
}
