//! Repository for booking data access operations.

use crate::entities::{Booking, BookingStatus, NewBooking};
use crate::types::{timestamp_now, DatabaseError, DatabaseResult};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;

const BOOKING_SELECT: &str = "SELECT b.id, b.public_id, b.customer_id, c.public_id AS customer_public_id, \
     b.stylist_id, s.public_id AS stylist_public_id, b.service_type, b.price, b.scheduled_at, b.status, \
     b.created_at, b.updated_at \
     FROM bookings b \
     JOIN customers c ON b.customer_id = c.id \
     JOIN stylists s ON b.stylist_id = s.id";

/// Repository for booking database operations
#[derive(Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a booking in `PENDING` state.
    pub async fn create(&self, request: &NewBooking) -> DatabaseResult<Booking> {
        let public_id = cuid2::cuid();
        let now = timestamp_now();

        let result = sqlx::query(
            "INSERT INTO bookings (public_id, customer_id, stylist_id, service_type, price, scheduled_at, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(request.customer_id)
        .bind(request.stylist_id)
        .bind(request.service_type.as_str())
        .bind(request.price)
        .bind(request.scheduled_at.to_rfc3339())
        .bind(BookingStatus::Pending.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        info!(
            booking_id = result.last_insert_rowid(),
            public_id = %public_id,
            stylist_id = request.stylist_id,
            customer_id = request.customer_id,
            service_type = %request.service_type,
            "created booking"
        );

        self.find_by_public_id(&public_id).await?.ok_or_else(|| {
            DatabaseError::Corrupt(format!("booking {public_id} vanished after insert"))
        })
    }

    pub async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Booking>> {
        let row = sqlx::query(&format!("{BOOKING_SELECT} WHERE b.public_id = ?"))
            .bind(public_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(booking_from_row).transpose()
    }

    pub async fn list_by_stylist(&self, stylist_id: i64) -> DatabaseResult<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            "{BOOKING_SELECT} WHERE b.stylist_id = ? ORDER BY b.scheduled_at ASC, b.id ASC"
        ))
        .bind(stylist_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(booking_from_row).collect()
    }

    pub async fn list_by_customer(&self, customer_id: i64) -> DatabaseResult<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            "{BOOKING_SELECT} WHERE b.customer_id = ? ORDER BY b.scheduled_at ASC, b.id ASC"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(booking_from_row).collect()
    }

    pub async fn list(&self) -> DatabaseResult<Vec<Booking>> {
        let rows = sqlx::query(&format!("{BOOKING_SELECT} ORDER BY b.id ASC"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(booking_from_row).collect()
    }

    /// Move a booking from `current` to `next`. Returns `None` when no booking
    /// with that id is in `current` any more.
    pub async fn update_status(
        &self,
        public_id: &str,
        current: BookingStatus,
        next: BookingStatus,
    ) -> DatabaseResult<Option<Booking>> {
        let result = sqlx::query(
            "UPDATE bookings SET status = ?, updated_at = ? WHERE public_id = ? AND status = ?",
        )
        .bind(next.as_str())
        .bind(timestamp_now())
        .bind(public_id)
        .bind(current.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        info!(public_id = %public_id, from = %current, to = %next, "updated booking status");
        self.find_by_public_id(public_id).await
    }
}

fn booking_from_row(row: &SqliteRow) -> DatabaseResult<Booking> {
    let service_type: String = row.try_get("service_type")?;
    let status: String = row.try_get("status")?;
    let scheduled_at: String = row.try_get("scheduled_at")?;

    Ok(Booking {
        id: row.try_get("id")?,
        public_id: row.try_get("public_id")?,
        customer_id: row.try_get("customer_id")?,
        customer_public_id: row.try_get("customer_public_id")?,
        stylist_id: row.try_get("stylist_id")?,
        stylist_public_id: row.try_get("stylist_public_id")?,
        service_type: service_type.parse().map_err(DatabaseError::Corrupt)?,
        price: row.try_get("price")?,
        scheduled_at: DateTime::parse_from_rfc3339(&scheduled_at)
            .map(|value| value.with_timezone(&Utc))
            .map_err(|e| DatabaseError::Corrupt(format!("invalid scheduled_at '{scheduled_at}': {e}")))?,
        status: status.parse().map_err(DatabaseError::Corrupt)?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
