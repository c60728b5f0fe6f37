//! Salon Database Crate
//!
//! Connection management, embedded migrations and one repository per entity
//! for the salon booking backend.

use salon_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod maintenance;
pub mod migrations;
pub mod repos;
pub mod types;

#[cfg(test)]
mod test_support;

pub use connection::{ping, prepare_database};
pub use maintenance::{clear_all, ClearedCounts};
pub use migrations::run_migrations;

pub use repos::{
    BlobRepository, BookingRepository, CustomerRepository, ShopRepository, StylistRepository,
};

pub use entities::{
    Blob, BlobDescriptor, Booking, BookingStatus, Customer, CustomerUpdate, NewBlob, NewBooking,
    NewCustomer, NewShop, NewStylist, ServiceOffer, ServiceType, Shop, ShopUpdate, Stylist,
    StylistQuery, StylistUpdate,
};

pub use types::{errors::DatabaseError, DatabaseResult};

pub use sqlx::SqlitePool;

/// Open the pool and bring the schema up to date.
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_initialize_database_migrates() {
        let temp_dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", temp_dir.path().join("init.db").display()),
            max_connections: 2,
        };

        let pool = initialize_database(&config).await.unwrap();
        assert!(ShopRepository::new(pool).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_database_reports_bad_url() {
        let config = DatabaseConfig {
            url: "postgres://nowhere".to_string(),
            max_connections: 1,
        };

        let err = initialize_database(&config).await.unwrap_err();
        assert!(matches!(err, DatabaseError::ConnectionError(_)));
    }
}
