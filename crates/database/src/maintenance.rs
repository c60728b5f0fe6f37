//! Administrative bulk operations used by the server's maintenance commands.

use crate::types::DatabaseResult;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::warn;

/// Number of rows removed per table by [`clear_all`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ClearedCounts {
    pub bookings: u64,
    pub blobs: u64,
    pub stylist_services: u64,
    pub stylists: u64,
    pub customers: u64,
    pub shops: u64,
}

impl ClearedCounts {
    pub fn total(&self) -> u64 {
        self.bookings + self.blobs + self.stylist_services + self.stylists + self.customers + self.shops
    }
}

/// Delete every row in dependency order inside one transaction.
pub async fn clear_all(pool: &SqlitePool) -> DatabaseResult<ClearedCounts> {
    let mut tx = pool.begin().await?;
    let mut counts = ClearedCounts::default();

    for (table, slot) in [
        ("bookings", &mut counts.bookings),
        ("blobs", &mut counts.blobs),
        ("stylist_services", &mut counts.stylist_services),
        ("stylists", &mut counts.stylists),
        ("customers", &mut counts.customers),
        ("shops", &mut counts.shops),
    ] {
        *slot = sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }

    tx.commit().await?;
    warn!(rows = counts.total(), "cleared all salon data");
    Ok(counts)
}
