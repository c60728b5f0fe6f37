//! Repository for shop data access operations.

use crate::entities::{NewShop, Shop, ShopUpdate};
use crate::types::{timestamp_now, DatabaseResult};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;

const SHOP_COLUMNS: &str = "id, public_id, name, address, created_at, updated_at";

/// Repository for shop database operations
#[derive(Clone)]
pub struct ShopRepository {
    pool: SqlitePool,
}

impl ShopRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &NewShop) -> DatabaseResult<Shop> {
        let public_id = cuid2::cuid();
        let now = timestamp_now();

        let result = sqlx::query(
            "INSERT INTO shops (public_id, name, address, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(&request.name)
        .bind(&request.address)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(shop_id = id, public_id = %public_id, "created shop");

        Ok(Shop {
            id,
            public_id,
            name: request.name.clone(),
            address: request.address.clone(),
            stylist_ids: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Shop>> {
        let row = sqlx::query(&format!("SELECT {SHOP_COLUMNS} FROM shops WHERE public_id = ?"))
            .bind(public_id)
            .fetch_optional(&self.pool)
            .await?;

        match row.as_ref().map(shop_from_row).transpose()? {
            Some(shop) => Ok(Some(self.with_stylists(shop).await?)),
            None => Ok(None),
        }
    }

    /// Resolve a public id to the internal key without loading the stylist list.
    pub async fn find_id_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<i64>> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM shops WHERE public_id = ?")
            .bind(public_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    pub async fn list(&self) -> DatabaseResult<Vec<Shop>> {
        let rows = sqlx::query(&format!("SELECT {SHOP_COLUMNS} FROM shops ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await?;

        let bare = rows.iter().map(shop_from_row).collect::<DatabaseResult<Vec<_>>>()?;

        let mut shops = Vec::with_capacity(bare.len());
        for shop in bare {
            shops.push(self.with_stylists(shop).await?);
        }
        Ok(shops)
    }

    /// Apply a partial update. Returns `None` when the shop does not exist.
    pub async fn update(&self, public_id: &str, update: &ShopUpdate) -> DatabaseResult<Option<Shop>> {
        let result = sqlx::query(
            "UPDATE shops SET name = COALESCE(?, name), address = COALESCE(?, address), updated_at = ? WHERE public_id = ?",
        )
        .bind(&update.name)
        .bind(&update.address)
        .bind(timestamp_now())
        .bind(public_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        info!(public_id = %public_id, "updated shop");
        self.find_by_public_id(public_id).await
    }

    async fn with_stylists(&self, mut shop: Shop) -> DatabaseResult<Shop> {
        shop.stylist_ids = sqlx::query_scalar("SELECT public_id FROM stylists WHERE shop_id = ? ORDER BY id ASC")
            .bind(shop.id)
            .fetch_all(&self.pool)
            .await?;
        Ok(shop)
    }
}

fn shop_from_row(row: &SqliteRow) -> DatabaseResult<Shop> {
    Ok(Shop {
        id: row.try_get("id")?,
        public_id: row.try_get("public_id")?,
        name: row.try_get("name")?,
        address: row.try_get("address")?,
        stylist_ids: Vec::new(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
