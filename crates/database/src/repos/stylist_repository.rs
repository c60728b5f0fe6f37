//! Repository for stylists and their ordered service lists.

use crate::entities::{
    Blob, BlobDescriptor, NewStylist, ServiceOffer, Stylist, StylistQuery, StylistUpdate,
};
use crate::repos::blob_repository::insert_blob;
use crate::types::{timestamp_now, DatabaseError, DatabaseResult};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};
use tracing::info;

const STYLIST_SELECT: &str = "SELECT s.id, s.public_id, s.first_name, s.last_name, s.description, s.icon_path, \
     s.email, s.password_hash, s.shop_id, sh.public_id AS shop_public_id, s.created_at, s.updated_at \
     FROM stylists s LEFT JOIN shops sh ON s.shop_id = sh.id";

/// Repository for stylist database operations
#[derive(Clone)]
pub struct StylistRepository {
    pool: SqlitePool,
}

impl StylistRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &NewStylist) -> DatabaseResult<Stylist> {
        let (stylist, _) = self.create_with_icon(request, None).await?;
        Ok(stylist)
    }

    /// Insert the stylist, its services and optionally an owned blob in one
    /// transaction. Either everything is stored or nothing is.
    pub async fn create_with_icon(
        &self,
        request: &NewStylist,
        icon: Option<&BlobDescriptor>,
    ) -> DatabaseResult<(Stylist, Option<Blob>)> {
        let public_id = cuid2::cuid();
        let now = timestamp_now();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO stylists (public_id, first_name, last_name, description, icon_path, email, password_hash, shop_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.description)
        .bind(&request.icon_path)
        .bind(&request.email)
        .bind(&request.password_hash)
        .bind(request.shop_id)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        let stylist_id = result.last_insert_rowid();
        insert_services(&mut tx, stylist_id, &request.services).await?;

        let blob = match icon {
            Some(descriptor) => Some(insert_blob(&mut tx, &descriptor.owned_by(&public_id)).await?),
            None => None,
        };

        tx.commit().await?;

        info!(
            stylist_id = stylist_id,
            public_id = %public_id,
            services = request.services.len(),
            with_icon = blob.is_some(),
            "created stylist"
        );

        let stylist = self.find_by_public_id(&public_id).await?.ok_or_else(|| {
            DatabaseError::Corrupt(format!("stylist {public_id} vanished after insert"))
        })?;
        Ok((stylist, blob))
    }

    pub async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Stylist>> {
        let row = sqlx::query(&format!("{STYLIST_SELECT} WHERE s.public_id = ?"))
            .bind(public_id)
            .fetch_optional(&self.pool)
            .await?;

        match row.as_ref().map(stylist_from_row).transpose()? {
            Some(stylist) => Ok(Some(self.with_services(stylist).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Stylist>> {
        let row = sqlx::query(&format!("{STYLIST_SELECT} WHERE s.email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        match row.as_ref().map(stylist_from_row).transpose()? {
            Some(stylist) => Ok(Some(self.with_services(stylist).await?)),
            None => Ok(None),
        }
    }

    /// List stylists matching every filter that is set, oldest first.
    pub async fn list(&self, query: &StylistQuery) -> DatabaseResult<Vec<Stylist>> {
        let mut builder = QueryBuilder::<Sqlite>::new(STYLIST_SELECT);
        builder.push(" WHERE 1 = 1");

        if let Some(shop_id) = query.shop_id {
            builder.push(" AND s.shop_id = ").push_bind(shop_id);
        }
        if let Some(service_type) = query.service_type {
            builder
                .push(" AND EXISTS (SELECT 1 FROM stylist_services ss WHERE ss.stylist_id = s.id AND ss.service_type = ")
                .push_bind(service_type.as_str())
                .push(")");
        }
        builder.push(" ORDER BY s.id ASC");

        let rows = builder.build().fetch_all(&self.pool).await?;
        let bare = rows
            .iter()
            .map(stylist_from_row)
            .collect::<DatabaseResult<Vec<_>>>()?;

        let mut stylists = Vec::with_capacity(bare.len());
        for stylist in bare {
            stylists.push(self.with_services(stylist).await?);
        }
        Ok(stylists)
    }

    /// Apply a partial update. A present `services` list replaces the stored
    /// one. Returns `None` when the stylist does not exist.
    pub async fn update(&self, public_id: &str, update: &StylistUpdate) -> DatabaseResult<Option<Stylist>> {
        let mut tx = self.pool.begin().await?;

        let stylist_id: Option<i64> = sqlx::query_scalar("SELECT id FROM stylists WHERE public_id = ?")
            .bind(public_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(stylist_id) = stylist_id else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE stylists SET first_name = COALESCE(?, first_name), last_name = COALESCE(?, last_name),
                 description = COALESCE(?, description), icon_path = COALESCE(?, icon_path),
                 shop_id = COALESCE(?, shop_id), updated_at = ?
             WHERE id = ?",
        )
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.description)
        .bind(&update.icon_path)
        .bind(update.shop_id)
        .bind(timestamp_now())
        .bind(stylist_id)
        .execute(&mut *tx)
        .await?;

        if let Some(services) = &update.services {
            sqlx::query("DELETE FROM stylist_services WHERE stylist_id = ?")
                .bind(stylist_id)
                .execute(&mut *tx)
                .await?;
            insert_services(&mut tx, stylist_id, services).await?;
        }

        tx.commit().await?;
        info!(public_id = %public_id, "updated stylist");

        self.find_by_public_id(public_id).await
    }

    async fn with_services(&self, mut stylist: Stylist) -> DatabaseResult<Stylist> {
        let rows = sqlx::query(
            "SELECT service_type, price FROM stylist_services WHERE stylist_id = ? ORDER BY position ASC",
        )
        .bind(stylist.id)
        .fetch_all(&self.pool)
        .await?;

        stylist.services = rows.iter().map(offer_from_row).collect::<DatabaseResult<_>>()?;
        Ok(stylist)
    }
}

async fn insert_services(
    conn: &mut SqliteConnection,
    stylist_id: i64,
    services: &[ServiceOffer],
) -> DatabaseResult<()> {
    for (position, offer) in services.iter().enumerate() {
        sqlx::query(
            "INSERT INTO stylist_services (stylist_id, position, service_type, price) VALUES (?, ?, ?, ?)",
        )
        .bind(stylist_id)
        .bind(position as i64)
        .bind(offer.service_type.as_str())
        .bind(offer.price)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

fn stylist_from_row(row: &SqliteRow) -> DatabaseResult<Stylist> {
    Ok(Stylist {
        id: row.try_get("id")?,
        public_id: row.try_get("public_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        description: row.try_get("description")?,
        icon_path: row.try_get("icon_path")?,
        services: Vec::new(),
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        shop_id: row.try_get("shop_id")?,
        shop_public_id: row.try_get("shop_public_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn offer_from_row(row: &SqliteRow) -> DatabaseResult<ServiceOffer> {
    let service_type: String = row.try_get("service_type")?;
    Ok(ServiceOffer {
        service_type: service_type.parse().map_err(DatabaseError::Corrupt)?,
        price: row.try_get("price")?,
    })
}
