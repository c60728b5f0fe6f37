//! Repository for blob metadata.

use crate::entities::{Blob, NewBlob};
use crate::types::{timestamp_now, DatabaseResult};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use tracing::info;

const BLOB_COLUMNS: &str = "id, public_id, blob_type, file_name, user_id, created_at";

/// Repository for blob database operations
#[derive(Clone)]
pub struct BlobRepository {
    pool: SqlitePool,
}

impl BlobRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &NewBlob) -> DatabaseResult<Blob> {
        let mut conn = self.pool.acquire().await?;
        insert_blob(&mut conn, request).await
    }

    pub async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Blob>> {
        let row = sqlx::query(&format!("SELECT {BLOB_COLUMNS} FROM blobs WHERE public_id = ?"))
            .bind(public_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(blob_from_row).transpose()
    }

    /// All blobs owned by a stylist or customer, oldest first.
    pub async fn list_by_user(&self, user_public_id: &str) -> DatabaseResult<Vec<Blob>> {
        let rows = sqlx::query(&format!(
            "SELECT {BLOB_COLUMNS} FROM blobs WHERE user_id = ? ORDER BY id ASC"
        ))
        .bind(user_public_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(blob_from_row).collect()
    }

    pub async fn list(&self) -> DatabaseResult<Vec<Blob>> {
        let rows = sqlx::query(&format!("SELECT {BLOB_COLUMNS} FROM blobs ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(blob_from_row).collect()
    }
}

/// Insert a blob row on an existing connection so callers can run it inside
/// their own transaction.
pub(crate) async fn insert_blob(conn: &mut SqliteConnection, request: &NewBlob) -> DatabaseResult<Blob> {
    let public_id = cuid2::cuid();
    let now = timestamp_now();

    let result = sqlx::query(
        "INSERT INTO blobs (public_id, blob_type, file_name, user_id, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&public_id)
    .bind(&request.blob_type)
    .bind(&request.file_name)
    .bind(&request.user_id)
    .bind(&now)
    .execute(&mut *conn)
    .await?;

    let id = result.last_insert_rowid();
    info!(blob_id = id, user_id = %request.user_id, file_name = %request.file_name, "created blob");

    Ok(Blob {
        id,
        public_id,
        blob_type: request.blob_type.clone(),
        file_name: request.file_name.clone(),
        user_id: request.user_id.clone(),
        created_at: now,
    })
}

fn blob_from_row(row: &SqliteRow) -> DatabaseResult<Blob> {
    Ok(Blob {
        id: row.try_get("id")?,
        public_id: row.try_get("public_id")?,
        blob_type: row.try_get("blob_type")?,
        file_name: row.try_get("file_name")?,
        user_id: row.try_get("user_id")?,
        created_at: row.try_get("created_at")?,
    })
}
