//! Repository for customer data access operations.

use crate::entities::{Customer, CustomerUpdate, NewCustomer};
use crate::types::{timestamp_now, DatabaseResult};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;

const CUSTOMER_COLUMNS: &str =
    "id, public_id, email, password_hash, first_name, last_name, phone, created_at, updated_at";

/// Repository for customer database operations
#[derive(Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &NewCustomer) -> DatabaseResult<Customer> {
        let public_id = cuid2::cuid();
        let now = timestamp_now();

        let result = sqlx::query(
            "INSERT INTO customers (public_id, email, password_hash, first_name, last_name, phone, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(&request.email)
        .bind(&request.password_hash)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.phone)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(customer_id = id, public_id = %public_id, "created customer");

        Ok(Customer {
            id,
            public_id,
            email: request.email.clone(),
            password_hash: request.password_hash.clone(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            phone: request.phone.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub async fn find_by_public_id(&self, public_id: &str) -> DatabaseResult<Option<Customer>> {
        let row = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE public_id = ?"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(customer_from_row).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Customer>> {
        let row = sqlx::query(&format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(customer_from_row).transpose()
    }

    pub async fn list(&self) -> DatabaseResult<Vec<Customer>> {
        let rows = sqlx::query(&format!("SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(customer_from_row).collect()
    }

    /// Apply a partial update. Returns `None` when the customer does not exist.
    pub async fn update(&self, public_id: &str, update: &CustomerUpdate) -> DatabaseResult<Option<Customer>> {
        let result = sqlx::query(
            "UPDATE customers SET first_name = COALESCE(?, first_name), last_name = COALESCE(?, last_name),
                 phone = COALESCE(?, phone), updated_at = ?
             WHERE public_id = ?",
        )
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.phone)
        .bind(timestamp_now())
        .bind(public_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        info!(public_id = %public_id, "updated customer");
        self.find_by_public_id(public_id).await
    }
}

fn customer_from_row(row: &SqliteRow) -> DatabaseResult<Customer> {
    Ok(Customer {
        id: row.try_get("id")?,
        public_id: row.try_get("public_id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        phone: row.try_get("phone")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
