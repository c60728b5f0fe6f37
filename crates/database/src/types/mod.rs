//! Shared types and result types for the database layer

pub mod errors;

pub use errors::DatabaseError;

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Current time in the RFC 3339 form stored in `created_at` / `updated_at` columns.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339()
}
