//! Temporary databases for repository tests.

use crate::{connection::prepare_database, migrations::run_migrations};
use salon_config::DatabaseConfig;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// A migrated pool backed by a file in a fresh temporary directory. Keep the
/// `TempDir` alive for as long as the pool is used.
pub async fn create_test_pool() -> (SqlitePool, TempDir) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config = DatabaseConfig {
        url: format!("sqlite://{}", temp_dir.path().join("test.db").display()),
        max_connections: 1,
    };

    let pool = prepare_database(&config).await.expect("open test database");
    run_migrations(&pool).await.expect("migrate test database");
    (pool, temp_dir)
}
