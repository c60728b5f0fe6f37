use anyhow::Result;
use salon_bookings::SalonServices;
use salon_config::AppConfig;
use salon_database::{prepare_database, run_migrations};
use sqlx::SqlitePool;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    /// Directives used when `RUST_LOG` is unset.
    pub const DEFAULT_FILTER: &str = "info,sqlx=warn";

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::DEBUG)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// The migrated pool and the services built on it.
#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub services: SalonServices,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = prepare_database(&config.database).await?;
        run_migrations(&db_pool).await?;

        let services = SalonServices::from_pool(db_pool.clone());
        info!(url = %config.database.url, "backend services ready");

        Ok(Self { db_pool, services })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}

