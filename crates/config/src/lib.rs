use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "salon.toml",
    "config/salon.toml",
    "crates/config/salon.toml",
    "../salon.toml",
    "../config/salon.toml",
    "backend/salon.toml",
    "backend/config/salon.toml",
];

/// Plain environment variables that take precedence over every other source.
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const CONNECTION_STRING_ENV: &str = "DATABASE_CONNECTION_STRING";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "localhost".to_string(),
            port: 8000,
        }
    }
}

impl HttpConfig {
    /// The `host:port` pair the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

/// Connection settings for the backing store.
///
/// ```
/// use salon_config::DatabaseConfig;
///
/// let database = DatabaseConfig::default();
/// assert_eq!(database.url, "sqlite://booking-system.db");
/// assert_eq!(database.max_connections, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://booking-system.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// Precedence, lowest first: built-in defaults, the config file (`SALON_CONFIG` or the
/// first match in the search list), `SALON__*` variables, then `HOST`, `PORT` and
/// `DATABASE_CONNECTION_STRING`.
///
/// ```
/// use salon_config::load;
///
/// std::env::remove_var("SALON_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?;

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("SALON_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via SALON_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(config::Environment::with_prefix("SALON").separator("__"));

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    apply_plain_overrides(&mut config)?;

    debug!(?config, "loaded backend configuration");
    Ok(config)
}

fn apply_plain_overrides(config: &mut AppConfig) -> anyhow::Result<()> {
    if let Some(host) = non_empty_var(HOST_ENV) {
        config.http.address = host;
    }

    if let Some(port) = non_empty_var(PORT_ENV) {
        config.http.port = port
            .parse()
            .with_context(|| format!("invalid configuration: {PORT_ENV}={port} is not a port"))?;
    }

    if let Some(url) = non_empty_var(CONNECTION_STRING_ENV) {
        config.database.url = url;
    }

    Ok(())
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
