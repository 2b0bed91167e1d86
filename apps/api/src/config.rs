//! API server configuration module.
//!
//! Configuration is loaded from environment variables, after an optional
//! `.env` file in the working directory, with fallback to defaults.
//!
//! | Variable             | Default   | Notes                            |
//! |----------------------|-----------|----------------------------------|
//! | `PORT`               | `8080`    |                                  |
//! | `BIND_ADDR`          | `0.0.0.0` |                                  |
//! | `DB_CONN`            | required  | SQLite file path or `sqlite:` URL |
//! | `DB_MAX_CONNECTIONS` | `5`       |                                  |
//! | `DB_BUSY_TIMEOUT_MS` | `5000`    | wait for another writer's lock   |
//! | `DB_RUN_MIGRATIONS`  | `true`    |                                  |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use kasir_db::DbConfig;
use serde::Serialize;
use tracing::{info, warn};

/// API server configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    /// HTTP port
    pub port: u16,

    /// Interface to bind
    pub bind_addr: String,

    /// SQLite database path
    pub db_conn: String,

    /// Pool size
    pub db_max_connections: u32,

    /// SQLite busy timeout in milliseconds
    pub db_busy_timeout_ms: u64,

    /// Apply pending migrations at startup
    pub db_run_migrations: bool,
}

impl ApiConfig {
    /// Load configuration from `.env` (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => info!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => warn!("No .env file found, using environment only"),
            Err(e) => warn!(error = %e, "Failed to read .env file, using environment only"),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_conn = lookup("DB_CONN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingRequired("DB_CONN".to_string()))?;

        Ok(ApiConfig {
            port: parse_or(&lookup, "PORT", 8080)?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            db_conn: strip_sqlite_scheme(&db_conn).to_string(),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            db_busy_timeout_ms: parse_or(&lookup, "DB_BUSY_TIMEOUT_MS", 5000)?,
            db_run_migrations: parse_or(&lookup, "DB_RUN_MIGRATIONS", true)?,
        })
    }

    /// `host:port` to bind the listener to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        let base = if self.db_conn == ":memory:" {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.db_conn).max_connections(self.db_max_connections)
        };

        base.busy_timeout(Duration::from_millis(self.db_busy_timeout_ms))
            .run_migrations(self.db_run_migrations)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

fn strip_sqlite_scheme(conn: &str) -> &str {
    conn.strip_prefix("sqlite://")
        .or_else(|| conn.strip_prefix("sqlite:"))
        .unwrap_or(conn)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
