//! # Kasir API
//!
//! REST server for the Kasir POS backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Kasir API Routes                                │
//! │                                                                         │
//! │  ┌────────────────────┐  ┌────────────────────┐  ┌──────────────────┐  │
//! │  │  /api/categories   │  │  /api/products     │  │  /api/checkout   │  │
//! │  │                    │  │                    │  │                  │  │
//! │  │ • list / create    │  │ • list / create    │  │ • POST (201)     │  │
//! │  │ • get/put/delete   │  │ • get/put/delete   │  │                  │  │
//! │  │ • {id}/products    │  │ • ?include_category│  │                  │  │
//! │  └────────────────────┘  └────────────────────┘  └──────────────────┘  │
//! │                                                                         │
//! │  ┌────────────────────┐  ┌────────────────────┐                        │
//! │  │  /api/report/today │  │  /health           │                        │
//! │  │ • ?start_date      │  │ • DB ping          │                        │
//! │  │   &end_date        │  │                    │                        │
//! │  └────────────────────┘  └────────────────────┘                        │
//! │                                                                         │
//! │                    AppState { db: Database }                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (see [`config`]):
//! - `DB_CONN` - SQLite database path (required)
//! - `PORT` - HTTP port (default: 8080)
//! - `BIND_ADDR` - Interface (default: 0.0.0.0)
//! - `DB_MAX_CONNECTIONS`, `DB_BUSY_TIMEOUT_MS`, `DB_RUN_MIGRATIONS`

pub mod config;
pub mod error;
pub mod routes;

use axum::Router;
use kasir_db::Database;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};

/// Shared application state.
///
/// Cloned into every handler; the clone shares the same connection pool.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

/// Builds the full router over the given database.
pub fn build_router(db: Database) -> Router {
    routes::router().with_state(AppState::new(db))
}
