//! # Repository Module
//!
//! Database repository implementations for Kasir POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  state.db.products().get_by_id(3)                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list / list_with_category                                         │
//! │  ├── get_by_id / get_by_id_with_category                               │
//! │  ├── create / update / delete                                          │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and category joins
//! - [`TransactionRepository`](transaction::TransactionRepository) - Checkout ledger
//! - [`ReportRepository`](report::ReportRepository) - Sales summaries

use chrono::{DateTime, SecondsFormat, Utc};

pub mod category;
pub mod product;
pub mod report;
pub mod transaction;

/// Formats an instant the way `created_at` columns store it
/// (`2026-03-10T08:15:30.123Z`), so text comparison in SQL is
/// chronological.
pub fn storage_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
