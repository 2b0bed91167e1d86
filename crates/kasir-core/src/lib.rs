//! # kasir-core: Pure Business Logic for Kasir POS
//!
//! This crate is the **heart** of Kasir POS. It contains the domain types
//! and business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    REST API (apps/api, axum)                    │   │
//! │  │    /api/products ─ /api/categories ─ /api/checkout ─ /report    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  report   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  Window   │  │   rules   │  │   │
//! │  │   │Transaction│  │ subtotals │  │ today/day │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasir-db (Database Layer)                    │   │
//! │  │        SQLite queries, migrations, checkout ledger              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, Transaction, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation at the API boundary
//! - [`report`] - Reporting windows (today, inclusive date ranges)
//! - [`checkout`] - Running subtotal/total of a checkout in progress
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::money::Money;
//!
//! // Indomie Godog at Rp3.500, three packs
//! let price = Money::new(3500);
//! let subtotal = price.checked_multiply_quantity(3).unwrap();
//!
//! assert_eq!(subtotal.amount(), 10500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kasir_core::Money` instead of
// `use kasir_core::money::Money`

pub use checkout::{CheckoutTally, PendingLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use report::ReportWindow;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of entries in the top-sellers list of a sales summary.
pub const TOP_PRODUCTS_LIMIT: u32 = 5;

/// Maximum length of product and category names.
pub const MAX_NAME_LENGTH: usize = 200;
