//! # Validation Module
//!
//! Input validation utilities for Kasir POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (axum)                                       │
//! │  ├── JSON shape (deserialization)                                      │
//! │  └── Path ids are integers                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Names present and bounded                                         │
//! │  ├── Prices, stock, quantities in range                                │
//! │  └── Report dates well-formed and ordered                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (price >= 0), CHECK (stock >= 0)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::validation::{validate_product_name, validate_quantity};
//!
//! validate_product_name("Indomie Godog").unwrap();
//! validate_quantity(3).unwrap();
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{CategoryInput, CheckoutRequest, ProductInput};
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Date format accepted by the report endpoint.
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// String Validators
// =============================================================================

fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - Maximum 200 characters
///
/// ## Example
/// ```rust
/// use kasir_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Vit 1000ml").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

/// Validates a category name. Same rules as product names.
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a checkout quantity.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  POST /api/checkout  {"items":[{"product_id":1,"quantity":0}]}          │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(0) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → 400 "quantity must be positive"                  │
/// │       │                                                                 │
/// │       └── OK → stock is checked inside the checkout transaction        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a product id supplied in a request body.
pub fn validate_product_id(id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "product_id".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
///
/// ## Example
/// ```rust
/// use kasir_core::validation::validate_price;
///
/// assert!(validate_price(3500).is_ok());
/// assert!(validate_price(0).is_ok());
/// assert!(validate_price(-100).is_err());
/// ```
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if price < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Request Validators
// =============================================================================

/// Validates a product create/update body.
pub fn validate_product_input(input: &ProductInput) -> ValidationResult<()> {
    validate_product_name(&input.name)?;
    validate_price(input.price)?;
    validate_stock(input.stock)?;
    Ok(())
}

/// Validates a category create/update body.
pub fn validate_category_input(input: &CategoryInput) -> ValidationResult<()> {
    validate_category_name(&input.name)
}

/// Validates a checkout request before any storage work starts.
///
/// ## Rules
/// - At least one item
/// - Every `product_id` > 0
/// - Every `quantity` > 0
///
/// Repeated product ids are allowed; they deduct cumulatively.
pub fn validate_checkout_request(req: &CheckoutRequest) -> ValidationResult<()> {
    if req.items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    for item in &req.items {
        validate_product_id(item.product_id)?;
        validate_quantity(item.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses a `YYYY-MM-DD` report date.
///
/// `field` names the query parameter in the error message.
///
/// ## Example
/// ```rust
/// use kasir_core::validation::parse_report_date;
///
/// assert!(parse_report_date("start_date", "2026-01-31").is_ok());
/// assert!(parse_report_date("start_date", "2026-02-30").is_err());
/// assert!(parse_report_date("end_date", "31/01/2026").is_err());
/// ```
pub fn parse_report_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), REPORT_DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            field: field.to_string(),
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
