//! # Domain Types
//!
//! Core domain types used throughout Kasir POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Category     │◄ ─│    Product      │   │    Transaction      │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  id             │   │  id                 │   │
//! │  │  name           │   │  name           │   │  total_amount       │   │
//! │  │  description    │   │  price, stock   │   │  created_at         │   │
//! │  └─────────────────┘   │  category_id?   │   │  details ──────┐    │   │
//! │         weak ref ─ ─ ─ └─────────────────┘   └────────────────┼────┘   │
//! │                                                               ▼        │
//! │                                          ┌─────────────────────────┐   │
//! │                                          │   TransactionDetail     │   │
//! │                                          │  product_id, quantity   │   │
//! │                                          │  product_name (frozen)  │   │
//! │                                          │  subtotal (frozen)      │   │
//! │                                          └─────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity is identified by a storage-assigned integer id. The
//! category reference on a product is weak: it may be null or dangle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Request body for creating or replacing a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Storage-assigned identifier.
    pub id: i64,

    /// Display name, also frozen into line items at sale time.
    pub name: String,

    /// Unit price in the smallest currency unit.
    pub price: i64,

    /// Units on hand. Never negative.
    pub stock: i64,

    /// Optional, unenforced reference to a category.
    pub category_id: Option<i64>,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::new(self.price)
    }
}

/// A product read together with its category.
///
/// `category` is `null` when the product has no category or the referenced
/// category no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
}

/// Request body for creating or replacing a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
}

// =============================================================================
// Transaction
// =============================================================================

/// A committed sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    pub id: i64,
    pub total_amount: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Line items in request order.
    pub details: Vec<TransactionDetail>,
}

/// A line item in a transaction.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TransactionDetail {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// Unit price at time of sale × quantity (frozen).
    pub subtotal: i64,
}

// =============================================================================
// Checkout Request
// =============================================================================

/// One requested line of a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutItem {
    #[serde(default)]
    pub product_id: i64,
    #[serde(default)]
    pub quantity: i64,
}

/// Checkout request body. Transient, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
}

// =============================================================================
// Reporting
// =============================================================================

/// Aggregated sales for a reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesSummary {
    pub total_revenue: i64,
    pub total_transactions: i64,
    /// Best sellers by units, never null (empty list when nothing sold).
    pub top_products: Vec<TopProduct>,
}

impl SalesSummary {
    /// Summary of a window with no transactions.
    pub fn empty() -> Self {
        SalesSummary {
            total_revenue: 0,
            total_transactions: 0,
            top_products: Vec::new(),
        }
    }
}

/// A product and the number of units it sold in a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TopProduct {
    pub product_id: i64,
    pub product_name: String,
    pub total_sold: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn indomie() -> Product {
        Product {
            id: 1,
            name: "Indomie Godog".to_string(),
            price: 3500,
            stock: 10,
            category_id: Some(1),
        }
    }

    #[test]
    fn test_product_unit_price() {
        assert_eq!(indomie().unit_price(), Money::new(3500));
    }

    #[test]
    fn test_product_with_category_serializes_flat() {
        let joined = ProductWithCategory {
            product: indomie(),
            category: None,
        };
        let json = serde_json::to_value(&joined).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Indomie Godog");
        assert_eq!(json["category_id"], 1);
        // The key is present and null, not omitted
        assert!(json.as_object().unwrap().contains_key("category"));
        assert!(json["category"].is_null());
    }

    #[test]
    fn test_checkout_request_missing_items_is_empty() {
        let req: CheckoutRequest = serde_json::from_str("{}").unwrap();
        assert!(req.items.is_empty());
    }

    #[test]
    fn test_empty_summary_serializes_empty_list() {
        let json = serde_json::to_value(SalesSummary::empty()).unwrap();
        assert_eq!(json["total_revenue"], 0);
        assert_eq!(json["total_transactions"], 0);
        assert_eq!(json["top_products"], serde_json::json!([]));
    }
}
