//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer smallest-unit amounts                            │
//! │    Prices are whole rupiah stored as i64                                │
//! │    3500 × 3 = 10500, exactly, every time                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::money::Money;
//!
//! let price = Money::new(3500);
//! let total = price.checked_add(Money::new(3000)).unwrap();
//! assert_eq!(total.amount(), 6500);
//!
//! // Line subtotals never wrap around silently
//! assert!(Money::new(i64::MAX).checked_multiply_quantity(2).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (whole rupiah).
///
/// ## Design Decisions
/// - **i64 (signed)**: Same width as the SQLite INTEGER columns
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Checked multiplication**: a subtotal that overflows is a rejected
///   checkout, not a corrupted ledger row
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► price × quantity ──► TransactionDetail.subtotal
///                                              │
///                                              ▼
///                                   Σ subtotal = Transaction.total_amount
///                                              │
///                                              ▼
///                                   Σ total_amount = SalesSummary.total_revenue
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from an amount in the smallest currency unit.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let price = Money::new(12000); // Rp12.000
    /// assert_eq!(price.amount(), 12000);
    /// ```
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies a unit price by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let unit_price = Money::new(3500);
    /// let subtotal = unit_price.checked_multiply_quantity(3).unwrap();
    /// assert_eq!(subtotal.amount(), 10500);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(amount) => Some(Money(amount)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(amount) => Some(Money(amount)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows rupiah with dot thousands separators, e.g. `Rp10.500`.
///
/// ## Note
/// This is for logs and debugging. API responses carry plain integers.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        write!(f, "{}Rp{}", sign, grouped)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Money(amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
