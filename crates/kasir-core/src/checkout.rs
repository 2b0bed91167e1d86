//! # Checkout Tally
//!
//! Pure accumulation of checkout lines. The database layer performs the
//! guarded stock decrement and feeds each priced line in here; this module
//! owns subtotal and total arithmetic.
//!
//! ## Flow
//! ```text
//! for item in request.items:               (request order)
//!     UPDATE stock ... RETURNING name, price   ← kasir-db
//!     tally.record(item, name, price)          ← THIS MODULE
//!
//! tally.total()  → Transaction.total_amount
//! tally.lines()  → one TransactionDetail each, same order
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// A line item snapshot taken while the checkout is in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLine {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub subtotal: Money,
}

/// Running state of a checkout.
#[derive(Debug, Clone, Default)]
pub struct CheckoutTally {
    lines: Vec<PendingLine>,
    total: Money,
}

impl CheckoutTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        CheckoutTally {
            lines: Vec::with_capacity(capacity),
            total: Money::zero(),
        }
    }

    /// Prices one line, adds it to the running total and returns its
    /// subtotal.
    ///
    /// ## Errors
    /// `CoreError::AmountOverflow` if the subtotal or the new total does not
    /// fit in an i64. The tally is left unchanged in that case.
    pub fn record(
        &mut self,
        product_id: i64,
        product_name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> CoreResult<Money> {
        let subtotal = unit_price
            .checked_multiply_quantity(quantity)
            .ok_or(CoreError::AmountOverflow { product_id })?;
        let total = self
            .total
            .checked_add(subtotal)
            .ok_or(CoreError::AmountOverflow { product_id })?;

        self.total = total;
        self.lines.push(PendingLine {
            product_id,
            product_name: product_name.into(),
            quantity,
            subtotal,
        });

        Ok(subtotal)
    }

    #[inline]
    pub fn total(&self) -> Money {
        self.total
    }

    #[inline]
    pub fn lines(&self) -> &[PendingLine] {
        &self.lines
    }
}
