//! # Transaction Repository (Checkout Ledger)
//!
//! Turns a checkout request into one committed sale, atomically.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    checkout(items)                                      │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    for each item (request order):                                      │
//! │      UPDATE products SET stock = stock - q                             │
//! │        WHERE id = ? AND stock >= q                                     │
//! │        RETURNING name, price          ← guarded compare-and-set        │
//! │           │                                                             │
//! │           ├── row  → tally.record(name, price, q)                      │
//! │           └── none → SELECT stock WHERE id = ?                         │
//! │                        ├── none  → ProductNotFound     ─┐              │
//! │                        └── some  → InsufficientStock   ─┤              │
//! │                                                         │              │
//! │    INSERT transactions (total)        RETURNING id      │ drop tx      │
//! │    INSERT transaction_details × n     (request order)   │ = ROLLBACK   │
//! │  COMMIT                                                 ▼              │
//! │                                                   nothing persisted    │
//! │  reload by id → Transaction { created_at from storage }               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The first statement inside the transaction is a write, so SQLite takes
//! the write lock before anything is read. A second checkout on another
//! connection waits (busy_timeout) and then sees the committed stock.
//! Repeated product ids deduct cumulatively: each line sees the stock left
//! by the lines before it.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use kasir_core::{CheckoutItem, CheckoutTally, CoreError, Money, Transaction, TransactionDetail};

/// Header row of a transaction, before details are attached.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    total_amount: i64,
    created_at: DateTime<Utc>,
}

/// Repository for the checkout ledger.
///
/// ## Usage
/// ```rust,ignore
/// let sale = db.transactions().checkout(&request.items).await?;
/// println!("Sale #{} total {}", sale.id, sale.total_amount);
/// ```
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Executes a checkout as a single unit of work.
    ///
    /// `items` is expected to be validated already
    /// (`kasir_core::validation::validate_checkout_request`).
    ///
    /// ## Returns
    /// * `Ok(Transaction)` - Committed sale with details in request order
    /// * `Err(DbError::Rejected(ProductNotFound))` - Unknown product id
    /// * `Err(DbError::Rejected(InsufficientStock))` - Not enough stock
    /// * `Err(DbError::Rejected(AmountOverflow))` - Total does not fit in i64
    /// * `Err(_)` - Storage failure; nothing was written
    pub async fn checkout(&self, items: &[CheckoutItem]) -> DbResult<Transaction> {
        debug!(lines = items.len(), "Starting checkout");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut tally = CheckoutTally::with_capacity(items.len());

        for item in items {
            let priced: Option<(String, i64)> = sqlx::query_as(
                r#"
                UPDATE products
                SET stock = stock - ?2
                WHERE id = ?1 AND stock >= ?2
                RETURNING name, price
                "#,
            )
            .bind(item.product_id)
            .bind(item.quantity)
            .fetch_optional(&mut *tx)
            .await?;

            let Some((name, price)) = priced else {
                let err = classify_rejected_line(&mut tx, item).await;
                warn!(
                    product_id = item.product_id,
                    quantity = item.quantity,
                    error = %err,
                    "Checkout rejected, rolling back"
                );
                // Dropping `tx` without commit rolls back every decrement so far
                return Err(err);
            };

            let subtotal = tally.record(item.product_id, name, Money::new(price), item.quantity)?;
            debug!(
                product_id = item.product_id,
                quantity = item.quantity,
                %subtotal,
                "Line reserved"
            );
        }

        let transaction_id: i64 =
            sqlx::query_scalar("INSERT INTO transactions (total_amount) VALUES (?1) RETURNING id")
                .bind(tally.total().amount())
                .fetch_one(&mut *tx)
                .await?;

        for line in tally.lines() {
            sqlx::query(
                r#"
                INSERT INTO transaction_details
                    (transaction_id, product_id, product_name, quantity, subtotal)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(transaction_id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(line.quantity)
            .bind(line.subtotal.amount())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            transaction_id,
            lines = tally.lines().len(),
            total = %tally.total(),
            "Checkout committed"
        );

        self.get_by_id(transaction_id)
            .await?
            .ok_or_else(|| DbError::not_found("Transaction", transaction_id))
    }

    /// Gets a transaction and its details (in insertion order) by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        let header = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, total_amount, created_at FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let details = sqlx::query_as::<_, TransactionDetail>(
            r#"
            SELECT id, transaction_id, product_id, product_name, quantity, subtotal
            FROM transaction_details
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Transaction {
            id: header.id,
            total_amount: header.total_amount,
            created_at: header.created_at,
            details,
        }))
    }

    /// Counts committed transactions.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Works out why the guarded decrement matched no row.
///
/// Runs on the same connection, inside the same transaction, so it reads
/// the stock the guard compared against.
async fn classify_rejected_line(conn: &mut SqliteConnection, item: &CheckoutItem) -> DbError {
    let stock = sqlx::query_scalar::<_, i64>("SELECT stock FROM products WHERE id = ?1")
        .bind(item.product_id)
        .fetch_optional(conn)
        .await;

    match stock {
        Ok(None) => CoreError::ProductNotFound {
            product_id: item.product_id,
        }
        .into(),
        Ok(Some(available)) => CoreError::InsufficientStock {
            product_id: item.product_id,
            available,
            requested: item.quantity,
        }
        .into(),
        Err(e) => e.into(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
