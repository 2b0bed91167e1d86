//! # Report Repository
//!
//! Sales aggregation over a [`ReportWindow`].
//!
//! ```text
//! window [start, end)  ──►  transactions.created_at >= start
//!                           transactions.created_at <  end
//!
//!   revenue      = SUM(total_amount)          (0 when empty)
//!   transactions = COUNT(*)
//!   top products = SUM(quantity) per product_id, DESC, then product_id ASC
//!                  name: current catalog name, else the sale-time snapshot
//! ```
//!
//! Both queries read outside any explicit transaction. A checkout that
//! commits between them can make the two halves of a summary disagree by
//! one sale; callers accept that.

use sqlx::SqlitePool;
use tracing::debug;

use super::storage_timestamp;
use crate::error::DbResult;
use kasir_core::{ReportWindow, SalesSummary, TopProduct, TOP_PRODUCTS_LIMIT};

/// Repository for sales summaries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Summarizes every transaction created inside `window`.
    pub async fn summary(&self, window: &ReportWindow) -> DbResult<SalesSummary> {
        let start = storage_timestamp(window.start);
        let end = storage_timestamp(window.end);

        debug!(start = %start, end = %end, "Building sales summary");

        let (total_revenue, total_transactions): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(total_amount), 0), COUNT(*)
            FROM transactions
            WHERE created_at >= ?1 AND created_at < ?2
            "#,
        )
        .bind(&start)
        .bind(&end)
        .fetch_one(&self.pool)
        .await?;

        let top_products = sqlx::query_as::<_, TopProduct>(
            r#"
            SELECT
                td.product_id,
                COALESCE(p.name, MAX(td.product_name)) AS product_name,
                SUM(td.quantity) AS total_sold
            FROM transaction_details td
            JOIN transactions t ON t.id = td.transaction_id
            LEFT JOIN products p ON p.id = td.product_id
            WHERE t.created_at >= ?1 AND t.created_at < ?2
            GROUP BY td.product_id
            ORDER BY total_sold DESC, td.product_id ASC
            LIMIT ?3
            "#,
        )
        .bind(&start)
        .bind(&end)
        .bind(TOP_PRODUCTS_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        debug!(
            total_revenue,
            total_transactions,
            top = top_products.len(),
            "Sales summary built"
        );

        Ok(SalesSummary {
            total_revenue,
            total_transactions,
            top_products,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use kasir_core::{CheckoutItem, ProductInput};

    async fn product(db: &Database, name: &str, price: i64) -> i64 {
        db.products()
            .create(&ProductInput {
                name: name.to_string(),
                price,
                stock: 1000,
                category_id: None,
            })
            .await
            .unwrap()
            .id
    }

    async fn sell(db: &Database, lines: &[(i64, i64)]) -> i64 {
        let items: Vec<CheckoutItem> = lines
            .iter()
            .map(|&(product_id, quantity)| CheckoutItem {
                product_id,
                quantity,
            })
            .collect();
        db.transactions().checkout(&items).await.unwrap().id
    }

    /// Moves a committed sale to another instant.
    async fn backdate(db: &Database, transaction_id: i64, at: DateTime<Utc>) {
        sqlx::query("UPDATE transactions SET created_at = ?1 WHERE id = ?2")
            .bind(storage_timestamp(at))
            .bind(transaction_id)
            .execute(db.pool())
            .await
            .unwrap();
    }

    fn day_window(y: i32, m: u32, d: u32) -> ReportWindow {
        let start = Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap();
        ReportWindow {
            start,
            end: start + Duration::hours(24),
        }
    }

    #[tokio::test]
    async fn test_empty_window() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let summary = db.reports().summary(&day_window(2026, 3, 10)).await.unwrap();
        assert_eq!(summary, SalesSummary::empty());
    }

    #[tokio::test]
    async fn test_today_counts_fresh_sales() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let indomie = product(&db, "Indomie Godog", 3500).await;
        let vit = product(&db, "Vit 1000ml", 3000).await;

        sell(&db, &[(indomie, 3), (vit, 2)]).await;
        sell(&db, &[(vit, 1)]).await;

        let summary = db
            .reports()
            .summary(&ReportWindow::today(&Utc::now()))
            .await
            .unwrap();

        assert_eq!(summary.total_revenue, 19500);
        assert_eq!(summary.total_transactions, 2);
        assert_eq!(summary.top_products.len(), 2);
        assert_eq!(summary.top_products[0].product_id, indomie);
        assert_eq!(summary.top_products[0].total_sold, 3);
        assert_eq!(summary.top_products[1].product_id, vit);
        assert_eq!(summary.top_products[1].total_sold, 3);
    }

    #[tokio::test]
    async fn test_window_bounds_are_half_open() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let indomie = product(&db, "Indomie Godog", 3500).await;
        let window = day_window(2026, 3, 10);

        let at_start = sell(&db, &[(indomie, 1)]).await;
        backdate(&db, at_start, window.start).await;

        let last_ms = sell(&db, &[(indomie, 2)]).await;
        backdate(&db, last_ms, window.end - Duration::milliseconds(1)).await;

        let at_end = sell(&db, &[(indomie, 4)]).await;
        backdate(&db, at_end, window.end).await;

        let before = sell(&db, &[(indomie, 8)]).await;
        backdate(&db, before, window.start - Duration::milliseconds(1)).await;

        let summary = db.reports().summary(&window).await.unwrap();
        assert_eq!(summary.total_transactions, 2);
        assert_eq!(summary.total_revenue, 3 * 3500);
        assert_eq!(summary.top_products[0].total_sold, 3);
    }

    #[tokio::test]
    async fn test_top_products_limit_and_tie_break() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut ids = Vec::new();
        for i in 0..7 {
            ids.push(product(&db, &format!("Produk {i}"), 1000).await);
        }

        // ids[6] sells most; ids[0..6] tie at 2 each
        let mut lines: Vec<(i64, i64)> = ids[..6].iter().map(|&id| (id, 2)).collect();
        lines.push((ids[6], 9));
        sell(&db, &lines).await;

        let summary = db
            .reports()
            .summary(&ReportWindow::today(&Utc::now()))
            .await
            .unwrap();

        assert_eq!(summary.top_products.len(), TOP_PRODUCTS_LIMIT as usize);
        let top: Vec<i64> = summary.top_products.iter().map(|t| t.product_id).collect();
        assert_eq!(top, vec![ids[6], ids[0], ids[1], ids[2], ids[3]]);
    }

    #[tokio::test]
    async fn test_deleted_product_keeps_snapshot_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kecap = product(&db, "kecap", 12000).await;
        let vit = product(&db, "Vit 1000ml", 3000).await;

        sell(&db, &[(kecap, 2), (vit, 1)]).await;
        db.products().delete(kecap).await.unwrap();
        db.products()
            .update(
                vit,
                &ProductInput {
                    name: "Vit 1500ml".to_string(),
                    price: 4000,
                    stock: 10,
                    category_id: None,
                },
            )
            .await
            .unwrap();

        let summary = db
            .reports()
            .summary(&ReportWindow::today(&Utc::now()))
            .await
            .unwrap();

        assert_eq!(summary.top_products[0].product_name, "kecap");
        // Live products report their current name
        assert_eq!(summary.top_products[1].product_name, "Vit 1500ml");
        // Revenue is what was charged, not today's price
        assert_eq!(summary.total_revenue, 27000);
    }

    #[tokio::test]
    async fn test_widest_accepted_range_sees_sales() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kecap = product(&db, "kecap", 12000).await;
        sell(&db, &[(kecap, 1)]).await;

        let start = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let end = chrono::NaiveDate::from_ymd_opt(9999, 12, 30).unwrap();
        let window = ReportWindow::for_range(start, end, &Utc).unwrap();
        assert!(storage_timestamp(window.end).starts_with("9999-12-31T"));

        let summary = db.reports().summary(&window).await.unwrap();
        assert_eq!(summary.total_transactions, 1);
        assert_eq!(summary.total_revenue, 12000);

        // One day later would end in year 10000, which is refused up front
        let end = chrono::NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        assert!(ReportWindow::for_range(start, end, &Utc).is_err());
    }
}
