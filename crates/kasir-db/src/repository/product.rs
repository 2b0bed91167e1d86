//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD operations
//! - Reads joined with the product's category
//! - Filtering by category
//!
//! Stock is only decremented by the checkout ledger
//! ([`TransactionRepository`](super::transaction::TransactionRepository)).
//! Here it is set wholesale by create/update.
//!
//! ## Category Join
//! ```text
//! products p LEFT JOIN categories c ON c.id = p.category_id
//!
//!  p.category_id   c row        → category
//!  ─────────────   ──────────     ───────────────
//!  NULL            (none)         null
//!  2               found          {id: 2, name, description}
//!  9               (deleted)      null
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasir_core::{Category, Product, ProductInput, ProductWithCategory};

const PRODUCT_COLUMNS: &str = "id, name, price, stock, category_id";

const JOINED_SELECT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.price,
        p.stock,
        p.category_id,
        c.id AS cat_id,
        c.name AS cat_name,
        c.description AS cat_description
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// Row shape of [`JOINED_SELECT`]. Category columns are all NULL when the
/// join finds nothing.
#[derive(Debug, sqlx::FromRow)]
struct ProductCategoryRow {
    id: i64,
    name: String,
    price: i64,
    stock: i64,
    category_id: Option<i64>,
    cat_id: Option<i64>,
    cat_name: Option<String>,
    cat_description: Option<String>,
}

impl From<ProductCategoryRow> for ProductWithCategory {
    fn from(row: ProductCategoryRow) -> Self {
        let category = match (row.cat_id, row.cat_name) {
            (Some(id), Some(name)) => Some(Category {
                id,
                name,
                description: row.cat_description.unwrap_or_default(),
            }),
            _ => None,
        };

        ProductWithCategory {
            product: Product {
                id: row.id,
                name: row.name,
                price: row.price,
                stock: row.stock,
                category_id: row.category_id,
            },
            category,
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let all = repo.list().await?;
/// let one = repo.get_by_id_with_category(3).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists all products with their category, ordered by id.
    pub async fn list_with_category(&self) -> DbResult<Vec<ProductWithCategory>> {
        let rows = sqlx::query_as::<_, ProductCategoryRow>(&format!(
            "{JOINED_SELECT} ORDER BY p.id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductWithCategory::from).collect())
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its ID together with its category.
    pub async fn get_by_id_with_category(&self, id: i64) -> DbResult<Option<ProductWithCategory>> {
        let row = sqlx::query_as::<_, ProductCategoryRow>(&format!(
            "{JOINED_SELECT} WHERE p.id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductWithCategory::from))
    }

    /// Lists the products whose `category_id` matches, each with its
    /// category, ordered by id.
    ///
    /// An unknown category id yields an empty list, not an error.
    pub async fn list_by_category(&self, category_id: i64) -> DbResult<Vec<ProductWithCategory>> {
        debug!(category_id, "Listing products by category");

        let rows = sqlx::query_as::<_, ProductCategoryRow>(&format!(
            "{JOINED_SELECT} WHERE p.category_id = ?1 ORDER BY p.id"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductWithCategory::from).collect())
    }

    /// Inserts a new product and returns it with its assigned id.
    ///
    /// The name is stored without surrounding whitespace. `category_id` is
    /// stored as given; it is not checked against the categories table.
    pub async fn create(&self, input: &ProductInput) -> DbResult<Product> {
        debug!(name = %input.name, price = input.price, stock = input.stock, "Creating product");

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, price, stock, category_id)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Replaces every field of an existing product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored row after the update
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: i64, input: &ProductInput) -> DbResult<Product> {
        debug!(id, "Updating product");

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = ?2, price = ?3, stock = ?4, category_id = ?5
            WHERE id = ?1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .fetch_optional(&self.pool)
        .await?;

        product.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product.
    ///
    /// Past transaction details keep their `product_id` and the name that
    /// was frozen at sale time.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use kasir_core::{CategoryInput, ProductInput};

    fn product(name: &str, price: i64, stock: i64, category_id: Option<i64>) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            price,
            stock,
            category_id,
        }
    }

    async fn db_with_category() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category = db
            .categories()
            .create(&CategoryInput {
                name: "Makanan".to_string(),
                description: "Produk makanan dan snack".to_string(),
            })
            .await
            .unwrap();
        (db, category.id)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (db, cat) = db_with_category().await;
        let repo = db.products();

        let created = repo
            .create(&product("Indomie Godog", 3500, 10, Some(cat)))
            .await
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.price, 3500);
        assert_eq!(created.category_id, Some(cat));

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(repo.get_by_id(999).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_negative_stock_is_rejected_by_schema() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .products()
            .create(&product("kecap", 12000, -1, None))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)));
    }

    #[tokio::test]
    async fn test_with_category_variants() {
        let (db, cat) = db_with_category().await;
        let repo = db.products();

        let with_cat = repo
            .create(&product("Indomie Godog", 3500, 10, Some(cat)))
            .await
            .unwrap();
        let without_cat = repo
            .create(&product("Vit 1000ml", 3000, 40, None))
            .await
            .unwrap();
        let dangling = repo
            .create(&product("kecap", 12000, 20, Some(999)))
            .await
            .unwrap();

        let joined = repo.get_by_id_with_category(with_cat.id).await.unwrap().unwrap();
        assert_eq!(joined.product, with_cat);
        assert_eq!(joined.category.unwrap().name, "Makanan");

        let joined = repo
            .get_by_id_with_category(without_cat.id)
            .await
            .unwrap()
            .unwrap();
        assert!(joined.category.is_none());

        let joined = repo.get_by_id_with_category(dangling.id).await.unwrap().unwrap();
        assert_eq!(joined.product.category_id, Some(999));
        assert!(joined.category.is_none());

        let all = repo.list_with_category().await.unwrap();
        let ids: Vec<i64> = all.iter().map(|p| p.product.id).collect();
        assert_eq!(ids, vec![with_cat.id, without_cat.id, dangling.id]);
    }

    #[tokio::test]
    async fn test_category_delete_leaves_products_dangling() {
        let (db, cat) = db_with_category().await;
        let created = db
            .products()
            .create(&product("Indomie Godog", 3500, 10, Some(cat)))
            .await
            .unwrap();

        db.categories().delete(cat).await.unwrap();

        let joined = db
            .products()
            .get_by_id_with_category(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(joined.product.category_id, Some(cat));
        assert!(joined.category.is_none());
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let (db, cat) = db_with_category().await;
        let repo = db.products();

        repo.create(&product("Indomie Godog", 3500, 10, Some(cat)))
            .await
            .unwrap();
        repo.create(&product("Vit 1000ml", 3000, 40, None))
            .await
            .unwrap();
        repo.create(&product("Indomie Goreng", 3500, 5, Some(cat)))
            .await
            .unwrap();

        let filtered = repo.list_by_category(cat).await.unwrap();
        let names: Vec<&str> = filtered.iter().map(|p| p.product.name.as_str()).collect();
        assert_eq!(names, vec!["Indomie Godog", "Indomie Goreng"]);
        assert!(filtered.iter().all(|p| p.category.is_some()));

        assert!(repo.list_by_category(999).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let created = repo
            .create(&product("Vit 1000ml", 3000, 40, None))
            .await
            .unwrap();

        let updated = repo
            .update(created.id, &product("Vit 600ml", 2500, 35, Some(2)))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Vit 600ml");
        assert_eq!(updated.stock, 35);
        assert_eq!(updated.category_id, Some(2));

        let err = repo
            .update(999, &product("Ghost", 1, 1, None))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { id: 999, .. }));

        repo.delete(created.id).await.unwrap();
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(created.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_names_are_stored_trimmed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let created = repo.create(&product("  Kecap  ", 12000, 20, None)).await.unwrap();
        assert_eq!(created.name, "Kecap");

        let updated = repo
            .update(created.id, &product(" Kecap Manis ", 12500, 20, None))
            .await
            .unwrap();
        assert_eq!(updated.name, "Kecap Manis");
        assert_eq!(repo.get_by_id(created.id).await.unwrap().unwrap().name, "Kecap Manis");
    }
}
