//! # Category Repository
//!
//! Database operations for categories.
//!
//! Deleting a category never touches products. Products that pointed at it
//! keep their `category_id` and read back with `category: null` from the
//! joined queries.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kasir_core::{Category, CategoryInput};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Category))` - Category found
    /// * `Ok(None)` - Category not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Inserts a new category and returns it with its assigned id.
    ///
    /// The name is stored without surrounding whitespace.
    pub async fn create(&self, input: &CategoryInput) -> DbResult<Category> {
        debug!(name = %input.name, "Creating category");

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES (?1, ?2)
            RETURNING id, name, description
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    /// Replaces name and description of an existing category.
    ///
    /// ## Returns
    /// * `Ok(Category)` - The stored row after the update
    /// * `Err(DbError::NotFound)` - Category doesn't exist
    pub async fn update(&self, id: i64, input: &CategoryInput) -> DbResult<Category> {
        debug!(id, "Updating category");

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = ?2, description = ?3
            WHERE id = ?1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await?;

        category.ok_or_else(|| DbError::not_found("Category", id))
    }

    /// Deletes a category. Products referencing it are left as they are.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use kasir_core::CategoryInput;

    fn input(name: &str, description: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        let created = repo
            .create(&input("Makanan", "Produk makanan dan snack"))
            .await
            .unwrap();
        assert!(created.id > 0);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        assert!(repo.list().await.unwrap().is_empty());

        repo.create(&input("Minuman", "")).await.unwrap();
        repo.create(&input("Bumbu Dapur", "")).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Minuman", "Bumbu Dapur"]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        let err = repo.update(42, &input("X", "")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { id: 42, .. }));

        let created = repo.create(&input("Minuman", "")).await.unwrap();
        let updated = repo
            .update(created.id, &input("Minuman Dingin", "Es"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Minuman Dingin");
        assert_eq!(updated.description, "Es");
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        let created = repo.create(&input("Makanan", "")).await.unwrap();
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
        let repo = db.categories();

        let created = repo.create(&input("  Bumbu Dapur  ", "")).await.unwrap();
        assert_eq!(created.name, "Bumbu Dapur");

        let updated = repo.update(created.id, &input("\tBumbu\n", "")).await.unwrap();
        assert_eq!(updated.name, "Bumbu");
    }
}
