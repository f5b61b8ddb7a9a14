//! Category repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use agora_core::error::{AppError, ErrorKind};
use agora_core::result::AppResult;
use agora_entity::category::{Category, CreateCategory};

/// Repository for category CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a category by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find category", e))
    }

    /// List all categories, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list categories", e))
    }

    /// Create a new category.
    pub async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("categories_name_key") =>
            {
                AppError::conflict(format!("Category '{}' already exists", data.name))
            }
            other => AppError::with_source(ErrorKind::Database, "Failed to create category", other),
        })
    }

    /// Update a category's name and/or description.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = COALESCE($2, name), \
             description = COALESCE($3, description) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::not_found("Category not found"),
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("categories_name_key") =>
            {
                AppError::conflict("Category name already exists")
            }
            other => AppError::with_source(ErrorKind::Database, "Failed to update category", other),
        })
    }

    /// Delete a category. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete category", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
