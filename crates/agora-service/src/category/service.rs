//! Category service — admin-managed top-level discussion areas.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use agora_auth::access::AccessGate;
use agora_core::error::AppError;
use agora_database::repositories::category::CategoryRepository;
use agora_entity::category::{Category, CreateCategory};

use crate::context::RequestContext;

/// Handles category CRUD. Mutations are admin-only.
#[derive(Debug, Clone)]
pub struct CategoryService {
    /// Category repository.
    category_repo: Arc<CategoryRepository>,
    /// Access gate.
    gate: Arc<AccessGate>,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(category_repo: Arc<CategoryRepository>, gate: Arc<AccessGate>) -> Self {
        Self {
            category_repo,
            gate,
        }
    }

    /// Lists all categories.
    pub async fn list(&self) -> Result<Vec<Category>, AppError> {
        self.category_repo.find_all().await
    }

    /// Fetches one category.
    pub async fn get(&self, id: Uuid) -> Result<Category, AppError> {
        self.category_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))
    }

    /// Creates a category. Admin only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateCategory,
    ) -> Result<Category, AppError> {
        self.gate.require_admin(&ctx.role)?;

        if data.name.trim().is_empty() {
            return Err(AppError::validation("Category name is required"));
        }

        let category = self.category_repo.create(&data).await?;
        info!(admin_id = %ctx.user_id, category_id = %category.id, "Category created");
        Ok(category)
    }

    /// Updates a category. Admin only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Category, AppError> {
        self.gate.require_admin(&ctx.role)?;
        self.category_repo
            .update(id, name.as_deref(), description.as_deref())
            .await
    }

    /// Deletes a category (topics cascade away). Admin only.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.gate.require_admin(&ctx.role)?;
        let removed = self.category_repo.delete(id).await?;
        if !removed {
            return Err(AppError::not_found("Category not found"));
        }
        info!(admin_id = %ctx.user_id, category_id = %id, "Category deleted");
        Ok(())
    }
}
