//! Category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A top-level discussion category. Admin-managed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Unique category identifier.
    pub id: Uuid,
    /// Unique category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategory {
    /// Category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}
