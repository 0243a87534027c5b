//! Inventory service
//!
//! Inventories group lots under an owner; every lot belongs to exactly one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Inventory service for managing lot groupings
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// An inventory owned by a user
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Inventory {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an inventory
#[derive(Debug, Deserialize)]
pub struct CreateInventoryInput {
    pub name: String,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create an inventory for a user
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateInventoryInput,
    ) -> AppResult<Inventory> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("name", "Inventory name cannot be empty"));
        }

        let inventory = sqlx::query_as::<_, Inventory>(
            r#"
            INSERT INTO inventories (name, user_id)
            VALUES ($1, $2)
            RETURNING id, name, user_id, created_at
            "#,
        )
        .bind(name)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(inventory)
    }

    /// List a user's inventories, oldest first
    pub async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Inventory>> {
        let inventories = sqlx::query_as::<_, Inventory>(
            r#"
            SELECT id, name, user_id, created_at
            FROM inventories
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(inventories)
    }
}
