//! User service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// User service for account lookups and progress snapshots
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// A user account
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    /// Progress percentage frozen at the end of the previous month,
    /// None until the first snapshot runs for this user
    pub last_month_progress: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get a user by id
    pub async fn get(&self, user_id: Uuid) -> AppResult<User> {
        self.find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))
    }

    /// Find a user by id
    pub async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, last_month_progress, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// All users, for the monthly snapshot sweep
    pub async fn list_all(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, last_month_progress, created_at
            FROM users
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    /// Freeze a user's progress percentage for the closing month
    pub async fn set_last_month_progress(
        &self,
        user_id: Uuid,
        progress: Decimal,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET last_month_progress = $1 WHERE id = $2",
        )
        .bind(progress)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        Ok(())
    }
}
