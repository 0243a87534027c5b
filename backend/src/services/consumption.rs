//! Consumption ledger service
//!
//! Append-only record of stock usage. A lot's consumed total is never stored
//! on the lot itself; it is always derived by summing this ledger, so the
//! conservation rule (consumed never exceeds lot quantity) is enforced at
//! write time and holds for every later read.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::ItemService;
use shared::stock::validate_consumption;
use shared::validation::normalize_product_name;

/// Consumption service for recording stock usage
#[derive(Clone)]
pub struct ConsumptionService {
    db: PgPool,
}

/// A single consumption event against a lot
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Consumption {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_id: Uuid,
    pub quantity: i64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Which lot a consumption applies to, tagged by shape.
///
/// Either a direct lot reference or the lot's merge key; a body matching
/// neither shape fails deserialization.
#[derive(Debug, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum ConsumptionTarget {
    Lot {
        lot_id: Uuid,
    },
    Product {
        name: String,
        expiration_date: NaiveDate,
    },
}

/// Input for recording a consumption event
#[derive(Debug, Deserialize)]
pub struct RecordConsumptionInput {
    #[serde(flatten)]
    pub target: ConsumptionTarget,
    pub quantity: i64,
    pub date: Option<NaiveDate>,
}

impl ConsumptionService {
    /// Create a new ConsumptionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a consumption event against a lot the user owns.
    ///
    /// Rejects the write when the lot's consumed total would exceed its
    /// quantity.
    pub async fn record_consumption(
        &self,
        user_id: Uuid,
        input: RecordConsumptionInput,
    ) -> AppResult<Consumption> {
        if input.quantity <= 0 {
            return Err(AppError::validation(
                "quantity",
                "Consumed quantity must be positive",
            ));
        }

        let items = ItemService::new(self.db.clone());
        let lot = match input.target {
            ConsumptionTarget::Lot { lot_id } => items.assert_lot_owned(lot_id, user_id).await?,
            ConsumptionTarget::Product {
                name,
                expiration_date,
            } => {
                let name = normalize_product_name(&name);
                items
                    .find_by_merge_key(user_id, &name, expiration_date)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Item".to_string()))?
            }
        };

        let already_consumed = self.consumed_for_lot(lot.id).await?;
        validate_consumption(already_consumed, input.quantity, lot.quantity)?;

        let date = input.date.unwrap_or_else(|| Utc::now().date_naive());

        let record = sqlx::query_as::<_, Consumption>(
            r#"
            INSERT INTO consumptions (user_id, item_id, quantity, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, item_id, quantity, date, created_at
            "#,
        )
        .bind(user_id)
        .bind(lot.id)
        .bind(input.quantity)
        .bind(date)
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }

    /// All consumption events for a user, newest first
    pub async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Consumption>> {
        let records = sqlx::query_as::<_, Consumption>(
            r#"
            SELECT id, user_id, item_id, quantity, date, created_at
            FROM consumptions
            WHERE user_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    /// Total consumed per lot across all of a user's consumption events
    pub async fn consumed_by_lot(&self, user_id: Uuid) -> AppResult<HashMap<Uuid, i64>> {
        let rows = sqlx::query_as::<_, (Uuid, i64)>(
            r#"
            SELECT item_id, COALESCE(SUM(quantity), 0)
            FROM consumptions
            WHERE user_id = $1
            GROUP BY item_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Total consumed so far against a single lot
    pub async fn consumed_for_lot(&self, lot_id: Uuid) -> AppResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(quantity), 0) FROM consumptions WHERE item_id = $1",
        )
        .bind(lot_id)
        .fetch_one(&self.db)
        .await?;

        Ok(total)
    }
}
