//! Item ledger service: the catalog of stock lots
//!
//! Owns lot creation with merge-key semantics: a second add of the same
//! (product, expiration date, owner) lands on the existing lot with
//! unit-aware quantity arithmetic instead of creating a duplicate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Unit;
use shared::validation::{
    merge_quantities, normalize_product_name, parse_measure, validate_product_name,
    validate_quantity,
};

/// How many lots the expiring-soon view shows
const EXPIRING_SOON_LIMIT: i64 = 6;

/// Item service for managing stock lots
#[derive(Clone)]
pub struct ItemService {
    db: PgPool,
}

/// A stock lot
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    pub measure: i64,
    pub expiration_date: NaiveDate,
    pub purchase_date: NaiveDate,
    pub inventory_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Typed unit kind; rows are validated on write, so an unknown value
    /// here means the store was modified out of band.
    pub fn unit_kind(&self) -> AppResult<Unit> {
        Unit::from_str(&self.unit)
            .ok_or_else(|| AppError::BusinessRule(format!("Unknown unit kind '{}'", self.unit)))
    }
}

/// Input for adding stock, tagged by shape.
///
/// Either a reference to an existing lot or a full product description;
/// a body matching neither shape is rejected during deserialization.
#[derive(Debug, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AddItemInput {
    ByLot {
        lot_id: Uuid,
        quantity: i64,
    },
    ByProduct {
        name: String,
        quantity: i64,
        unit: Unit,
        measure: String,
        expiration_date: NaiveDate,
        purchase_date: Option<NaiveDate>,
        inventory_id: Option<Uuid>,
    },
}

/// Input for updating a lot in place
#[derive(Debug, Deserialize)]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub expiration_date: Option<NaiveDate>,
    pub purchase_date: Option<NaiveDate>,
}

impl ItemService {
    /// Create a new ItemService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Add stock for a user, merging onto an existing lot when the merge key
    /// (product name, expiration date, owner) already exists.
    pub async fn add_or_merge(&self, user_id: Uuid, input: AddItemInput) -> AppResult<Item> {
        match input {
            AddItemInput::ByLot { lot_id, quantity } => {
                self.add_to_existing_lot(user_id, lot_id, quantity).await
            }
            AddItemInput::ByProduct {
                name,
                quantity,
                unit,
                measure,
                expiration_date,
                purchase_date,
                inventory_id,
            } => {
                validate_product_name(&name)
                    .map_err(|msg| AppError::validation("name", msg))?;
                validate_quantity(quantity)
                    .map_err(|msg| AppError::validation("quantity", msg))?;
                let measure = parse_measure(unit, &measure)
                    .map_err(|msg| AppError::validation("measure", msg))?;

                let name = normalize_product_name(&name);
                let purchase_date = purchase_date.unwrap_or_else(|| Utc::now().date_naive());

                let inventory_id = match inventory_id {
                    Some(id) => {
                        self.assert_inventory_owned(id, user_id).await?;
                        id
                    }
                    None => self.default_inventory_id(user_id).await?,
                };

                match self
                    .find_by_merge_key(user_id, &name, expiration_date)
                    .await?
                {
                    Some(existing) => {
                        self.merge_into(existing, quantity, unit, measure).await
                    }
                    None => {
                        self.insert_lot(
                            &name,
                            quantity,
                            unit,
                            measure,
                            expiration_date,
                            purchase_date,
                            inventory_id,
                        )
                        .await
                    }
                }
            }
        }
    }

    /// List all lots across the owner's inventories, soonest expiration first
    pub async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT i.id, i.name, i.quantity, i.unit, i.measure, i.expiration_date,
                   i.purchase_date, i.inventory_id, i.created_at
            FROM items i
            JOIN inventories inv ON inv.id = i.inventory_id
            WHERE inv.user_id = $1
            ORDER BY i.expiration_date ASC, i.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(items)
    }

    /// Get a lot by id
    pub async fn get(&self, lot_id: Uuid) -> AppResult<Item> {
        self.find_by_id(lot_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item".to_string()))
    }

    /// Up to six not-yet-expired lots, soonest expiration first
    pub async fn expiring_soon(&self, user_id: Uuid) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT i.id, i.name, i.quantity, i.unit, i.measure, i.expiration_date,
                   i.purchase_date, i.inventory_id, i.created_at
            FROM items i
            JOIN inventories inv ON inv.id = i.inventory_id
            WHERE inv.user_id = $1 AND i.expiration_date >= $2
            ORDER BY i.expiration_date ASC, i.created_at ASC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(Utc::now().date_naive())
        .bind(EXPIRING_SOON_LIMIT)
        .fetch_all(&self.db)
        .await?;

        Ok(items)
    }

    /// Update lot fields in place, ownership-checked
    pub async fn update_lot(
        &self,
        lot_id: Uuid,
        user_id: Uuid,
        input: UpdateItemInput,
    ) -> AppResult<Item> {
        let existing = self.assert_lot_owned(lot_id, user_id).await?;

        let name = match input.name {
            Some(raw) => {
                validate_product_name(&raw).map_err(|msg| AppError::validation("name", msg))?;
                normalize_product_name(&raw)
            }
            None => existing.name,
        };
        let quantity = input.quantity.unwrap_or(existing.quantity);
        validate_quantity(quantity).map_err(|msg| AppError::validation("quantity", msg))?;
        let expiration_date = input.expiration_date.unwrap_or(existing.expiration_date);
        let purchase_date = input.purchase_date.unwrap_or(existing.purchase_date);

        // Renaming or re-dating must not land on another lot's merge key
        let colliding = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM items
                WHERE name = $1 AND expiration_date = $2 AND inventory_id = $3 AND id <> $4
            )
            "#,
        )
        .bind(&name)
        .bind(expiration_date)
        .bind(existing.inventory_id)
        .bind(lot_id)
        .fetch_one(&self.db)
        .await?;

        if colliding {
            return Err(AppError::Conflict(
                "Another lot already uses this name and expiration date".to_string(),
            ));
        }

        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET name = $1, quantity = $2, expiration_date = $3, purchase_date = $4
            WHERE id = $5
            RETURNING id, name, quantity, unit, measure, expiration_date,
                      purchase_date, inventory_id, created_at
            "#,
        )
        .bind(&name)
        .bind(quantity)
        .bind(expiration_date)
        .bind(purchase_date)
        .bind(lot_id)
        .fetch_one(&self.db)
        .await?;

        Ok(item)
    }

    /// Delete a lot.
    ///
    /// The requesting user must own the lot's inventory, and the lot must not
    /// be referenced by any consumption record; the ledger never points at a
    /// vanished lot.
    pub async fn delete_lot(&self, lot_id: Uuid, user_id: Uuid) -> AppResult<Item> {
        let item = self.assert_lot_owned(lot_id, user_id).await?;

        let referenced = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM consumptions WHERE item_id = $1)",
        )
        .bind(lot_id)
        .fetch_one(&self.db)
        .await?;

        if referenced {
            return Err(AppError::Conflict(
                "Lot has consumption records and cannot be deleted".to_string(),
            ));
        }

        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(lot_id)
            .execute(&self.db)
            .await?;

        Ok(item)
    }

    /// Look up a lot by the merge key within the user's inventories
    pub async fn find_by_merge_key(
        &self,
        user_id: Uuid,
        name: &str,
        expiration_date: NaiveDate,
    ) -> AppResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT i.id, i.name, i.quantity, i.unit, i.measure, i.expiration_date,
                   i.purchase_date, i.inventory_id, i.created_at
            FROM items i
            JOIN inventories inv ON inv.id = i.inventory_id
            WHERE inv.user_id = $1 AND i.name = $2 AND i.expiration_date = $3
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(expiration_date)
        .fetch_optional(&self.db)
        .await?;

        Ok(item)
    }

    /// Fetch the lot and verify the requesting user owns its inventory
    pub async fn assert_lot_owned(&self, lot_id: Uuid, user_id: Uuid) -> AppResult<Item> {
        let item = self
            .find_by_id(lot_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        let owner = sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM inventories WHERE id = $1",
        )
        .bind(item.inventory_id)
        .fetch_optional(&self.db)
        .await?;

        if owner != Some(user_id) {
            return Err(AppError::Unauthorized(
                "Lot does not belong to the requesting user".to_string(),
            ));
        }

        Ok(item)
    }

    async fn find_by_id(&self, lot_id: Uuid) -> AppResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, quantity, unit, measure, expiration_date,
                   purchase_date, inventory_id, created_at
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(lot_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(item)
    }

    /// Top up an existing lot by reference; no unit conversion needed
    async fn add_to_existing_lot(
        &self,
        user_id: Uuid,
        lot_id: Uuid,
        quantity: i64,
    ) -> AppResult<Item> {
        if quantity <= 0 {
            return Err(AppError::validation(
                "quantity",
                "Added quantity must be positive",
            ));
        }

        let existing = self.assert_lot_owned(lot_id, user_id).await?;
        let new_quantity = existing
            .quantity
            .checked_add(quantity)
            .ok_or_else(|| AppError::BusinessRule("Lot quantity is out of range".to_string()))?;
        self.set_quantity_and_measure(existing.id, new_quantity, existing.measure)
            .await
    }

    /// Merge a new delivery onto the matched lot per the unit-aware rules
    async fn merge_into(
        &self,
        existing: Item,
        quantity: i64,
        unit: Unit,
        measure: i64,
    ) -> AppResult<Item> {
        let existing_unit = existing.unit_kind()?;
        if existing_unit != unit {
            return Err(AppError::IncompatibleUnits(format!(
                "Lot '{}' is measured in {}, not {}",
                existing.name,
                existing_unit.as_str(),
                unit.as_str()
            )));
        }

        let (merged_quantity, merged_measure) =
            merge_quantities(existing.quantity, existing.measure, quantity, measure)
                .map_err(|msg| AppError::BusinessRule(msg.to_string()))?;

        self.set_quantity_and_measure(existing.id, merged_quantity, merged_measure)
            .await
    }

    async fn set_quantity_and_measure(
        &self,
        lot_id: Uuid,
        quantity: i64,
        measure: i64,
    ) -> AppResult<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET quantity = $1, measure = $2
            WHERE id = $3
            RETURNING id, name, quantity, unit, measure, expiration_date,
                      purchase_date, inventory_id, created_at
            "#,
        )
        .bind(quantity)
        .bind(measure)
        .bind(lot_id)
        .fetch_one(&self.db)
        .await?;

        Ok(item)
    }

    #[allow(clippy::too_many_arguments)]
    async fn insert_lot(
        &self,
        name: &str,
        quantity: i64,
        unit: Unit,
        measure: i64,
        expiration_date: NaiveDate,
        purchase_date: NaiveDate,
        inventory_id: Uuid,
    ) -> AppResult<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, quantity, unit, measure, expiration_date, purchase_date, inventory_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, quantity, unit, measure, expiration_date,
                      purchase_date, inventory_id, created_at
            "#,
        )
        .bind(name)
        .bind(quantity)
        .bind(unit.as_str())
        .bind(measure)
        .bind(expiration_date)
        .bind(purchase_date)
        .bind(inventory_id)
        .fetch_one(&self.db)
        .await?;

        Ok(item)
    }

    async fn assert_inventory_owned(&self, inventory_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let owner = sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM inventories WHERE id = $1",
        )
        .bind(inventory_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory".to_string()))?;

        if owner != user_id {
            return Err(AppError::Unauthorized(
                "Inventory does not belong to the requesting user".to_string(),
            ));
        }

        Ok(())
    }

    /// The user's oldest inventory, used when the input names none
    async fn default_inventory_id(&self, user_id: Uuid) -> AppResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM inventories WHERE user_id = $1 ORDER BY created_at ASC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory".to_string()))
    }
}
