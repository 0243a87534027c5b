//! Stock summary service
//!
//! Wires the pure classifier to the two ledgers: loads a user's lots and
//! their summed consumption, then classifies each lot's quantity into
//! in-stock, consumed, or expired as of today.

use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Paginated, Pagination, StockCategory, StockSummary};
use crate::services::{ConsumptionService, ItemService};
use crate::services::item::Item;
use shared::stock::{category_quantity, classify_all, LotStock};

/// Summary service for classified stock views
#[derive(Clone)]
pub struct SummaryService {
    db: PgPool,
}

/// A lot as shown in a category listing, carrying only the share of its
/// quantity attributed to the requested category
#[derive(Debug, Clone, Serialize)]
pub struct CategorizedItem {
    #[serde(flatten)]
    pub item: Item,
    pub category_quantity: i64,
}

impl SummaryService {
    /// Create a new SummaryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Per-category quantity totals across all of a user's lots
    pub async fn summary(&self, user_id: Uuid) -> AppResult<StockSummary> {
        let lots = self.load_lot_stocks(user_id).await?;
        let stocks: Vec<LotStock> = lots.iter().map(|(_, stock)| *stock).collect();

        let totals = classify_all(&stocks, Utc::now().date_naive())?;

        Ok(StockSummary {
            in_stock_count: totals.in_stock,
            consumed_count: totals.consumed,
            expired_count: totals.expired,
        })
    }

    /// Page through the lots contributing to one category.
    ///
    /// A lot appears only if its quantity in the requested category is
    /// positive; ordering is soonest expiration first, then insertion order.
    pub async fn list_by_category(
        &self,
        user_id: Uuid,
        category: StockCategory,
        pagination: Pagination,
    ) -> AppResult<Paginated<CategorizedItem>> {
        let items = self.categorized_items(user_id, category).await?;
        Ok(Paginated {
            page: pagination.page,
            size: pagination.size,
            data: pagination.slice(items),
        })
    }

    /// All lots with in-stock quantity remaining, unpaged; feeds the recipe
    /// recommendation endpoint
    pub async fn in_stock_items(&self, user_id: Uuid) -> AppResult<Vec<CategorizedItem>> {
        self.categorized_items(user_id, StockCategory::InStock)
            .await
    }

    async fn categorized_items(
        &self,
        user_id: Uuid,
        category: StockCategory,
    ) -> AppResult<Vec<CategorizedItem>> {
        let today = Utc::now().date_naive();
        let lots = self.load_lot_stocks(user_id).await?;

        let mut out = Vec::new();
        // list_by_owner already sorts by expiration then insertion order
        for (item, stock) in lots {
            let quantity = category_quantity(&stock, today, category)?;
            if quantity > 0 {
                out.push(CategorizedItem {
                    item,
                    category_quantity: quantity,
                });
            }
        }

        Ok(out)
    }

    /// Join each lot with its summed consumption into classifier inputs
    pub async fn load_lot_stocks(&self, user_id: Uuid) -> AppResult<Vec<(Item, LotStock)>> {
        let items = ItemService::new(self.db.clone()).list_by_owner(user_id).await?;
        let consumed = ConsumptionService::new(self.db.clone())
            .consumed_by_lot(user_id)
            .await?;

        Ok(items
            .into_iter()
            .map(|item| {
                let stock = LotStock {
                    quantity: item.quantity,
                    consumed: consumed.get(&item.id).copied().unwrap_or(0),
                    expiration_date: item.expiration_date,
                };
                (item, stock)
            })
            .collect())
    }
}
