//! Statistics service
//!
//! Computes the per-user progress figures: this month's consumption ratio,
//! days left in the month, the frozen previous-month percentage, and the
//! whole-history ratio. Also runs the month-end sweep that freezes each
//! user's progress into `last_month_progress`.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::UserStatistics;
use crate::services::{ConsumptionService, SummaryService, UserService};
use shared::stock::{
    classify_all, days_remaining_in_month, last_day_of_previous_month, progress_ratio,
    same_calendar_month, whole_history_progress, LotStock, StockBreakdown,
};

/// Statistics service for progress figures and month-end snapshots
#[derive(Clone)]
pub struct StatisticsService {
    db: PgPool,
}

impl StatisticsService {
    /// Create a new StatisticsService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Full statistics for one user as of today.
    ///
    /// `current_progress` scopes consumption to the current calendar month;
    /// the in-stock and expired terms of its denominator are the live
    /// classification, so the figure resets at each month boundary.
    pub async fn compute_user_statistics(&self, user_id: Uuid) -> AppResult<UserStatistics> {
        let today = Utc::now().date_naive();

        let user = UserService::new(self.db.clone()).get(user_id).await?;

        let lots = SummaryService::new(self.db.clone())
            .load_lot_stocks(user_id)
            .await?;
        let stocks: Vec<LotStock> = lots.iter().map(|(_, stock)| *stock).collect();
        let totals = classify_all(&stocks, today)?;

        let consumptions = ConsumptionService::new(self.db.clone())
            .list_by_user(user_id)
            .await?;
        let month_consumed: i64 = consumptions
            .iter()
            .filter(|c| same_calendar_month(c.date, today))
            .map(|c| c.quantity)
            .sum();

        let current = StockBreakdown {
            in_stock: totals.in_stock,
            expired: totals.expired,
            consumed: month_consumed,
        };

        let boundary = last_day_of_previous_month(today);
        let consumed_before: i64 = consumptions
            .iter()
            .filter(|c| c.date <= boundary)
            .map(|c| c.quantity)
            .sum();
        let quantity_before: i64 = lots
            .iter()
            .filter(|(item, _)| item.expiration_date <= boundary)
            .map(|(item, _)| item.quantity)
            .sum();

        Ok(UserStatistics {
            consumed_count: month_consumed,
            in_stock_count: totals.in_stock,
            expired_count: totals.expired,
            current_progress: progress_ratio(&current),
            remaining_days: days_remaining_in_month(today),
            history_progress: user.last_month_progress,
            whole_history_progress: whole_history_progress(consumed_before, quantity_before)?,
        })
    }

    /// Freeze every user's all-time progress ratio into
    /// `last_month_progress`.
    ///
    /// A failure for one user is logged and skipped; the sweep continues so
    /// one bad ledger cannot block everyone else's snapshot. Returns the
    /// number of users updated.
    pub async fn snapshot_all_users(&self) -> AppResult<usize> {
        let users = UserService::new(self.db.clone()).list_all().await?;
        let mut updated = 0;

        for user in users {
            match self.snapshot_user(user.id).await {
                Ok(progress) => {
                    tracing::debug!(
                        user_id = %user.id,
                        progress = %progress,
                        "Froze monthly progress"
                    );
                    updated += 1;
                }
                Err(err) => {
                    tracing::error!(
                        user_id = %user.id,
                        error = %err,
                        "Monthly snapshot failed for user, continuing"
                    );
                }
            }
        }

        Ok(updated)
    }

    /// Compute and persist one user's all-time progress ratio
    async fn snapshot_user(&self, user_id: Uuid) -> AppResult<Decimal> {
        let progress = self
            .current_progress_all_time(user_id, Utc::now().date_naive())
            .await?;

        UserService::new(self.db.clone())
            .set_last_month_progress(user_id, progress)
            .await?;

        Ok(progress)
    }

    /// All-time consumption ratio over the live classification; this is the
    /// figure the snapshot freezes at month end
    async fn current_progress_all_time(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<Decimal> {
        let lots = SummaryService::new(self.db.clone())
            .load_lot_stocks(user_id)
            .await?;
        let stocks: Vec<LotStock> = lots.iter().map(|(_, stock)| *stock).collect();
        let totals = classify_all(&stocks, today)?;

        Ok(progress_ratio(&totals))
    }
}
