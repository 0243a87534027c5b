//! Statistics response models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current stock totals for a user, partitioned by the classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSummary {
    pub in_stock_count: i64,
    pub consumed_count: i64,
    pub expired_count: i64,
}

/// Month-scoped statistics for the homepage view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStatistics {
    /// Quantity consumed during the current calendar month
    pub consumed_count: i64,
    /// In-stock quantity as of now (not month-scoped)
    pub in_stock_count: i64,
    /// Expired quantity as of now (not month-scoped)
    pub expired_count: i64,
    /// consumed / (consumed + in_stock + expired) * 100, 0 when empty
    pub current_progress: Decimal,
    /// Days left in the current calendar month
    pub remaining_days: i64,
    /// The last frozen monthly snapshot, if one has ever run
    pub history_progress: Option<Decimal>,
    /// Cumulative pre-month consumption over pre-month stock, if any
    pub whole_history_progress: Option<Decimal>,
}
