//! Stock classifier and month arithmetic
//!
//! Partitions every lot's quantity into exactly one of
//! {in-stock, consumed, expired} for a given evaluation date, and provides
//! the calendar-month helpers behind statistics and the snapshot job.
//!
//! The conservation invariant is the heart of this module: for every lot,
//! in_stock + expired + consumed must equal the lot's quantity exactly, for
//! any consumption history and any evaluation date.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::StockCategory;

/// Errors raised by the classifier
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    /// The consumption ledger records more than the lot ever held
    #[error("consumption ({consumed}) exceeds lot quantity ({quantity})")]
    OverConsumed { consumed: i64, quantity: i64 },

    /// A ratio over no recorded stock is meaningless
    #[error("no stock quantity recorded for the requested ratio")]
    ZeroDenominator,
}

/// A lot's state as seen by the classifier: total quantity, summed
/// consumption against it, and its expiration date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LotStock {
    pub quantity: i64,
    pub consumed: i64,
    pub expiration_date: NaiveDate,
}

/// Quantities partitioned into the three classification buckets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StockBreakdown {
    pub in_stock: i64,
    pub consumed: i64,
    pub expired: i64,
}

impl StockBreakdown {
    pub fn total(&self) -> i64 {
        self.in_stock + self.consumed + self.expired
    }
}

/// Classify a single lot's quantity on the given date.
///
/// A lot whose expiration date is on or after `today` counts as in-stock
/// for its unconsumed remainder; a lot strictly past expiration counts the
/// unconsumed remainder as expired. Consumed units are attributed to the
/// consumed bucket either way, never double-counted as expired.
pub fn classify_lot(lot: &LotStock, today: NaiveDate) -> Result<StockBreakdown, StockError> {
    if lot.consumed > lot.quantity {
        return Err(StockError::OverConsumed {
            consumed: lot.consumed,
            quantity: lot.quantity,
        });
    }

    let remainder = lot.quantity - lot.consumed;
    let mut breakdown = StockBreakdown {
        consumed: lot.consumed,
        ..Default::default()
    };

    if lot.expiration_date >= today {
        breakdown.in_stock = remainder;
    } else {
        breakdown.expired = remainder;
    }

    Ok(breakdown)
}

/// Classify a whole lot set, summing the buckets
pub fn classify_all<'a, I>(lots: I, today: NaiveDate) -> Result<StockBreakdown, StockError>
where
    I: IntoIterator<Item = &'a LotStock>,
{
    let mut totals = StockBreakdown::default();
    for lot in lots {
        let breakdown = classify_lot(lot, today)?;
        totals.in_stock += breakdown.in_stock;
        totals.consumed += breakdown.consumed;
        totals.expired += breakdown.expired;
    }
    Ok(totals)
}

/// Quantity of a lot attributable to one category on the given date.
///
/// Used by the paged category listing to decide whether a lot qualifies
/// and how much of it to show.
pub fn category_quantity(
    lot: &LotStock,
    today: NaiveDate,
    category: StockCategory,
) -> Result<i64, StockError> {
    let breakdown = classify_lot(lot, today)?;
    Ok(match category {
        StockCategory::InStock => breakdown.in_stock,
        StockCategory::Consumed => breakdown.consumed,
        StockCategory::Expired => breakdown.expired,
    })
}

/// Check a prospective consumption against a lot's remaining capacity.
///
/// The summed ledger plus the new quantity must never exceed the lot's
/// total quantity; a violation is a business-rule error, never clamped.
pub fn validate_consumption(
    already_consumed: i64,
    new_quantity: i64,
    lot_quantity: i64,
) -> Result<(), StockError> {
    // Widen before summing so a near-i64::MAX ledger rejects cleanly
    // instead of wrapping
    if i128::from(already_consumed) + i128::from(new_quantity) > i128::from(lot_quantity) {
        return Err(StockError::OverConsumed {
            consumed: already_consumed.saturating_add(new_quantity),
            quantity: lot_quantity,
        });
    }
    Ok(())
}

/// consumed / (consumed + in_stock + expired) * 100.
///
/// Defined as 0 when the denominator is 0; an empty pantry has made no
/// progress rather than being an error.
pub fn progress_ratio(breakdown: &StockBreakdown) -> Decimal {
    let total = breakdown.total();
    if total == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(breakdown.consumed) / Decimal::from(total) * Decimal::from(100)
}

/// Cumulative pre-month consumption over cumulative pre-month stock.
///
/// Returns `None` when nothing was consumed before this month (the ratio
/// would be meaningless); errors when consumption exists but no pre-month
/// stock quantity does.
pub fn whole_history_progress(
    consumed_before: i64,
    quantity_before: i64,
) -> Result<Option<Decimal>, StockError> {
    if consumed_before == 0 {
        return Ok(None);
    }
    if quantity_before == 0 {
        return Err(StockError::ZeroDenominator);
    }
    Ok(Some(
        Decimal::from(consumed_before) / Decimal::from(quantity_before) * Decimal::from(100),
    ))
}

// ============================================================================
// Calendar-month helpers
// ============================================================================

/// The last calendar day of the month containing `date`
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // The first of a month always exists, as does its predecessor
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap()
}

/// The last calendar day of the month before the one containing `date`
pub fn last_day_of_previous_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .and_then(|d| d.pred_opt())
        .unwrap()
}

/// Days left in `date`'s calendar month, not counting `date` itself
pub fn days_remaining_in_month(date: NaiveDate) -> i64 {
    i64::from(last_day_of_month(date).day()) - i64::from(date.day())
}

/// Whether `date` is the last day of its calendar month
pub fn is_last_day_of_month(date: NaiveDate) -> bool {
    date == last_day_of_month(date)
}

/// Whether two dates fall in the same calendar month
pub fn same_calendar_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
