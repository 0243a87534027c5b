//! Statistics and month-boundary tests
//!
//! Tests for progress ratios and the calendar arithmetic behind the
//! month-end snapshot job.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use shared::stock::{
    days_remaining_in_month, is_last_day_of_month, last_day_of_month,
    last_day_of_previous_month, progress_ratio, same_calendar_month, whole_history_progress,
    StockBreakdown, StockError,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// An empty pantry has made zero progress, not an error
    #[test]
    fn test_empty_pantry_progress_is_zero() {
        assert_eq!(progress_ratio(&StockBreakdown::default()), Decimal::ZERO);
    }

    /// Progress is consumed over everything, as a percentage
    #[test]
    fn test_progress_ratio_formula() {
        let b = StockBreakdown {
            in_stock: 6,
            consumed: 3,
            expired: 1,
        };
        // 3 / 10 * 100
        assert_eq!(progress_ratio(&b), Decimal::from(30));
    }

    /// Fully consumed stock is exactly 100 percent
    #[test]
    fn test_progress_ratio_upper_bound() {
        let b = StockBreakdown {
            in_stock: 0,
            consumed: 7,
            expired: 0,
        };
        assert_eq!(progress_ratio(&b), Decimal::from(100));
    }

    /// No pre-month consumption means no whole-history figure
    #[test]
    fn test_whole_history_absent_without_consumption() {
        assert_eq!(whole_history_progress(0, 50), Ok(None));
    }

    /// Consumption with no recorded pre-month stock is a broken ledger
    #[test]
    fn test_whole_history_zero_denominator() {
        assert_eq!(
            whole_history_progress(5, 0),
            Err(StockError::ZeroDenominator)
        );
    }

    /// Month-end detection across ordinary, leap and year-end months
    #[test]
    fn test_month_end_detection() {
        assert!(is_last_day_of_month(date(2024, 1, 31)));
        assert!(is_last_day_of_month(date(2024, 2, 29)));
        assert!(is_last_day_of_month(date(2023, 2, 28)));
        assert!(is_last_day_of_month(date(2024, 12, 31)));
        assert!(!is_last_day_of_month(date(2024, 2, 28)));
    }

    /// The previous-month boundary used to scope history figures
    #[test]
    fn test_previous_month_boundary() {
        assert_eq!(last_day_of_previous_month(date(2024, 3, 15)), date(2024, 2, 29));
        assert_eq!(last_day_of_previous_month(date(2024, 1, 10)), date(2023, 12, 31));
    }

    /// Remaining days count down to zero on the last day
    #[test]
    fn test_days_remaining() {
        assert_eq!(days_remaining_in_month(date(2024, 6, 1)), 29);
        assert_eq!(days_remaining_in_month(date(2024, 6, 29)), 1);
        assert_eq!(days_remaining_in_month(date(2024, 6, 30)), 0);
    }

    /// Month scoping for the current-progress consumption term
    #[test]
    fn test_same_calendar_month_scoping() {
        assert!(same_calendar_month(date(2024, 6, 1), date(2024, 6, 30)));
        assert!(!same_calendar_month(date(2024, 6, 30), date(2024, 7, 1)));
        assert!(!same_calendar_month(date(2023, 6, 15), date(2024, 6, 15)));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn breakdown_strategy() -> impl Strategy<Value = StockBreakdown> {
        (0i64..=1000, 0i64..=1000, 0i64..=1000).prop_map(|(in_stock, consumed, expired)| {
            StockBreakdown {
                in_stock,
                consumed,
                expired,
            }
        })
    }

    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (0u32..=3000).prop_map(|offset| date(2020, 1, 1) + chrono::Days::new(u64::from(offset)))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Progress is always within [0, 100]
        #[test]
        fn prop_progress_bounded(b in breakdown_strategy()) {
            let p = progress_ratio(&b);
            prop_assert!(p >= Decimal::ZERO);
            prop_assert!(p <= Decimal::from(100));
        }

        /// Exactly one day per month is the snapshot day
        #[test]
        fn prop_one_snapshot_day_per_month(d in date_strategy()) {
            let end = last_day_of_month(d);
            prop_assert!(is_last_day_of_month(end));
            prop_assert!(same_calendar_month(d, end));
            // No later day shares the month
            prop_assert!(!same_calendar_month(end + chrono::Days::new(1), end));
        }

        /// Remaining days is non-negative and zero only at month end
        #[test]
        fn prop_days_remaining_consistent(d in date_strategy()) {
            let remaining = days_remaining_in_month(d);
            prop_assert!(remaining >= 0);
            prop_assert_eq!(remaining == 0, is_last_day_of_month(d));
        }

        /// The previous-month boundary is always the day before the first
        /// of the current month
        #[test]
        fn prop_previous_month_boundary(d in date_strategy()) {
            let boundary = last_day_of_previous_month(d);
            prop_assert!(is_last_day_of_month(boundary));
            prop_assert!(boundary < d);
            prop_assert!(!same_calendar_month(boundary, d));
            // The day after the boundary is the first of d's month
            prop_assert!(same_calendar_month(boundary + chrono::Days::new(1), d));
        }
    }
}
