//! Lot merge tests
//!
//! Tests for the unit-aware merge arithmetic and the input normalization
//! that feeds it: name canonicalization and measure parsing.

use proptest::prelude::*;

use shared::models::Unit;
use shared::validation::{merge_quantities, normalize_product_name, parse_measure};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Two deliveries of "the same" product land on one merge key
    #[test]
    fn test_names_canonicalize_to_one_key() {
        let variants = ["whole milk", "Whole Milk", "WHOLE MILK", "  whole   MILK "];
        for v in variants {
            assert_eq!(normalize_product_name(v), "Whole Milk");
        }
    }

    /// Same per-unit measure: plain addition, measure unchanged
    #[test]
    fn test_merge_same_measure() {
        assert_eq!(merge_quantities(10, 500, 4, 500), Ok((14, 500)));
    }

    /// Larger added measure converts into base-sized units
    #[test]
    fn test_merge_converts_larger_measure() {
        // 10 x 500g plus 4 x 1000g is 18 units of 500g
        assert_eq!(merge_quantities(10, 500, 4, 1000), Ok((18, 500)));
    }

    /// Smaller added measure rebases the existing lot instead
    #[test]
    fn test_merge_rebases_onto_smaller_measure() {
        assert_eq!(merge_quantities(4, 1000, 10, 500), Ok((18, 500)));
    }

    /// Partial units round up so stock is never under-counted
    #[test]
    fn test_merge_rounds_partial_units_up() {
        // Each 750g unit counts as ceil(750/500) = 2 base units
        assert_eq!(merge_quantities(10, 500, 3, 750), Ok((16, 500)));
    }

    /// Extreme measures either convert in range or error; they never wrap
    #[test]
    fn test_merge_extreme_measure_never_wraps() {
        // ceil(i64::MAX / 2) still fits, so this converts cleanly
        assert!(merge_quantities(1, 2, 1, i64::MAX).is_ok());
        // 2 units of i64::MAX grams cannot be counted in 1g base units
        assert!(merge_quantities(2, 1, 2, i64::MAX).is_err());
        assert!(merge_quantities(i64::MAX, i64::MAX, 1, 1).is_err());
    }

    /// Distinct raw spellings of a product land on one merge key, which is
    /// why a rename can collide with another lot
    #[test]
    fn test_rename_collides_on_shared_merge_key() {
        let a = normalize_product_name("whole MILK");
        let b = normalize_product_name("Whole milk");
        assert_eq!(a, b);
        assert_ne!(normalize_product_name("skim milk"), b);
    }

    /// Measures arrive as bare integers; a repeated suffix is an input error
    #[test]
    fn test_measure_suffix_is_rejected() {
        assert!(parse_measure(Unit::Mass, "500g").is_err());
        assert!(parse_measure(Unit::Volume, "250ML").is_err());
        assert_eq!(parse_measure(Unit::Mass, "500"), Ok(500));
    }

    /// Unit kinds carry their display suffix
    #[test]
    fn test_unit_suffixes() {
        assert_eq!(Unit::Mass.suffix(), "g");
        assert_eq!(Unit::Volume.suffix(), "ml");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn quantity_strategy() -> impl Strategy<Value = i64> {
        0i64..=10_000
    }

    fn measure_strategy() -> impl Strategy<Value = i64> {
        1i64..=10_000
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// The merged measure is always the smaller of the two inputs
        #[test]
        fn prop_merge_keeps_smaller_measure(
            eq in quantity_strategy(),
            em in measure_strategy(),
            aq in quantity_strategy(),
            am in measure_strategy(),
        ) {
            let (_, measure) = merge_quantities(eq, em, aq, am).unwrap();
            prop_assert_eq!(measure, em.min(am));
        }

        /// Merged total material never drops below either input's total;
        /// upward rounding can only add
        #[test]
        fn prop_merge_never_loses_material(
            eq in quantity_strategy(),
            em in measure_strategy(),
            aq in quantity_strategy(),
            am in measure_strategy(),
        ) {
            let (quantity, measure) = merge_quantities(eq, em, aq, am).unwrap();
            prop_assert!(quantity * measure >= eq * em.min(am) + aq * am.min(em));
            prop_assert!(quantity >= 0);
            prop_assert!(measure > 0);
        }

        /// Merging with a same-measure delivery is exact addition
        #[test]
        fn prop_same_measure_is_exact(
            eq in quantity_strategy(),
            aq in quantity_strategy(),
            m in measure_strategy(),
        ) {
            prop_assert_eq!(merge_quantities(eq, m, aq, m), Ok((eq + aq, m)));
        }

        /// For the full input domain the merge returns a value or an error;
        /// it never panics on internal arithmetic
        #[test]
        fn prop_merge_never_panics(
            eq in 0..i64::MAX,
            em in 1..i64::MAX,
            aq in 0..i64::MAX,
            am in 1..i64::MAX,
        ) {
            if let Ok((quantity, measure)) = merge_quantities(eq, em, aq, am) {
                prop_assert!(quantity >= 0);
                prop_assert_eq!(measure, em.min(am));
            }
        }

        /// Normalization is idempotent
        #[test]
        fn prop_normalize_idempotent(name in "[a-zA-Z ]{0,40}") {
            let once = normalize_product_name(&name);
            prop_assert_eq!(normalize_product_name(&once), once);
        }
    }
}
