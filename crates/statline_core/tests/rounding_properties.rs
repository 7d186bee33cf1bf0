//! Property tests for rounding, damage vectors and the ability catalog.

use proptest::prelude::*;
use statline_core::ability::{AbilityCatalog, AbilityTag};
use statline_core::convert::heat::heat_delta;
use statline_core::damage::{DamageValue, DamageVector};
use statline_core::math::{round_up, round_up_to_tenth};
use statline_test_utils::determinism::strategies::{
    arb_merge_sequence, arb_raw_bands, arb_raw_damage,
};

// =============================================================================
// Rounding
// =============================================================================

mod rounding {
    use super::*;

    #[test]
    fn test_heat_delta_reference_point() {
        // 4 damage, 10 capacity, 20 heat: 4 - round_up(2.5)
        assert_eq!(heat_delta(4.0, 10.0, 20.0), 1.0);
    }

    #[test]
    fn test_representation_noise_stays_put() {
        assert_eq!(round_up_to_tenth(0.1 + 0.2), 0.3);
        assert_eq!(round_up_to_tenth(0.31), 0.4);
        assert_eq!(round_up(1.05), 1.0);
    }

    proptest! {
        #[test]
        fn prop_round_up_to_tenth_is_idempotent(x in arb_raw_damage()) {
            let once = round_up_to_tenth(x);
            prop_assert_eq!(round_up_to_tenth(once), once);
            prop_assert!(once >= x - 0.006);
        }

        #[test]
        fn prop_dual_round_up_never_below_normal(x in arb_raw_damage()) {
            let up = DamageValue::dual_rounded_up(x);
            let normal = DamageValue::dual_rounded_normal(x);
            prop_assert!(up.as_points() >= normal.as_points());
            prop_assert_eq!(up.is_zero(), normal.is_zero());
        }

        #[test]
        fn prop_minimal_only_below_half(x in arb_raw_damage()) {
            let value = DamageValue::dual_rounded_normal(x);
            if value.is_minimal() {
                prop_assert!(round_up_to_tenth(x) < 0.5);
                prop_assert_eq!(value.magnitude(), 0);
            }
        }
    }
}

// =============================================================================
// Damage vectors
// =============================================================================

mod vectors {
    use super::*;

    proptest! {
        #[test]
        fn prop_serialization_round_trip(
            raw in arb_raw_bands(4),
            bands in 1usize..=4,
            standard in any::<bool>(),
        ) {
            let vector = DamageVector::dual_rounded_up(&raw, bands, standard);
            let parsed = DamageVector::parse(&vector.to_string_for_serialization()).unwrap();
            prop_assert_eq!(parsed, vector);
        }

        #[test]
        fn prop_band_count_is_respected(raw in arb_raw_bands(4), bands in 1usize..=4) {
            let vector = DamageVector::dual_rounded_normal(&raw, bands, true);
            prop_assert_eq!(vector.range_bands(), bands);
            prop_assert_eq!(vector.values().count(), bands);
            prop_assert!(vector.band(bands).is_zero());
        }
    }
}

// =============================================================================
// Ability catalog
// =============================================================================

mod catalog {
    use super::*;

    #[test]
    fn test_merge_to_zero_removes_tag() {
        let mut catalog = AbilityCatalog::new();
        catalog.merge_real(AbilityTag::Ct, 12.5).unwrap();
        catalog.merge_real(AbilityTag::Ct, -12.5).unwrap();
        assert!(!catalog.contains(AbilityTag::Ct));
    }

    #[test]
    fn test_decimal_merges_cancel_exactly() {
        let mut catalog = AbilityCatalog::new();
        for delta in [0.1, 0.2, -0.3] {
            catalog.merge_real(AbilityTag::Ct, delta).unwrap();
        }
        assert!(!catalog.contains(AbilityTag::Ct));
    }

    proptest! {
        #[test]
        fn prop_merge_real_tracks_positive_sum(deltas in arb_merge_sequence(12)) {
            let mut catalog = AbilityCatalog::new();
            let mut expected_tenths = 0i64;
            for delta in &deltas {
                catalog.merge_real(AbilityTag::Ct, *delta).unwrap();
                expected_tenths = (expected_tenths + (delta * 10.0).round() as i64).max(0);
                let expected = expected_tenths as f64 / 10.0;
                prop_assert_eq!(catalog.contains(AbilityTag::Ct), expected_tenths > 0);
                prop_assert_eq!(catalog.number(AbilityTag::Ct).unwrap_or(0.0), expected);
            }
        }

        #[test]
        fn prop_merge_int_adds(counts in proptest::collection::vec(1i64..20, 1..8)) {
            let mut catalog = AbilityCatalog::new();
            for n in &counts {
                catalog.merge_int(AbilityTag::Mash, *n).unwrap();
            }
            prop_assert_eq!(catalog.int(AbilityTag::Mash), Some(counts.iter().sum::<i64>()));
        }
    }
}
