//! End-to-end conversion of the sample units.

use statline_core::prelude::*;
use statline_core::export::{arc_lines, element_line};
use statline_test_utils::fixtures;

fn convert_default(record: &UnitRecord) -> ConvertedElement {
    convert(record, false).unwrap()
}

// =============================================================================
// Ground units
// =============================================================================

mod ground {
    use super::*;

    #[test]
    fn test_scout_statline() {
        let element = convert_default(&fixtures::scout());
        assert_eq!(element.category, UnitCategory::BM);
        assert_eq!(element.standard_damage().unwrap().to_string(), "1/1/0");
        assert_eq!(element.overheat, 0);
        assert_eq!(element.point_value(), 11);
        assert_eq!(
            element_line(&element),
            "Scout\tSC-1\t11\tBM\t1\t1\t0\t8\"\t2\t-\t2\t1/1/0\tENE"
        );
    }

    #[test]
    fn test_catapult_fire_support() {
        let element = convert_default(&fixtures::catapult());
        assert_eq!(element.category, UnitCategory::BM);
        assert_eq!(element.size, 3);
        assert!(element.movement.has_jump());
        assert!(element.abilities.contains(AbilityTag::If));
        assert!(element.abilities.contains(AbilityTag::Case));
        assert!(!element.abilities.contains(AbilityTag::Ene));
    }

    #[test]
    fn test_harasser_turret() {
        let element = convert_default(&fixtures::harasser());
        assert_eq!(element.category, UnitCategory::CV);
        assert_eq!(element.tmm, 3);
        assert!(element.abilities.arc(AbilityTag::Tur).is_some());
        assert!(element.threshold.is_none());
    }

    #[test]
    fn test_heat_within_capacity_changes_nothing() {
        let record = fixtures::scout();
        let element = convert_default(&record);
        let mut cooler = record.clone();
        cooler.heat_dissipation = 30;
        let cooled = convert_default(&cooler);
        assert_eq!(cooled.standard_damage(), element.standard_damage());
        assert_eq!(cooled.overheat, 0);
    }
}

// =============================================================================
// Infantry
// =============================================================================

mod infantry {
    use super::*;

    #[test]
    fn test_battle_armor_point() {
        let element = convert_default(&fixtures::elemental_point());
        assert_eq!(element.category, UnitCategory::BA);
        assert_eq!(element.durability.armor, 2);
        assert_eq!(element.tmm, 2);
        assert!(element.abilities.contains(AbilityTag::Xmec));
        assert!(!element.abilities.contains(AbilityTag::Mec));
    }

    #[test]
    fn test_conventional_infantry_has_armor() {
        let element = convert_default(&fixtures::rifle_platoon());
        assert_eq!(element.category, UnitCategory::CI);
        assert_eq!(element.durability.armor, 1);
        assert_eq!(element.tmm, 1);
        assert!(element.point_value() >= 1);
    }
}

// =============================================================================
// Aerospace
// =============================================================================

mod aerospace {
    use super::*;

    #[test]
    fn test_fighter() {
        let element = convert_default(&fixtures::sabre());
        assert_eq!(element.category, UnitCategory::AF);
        assert_eq!(element.tmm, 0);
        assert!(element.threshold.is_some());
        assert_eq!(element.abilities.int(AbilityTag::Bomb), Some(1));
        assert!(!element.uses_arcs());
        assert!(arc_lines(&element).is_empty());
    }

    #[test]
    fn test_dropship_arcs_replace_standard_damage() {
        let element = convert_default(&fixtures::union_dropship());
        assert_eq!(element.category, UnitCategory::DS);
        assert!(element.uses_arcs());
        assert!(element.standard_damage().is_none());
        assert!(element.damage.arc(Facing::Front).unwrap().standard().has_damage());
        assert!(element.damage.arc(Facing::Rear).unwrap().standard().has_damage());

        let line = ability_line(&element.abilities);
        assert!(line.contains("MT12D2"), "{line}");
        assert!(line.contains("AT2D1"), "{line}");
        assert!(line.contains("CT71.5D1"), "{line}");

        let text = export(&element);
        assert_eq!(text.lines().count(), 5);
        assert!(element_line(&element).split('\t').nth(11).unwrap().is_empty());
    }

    #[test]
    fn test_dropship_arc_lines_parse_back() {
        let element = convert_default(&fixtures::union_dropship());
        let lines = arc_lines(&element);
        assert_eq!(lines.len(), Facing::ALL.len());
        for line in &lines {
            let (facing, arc) = parse_arc_line(line).unwrap();
            assert_eq!(element.damage.arc(facing), Some(&arc), "{line}");
        }
    }
}

// =============================================================================
// Whole-library properties
// =============================================================================

mod library {
    use super::*;
    use proptest::prelude::*;
    use statline_test_utils::determinism::strategies::{arb_skill, arb_unit_record};

    #[test]
    fn test_every_sample_converts() {
        for record in fixtures::all_samples() {
            let element = convert_default(&record);
            assert!(element.point_value() >= 1, "{}", record.display_name());
            assert_eq!(element.name(), record.display_name());
            assert_eq!(element.durability.current_armor, element.durability.armor);
        }
    }

    #[test]
    fn test_ability_lines_parse_back() {
        for record in fixtures::all_samples() {
            let element = convert_default(&record);
            let line = ability_line(&element.abilities);
            let parsed = parse_abilities(&line).unwrap();
            assert_eq!(ability_line(&parsed), line, "{}", record.display_name());
        }
    }

    #[test]
    fn test_unconvertible_kind() {
        let pod = fixtures::bare_record("Pod", statline_core::record::SourceKind::EscapePod);
        assert!(matches!(
            convert(&pod, false),
            Err(ConversionError::UnconvertibleCategory { .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_point_value_is_positive(record in arb_unit_record(), skill in arb_skill()) {
            let options = ConversionOptions {
                include_crew_skill: false,
                default_skill: skill,
            };
            let element = Converter::new(options).convert(&record).unwrap();
            prop_assert!(element.point_value() >= 1);
            prop_assert!(element.overheat <= 4);
            prop_assert!(!element.uses_arcs());
            prop_assert!(element.standard_damage().is_some());
        }

        #[test]
        fn prop_conversion_never_touches_the_live_record(record in arb_unit_record()) {
            let before = record.clone();
            let _ = convert(&record, true);
            prop_assert_eq!(record, before);
        }
    }
}
