//! File-backed conversion and validation tests.

use std::fs;

use statline_core::convert::{ConversionOptions, Converter};
use statline_core::error::ConversionError;
use statline_core::record::BattleDamage;
use statline_test_utils::fixtures;
use statline_tools::batch::{convert_path, load_options, load_record, record_files};
use statline_tools::validate::{validate_data_directory, validate_file};
use statline_tools::{DirectorySource, ToolError};
use tempfile::TempDir;

fn sample_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fixtures::write_samples(dir.path()).unwrap();
    dir
}

// =============================================================================
// Batch conversion
// =============================================================================

mod batch {
    use super::*;

    #[test]
    fn test_directory_converts_every_sample() {
        let dir = sample_dir();
        fs::write(dir.path().join("notes.txt"), "not a record").unwrap();

        let entries = convert_path(dir.path(), ConversionOptions::default()).unwrap();
        assert_eq!(entries.len(), fixtures::SAMPLE_UNITS.len());
        assert!(entries.iter().all(|entry| entry.is_ok()));

        let mut names: Vec<String> = entries
            .iter()
            .map(|entry| entry.element.as_ref().unwrap().name())
            .collect();
        let mut expected: Vec<String> = fixtures::SAMPLE_UNITS
            .iter()
            .map(|(name, _)| (*name).to_string())
            .collect();
        names.sort();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_bad_file_does_not_stop_the_batch() {
        let dir = sample_dir();
        fs::write(dir.path().join("Broken.ron"), "UnitRecord(").unwrap();

        let entries = convert_path(dir.path(), ConversionOptions::default()).unwrap();
        assert_eq!(entries.len(), fixtures::SAMPLE_UNITS.len() + 1);
        let failed: Vec<_> = entries.iter().filter(|entry| !entry.is_ok()).collect();
        assert_eq!(failed.len(), 1);
        assert!(failed[0].file.ends_with("Broken.ron"));
        assert!(failed[0].error.as_ref().unwrap().contains("Broken.ron"));
    }

    #[test]
    fn test_single_file() {
        let dir = sample_dir();
        let entries = convert_path(
            &dir.path().join("Scout SC-1.ron"),
            ConversionOptions::with_crew_skill(true),
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].element.as_ref().unwrap().point_value(), 13);
    }

    #[test]
    fn test_missing_directory_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = record_files(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, ToolError::Io { .. }));
    }

    #[test]
    fn test_json_output_shape() {
        let dir = sample_dir();
        let entries = convert_path(
            &dir.path().join("Union Dropship.ron"),
            ConversionOptions::default(),
        )
        .unwrap();
        let json: serde_json::Value = serde_json::to_value(&entries).unwrap();
        let element = &json[0]["element"];
        assert_eq!(element["chassis"], "Union");
        assert!(json[0].get("error").is_none());
    }

    #[test]
    fn test_options_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("options.ron");
        fs::write(&path, "(include_crew_skill: true, default_skill: 2)").unwrap();
        let options = load_options(&path).unwrap();
        assert!(options.include_crew_skill);
        assert_eq!(options.default_skill, 2);

        fs::write(&path, "(include_crew_skill: maybe)").unwrap();
        assert!(matches!(load_options(&path), Err(ToolError::Options { .. })));
    }
}

// =============================================================================
// Directory snapshots
// =============================================================================

mod snapshots {
    use super::*;

    #[test]
    fn test_directory_source_ignores_live_state() {
        let dir = sample_dir();
        let mut live = load_record(&dir.path().join("Scout SC-1.ron")).unwrap();
        live.armor.points = 0;
        live.damage = Some(BattleDamage {
            armor_lost: 30,
            ..BattleDamage::default()
        });

        let converter =
            Converter::with_source(DirectorySource::new(dir.path()), ConversionOptions::default());
        let element = converter.convert(&live).unwrap();
        assert_eq!(element.durability.armor, 2);
        assert_eq!(element.point_value(), 11);
    }

    #[test]
    fn test_unknown_unit_has_no_snapshot() {
        let dir = sample_dir();
        let live = fixtures::bare_record("Nobody", statline_core::record::SourceKind::Mek);
        let converter =
            Converter::with_source(DirectorySource::new(dir.path()), ConversionOptions::default());
        let err = converter.convert(&live).unwrap_err();
        assert!(matches!(err, ConversionError::SnapshotUnavailable { .. }));
    }
}

// =============================================================================
// Validation
// =============================================================================

mod validation {
    use super::*;

    #[test]
    fn test_samples_are_valid() {
        let dir = sample_dir();
        let reports = validate_data_directory(dir.path()).unwrap();
        assert_eq!(reports.len(), fixtures::SAMPLE_UNITS.len());
        assert!(reports.iter().all(|r| r.is_valid()), "{reports:?}");
    }

    #[test]
    fn test_problems_are_reported_per_file() {
        let dir = TempDir::new().unwrap();
        let pod = dir.path().join("Pod.ron");
        fs::write(&pod, "UnitRecord(chassis: \"Pod\", kind: EscapePod)").unwrap();
        let platoon = dir.path().join("Platoon.ron");
        fs::write(&platoon, "UnitRecord(chassis: \"Platoon\", kind: Infantry)").unwrap();

        let report = validate_file(&pod);
        assert_eq!(report.problems.len(), 1);
        assert!(report.problems[0].contains("cannot be converted"));

        let reports = validate_data_directory(dir.path()).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| !r.is_valid()));
    }
}
