//! Test fixtures and helpers.
//!
//! The sample records are the RON files shipped in
//! `statline_core/data/units`, embedded at compile time so tests behave the
//! same from any working directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use statline_core::record::{SourceKind, UnitRecord};

/// Sample record files as `(display name, RON text)`.
pub const SAMPLE_UNITS: &[(&str, &str)] = &[
    (
        "Scout SC-1",
        include_str!("../../statline_core/data/units/Scout SC-1.ron"),
    ),
    (
        "Catapult CPLT-C1",
        include_str!("../../statline_core/data/units/Catapult CPLT-C1.ron"),
    ),
    (
        "Harasser HRS-1",
        include_str!("../../statline_core/data/units/Harasser HRS-1.ron"),
    ),
    (
        "Elemental Point",
        include_str!("../../statline_core/data/units/Elemental Point.ron"),
    ),
    (
        "Rifle Platoon",
        include_str!("../../statline_core/data/units/Rifle Platoon.ron"),
    ),
    (
        "Sabre SB-27",
        include_str!("../../statline_core/data/units/Sabre SB-27.ron"),
    ),
    (
        "Union Dropship",
        include_str!("../../statline_core/data/units/Union Dropship.ron"),
    ),
];

/// Load a sample record by display name.
///
/// # Panics
///
/// Panics if no sample has that name or its RON does not parse.
#[must_use]
pub fn sample(name: &str) -> UnitRecord {
    let (_, text) = SAMPLE_UNITS
        .iter()
        .find(|(sample, _)| *sample == name)
        .unwrap_or_else(|| panic!("no sample unit named '{name}'"));
    UnitRecord::from_ron(text, name).unwrap_or_else(|e| panic!("sample '{name}': {e}"))
}

/// Every sample record, in [`SAMPLE_UNITS`] order.
#[must_use]
pub fn all_samples() -> Vec<UnitRecord> {
    SAMPLE_UNITS.iter().map(|(name, _)| sample(name)).collect()
}

/// 20 ton mek with one medium laser and gunnery 3.
#[must_use]
pub fn scout() -> UnitRecord {
    sample("Scout SC-1")
}

/// 65 ton missile mek with jump jets.
#[must_use]
pub fn catapult() -> UnitRecord {
    sample("Catapult CPLT-C1")
}

/// Hover tank with a missile turret.
#[must_use]
pub fn harasser() -> UnitRecord {
    sample("Harasser HRS-1")
}

/// Five-trooper battle armor.
#[must_use]
pub fn elemental_point() -> UnitRecord {
    sample("Elemental Point")
}

/// Foot infantry platoon.
#[must_use]
pub fn rifle_platoon() -> UnitRecord {
    sample("Rifle Platoon")
}

/// Aerospace fighter.
#[must_use]
pub fn sabre() -> UnitRecord {
    sample("Sabre SB-27")
}

/// Spheroid dropship with transport bays.
#[must_use]
pub fn union_dropship() -> UnitRecord {
    sample("Union Dropship")
}

/// A record with only a chassis and a kind.
///
/// # Panics
///
/// Panics if the generated RON does not parse.
#[must_use]
pub fn bare_record(chassis: &str, kind: SourceKind) -> UnitRecord {
    let text = format!("UnitRecord(chassis: {chassis:?}, kind: {kind:?})");
    UnitRecord::from_ron(&text, chassis).unwrap_or_else(|e| panic!("bare record: {e}"))
}

/// Serialize a record as pretty RON.
///
/// # Panics
///
/// Panics if the record cannot be serialized.
#[must_use]
pub fn record_to_ron(record: &UnitRecord) -> String {
    ron::ser::to_string_pretty(record, ron::ser::PrettyConfig::default())
        .unwrap_or_else(|e| panic!("serialize '{}': {e}", record.display_name()))
}

/// Write every sample record into `dir` as `<name>.ron`.
///
/// Returns the written paths in [`SAMPLE_UNITS`] order.
pub fn write_samples(dir: &Path) -> io::Result<Vec<PathBuf>> {
    SAMPLE_UNITS
        .iter()
        .map(|(name, text)| {
            let path = dir.join(format!("{name}.ron"));
            fs::write(&path, text)?;
            Ok(path)
        })
        .collect()
}
