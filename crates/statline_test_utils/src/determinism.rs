//! Determinism testing utilities.
//!
//! Conversion must be a pure function of the record and the options: the
//! same record converted twice, or on eight threads at once, yields the
//! same statline. Sources of non-determinism to guard against:
//!
//! - **Map iteration order**: catalogs and tallies are keyed by ordered
//!   maps so float sums always run in the same order.
//! - **Shared state**: the converter never caches across calls.
//! - **Live record mutation**: conversion works on a private snapshot.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: individual stages (aggregation, heat, abilities)
//! 2. **Property tests**: random records still convert deterministically
//! 3. **Parallel tests**: N concurrent conversions all match

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use statline_core::convert::{ConversionOptions, Converter};
use statline_core::element::ConvertedElement;
use statline_core::error::Result;
use statline_core::export;
use statline_core::record::UnitRecord;
use tracing::debug;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Unit that was converted.
    pub unit: String,
}

impl DeterminismResult {
    fn from_hashes(unit: String, hashes: Vec<u64>) -> Self {
        Self {
            is_deterministic: hashes.windows(2).all(|w| w[0] == w[1]),
            hashes,
            unit,
        }
    }

    /// Get all unique hashes (should be 1 for a deterministic conversion).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that every run matched, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Conversion is non-deterministic!\n\
                 Unit: {}\n\
                 Runs: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.unit,
                self.hashes.len(),
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Hash of everything a converted element carries.
///
/// Elements hold floating-point ability values, so the hash is taken over
/// their debug rendering rather than the values themselves.
#[must_use]
pub fn element_hash(element: &ConvertedElement) -> u64 {
    compute_hash(&format!("{element:?}"))
}

/// Hash of a conversion outcome, including failures.
#[must_use]
pub fn outcome_hash(outcome: &Result<ConvertedElement>) -> u64 {
    match outcome {
        Ok(element) => element_hash(element),
        Err(err) => compute_hash(&err.to_string()),
    }
}

/// Convert `record` `runs` times in sequence and compare the results.
pub fn verify_conversion_determinism(
    record: &UnitRecord,
    options: ConversionOptions,
    runs: usize,
) -> DeterminismResult {
    let converter = Converter::new(options);
    let hashes = (0..runs)
        .map(|_| outcome_hash(&converter.convert(record)))
        .collect();
    let result = DeterminismResult::from_hashes(record.display_name(), hashes);
    debug!(
        unit = %result.unit,
        runs,
        deterministic = result.is_deterministic,
        "Verified conversion determinism"
    );
    result
}

/// Convert `record` on `num_threads` scoped threads at once.
///
/// # Panics
///
/// Panics if a conversion thread panics.
pub fn run_parallel_conversions_scoped(
    record: &UnitRecord,
    options: ConversionOptions,
    num_threads: usize,
) -> DeterminismResult {
    let converter = Converter::new(options);
    let hashes = thread::scope(|s| {
        let handles: Vec<_> = (0..num_threads)
            .map(|_| s.spawn(|| outcome_hash(&converter.convert(record))))
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    DeterminismResult::from_hashes(record.display_name(), hashes)
}

/// Convert twice and check that both exports are identical text.
///
/// Returns `false` when the exports differ or either conversion fails.
pub fn verify_export_determinism(record: &UnitRecord, options: ConversionOptions) -> bool {
    let converter = Converter::new(options);
    match (converter.convert(record), converter.convert(record)) {
        (Ok(first), Ok(second)) => export::export(&first) == export::export(&second),
        _ => false,
    }
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for conversion testing.
///
/// Records are generated as RON text from a small set of weapon templates
/// and then parsed, so every generated record is one a data file could
/// contain.
pub mod strategies {
    use proptest::prelude::*;
    use statline_core::record::UnitRecord;

    /// Weapon templates as `(name, profile RON, ammo pool)`.
    const WEAPONS: &[(&str, &str, Option<&str>)] = &[
        (
            "Medium Laser",
            "(damage: 5.0, heat: 3, ranges: (3, 6, 9, 0), direct_fire: true)",
            None,
        ),
        (
            "Small Laser",
            "(damage: 3.0, heat: 1, ranges: (1, 2, 3, 0), direct_fire: true)",
            None,
        ),
        (
            "PPC",
            "(damage: 10.0, heat: 10, ranges: (6, 12, 18, 0), min_range: 3, direct_fire: true)",
            None,
        ),
        (
            "LRM 10",
            "(family: Lrm, damage: 6.0, heat: 4, ranges: (7, 14, 21, 0), min_range: 6, \
             uses_ammo: true, indirect_fire: true)",
            Some("LRM"),
        ),
        (
            "SRM 6",
            "(family: Srm, damage: 8.0, heat: 4, ranges: (3, 6, 9, 0), uses_ammo: true)",
            Some("SRM"),
        ),
        (
            "AC/10",
            "(family: Autocannon, damage: 10.0, heat: 3, ranges: (5, 10, 15, 0), \
             uses_ammo: true, direct_fire: true)",
            Some("AC"),
        ),
    ];

    const MEK_LOCATIONS: &[&str] = &[
        "CenterTorso",
        "LeftTorso",
        "RightTorso",
        "LeftArm",
        "RightArm",
        "Head",
    ];

    const VEHICLE_LOCATIONS: &[&str] = &["Front", "Left", "Right", "Rear", "Body"];

    const AMMO: &str = "[(pool: \"LRM\", shots: 24), (pool: \"SRM\", shots: 30), \
                        (pool: \"AC\", shots: 20)]";

    /// Raw damage for one range band.
    pub fn arb_raw_damage() -> impl Strategy<Value = f64> {
        0.0f64..30.0f64
    }

    /// Raw per-band damage for `bands` bands.
    pub fn arb_raw_bands(bands: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(arb_raw_damage(), bands)
    }

    /// A sequence of real-valued merges in tenths, some of them negative.
    pub fn arb_merge_sequence(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(
            (-500i32..1000i32).prop_map(|tenths| f64::from(tenths) / 10.0),
            1..max_len,
        )
    }

    /// Skill ratings from elite to green.
    pub fn arb_skill() -> impl Strategy<Value = i32> {
        0i32..8i32
    }

    fn weapon_entry(template: usize, location: &str, count: u32, turret: bool) -> String {
        let (name, profile, pool) = WEAPONS[template % WEAPONS.len()];
        let pool = pool.map_or_else(String::new, |p| format!("ammo_pool: Some({p:?}), "));
        format!(
            "(name: {name:?}, location: {location}, turret: {turret}, count: {count}, \
             {pool}profile: {profile})"
        )
    }

    fn parse(text: &str) -> UnitRecord {
        UnitRecord::from_ron(text, "generated").unwrap_or_else(|e| panic!("{e}\n{text}"))
    }

    /// Weapons as `(template, location, count)`.
    fn arb_loadout(locations: usize) -> impl Strategy<Value = Vec<(usize, usize, u32)>> {
        proptest::collection::vec((0..WEAPONS.len(), 0..locations, 1u32..4u32), 0..6)
    }

    /// A BattleMek with random movement, armor and weapons.
    pub fn arb_mek_record() -> impl Strategy<Value = UnitRecord> {
        (
            4u32..=20u32,
            1u32..=8u32,
            0u32..=8u32,
            0u32..=300u32,
            10i32..=150i32,
            10i32..=30i32,
            arb_loadout(MEK_LOCATIONS.len()),
        )
            .prop_map(|(tons, walk, jump, armor, structure, sinks, loadout)| {
                let weapons: Vec<String> = loadout
                    .iter()
                    .map(|(t, l, c)| weapon_entry(*t, MEK_LOCATIONS[*l], *c, false))
                    .collect();
                parse(&format!(
                    "UnitRecord(chassis: \"Generated\", model: \"MK\", kind: Mek, \
                     tonnage: {tonnage:.1}, movement: (walk: {walk}, jump: {jump}), \
                     armor: (points: {armor}), structure: {structure}, \
                     heat_dissipation: {sinks}, weapons: [{weapons}], ammo: {AMMO})",
                    tonnage = f64::from(tons * 5),
                    jump = jump.min(walk),
                    weapons = weapons.join(", "),
                ))
            })
    }

    /// A combat vehicle, sometimes with turret-mounted weapons.
    pub fn arb_vehicle_record() -> impl Strategy<Value = UnitRecord> {
        (
            2u32..=20u32,
            1u32..=10u32,
            prop_oneof![Just("Tracked"), Just("Wheeled"), Just("Hover")],
            0u32..=200u32,
            1i32..=40i32,
            arb_loadout(VEHICLE_LOCATIONS.len()),
            any::<bool>(),
        )
            .prop_map(|(tons, cruise, motive, armor, structure, loadout, turret)| {
                let weapons: Vec<String> = loadout
                    .iter()
                    .enumerate()
                    .map(|(i, (t, l, c))| {
                        weapon_entry(*t, VEHICLE_LOCATIONS[*l], *c, turret && i % 2 == 0)
                    })
                    .collect();
                parse(&format!(
                    "UnitRecord(chassis: \"Generated\", model: \"CV\", kind: Tank, \
                     tonnage: {tonnage:.1}, movement: (walk: {cruise}, motive: {motive}), \
                     armor: (points: {armor}), structure: {structure}, \
                     weapons: [{weapons}], ammo: {AMMO})",
                    tonnage = f64::from(tons * 5),
                    weapons = weapons.join(", "),
                ))
            })
    }

    /// Any generated ground record.
    pub fn arb_unit_record() -> impl Strategy<Value = UnitRecord> {
        prop_oneof![arb_mek_record(), arb_vehicle_record()]
    }
}
