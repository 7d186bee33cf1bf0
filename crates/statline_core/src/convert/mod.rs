//! Conversion pipeline.
//!
//! [`Converter::convert`] runs every stage once, in a fixed order, on a
//! private undamaged copy of the caller's record:
//!
//! 1. snapshot ([`SnapshotSource`])
//! 2. [`classify`]
//! 3. physical [`profile`]
//! 4. weapon [`damage`] aggregation
//! 5. [`heat`] adjustment
//! 6. ability detection ([`abilities`])
//! 7. rounding and damage abilities ([`finalize`])
//! 8. [`points`]

pub mod abilities;
pub mod classify;
pub mod damage;
pub mod finalize;
pub mod heat;
pub mod points;
pub mod profile;

pub use classify::{classify, UnitCategory};
pub use damage::{DamageTally, Facing, SpecialClass};
pub use heat::HeatOutcome;
pub use profile::Profile;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::element::{ConvertedElement, Durability};
use crate::error::Result;
use crate::record::{CleanCopy, SnapshotSource, UnitRecord};

fn default_skill() -> i32 {
    4
}

/// Options for a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Use the crew's gunnery skill instead of `default_skill`.
    #[serde(default)]
    pub include_crew_skill: bool,
    /// Skill used when crew skill is not included.
    #[serde(default = "default_skill")]
    pub default_skill: i32,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            include_crew_skill: false,
            default_skill: default_skill(),
        }
    }
}

impl ConversionOptions {
    /// Options with crew skill switched on or off.
    #[must_use]
    pub fn with_crew_skill(include_crew_skill: bool) -> Self {
        Self {
            include_crew_skill,
            ..Self::default()
        }
    }

    /// Skill rating to score `record` at.
    #[must_use]
    pub fn skill_for(&self, record: &UnitRecord) -> i32 {
        if self.include_crew_skill {
            record.crew.gunnery
        } else {
            self.default_skill
        }
    }
}

/// Runs conversions against a snapshot source.
///
/// # Example
///
/// ```
/// use statline_core::convert::{ConversionOptions, Converter};
/// use statline_core::record::UnitRecord;
///
/// let record = UnitRecord::from_ron(
///     "UnitRecord(chassis: \"Scout\", kind: Mek, tonnage: 20.0, movement: (walk: 6))",
///     "doc",
/// )
/// .unwrap();
/// let element = Converter::new(ConversionOptions::default()).convert(&record).unwrap();
/// assert!(element.point_value() >= 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter<S = CleanCopy> {
    snapshots: S,
    options: ConversionOptions,
}

impl Converter<CleanCopy> {
    /// Converter that snapshots by cloning the live record.
    #[must_use]
    pub fn new(options: ConversionOptions) -> Self {
        Self {
            snapshots: CleanCopy,
            options,
        }
    }
}

impl<S: SnapshotSource> Converter<S> {
    /// Converter with a custom snapshot source.
    pub fn with_source(snapshots: S, options: ConversionOptions) -> Self {
        Self { snapshots, options }
    }

    /// Options in use.
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert a live record into a statline.
    ///
    /// The live record is only read; every stage works on the snapshot.
    pub fn convert(&self, live: &UnitRecord) -> Result<ConvertedElement> {
        let record = self.snapshots.undamaged(live)?;
        let category = classify(&record)?;
        let profile = profile::build_profile(&record, category);

        let mut tally = damage::aggregate(&record, category)?;
        let heat = heat::adjust(&record, category, &mut tally);
        let mut abilities = abilities::detect(&record, category, &tally)?;
        let damage = finalize::finalize(category, &tally, &heat, &mut abilities)?;

        let skill = self.options.skill_for(&record);
        let mut element = ConvertedElement {
            chassis: record.chassis.clone(),
            model: record.model.clone(),
            role: record.role,
            skill,
            category,
            size: profile.size,
            movement: profile.movement,
            tmm: profile.tmm,
            damage,
            overheat: heat.overheat,
            durability: Durability::full(profile.armor, profile.structure),
            threshold: profile.threshold,
            abilities,
            base_point_value: 0,
            point_value: 0,
        };
        element.base_point_value = points::base_point_value(&element);
        element.point_value = points::adjust_for_skill(element.base_point_value, skill);

        debug!(
            unit = %element.name(),
            category = %category,
            overheat = element.overheat,
            skill,
            points = element.point_value,
            "Converted unit"
        );
        Ok(element)
    }
}

/// Convert a record with the default snapshot source.
pub fn convert(record: &UnitRecord, include_crew_skill: bool) -> Result<ConvertedElement> {
    Converter::new(ConversionOptions::with_crew_skill(include_crew_skill)).convert(record)
}
