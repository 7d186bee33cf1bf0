//! Size, movement, target movement modifier, armor, structure and threshold.

use tracing::debug;

use super::classify::UnitCategory;
use crate::math::round_half_up;
use crate::movement::{MovementMode, MovementProfile};
use crate::record::{EquipmentKind, MotiveType, UnitRecord};

/// Physical profile of a converted element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Size class.
    pub size: u8,
    /// Movement by mode.
    pub movement: MovementProfile,
    /// Target movement modifier.
    pub tmm: u8,
    /// Armor value.
    pub armor: u32,
    /// Structure value.
    pub structure: u32,
    /// Damage threshold (aerospace only).
    pub threshold: Option<u32>,
}

/// Compute the physical profile of a record.
#[must_use]
pub fn build_profile(record: &UnitRecord, category: UnitCategory) -> Profile {
    let movement = movement(record, category);
    let armor = armor(record, category);
    let profile = Profile {
        size: size(record, category),
        tmm: tmm(record, category, &movement),
        structure: structure(record, category),
        threshold: threshold(category, armor),
        armor,
        movement,
    };
    debug!(
        category = %category,
        size = profile.size,
        tmm = profile.tmm,
        armor = profile.armor,
        structure = profile.structure,
        "Built physical profile"
    );
    profile
}

/// Size class from tonnage.
#[must_use]
pub fn size(record: &UnitRecord, category: UnitCategory) -> u8 {
    let tons = record.tonnage;
    match category {
        UnitCategory::BM | UnitCategory::IM | UnitCategory::CV | UnitCategory::SV => {
            if tons <= 35.0 {
                1
            } else if tons <= 55.0 {
                2
            } else if tons <= 75.0 {
                3
            } else {
                4
            }
        }
        UnitCategory::PM | UnitCategory::BA | UnitCategory::CI | UnitCategory::SC => 1,
        UnitCategory::AF | UnitCategory::CF => {
            if tons <= 45.0 {
                1
            } else if tons <= 70.0 {
                2
            } else {
                3
            }
        }
        UnitCategory::DS | UnitCategory::DA => {
            if tons < 2_500.0 {
                1
            } else if tons < 10_000.0 {
                2
            } else {
                3
            }
        }
        UnitCategory::JS | UnitCategory::WS | UnitCategory::SS | UnitCategory::MS => {
            if tons < 500_000.0 {
                1
            } else if tons < 800_000.0 {
                2
            } else {
                3
            }
        }
    }
}

/// Walking MP of a mek after MASC and supercharger.
fn boosted_walk(record: &UnitRecord) -> u32 {
    let walk = f64::from(record.movement.walk);
    let masc = record.has_equipment(EquipmentKind::Masc);
    let supercharger = record.has_equipment(EquipmentKind::Supercharger);
    let factor = match (masc, supercharger) {
        (true, true) => 1.5,
        (true, false) | (false, true) => 1.25,
        (false, false) => 1.0,
    };
    round_half_up(walk * factor) as u32
}

fn ground_mode(motive: MotiveType, category: UnitCategory) -> MovementMode {
    match motive {
        MotiveType::Tracked => MovementMode::Tracked,
        MotiveType::Wheeled => MovementMode::Wheeled,
        MotiveType::Hover => MovementMode::Hover,
        MotiveType::Vtol => MovementMode::Vtol,
        MotiveType::Naval => MovementMode::Naval,
        MotiveType::Submarine => MovementMode::Umu,
        MotiveType::Wige => MovementMode::Wige,
        MotiveType::Foot if category == UnitCategory::CI => MovementMode::Foot,
        MotiveType::Motorized => MovementMode::Motorized,
        _ => MovementMode::Default,
    }
}

fn thrust_mode(record: &UnitRecord, category: UnitCategory) -> MovementMode {
    match category {
        UnitCategory::DS => MovementMode::SpheroidThrust,
        UnitCategory::SC if record.movement.motive == MotiveType::Spheroid => {
            MovementMode::SpheroidThrust
        }
        UnitCategory::JS | UnitCategory::SS => MovementMode::StationKeeping,
        _ => MovementMode::AerodyneThrust,
    }
}

/// Movement profile: inches for ground units, thrust for aerospace.
#[must_use]
pub fn movement(record: &UnitRecord, category: UnitCategory) -> MovementProfile {
    let spec = &record.movement;
    let mut profile = MovementProfile::new();

    if category.is_aerospace() {
        let mode = thrust_mode(record, category);
        let thrust = if mode == MovementMode::StationKeeping {
            spec.thrust.max(1)
        } else {
            spec.thrust
        };
        profile.insert(mode, thrust);
        return profile;
    }

    let walk = if category.is_mek() {
        boosted_walk(record)
    } else {
        spec.walk
    };
    profile.insert(ground_mode(spec.motive, category), walk * 2);
    profile.insert(MovementMode::Jump, spec.jump * 2);
    if spec.motive != MotiveType::Submarine {
        profile.insert(MovementMode::Umu, spec.umu * 2);
    }
    profile
}

/// Target movement modifier.
#[must_use]
pub fn tmm(record: &UnitRecord, category: UnitCategory, movement: &MovementProfile) -> u8 {
    if category.is_aerospace() {
        return 0;
    }
    let base = match movement.top_speed() {
        0..=4 => 0,
        5..=8 => 1,
        9..=12 => 2,
        13..=18 => 3,
        19..=34 => 4,
        _ => 5,
    };
    let airborne = matches!(record.movement.motive, MotiveType::Vtol | MotiveType::Wige);
    if airborne || category.is_infantry() {
        base + 1
    } else {
        base
    }
}

/// Armor value.
#[must_use]
pub fn armor(record: &UnitRecord, category: UnitCategory) -> u32 {
    let spec = &record.armor;
    if category == UnitCategory::BA {
        let per_trooper = f64::from(spec.points + 1);
        return round_half_up(f64::from(record.troopers) * per_trooper / 30.0) as u32;
    }

    let bar_factor = if spec.bar < 10 {
        f64::from(spec.bar) / 10.0
    } else {
        1.0
    };
    let raw = f64::from(spec.points) * spec.kind.multiplier() * bar_factor / 30.0;
    let value = round_half_up(raw) as u32;
    if spec.points > 0 || category == UnitCategory::CI {
        value.max(1)
    } else {
        value
    }
}

/// Structure value.
#[must_use]
pub fn structure(record: &UnitRecord, category: UnitCategory) -> u32 {
    let points = f64::from(record.structure.max(0));
    let value = match category {
        UnitCategory::BM | UnitCategory::IM => {
            round_half_up(points * record.engine.structure_factor() / 20.0) as u32
        }
        UnitCategory::PM | UnitCategory::CV | UnitCategory::SV => {
            round_half_up(points / 10.0) as u32
        }
        UnitCategory::BA => record.troopers.div_ceil(3),
        UnitCategory::CI => record.troopers.div_ceil(15),
        _ => round_half_up(points / 2.0) as u32,
    };
    value.max(1)
}

/// Damage threshold for aerospace categories.
#[must_use]
pub fn threshold(category: UnitCategory, armor: u32) -> Option<u32> {
    if !category.uses_threshold() {
        return None;
    }
    let divisor = if category.is_fighter() || category == UnitCategory::SC {
        3
    } else {
        10
    };
    Some(armor.div_ceil(divisor).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{EquipmentMount, Location};

    fn mek(tonnage: f64, walk: u32, jump: u32) -> UnitRecord {
        UnitRecord::from_ron(
            &format!(
                "UnitRecord(chassis: \"Test\", kind: Mek, tonnage: {tonnage:.1}, \
                 movement: (walk: {walk}, jump: {jump}), armor: (points: 150), structure: 76)"
            ),
            "test",
        )
        .unwrap()
    }

    #[test]
    fn test_size_ladder() {
        assert_eq!(size(&mek(35.0, 4, 0), UnitCategory::BM), 1);
        assert_eq!(size(&mek(55.0, 4, 0), UnitCategory::BM), 2);
        assert_eq!(size(&mek(75.0, 4, 0), UnitCategory::BM), 3);
        assert_eq!(size(&mek(100.0, 3, 0), UnitCategory::BM), 4);
        assert_eq!(size(&mek(50.0, 4, 0), UnitCategory::AF), 2);
    }

    #[test]
    fn test_movement_and_tmm() {
        let record = mek(55.0, 5, 5);
        let movement = movement(&record, UnitCategory::BM);
        assert_eq!(movement.to_string(), "10\"/10\"j");
        assert_eq!(tmm(&record, UnitCategory::BM, &movement), 2);
    }

    #[test]
    fn test_masc_and_supercharger() {
        let mut record = mek(55.0, 5, 0);
        record.equipment.push(EquipmentMount {
            kind: EquipmentKind::Masc,
            location: Location::CenterTorso,
            tonnage: 2.0,
        });
        // 5 * 1.25 = 6.25 -> 6 MP
        assert_eq!(movement(&record, UnitCategory::BM).get(MovementMode::Default), Some(12));
        record.equipment.push(EquipmentMount {
            kind: EquipmentKind::Supercharger,
            location: Location::CenterTorso,
            tonnage: 1.0,
        });
        // 5 * 1.5 = 7.5 -> 8 MP
        assert_eq!(movement(&record, UnitCategory::BM).get(MovementMode::Default), Some(16));
    }

    #[test]
    fn test_vtol_tmm_bonus() {
        let record = UnitRecord::from_ron(
            "UnitRecord(chassis: \"Warrior\", kind: Vtol, tonnage: 21.0, \
             movement: (walk: 11, motive: Vtol))",
            "test",
        )
        .unwrap();
        let movement = movement(&record, UnitCategory::CV);
        assert_eq!(movement.to_string(), "22\"v");
        assert_eq!(tmm(&record, UnitCategory::CV, &movement), 5);
    }

    #[test]
    fn test_aerospace_thrust() {
        let record = UnitRecord::from_ron(
            "UnitRecord(chassis: \"Sabre\", kind: AeroFighter, tonnage: 25.0, \
             movement: (thrust: 7))",
            "test",
        )
        .unwrap();
        let movement = movement(&record, UnitCategory::AF);
        assert_eq!(movement.to_string(), "7a");
        assert_eq!(tmm(&record, UnitCategory::AF, &movement), 0);
    }

    #[test]
    fn test_armor_and_structure() {
        let record = mek(55.0, 5, 0);
        // 150 / 30 = 5
        assert_eq!(armor(&record, UnitCategory::BM), 5);
        // 76 / 20 = 3.8 -> 4
        assert_eq!(structure(&record, UnitCategory::BM), 4);
    }

    #[test]
    fn test_bar_reduces_armor() {
        let mut record = mek(20.0, 4, 0);
        record.armor.points = 60;
        record.armor.bar = 5;
        // 60 * 0.5 / 30 = 1
        assert_eq!(armor(&record, UnitCategory::BM), 1);
    }

    #[test]
    fn test_infantry_structure() {
        let mut record = mek(1.0, 1, 0);
        record.troopers = 28;
        assert_eq!(structure(&record, UnitCategory::CI), 2);
        record.troopers = 5;
        assert_eq!(structure(&record, UnitCategory::BA), 2);
    }

    #[test]
    fn test_threshold() {
        assert_eq!(threshold(UnitCategory::BM, 5), None);
        assert_eq!(threshold(UnitCategory::AF, 7), Some(3));
        assert_eq!(threshold(UnitCategory::DS, 25), Some(3));
        assert_eq!(threshold(UnitCategory::AF, 0), Some(1));
    }
}
