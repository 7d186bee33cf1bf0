//! Source combat-unit records.
//!
//! A [`UnitRecord`] is the fully detailed input to conversion. Records are
//! plain data loaded from RON; the converter only ever borrows them.
//!
//! # Example RON
//!
//! ```ron
//! UnitRecord(
//!     chassis: "Locust",
//!     model: "LCT-1V",
//!     kind: Mek,
//!     tonnage: 20.0,
//!     movement: (walk: 8),
//!     armor: (points: 64),
//!     structure: 33,
//!     heat_dissipation: 10,
//!     weapons: [
//!         (name: "Medium Laser", location: CenterTorso,
//!          profile: (damage: 5.0, heat: 3, ranges: (3, 6, 9, 0), direct_fire: true)),
//!     ],
//! )
//! ```

mod equipment;
mod snapshot;
mod weapon;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use equipment::{BayKind, EquipmentKind, EquipmentMount, TransportBay};
pub use snapshot::{CleanCopy, RecordLibrary, SnapshotSource};
pub use weapon::{
    AmmoBin, ArtilleryType, LinkedModifier, Location, WeaponFamily, WeaponKind, WeaponMount,
    WeaponProfile, WeaponScale,
};

use crate::error::{ConversionError, Result};

/// Source unit taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// BattleMek.
    Mek,
    /// IndustrialMek.
    IndustrialMek,
    /// ProtoMek.
    ProtoMek,
    /// Combat tank.
    Tank,
    /// Combat VTOL.
    Vtol,
    /// Combat naval vessel.
    Naval,
    /// Support tank.
    SupportTank,
    /// Support VTOL.
    SupportVtol,
    /// Fixed-wing support vehicle.
    FixedWingSupport,
    /// Large support tank.
    LargeSupportTank,
    /// Battle armor.
    BattleArmor,
    /// Conventional infantry.
    Infantry,
    /// Aerospace fighter.
    AeroFighter,
    /// Conventional fighter.
    ConvFighter,
    /// Small craft.
    SmallCraft,
    /// Spheroid DropShip.
    SpheroidDropship,
    /// Aerodyne DropShip.
    AerodyneDropship,
    /// JumpShip.
    Jumpship,
    /// WarShip.
    Warship,
    /// Space station.
    SpaceStation,
    /// Escape pod.
    EscapePod,
    /// Lifeboat.
    Lifeboat,
    /// Gun emplacement.
    GunEmplacement,
    /// Mobile structure.
    MobileStructure,
}

impl SourceKind {
    /// Whether units of this kind can carry turret-mounted weapons.
    #[must_use]
    pub const fn supports_turrets(self) -> bool {
        matches!(
            self,
            Self::Mek
                | Self::IndustrialMek
                | Self::Tank
                | Self::Vtol
                | Self::Naval
                | Self::SupportTank
                | Self::SupportVtol
                | Self::LargeSupportTank
        )
    }

    /// Whether this is an infantry kind.
    #[must_use]
    pub const fn is_infantry(self) -> bool {
        matches!(self, Self::BattleArmor | Self::Infantry)
    }
}

/// Battlefield role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitRole {
    /// No role assigned.
    #[default]
    Undetermined,
    /// Ambusher.
    Ambusher,
    /// Brawler.
    Brawler,
    /// Juggernaut.
    Juggernaut,
    /// Missile boat.
    MissileBoat,
    /// Scout.
    Scout,
    /// Skirmisher.
    Skirmisher,
    /// Sniper.
    Sniper,
    /// Striker.
    Striker,
    /// Attack fighter.
    AttackFighter,
    /// Dogfighter.
    Dogfighter,
    /// Fast dogfighter.
    FastDogfighter,
    /// Fire support.
    FireSupport,
    /// Interceptor.
    Interceptor,
    /// Transport.
    Transport,
}

/// Crew skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crew {
    /// Gunnery skill.
    #[serde(default = "default_gunnery")]
    pub gunnery: i32,
    /// Piloting or driving skill.
    #[serde(default = "default_piloting")]
    pub piloting: i32,
}

const fn default_gunnery() -> i32 {
    4
}

const fn default_piloting() -> i32 {
    5
}

impl Default for Crew {
    fn default() -> Self {
        Self {
            gunnery: default_gunnery(),
            piloting: default_piloting(),
        }
    }
}

/// Motive system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MotiveType {
    /// Two-legged.
    #[default]
    Biped,
    /// Four-legged.
    Quad,
    /// Three-legged.
    Tripod,
    /// Tracked.
    Tracked,
    /// Wheeled.
    Wheeled,
    /// Hover.
    Hover,
    /// VTOL.
    Vtol,
    /// Surface naval or hydrofoil.
    Naval,
    /// Submarine.
    Submarine,
    /// Wing-in-ground-effect.
    Wige,
    /// Foot infantry.
    Foot,
    /// Motorized infantry.
    Motorized,
    /// Aerodyne flight.
    Aerodyne,
    /// Spheroid flight.
    Spheroid,
    /// Stationary in orbit.
    Station,
}

/// Movement points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSpec {
    /// Walking/cruising MP.
    pub walk: u32,
    /// Jumping MP.
    pub jump: u32,
    /// UMU MP.
    pub umu: u32,
    /// Motive system.
    pub motive: MotiveType,
    /// Improved jump jets.
    pub improved_jump_jets: bool,
    /// Safe thrust for aerospace units.
    pub thrust: u32,
}

/// Engine type, which scales mek structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EngineType {
    /// Standard fusion.
    #[default]
    Standard,
    /// Internal combustion.
    Ice,
    /// Fuel cell.
    FuelCell,
    /// Fission.
    Fission,
    /// Light fusion.
    Light,
    /// Extra-light fusion.
    Xl,
    /// Extra-extra-light fusion.
    Xxl,
    /// Compact fusion.
    Compact,
}

impl EngineType {
    /// Structure multiplier applied to mek internal structure.
    #[must_use]
    pub const fn structure_factor(self) -> f64 {
        match self {
            Self::Standard | Self::Ice | Self::FuelCell | Self::Fission => 1.0,
            Self::Light => 0.85,
            Self::Xl => 0.75,
            Self::Xxl => 0.6,
            Self::Compact => 1.25,
        }
    }
}

/// Armor type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArmorKind {
    /// Standard armor.
    #[default]
    Standard,
    /// Ferro-lamellor.
    FerroLamellor,
    /// Hardened.
    Hardened,
    /// Reactive.
    Reactive,
    /// Reflective.
    Reflective,
    /// Stealth.
    Stealth,
    /// Industrial.
    Industrial,
}

impl ArmorKind {
    /// Armor point multiplier.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Standard | Self::Stealth | Self::Industrial => 1.0,
            Self::FerroLamellor => 1.2,
            Self::Hardened => 1.5,
            Self::Reactive | Self::Reflective => 0.75,
        }
    }
}

/// Armor totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmorSpec {
    /// Total armor points (per trooper for battle armor).
    pub points: u32,
    /// Armor type.
    pub kind: ArmorKind,
    /// Barrier armor rating.
    pub bar: u32,
}

impl Default for ArmorSpec {
    fn default() -> Self {
        Self {
            points: 0,
            kind: ArmorKind::Standard,
            bar: 10,
        }
    }
}

/// Land-air mek movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LamProfile {
    /// AirMek cruising MP.
    pub airmek_mp: u32,
    /// Fighter-mode safe thrust.
    pub fighter_thrust: u32,
    /// Bimodal LAM (no AirMek mode).
    #[serde(default)]
    pub bimodal: bool,
}

/// Current damage of a live unit. The undamaged snapshot drops it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleDamage {
    /// Armor points lost.
    pub armor_lost: u32,
    /// Structure points lost.
    pub structure_lost: u32,
    /// Names of destroyed weapons.
    pub destroyed_weapons: Vec<String>,
}

/// A fully detailed source unit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// Chassis name.
    pub chassis: String,
    /// Model designation.
    #[serde(default)]
    pub model: String,
    /// Battlefield role.
    #[serde(default)]
    pub role: UnitRole,
    /// Source kind.
    pub kind: SourceKind,
    /// Tonnage.
    #[serde(default)]
    pub tonnage: f64,
    /// OmniUnit.
    #[serde(default)]
    pub omni: bool,
    /// Crew skills.
    #[serde(default)]
    pub crew: Crew,
    /// Movement.
    #[serde(default)]
    pub movement: MovementSpec,
    /// Engine type.
    #[serde(default)]
    pub engine: EngineType,
    /// Armor.
    #[serde(default)]
    pub armor: ArmorSpec,
    /// Internal structure, or structural integrity for aerospace units.
    #[serde(default)]
    pub structure: i32,
    /// Heat dissipation.
    #[serde(default)]
    pub heat_dissipation: i32,
    /// Troopers (infantry only).
    #[serde(default)]
    pub troopers: u32,
    /// Weapons.
    #[serde(default)]
    pub weapons: Vec<WeaponMount>,
    /// Ammunition bins.
    #[serde(default)]
    pub ammo: Vec<AmmoBin>,
    /// Equipment.
    #[serde(default)]
    pub equipment: Vec<EquipmentMount>,
    /// Transport bays.
    #[serde(default)]
    pub bays: Vec<TransportBay>,
    /// Quirk names.
    #[serde(default)]
    pub quirks: Vec<String>,
    /// LAM movement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lam: Option<LamProfile>,
    /// External bomb capacity.
    #[serde(default)]
    pub bomb_capacity: u32,
    /// Current damage of a live unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<BattleDamage>,
}

impl UnitRecord {
    /// Parse a record from RON text. `label` names the source in errors.
    pub fn from_ron(text: &str, label: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| ConversionError::DataParse {
            path: label.to_string(),
            message: e.to_string(),
        })
    }

    /// "Chassis Model", or just the chassis when there is no model.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.model.is_empty() {
            self.chassis.clone()
        } else {
            format!("{} {}", self.chassis, self.model)
        }
    }

    /// Number of equipment items of a kind.
    #[must_use]
    pub fn count_equipment(&self, kind: EquipmentKind) -> usize {
        self.equipment.iter().filter(|e| e.kind == kind).count()
    }

    /// Whether any equipment item of a kind is mounted.
    #[must_use]
    pub fn has_equipment(&self, kind: EquipmentKind) -> bool {
        self.equipment.iter().any(|e| e.kind == kind)
    }

    /// Whether any equipment item of a kind is mounted at `location`.
    #[must_use]
    pub fn has_equipment_at(&self, kind: EquipmentKind, location: Location) -> bool {
        self.equipment
            .iter()
            .any(|e| e.kind == kind && e.location == location)
    }

    /// Total shots in an ammo pool.
    #[must_use]
    pub fn ammo_in_pool(&self, pool: &str) -> u32 {
        self.ammo
            .iter()
            .filter(|bin| bin.pool == pool)
            .map(|bin| bin.shots)
            .sum()
    }

    /// Whether the record carries a quirk (case-insensitive).
    #[must_use]
    pub fn has_quirk(&self, quirk: &str) -> bool {
        self.quirks.iter().any(|q| q.eq_ignore_ascii_case(quirk))
    }

    /// Check the record for internal inconsistencies.
    ///
    /// Returns a list of problems; an empty list means the record is
    /// consistent.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let name = self.display_name();

        if self.chassis.trim().is_empty() {
            errors.push("Record has an empty chassis name".to_string());
        }

        let pools: BTreeSet<&str> = self.ammo.iter().map(|bin| bin.pool.as_str()).collect();
        for weapon in &self.weapons {
            if let Some(pool) = &weapon.ammo_pool {
                if !pools.contains(pool.as_str()) {
                    errors.push(format!(
                        "'{name}': weapon '{}' uses unknown ammo pool '{pool}'",
                        weapon.name
                    ));
                }
            }

            if weapon.turret && !self.kind.supports_turrets() {
                errors.push(format!(
                    "'{name}': weapon '{}' is turret-mounted but {:?} units have no turrets",
                    weapon.name, self.kind
                ));
            }

            if weapon.count == 0 {
                errors.push(format!("'{name}': weapon '{}' has a count of 0", weapon.name));
            }

            if weapon.profile.damage < 0.0 {
                errors.push(format!(
                    "'{name}': weapon '{}' has negative damage",
                    weapon.name
                ));
            }
        }

        if self.kind.is_infantry() && self.troopers == 0 {
            errors.push(format!("'{name}': infantry unit has no troopers"));
        }

        if self.structure < 0 {
            errors.push(format!("'{name}': negative structure {}", self.structure));
        }

        if self.heat_dissipation < 0 {
            errors.push(format!(
                "'{name}': negative heat dissipation {}",
                self.heat_dissipation
            ));
        }

        if self.tonnage < 0.0 {
            errors.push(format!("'{name}': negative tonnage {}", self.tonnage));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCUST: &str = r#"
        UnitRecord(
            chassis: "Locust",
            model: "LCT-1V",
            kind: Mek,
            tonnage: 20.0,
            movement: (walk: 8),
            armor: (points: 64),
            structure: 33,
            heat_dissipation: 10,
            weapons: [
                (name: "Medium Laser", location: CenterTorso,
                 profile: (damage: 5.0, heat: 3, ranges: (3, 6, 9, 0), direct_fire: true)),
                (name: "Machine Gun", location: LeftArm, ammo_pool: Some("MG"),
                 profile: (family: Ballistic, damage: 2.0, ranges: (1, 2, 3, 0),
                           uses_ammo: true, direct_fire: true)),
            ],
            ammo: [(pool: "MG", shots: 100)],
        )
    "#;

    #[test]
    fn test_parse_minimal_record() {
        let record = UnitRecord::from_ron(LOCUST, "locust").unwrap();
        assert_eq!(record.display_name(), "Locust LCT-1V");
        assert_eq!(record.crew.gunnery, 4);
        assert_eq!(record.armor.bar, 10);
        assert_eq!(record.weapons.len(), 2);
        assert_eq!(record.weapons[0].count, 1);
        assert_eq!(record.ammo_in_pool("MG"), 100);
        assert!(record.validate().is_empty());
    }

    #[test]
    fn test_parse_error_names_source() {
        let err = UnitRecord::from_ron("UnitRecord(", "broken.ron").unwrap_err();
        match err {
            ConversionError::DataParse { path, .. } => assert_eq!(path, "broken.ron"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_reports_problems() {
        let mut record = UnitRecord::from_ron(LOCUST, "locust").unwrap();
        record.kind = SourceKind::AeroFighter;
        record.weapons[0].turret = true;
        record.weapons[1].ammo_pool = Some("AC".to_string());
        record.structure = -1;

        let errors = record.validate();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("unknown ammo pool 'AC'")));
        assert!(errors.iter().any(|e| e.contains("turret-mounted")));
        assert!(errors.iter().any(|e| e.contains("negative structure")));
    }

    #[test]
    fn test_validate_infantry_troopers() {
        let mut record = UnitRecord::from_ron(LOCUST, "locust").unwrap();
        record.kind = SourceKind::Infantry;
        record.weapons.clear();
        assert_eq!(record.validate().len(), 1);
        record.troopers = 28;
        assert!(record.validate().is_empty());
    }

    #[test]
    fn test_structure_factor() {
        assert_eq!(EngineType::Xl.structure_factor(), 0.75);
        assert_eq!(EngineType::Ice.structure_factor(), 1.0);
    }
}
