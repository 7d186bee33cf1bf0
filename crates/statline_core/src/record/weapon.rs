//! Weapon mounts, weapon profiles and ammunition.

use serde::{Deserialize, Serialize};

/// Where a weapon or item is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Location {
    /// Mek head.
    Head,
    /// Mek center torso.
    CenterTorso,
    /// Mek left torso.
    LeftTorso,
    /// Mek right torso.
    RightTorso,
    /// Mek left arm.
    LeftArm,
    /// Mek right arm.
    RightArm,
    /// Mek left leg.
    LeftLeg,
    /// Mek right leg.
    RightLeg,
    /// Tripod center leg.
    CenterLeg,
    /// ProtoMek main gun.
    MainGun,
    /// Vehicle front.
    Front,
    /// Vehicle left side.
    Left,
    /// Vehicle right side.
    Right,
    /// Vehicle rear.
    Rear,
    /// Vehicle body, infantry squad or anything without a facing.
    #[default]
    Body,
    /// Aerospace or large craft nose.
    Nose,
    /// Fighter left wing.
    LeftWing,
    /// Fighter right wing.
    RightWing,
    /// Aerospace or large craft aft.
    Aft,
    /// Fighter fuselage.
    Fuselage,
    /// Large craft left-front arc.
    LeftFront,
    /// Large craft right-front arc.
    RightFront,
    /// Large craft left broadside.
    LeftSide,
    /// Large craft right broadside.
    RightSide,
    /// Large craft left-aft arc.
    LeftAft,
    /// Large craft right-aft arc.
    RightAft,
    /// Large craft hull.
    Hull,
}

impl Location {
    /// Whether this is a mek arm.
    #[must_use]
    pub const fn is_arm(self) -> bool {
        matches!(self, Self::LeftArm | Self::RightArm)
    }

    /// Whether weapons here fire to the rear.
    #[must_use]
    pub const fn is_rear_facing(self) -> bool {
        matches!(self, Self::Rear | Self::Aft)
    }
}

/// Artillery piece type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtilleryType {
    /// Arrow IV, Inner Sphere.
    ArrowIvIs,
    /// Arrow IV, Clan.
    ArrowIvClan,
    /// Battle armor tube artillery.
    BattleArmorTube,
    /// Cruise missile/50.
    CruiseMissile50,
    /// Cruise missile/70.
    CruiseMissile70,
    /// Cruise missile/90.
    CruiseMissile90,
    /// Cruise missile/120.
    CruiseMissile120,
    /// Long Tom.
    LongTom,
    /// Sniper.
    Sniper,
    /// Thumper.
    Thumper,
}

/// How the aggregator handles a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Ordinary direct-damage weapon.
    #[default]
    Standard,
    /// Standard Narc beacon.
    Narc,
    /// Improved Narc.
    INarc,
    /// Compact Narc.
    CompactNarc,
    /// Anti-missile system.
    AntiMissile,
    /// Laser anti-missile system.
    LaserAntiMissile,
    /// Point defense bay.
    PointDefense,
    /// TAG.
    Tag,
    /// Light TAG.
    LightTag,
    /// C3 master computer.
    C3Master,
    /// Boosted C3 master.
    C3BoostedMaster,
    /// Emergency C3 master.
    C3EmergencyMaster,
    /// Artillery piece.
    Artillery(ArtilleryType),
    /// Artillery cannon (also fires directly).
    ArtilleryCannon(ArtilleryType),
    /// Artillery bay on large craft.
    BayArtillery(ArtilleryType),
    /// Anti-personnel bomblet rack.
    BombletRack,
    /// Mek taser.
    MekTaser,
    /// Battle armor taser.
    BattleArmorTaser,
    /// Reusable TSEMP cannon.
    Tsemp,
    /// One-shot TSEMP.
    TsempOneShot,
    /// Infantry small-arms attack.
    InfantryAttack,
}

/// Weapon family, used for special damage classes and ammo rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeaponFamily {
    /// Lasers, PPCs and other energy weapons.
    #[default]
    Energy,
    /// Gauss rifles, machine guns and other non-cannon ballistics.
    Ballistic,
    /// Standard autocannon.
    Autocannon,
    /// LB-X autocannon.
    LbxAutocannon,
    /// Ultra autocannon.
    UltraAutocannon,
    /// Rotary autocannon.
    RotaryAutocannon,
    /// Short-range missiles.
    Srm,
    /// Long-range missiles.
    Lrm,
    /// Multi-missile launcher.
    Mml,
    /// Torpedoes.
    Torpedo,
    /// Improved ATM.
    Iatm,
    /// Flamers.
    Flamer,
    /// Physical weapons.
    Physical,
    /// Anything else.
    Other,
}

impl WeaponFamily {
    /// Missile families that benefit from Artemis fire control.
    #[must_use]
    pub const fn is_missile(self) -> bool {
        matches!(self, Self::Srm | Self::Lrm | Self::Mml | Self::Torpedo)
    }

    /// Autocannon families.
    #[must_use]
    pub const fn is_autocannon(self) -> bool {
        matches!(
            self,
            Self::Autocannon | Self::LbxAutocannon | Self::UltraAutocannon | Self::RotaryAutocannon
        )
    }

    /// Rate at which the weapon consumes ammo and generates heat.
    #[must_use]
    pub const fn fire_rate(self) -> u32 {
        match self {
            Self::RotaryAutocannon => 6,
            Self::UltraAutocannon => 2,
            _ => 1,
        }
    }
}

/// Standard or capital-scale weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeaponScale {
    /// Standard scale.
    #[default]
    Standard,
    /// Capital scale.
    Capital,
    /// Sub-capital scale.
    SubCapital,
    /// Capital missile.
    CapitalMissile,
}

impl WeaponScale {
    /// Whether the weapon uses the capital range table.
    #[must_use]
    pub const fn uses_capital_ranges(self) -> bool {
        !matches!(self, Self::Standard)
    }
}

/// Equipment linked to a single weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkedModifier {
    /// Artemis IV fire control.
    ArtemisIv,
    /// Artemis V fire control.
    ArtemisV,
    /// PPC capacitor.
    PpcCapacitor,
}

/// Declared profile of a weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    /// Aggregator bucket.
    #[serde(default)]
    pub kind: WeaponKind,
    /// Weapon family.
    #[serde(default)]
    pub family: WeaponFamily,
    /// Range scale.
    #[serde(default)]
    pub scale: WeaponScale,
    /// Damage per shot (total for cluster weapons).
    #[serde(default)]
    pub damage: f64,
    /// Heat per shot.
    #[serde(default)]
    pub heat: u32,
    /// Short, medium, long and extreme range.
    #[serde(default)]
    pub ranges: [u32; 4],
    /// Minimum range.
    #[serde(default)]
    pub min_range: u32,
    /// To-hit modifier (negative is easier to hit).
    #[serde(default)]
    pub to_hit_modifier: i32,
    /// Whether the weapon needs ammunition.
    #[serde(default)]
    pub uses_ammo: bool,
    /// Fires once per battle.
    #[serde(default)]
    pub one_shot: bool,
    /// Reusable one-shot launcher exempt from the one-shot penalty.
    #[serde(default)]
    pub fusillade: bool,
    /// Direct-fire weapon (benefits from targeting computers).
    #[serde(default)]
    pub direct_fire: bool,
    /// Can fire indirectly.
    #[serde(default)]
    pub indirect_fire: bool,
    /// Anti-aircraft flak.
    #[serde(default)]
    pub flak: bool,
    /// Deals heat damage.
    #[serde(default)]
    pub heat_damage: bool,
}

impl WeaponProfile {
    /// Long range.
    #[must_use]
    pub const fn long_range(&self) -> u32 {
        self.ranges[2]
    }

    /// Extreme range.
    #[must_use]
    pub const fn extreme_range(&self) -> u32 {
        self.ranges[3]
    }
}

/// A weapon mounted on the unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponMount {
    /// Weapon name.
    pub name: String,
    /// Mount location.
    #[serde(default)]
    pub location: Location,
    /// Mounted facing rear.
    #[serde(default)]
    pub rear: bool,
    /// Mounted in a turret.
    #[serde(default)]
    pub turret: bool,
    /// Weapon profile.
    pub profile: WeaponProfile,
    /// Linked equipment.
    #[serde(default)]
    pub links: Vec<LinkedModifier>,
    /// Ammo pool feeding this weapon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammo_pool: Option<String>,
    /// Number of identical weapons in this mount (bays hold several).
    #[serde(default = "default_count")]
    pub count: u32,
}

const fn default_count() -> u32 {
    1
}

impl WeaponMount {
    /// Whether this mount fires to the rear.
    #[must_use]
    pub const fn fires_rear(&self) -> bool {
        self.rear || self.location.is_rear_facing()
    }

    /// Whether a linked modifier is present.
    #[must_use]
    pub fn has_link(&self, link: LinkedModifier) -> bool {
        self.links.contains(&link)
    }
}

/// An ammunition bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoBin {
    /// Pool name shared with the weapons it feeds.
    pub pool: String,
    /// Shots in this bin.
    pub shots: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_rate() {
        assert_eq!(WeaponFamily::RotaryAutocannon.fire_rate(), 6);
        assert_eq!(WeaponFamily::UltraAutocannon.fire_rate(), 2);
        assert_eq!(WeaponFamily::Lrm.fire_rate(), 1);
    }

    #[test]
    fn test_rear_facing() {
        let profile: WeaponProfile = ron::from_str("(damage: 5.0, ranges: (3, 6, 9, 12))").unwrap();
        let mut mount = WeaponMount {
            name: "Medium Laser".to_string(),
            location: Location::CenterTorso,
            rear: false,
            turret: false,
            profile,
            links: Vec::new(),
            ammo_pool: None,
            count: 1,
        };
        assert!(!mount.fires_rear());
        mount.rear = true;
        assert!(mount.fires_rear());
        mount.rear = false;
        mount.location = Location::Aft;
        assert!(mount.fires_rear());
    }

    #[test]
    fn test_profile_defaults_from_ron() {
        let profile: WeaponProfile = ron::from_str(
            "(family: Lrm, damage: 10.0, heat: 4, ranges: (7, 14, 21, 28), min_range: 6, \
             indirect_fire: true, uses_ammo: true)",
        )
        .unwrap();
        assert_eq!(profile.kind, WeaponKind::Standard);
        assert_eq!(profile.scale, WeaponScale::Standard);
        assert_eq!(profile.long_range(), 21);
        assert!(profile.indirect_fire);
    }
}
