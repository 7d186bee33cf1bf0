//! Damage aggregation.
//!
//! Walks the weapon mounts of a record, routes each one into a handling
//! bucket and accumulates raw (unrounded) per-band damage and heat. Rounding
//! happens later, after the heat adjuster has had its chance to rescale.
//!
//! Bucket priority follows [`WeaponKind`] order: Narc, anti-missile and
//! point defense, TAG and C3 masters, artillery, bomblet racks, tasers,
//! TSEMP, infantry attacks and finally ordinary weapons.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::classify::UnitCategory;
use crate::ability::{AbilityCatalog, AbilityTag};
use crate::error::Result;
use crate::math::round_half_up;
use crate::record::{
    ArtilleryType, EquipmentKind, LinkedModifier, Location, UnitRecord, WeaponFamily,
    WeaponKind, WeaponMount, WeaponScale,
};

/// Raw damage per band (S, M, L, E).
pub type Bands = [f64; 4];

/// Band probes for standard-scale weapons.
pub const STANDARD_RANGES: [u32; 4] = [0, 4, 16, 24];

/// Band probes for capital-scale weapons.
pub const CAPITAL_RANGES: [u32; 4] = [0, 13, 25, 41];

/// Short-band factor by minimum range 0..=6.
const MIN_RANGE_FACTORS: [f64; 7] = [1.0, 0.92, 0.83, 0.75, 0.66, 0.58, 0.5];

/// Cluster averages for battle armor squads of 1..=6 troopers.
const BA_CLUSTER_AVERAGE: [f64; 6] = [1.0, 1.58, 2.0, 2.63, 3.17, 4.0];

const AMMO_PENALTY: f64 = 0.75;
const MIN_ROUNDS_PER_GUN: u32 = 10;
const ONE_SHOT_PENALTY: f64 = 0.1;
const TARGETING_COMPUTER_BONUS: f64 = 1.1;
const AES_BONUS: f64 = 1.05;
const PPC_CAPACITOR_BONUS: f64 = 5.0;

/// Special damage classes tracked alongside standard damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpecialClass {
    /// Short-range missiles.
    Srm,
    /// Long-range missiles.
    Lrm,
    /// Autocannons.
    Ac,
    /// Flak.
    Flak,
    /// Torpedoes.
    Torpedo,
    /// Improved ATM.
    Iatm,
    /// Heat damage.
    Heat,
}

impl SpecialClass {
    /// Every class.
    pub const ALL: [Self; 7] = [
        Self::Srm,
        Self::Lrm,
        Self::Ac,
        Self::Flak,
        Self::Torpedo,
        Self::Iatm,
        Self::Heat,
    ];

    /// Ability tag granted for this class.
    #[must_use]
    pub const fn tag(self) -> AbilityTag {
        match self {
            Self::Srm => AbilityTag::Srm,
            Self::Lrm => AbilityTag::Lrm,
            Self::Ac => AbilityTag::Ac,
            Self::Flak => AbilityTag::Flk,
            Self::Torpedo => AbilityTag::Tor,
            Self::Iatm => AbilityTag::Iatm,
            Self::Heat => AbilityTag::Ht,
        }
    }

    /// Classes a weapon contributes to.
    #[must_use]
    pub fn of(mount: &WeaponMount) -> Vec<Self> {
        let profile = &mount.profile;
        let mut classes = Vec::new();
        if matches!(profile.family, WeaponFamily::Srm | WeaponFamily::Mml) {
            classes.push(Self::Srm);
        }
        if matches!(profile.family, WeaponFamily::Lrm | WeaponFamily::Mml) {
            classes.push(Self::Lrm);
        }
        if profile.family.is_autocannon() {
            classes.push(Self::Ac);
        }
        if profile.flak {
            classes.push(Self::Flak);
        }
        if profile.family == WeaponFamily::Torpedo {
            classes.push(Self::Torpedo);
        }
        if profile.family == WeaponFamily::Iatm {
            classes.push(Self::Iatm);
        }
        if profile.heat_damage {
            classes.push(Self::Heat);
        }
        classes
    }
}

/// A firing arc of a large craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Front arc.
    Front,
    /// Left arc.
    Left,
    /// Right arc.
    Right,
    /// Rear arc.
    Rear,
}

impl Facing {
    /// All arcs in print order.
    pub const ALL: [Self; 4] = [Self::Front, Self::Left, Self::Right, Self::Rear];

    /// Printed label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Front => "FRONT",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Rear => "REAR",
        }
    }

    /// Inverse of [`Facing::label`].
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|facing| facing.label() == label)
    }
}

/// Where damage is tallied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TallyLocation {
    /// Forward-firing damage of a non-arc unit.
    Standard,
    /// Rear-firing damage of a non-arc unit.
    Rear,
    /// Turret-mounted damage.
    Turret,
    /// One firing arc of a large craft.
    Arc(Facing),
}

impl TallyLocation {
    /// Whether heat from this location uses the rear heat factor.
    #[must_use]
    pub const fn is_rear_facing(self) -> bool {
        matches!(self, Self::Rear | Self::Arc(Facing::Rear))
    }
}

/// Accumulated damage of one tally location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationTally {
    /// Standard-scale damage.
    pub standard: Bands,
    /// Capital-scale damage (arcs only).
    pub capital: Bands,
    /// Sub-capital damage (arcs only).
    pub sub_capital: Bands,
    /// Capital missile damage (arcs only).
    pub missile: Bands,
    /// Special damage classes.
    pub special: BTreeMap<SpecialClass, Bands>,
    /// Abilities granted within this arc (arcs only).
    pub abilities: AbilityCatalog,
}

impl LocationTally {
    /// Every band array in this tally, mutably.
    pub fn all_bands_mut(&mut self) -> impl Iterator<Item = &mut Bands> {
        [
            &mut self.standard,
            &mut self.capital,
            &mut self.sub_capital,
            &mut self.missile,
        ]
        .into_iter()
        .chain(self.special.values_mut())
    }
}

/// Output of damage aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DamageTally {
    /// Damage per tally location.
    pub locations: BTreeMap<TallyLocation, LocationTally>,
    /// Indirect-fire damage (Long band, no Artemis).
    pub indirect_fire: f64,
    /// Abilities granted by weapon buckets.
    pub abilities: AbilityCatalog,
    /// Heat of forward-firing weapons.
    pub front_heat: f64,
    /// Heat of rear-firing weapons.
    pub rear_heat: f64,
    /// Heat of forward-firing weapons that reach the Long band.
    pub long_heat: f64,
}

impl DamageTally {
    /// Tally of a location, if anything was recorded there.
    #[must_use]
    pub fn location(&self, location: TallyLocation) -> Option<&LocationTally> {
        self.locations.get(&location)
    }

    /// Standard damage of a location, zero if absent.
    #[must_use]
    pub fn standard(&self, location: TallyLocation) -> Bands {
        self.location(location).map_or([0.0; 4], |t| t.standard)
    }

    fn entry(&mut self, location: TallyLocation) -> &mut LocationTally {
        self.locations.entry(location).or_default()
    }
}

fn add_scaled(target: &mut Bands, source: &Bands, factor: f64) {
    for (t, s) in target.iter_mut().zip(source.iter()) {
        *t += s * factor;
    }
}

/// Artillery tag for an artillery piece.
#[must_use]
pub const fn artillery_tag(kind: ArtilleryType) -> AbilityTag {
    match kind {
        ArtilleryType::ArrowIvIs => AbilityTag::ArtAis,
        ArtilleryType::ArrowIvClan => AbilityTag::ArtAc,
        ArtilleryType::BattleArmorTube => AbilityTag::ArtBa,
        ArtilleryType::CruiseMissile50 => AbilityTag::ArtCm5,
        ArtilleryType::CruiseMissile70 => AbilityTag::ArtCm7,
        ArtilleryType::CruiseMissile90 => AbilityTag::ArtCm9,
        ArtilleryType::CruiseMissile120 => AbilityTag::ArtCm12,
        ArtilleryType::LongTom => AbilityTag::ArtLt,
        ArtilleryType::Sniper => AbilityTag::ArtS,
        ArtilleryType::Thumper => AbilityTag::ArtT,
    }
}

/// Artillery tag for an artillery cannon.
#[must_use]
pub const fn artillery_cannon_tag(kind: ArtilleryType) -> AbilityTag {
    match kind {
        ArtilleryType::LongTom => AbilityTag::ArtLtc,
        ArtilleryType::Sniper => AbilityTag::ArtSc,
        ArtilleryType::Thumper => AbilityTag::ArtTc,
        other => artillery_tag(other),
    }
}

/// Weights of the tally locations a mount fires into.
fn location_weights(mount: &WeaponMount, category: UnitCategory) -> Vec<(TallyLocation, f64)> {
    if category.uses_arcs() {
        return arc_weights(mount.location)
            .into_iter()
            .map(|(facing, weight)| (TallyLocation::Arc(facing), weight))
            .collect();
    }

    let mut weights = Vec::with_capacity(2);
    if mount.fires_rear() {
        weights.push((TallyLocation::Rear, 1.0));
    } else {
        weights.push((TallyLocation::Standard, 1.0));
    }
    if mount.turret {
        if category.can_mount_turrets() {
            weights.push((TallyLocation::Turret, 1.0));
        } else {
            warn!(
                weapon = %mount.name,
                category = %category,
                "Turret mount on a category without turrets; turret damage ignored"
            );
        }
    }
    weights
}

/// Arc weights of a large craft location.
#[must_use]
pub fn arc_weights(location: Location) -> Vec<(Facing, f64)> {
    match location {
        Location::LeftFront => vec![(Facing::Front, 0.5), (Facing::Left, 0.5)],
        Location::RightFront => vec![(Facing::Front, 0.5), (Facing::Right, 0.5)],
        Location::LeftSide | Location::LeftWing => vec![(Facing::Left, 1.0)],
        Location::RightSide | Location::RightWing => vec![(Facing::Right, 1.0)],
        Location::LeftAft => vec![(Facing::Left, 0.5), (Facing::Rear, 0.5)],
        Location::RightAft => vec![(Facing::Right, 0.5), (Facing::Rear, 0.5)],
        Location::Aft | Location::Rear => vec![(Facing::Rear, 1.0)],
        _ => vec![(Facing::Front, 1.0)],
    }
}

/// Arc that receives ability counts from a large craft location.
fn primary_arc(location: Location) -> Facing {
    arc_weights(location)
        .first()
        .map_or(Facing::Front, |(facing, _)| *facing)
}

/// Per-band damage of a single weapon before the /10 scaling and before
/// ammo, one-shot, targeting computer and AES modifiers.
///
/// `with_links` controls whether Artemis bonuses apply.
fn base_bands(mount: &WeaponMount, with_links: bool) -> Bands {
    let profile = &mount.profile;
    let probes = if profile.scale.uses_capital_ranges() {
        CAPITAL_RANGES
    } else {
        STANDARD_RANGES
    };

    let mut damage = profile.damage;
    if mount.has_link(LinkedModifier::PpcCapacitor) {
        damage += PPC_CAPACITOR_BONUS;
    }

    let to_hit = 1.0 - 0.05 * f64::from(profile.to_hit_modifier);
    let link = if with_links && profile.family.is_missile() {
        if mount.has_link(LinkedModifier::ArtemisV) {
            1.3
        } else if mount.has_link(LinkedModifier::ArtemisIv) {
            1.2
        } else {
            1.0
        }
    } else {
        1.0
    };

    let mut bands = [0.0; 4];
    for (band, probe) in probes.iter().enumerate() {
        let reach = if band == 3 {
            profile.extreme_range()
        } else {
            profile.long_range()
        };
        if reach < *probe {
            continue;
        }
        let min_range = if band == 0 {
            MIN_RANGE_FACTORS[(profile.min_range as usize).min(MIN_RANGE_FACTORS.len() - 1)]
        } else {
            1.0
        };
        bands[band] = damage * min_range * to_hit * link;
    }
    bands
}

/// Aggregates weapon damage for one record.
struct Aggregator<'a> {
    record: &'a UnitRecord,
    category: UnitCategory,
    guns_per_pool: BTreeMap<&'a str, u32>,
    tally: DamageTally,
}

impl<'a> Aggregator<'a> {
    fn new(record: &'a UnitRecord, category: UnitCategory) -> Self {
        let mut guns_per_pool: BTreeMap<&str, u32> = BTreeMap::new();
        for weapon in &record.weapons {
            if let Some(pool) = &weapon.ammo_pool {
                *guns_per_pool.entry(pool.as_str()).or_insert(0) += weapon.count;
            }
        }
        Self {
            record,
            category,
            guns_per_pool,
            tally: DamageTally::default(),
        }
    }

    /// Catalog receiving bucket grants for a mount.
    fn grants_for(&mut self, mount: &WeaponMount) -> &mut AbilityCatalog {
        if self.category.uses_arcs() {
            let facing = primary_arc(mount.location);
            &mut self.tally.entry(TallyLocation::Arc(facing)).abilities
        } else {
            &mut self.tally.abilities
        }
    }

    fn count_grant(&mut self, mount: &WeaponMount, tag: AbilityTag) -> Result<()> {
        let count = i64::from(mount.count);
        self.grants_for(mount).merge_int(tag, count)?;
        Ok(())
    }

    fn flag_grant(&mut self, mount: &WeaponMount, tag: AbilityTag) -> Result<()> {
        self.grants_for(mount).set(tag)?;
        Ok(())
    }

    fn run(mut self) -> Result<DamageTally> {
        let record = self.record;
        for mount in &record.weapons {
            trace!(weapon = %mount.name, bucket = ?mount.profile.kind, "Classifying weapon");
            self.classify(mount)?;
        }

        if self.category == UnitCategory::CI {
            self.finish_conventional_infantry();
        }

        debug!(
            category = %self.category,
            locations = self.tally.locations.len(),
            front_heat = self.tally.front_heat,
            indirect_fire = self.tally.indirect_fire,
            "Aggregated weapon damage"
        );
        Ok(self.tally)
    }

    fn classify(&mut self, mount: &WeaponMount) -> Result<()> {
        let arcs = self.category.uses_arcs();
        match mount.profile.kind {
            WeaponKind::Narc => self.count_grant(mount, AbilityTag::Snarc),
            WeaponKind::INarc => self.count_grant(mount, AbilityTag::Inarc),
            WeaponKind::CompactNarc => self.count_grant(mount, AbilityTag::Cnarc),
            WeaponKind::AntiMissile if arcs => self.count_grant(mount, AbilityTag::Pnt),
            WeaponKind::AntiMissile => self.flag_grant(mount, AbilityTag::Ams),
            WeaponKind::LaserAntiMissile if arcs => self.count_grant(mount, AbilityTag::Pnt),
            WeaponKind::LaserAntiMissile => self.flag_grant(mount, AbilityTag::Rams),
            WeaponKind::PointDefense => self.count_grant(mount, AbilityTag::Pnt),
            WeaponKind::Tag => self.flag_grant(mount, AbilityTag::Tag),
            WeaponKind::LightTag => self.flag_grant(mount, AbilityTag::Ltag),
            WeaponKind::C3Master => {
                self.count_grant(mount, AbilityTag::C3m)?;
                self.flag_grant(mount, AbilityTag::Tag)
            }
            WeaponKind::C3BoostedMaster => {
                self.count_grant(mount, AbilityTag::C3bsm)?;
                self.flag_grant(mount, AbilityTag::Tag)
            }
            WeaponKind::C3EmergencyMaster => {
                self.count_grant(mount, AbilityTag::C3em)?;
                self.flag_grant(mount, AbilityTag::Tag)
            }
            WeaponKind::Artillery(kind) | WeaponKind::BayArtillery(kind) => {
                self.count_grant(mount, artillery_tag(kind))
            }
            WeaponKind::ArtilleryCannon(kind) => {
                self.count_grant(mount, artillery_cannon_tag(kind))?;
                self.generic(mount);
                Ok(())
            }
            WeaponKind::BombletRack => Ok(()),
            WeaponKind::MekTaser => self.count_grant(mount, AbilityTag::Mtas),
            WeaponKind::BattleArmorTaser => self.count_grant(mount, AbilityTag::Btas),
            WeaponKind::Tsemp => self.count_grant(mount, AbilityTag::Tsemp),
            WeaponKind::TsempOneShot => self.count_grant(mount, AbilityTag::Tsempo),
            WeaponKind::InfantryAttack | WeaponKind::Standard if self.category.is_infantry() => {
                self.population(mount);
                Ok(())
            }
            WeaponKind::InfantryAttack => {
                warn!(
                    weapon = %mount.name,
                    category = %self.category,
                    "Infantry attack on non-infantry unit ignored"
                );
                Ok(())
            }
            WeaponKind::Standard => {
                self.generic(mount);
                Ok(())
            }
        }
    }

    /// Ammo-sufficiency and one-shot modifiers.
    fn supply_modifier(&self, mount: &WeaponMount) -> f64 {
        let profile = &mount.profile;
        let mut factor = 1.0;

        if profile.uses_ammo {
            let rounds_per_gun = match &mount.ammo_pool {
                Some(pool) => {
                    let guns = self
                        .guns_per_pool
                        .get(pool.as_str())
                        .copied()
                        .unwrap_or(1)
                        .max(1);
                    self.record.ammo_in_pool(pool) / (guns * profile.family.fire_rate())
                }
                None => 0,
            };
            if rounds_per_gun < MIN_ROUNDS_PER_GUN {
                factor *= AMMO_PENALTY;
            }
        }

        if profile.one_shot && !profile.fusillade {
            factor *= ONE_SHOT_PENALTY;
        }
        factor
    }

    /// Targeting computer and AES modifiers.
    fn fire_control_modifier(&self, mount: &WeaponMount) -> f64 {
        let profile = &mount.profile;
        let mut factor = 1.0;

        let tc_excluded = matches!(
            profile.family,
            WeaponFamily::LbxAutocannon | WeaponFamily::RotaryAutocannon
        );
        if profile.direct_fire
            && !tc_excluded
            && self.record.has_equipment(EquipmentKind::TargetingComputer)
        {
            factor *= TARGETING_COMPUTER_BONUS;
        }

        if mount.location.is_arm()
            && self
                .record
                .has_equipment_at(EquipmentKind::Aes, mount.location)
        {
            factor *= AES_BONUS;
        }
        factor
    }

    /// Tally a weapon with no bucket-specific handling.
    ///
    /// Arc units carry no IF ability, so indirect fire is only accumulated
    /// for standard-damage units. TAG and C3 grants on arc units land in the
    /// primary arc's catalog through [`Self::grants_for`].
    fn generic(&mut self, mount: &WeaponMount) {
        let count = f64::from(mount.count);
        let supply = self.supply_modifier(mount);
        let modifier = supply * self.fire_control_modifier(mount) * count / 10.0;
        let mut bands = base_bands(mount, true);
        for band in &mut bands {
            *band *= modifier;
        }

        let weights = location_weights(mount, self.category);
        let classes = SpecialClass::of(mount);
        let scale = mount.profile.scale;
        for (location, weight) in &weights {
            let tally = self.tally.entry(*location);
            let target = match scale {
                WeaponScale::Standard => &mut tally.standard,
                WeaponScale::Capital => &mut tally.capital,
                WeaponScale::SubCapital => &mut tally.sub_capital,
                WeaponScale::CapitalMissile => &mut tally.missile,
            };
            add_scaled(target, &bands, *weight);
            for class in &classes {
                let special = tally.special.entry(*class).or_insert([0.0; 4]);
                add_scaled(special, &bands, *weight);
            }
        }

        let heat = self.weapon_heat(mount);
        if mount.fires_rear() {
            self.tally.rear_heat += heat;
        } else {
            self.tally.front_heat += heat;
            if bands[2] > 0.0 {
                self.tally.long_heat += heat;
            }
            if mount.profile.indirect_fire && !self.category.uses_arcs() {
                let plain = base_bands(mount, false);
                self.tally.indirect_fire += plain[2] * supply * count / 10.0;
            }
        }
    }

    fn weapon_heat(&self, mount: &WeaponMount) -> f64 {
        let mut heat = f64::from(mount.profile.heat);
        if mount.has_link(LinkedModifier::PpcCapacitor) {
            heat += PPC_CAPACITOR_BONUS;
        }
        heat * f64::from(mount.profile.family.fire_rate()) * f64::from(mount.count)
    }

    /// Population-scaled infantry damage.
    ///
    /// Battle armor is finished here; conventional infantry accumulates
    /// per-trooper damage that [`Self::finish_conventional_infantry`]
    /// scales once every weapon has been seen.
    fn population(&mut self, mount: &WeaponMount) {
        let count = f64::from(mount.count);
        let per_trooper = base_bands(mount, true);
        match self.category {
            UnitCategory::BA => {
                let troopers = self.record.troopers.min(6) as usize;
                let cluster = if troopers == 0 {
                    0.0
                } else {
                    BA_CLUSTER_AVERAGE[troopers - 1]
                };
                let tally = self.tally.entry(TallyLocation::Standard);
                add_scaled(&mut tally.standard, &per_trooper, cluster * count / 10.0);
                for class in SpecialClass::of(mount) {
                    let special = tally.special.entry(class).or_insert([0.0; 4]);
                    add_scaled(special, &per_trooper, cluster * count / 10.0);
                }
            }
            _ => {
                let tally = self.tally.entry(TallyLocation::Standard);
                add_scaled(&mut tally.standard, &per_trooper, count);
            }
        }
    }

    fn finish_conventional_infantry(&mut self) {
        let troopers = f64::from(self.record.troopers);
        if let Some(tally) = self.tally.locations.get_mut(&TallyLocation::Standard) {
            for band in &mut tally.standard {
                *band = round_half_up(*band * troopers) / 10.0;
            }
        }
    }
}

/// Aggregate weapon damage and heat for a record.
pub fn aggregate(record: &UnitRecord, category: UnitCategory) -> Result<DamageTally> {
    Aggregator::new(record, category).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(kind: &str, weapons: &str, extra: &str) -> UnitRecord {
        UnitRecord::from_ron(
            &format!(
                "UnitRecord(chassis: \"Test\", kind: {kind}, tonnage: 50.0, \
                 weapons: [{weapons}] {extra})"
            ),
            "test",
        )
        .unwrap()
    }

    const MEDIUM_LASER: &str = "(name: \"Medium Laser\", location: CenterTorso, \
        profile: (damage: 5.0, heat: 3, ranges: (3, 6, 9, 0), direct_fire: true))";

    const LRM10: &str = "(name: \"LRM 10\", location: LeftTorso, ammo_pool: Some(\"LRM\"), \
        profile: (family: Lrm, damage: 6.0, heat: 4, ranges: (7, 14, 21, 0), min_range: 6, \
        uses_ammo: true, indirect_fire: true))";

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_medium_laser_bands() {
        let record = unit("Mek", MEDIUM_LASER, "");
        let tally = aggregate(&record, UnitCategory::BM).unwrap();
        let standard = tally.standard(TallyLocation::Standard);
        assert!(approx(standard[0], 0.5));
        assert!(approx(standard[1], 0.5));
        assert_eq!(standard[2], 0.0);
        assert!(approx(tally.front_heat, 3.0));
        assert_eq!(tally.long_heat, 0.0);
    }

    #[test]
    fn test_lrm_min_range_and_indirect_fire() {
        let record = unit("Mek", LRM10, ", ammo: [(pool: \"LRM\", shots: 24)]");
        let tally = aggregate(&record, UnitCategory::BM).unwrap();
        let standard = tally.standard(TallyLocation::Standard);
        assert!(approx(standard[0], 0.3));
        assert!(approx(standard[1], 0.6));
        assert!(approx(standard[2], 0.6));
        assert!(approx(tally.indirect_fire, 0.6));
        let lrm = tally.location(TallyLocation::Standard).unwrap().special[&SpecialClass::Lrm];
        assert!(approx(lrm[2], 0.6));
    }

    #[test]
    fn test_ammo_penalty() {
        let record = unit("Mek", LRM10, ", ammo: [(pool: \"LRM\", shots: 6)]");
        let tally = aggregate(&record, UnitCategory::BM).unwrap();
        assert!(approx(tally.standard(TallyLocation::Standard)[1], 0.45));
    }

    #[test]
    fn test_artemis_skips_indirect_fire() {
        let artemis = LRM10.replace("ammo_pool:", "links: [ArtemisIv], ammo_pool:");
        let record = unit("Mek", &artemis, ", ammo: [(pool: \"LRM\", shots: 24)]");
        let tally = aggregate(&record, UnitCategory::BM).unwrap();
        assert!(approx(tally.standard(TallyLocation::Standard)[1], 0.72));
        assert!(approx(tally.indirect_fire, 0.6));
    }

    #[test]
    fn test_arc_units_skip_indirect_fire() {
        let nose = LRM10.replace("LeftTorso", "Nose");
        let record = unit("SpheroidDropship", &nose, ", ammo: [(pool: \"LRM\", shots: 24)]");
        let tally = aggregate(&record, UnitCategory::DS).unwrap();
        assert_eq!(tally.indirect_fire, 0.0);
        let front = tally.location(TallyLocation::Arc(Facing::Front)).unwrap();
        assert!(front.standard[2] > 0.0);
    }

    #[test]
    fn test_rear_and_turret_routing() {
        let weapons = format!(
            "{}, {}",
            MEDIUM_LASER.replace("CenterTorso", "Rear"),
            MEDIUM_LASER.replace("location: CenterTorso", "location: Body, turret: true"),
        );
        let record = unit("Tank", &weapons, "");
        let tally = aggregate(&record, UnitCategory::CV).unwrap();
        assert!(approx(tally.standard(TallyLocation::Rear)[0], 0.5));
        assert!(approx(tally.standard(TallyLocation::Turret)[0], 0.5));
        assert!(approx(tally.standard(TallyLocation::Standard)[0], 0.5));
    }

    #[test]
    fn test_arc_weights() {
        let weapon = MEDIUM_LASER.replace("CenterTorso", "LeftFront");
        let record = unit("SpheroidDropship", &weapon, "");
        let tally = aggregate(&record, UnitCategory::DS).unwrap();
        assert!(approx(tally.standard(TallyLocation::Arc(Facing::Front))[0], 0.25));
        assert!(approx(tally.standard(TallyLocation::Arc(Facing::Left))[0], 0.25));
        assert!(tally.location(TallyLocation::Standard).is_none());
    }

    #[test]
    fn test_bucket_grants() {
        let weapons = "(name: \"AMS\", profile: (kind: AntiMissile)), \
            (name: \"Long Tom\", count: 2, profile: (kind: Artillery(LongTom))), \
            (name: \"C3 Master\", profile: (kind: C3Master)), \
            (name: \"Narc\", profile: (kind: Narc))";
        let record = unit("Mek", weapons, "");
        let tally = aggregate(&record, UnitCategory::BM).unwrap();
        assert!(tally.abilities.contains(AbilityTag::Ams));
        assert_eq!(tally.abilities.int(AbilityTag::ArtLt), Some(2));
        assert_eq!(tally.abilities.int(AbilityTag::C3m), Some(1));
        assert!(tally.abilities.contains(AbilityTag::Tag));
        assert_eq!(tally.abilities.int(AbilityTag::Snarc), Some(1));
    }

    #[test]
    fn test_arc_ams_counts_as_point_defense() {
        let weapon = "(name: \"AMS\", location: Aft, profile: (kind: AntiMissile))";
        let record = unit("Warship", weapon, "");
        let tally = aggregate(&record, UnitCategory::WS).unwrap();
        let rear = tally.location(TallyLocation::Arc(Facing::Rear)).unwrap();
        assert_eq!(rear.abilities.int(AbilityTag::Pnt), Some(1));
        assert!(!tally.abilities.contains(AbilityTag::Ams));
    }

    #[test]
    fn test_battle_armor_cluster() {
        let weapon =
            "(name: \"Small Laser\", profile: (damage: 3.0, heat: 1, ranges: (1, 2, 3, 0)))";
        let record = unit("BattleArmor", weapon, ", troopers: 4");
        let tally = aggregate(&record, UnitCategory::BA).unwrap();
        // 3 * 2.63 / 10
        assert!(approx(tally.standard(TallyLocation::Standard)[0], 0.789));
    }

    #[test]
    fn test_conventional_infantry_population() {
        let weapon = "(name: \"Rifle\", \
            profile: (kind: InfantryAttack, damage: 0.35, ranges: (1, 2, 3, 0)))";
        let record = unit("Infantry", weapon, ", troopers: 28");
        let tally = aggregate(&record, UnitCategory::CI).unwrap();
        // round(0.35 * 28) / 10 = 10 / 10
        assert!(approx(tally.standard(TallyLocation::Standard)[0], 1.0));
    }

    #[test]
    fn test_rotary_heat_and_ammo() {
        let weapon = "(name: \"RAC/5\", ammo_pool: Some(\"RAC\"), \
            profile: (family: RotaryAutocannon, damage: 5.0, heat: 1, ranges: (5, 10, 15, 0), \
            uses_ammo: true, direct_fire: true))";
        let record = unit("Mek", weapon, ", ammo: [(pool: \"RAC\", shots: 40)]");
        let tally = aggregate(&record, UnitCategory::BM).unwrap();
        assert!(approx(tally.front_heat, 6.0));
        // 40 / 6 rounds per gun < 10: ammo penalty
        assert!(approx(tally.standard(TallyLocation::Standard)[0], 0.375));
        let ac = tally.location(TallyLocation::Standard).unwrap().special[&SpecialClass::Ac];
        assert!(approx(ac[0], 0.375));
    }
}
