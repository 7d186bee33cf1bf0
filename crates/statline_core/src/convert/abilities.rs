//! Ability detection.
//!
//! Equipment is matched against [`EQUIPMENT_RULES`], an ordered table of
//! `{kind, category filter, grants}` rows where the first matching row
//! wins. Unit-level rules (bays, LAM modes, omni, ...) run next, and the
//! [`OVERRIDES`] table is applied last.

use tracing::debug;

use super::classify::UnitCategory;
use super::damage::DamageTally;
use crate::ability::{AbilityCatalog, AbilityTag, AbilityValue, PayloadShape};
use crate::error::Result;
use crate::movement::{MovementMode, MovementProfile};
use crate::record::{BayKind, EquipmentKind, EquipmentMount, MotiveType, UnitRecord};

/// Effect of a matching equipment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// Add a flag.
    Flag(AbilityTag),
    /// Add 1 per mount.
    Count(AbilityTag),
    /// Add the mount's tonnage.
    Tonnage(AbilityTag),
}

/// One row of the equipment table.
#[derive(Debug, Clone, Copy)]
pub struct EquipmentRule {
    /// Equipment kind matched.
    pub kind: EquipmentKind,
    /// Categories the row applies to; `None` matches any category.
    pub categories: Option<&'static [UnitCategory]>,
    /// Abilities granted.
    pub grants: &'static [Grant],
}

impl EquipmentRule {
    const fn any(kind: EquipmentKind, grants: &'static [Grant]) -> Self {
        Self {
            kind,
            categories: None,
            grants,
        }
    }

    const fn only(
        kind: EquipmentKind,
        categories: &'static [UnitCategory],
        grants: &'static [Grant],
    ) -> Self {
        Self {
            kind,
            categories: Some(categories),
            grants,
        }
    }

    /// Whether the row applies to an item on a unit of `category`.
    #[must_use]
    pub fn matches(&self, kind: EquipmentKind, category: UnitCategory) -> bool {
        self.kind == kind && self.categories.map_or(true, |c| c.contains(&category))
    }
}

use AbilityTag as T;
use EquipmentKind as E;
use Grant::{Count, Flag, Tonnage};

/// Equipment → ability table.
pub static EQUIPMENT_RULES: &[EquipmentRule] = &[
    EquipmentRule::any(E::Ecm, &[Flag(T::Ecm)]),
    EquipmentRule::any(E::AngelEcm, &[Flag(T::Aecm)]),
    EquipmentRule::any(E::LightEcm, &[Flag(T::Lecm)]),
    EquipmentRule::any(E::Watchdog, &[Flag(T::Wat), Flag(T::Ecm)]),
    EquipmentRule::any(E::NovaCews, &[Flag(T::Nova), Flag(T::Ecm)]),
    EquipmentRule::any(E::ActiveProbe, &[Flag(T::Prb)]),
    EquipmentRule::any(E::Bloodhound, &[Flag(T::Bh)]),
    EquipmentRule::any(E::LightActiveProbe, &[Flag(T::Lprb)]),
    EquipmentRule::any(E::C3Slave, &[Flag(T::C3s)]),
    EquipmentRule::any(E::C3BoostedSlave, &[Flag(T::C3bss)]),
    EquipmentRule::any(E::C3i, &[Flag(T::C3i)]),
    EquipmentRule::any(E::NavalC3, &[Flag(T::Nc3)]),
    EquipmentRule::any(E::C3RemoteSensor, &[Flag(T::C3rs)]),
    EquipmentRule::any(E::RemoteSensorDispenser, &[Count(T::Rsd)]),
    EquipmentRule::any(E::Tsm, &[Flag(T::Tsm)]),
    EquipmentRule::any(E::IndustrialTsm, &[Flag(T::Itsm)]),
    EquipmentRule::any(E::MeleeWeapon, &[Flag(T::Mel)]),
    EquipmentRule::any(E::Case, &[Flag(T::Case)]),
    EquipmentRule::any(E::CaseII, &[Flag(T::Caseii)]),
    EquipmentRule::any(E::CaseP, &[Flag(T::Casep)]),
    EquipmentRule::any(E::ArmoredComponent, &[Flag(T::Arm)]),
    EquipmentRule::any(E::CommunicationsEquipment, &[Tonnage(T::Mhq)]),
    EquipmentRule::any(E::MobileHq, &[Tonnage(T::Mhq)]),
    EquipmentRule::any(E::Mash, &[Count(T::Mash)]),
    EquipmentRule::any(E::Searchlight, &[Flag(T::Srch)]),
    EquipmentRule::any(E::AmphibiousChassis, &[Flag(T::Amp)]),
    EquipmentRule::any(E::EnvironmentalSealing, &[Flag(T::Seal)]),
    EquipmentRule::any(E::Shield, &[Flag(T::Shld)]),
    EquipmentRule::any(E::StealthArmorSystem, &[Flag(T::Stl)]),
    EquipmentRule::any(E::MimeticArmor, &[Flag(T::Mas)]),
    EquipmentRule::any(E::LightMimeticArmor, &[Flag(T::Lmas)]),
    EquipmentRule::only(E::MagneticClamp, &[UnitCategory::BA], &[Flag(T::Xmec)]),
    EquipmentRule::only(E::LightTagDesignator, &[UnitCategory::BA], &[Flag(T::Ltag)]),
    EquipmentRule::any(E::DroneOs, &[Flag(T::Dro)]),
    EquipmentRule::any(E::DroneCarrierControl, &[Flag(T::Dn)]),
    EquipmentRule::any(E::Hpg, &[Flag(T::Hpg)]),
    EquipmentRule::any(E::KfDrive, &[Flag(T::Kf)]),
    EquipmentRule::any(E::LithiumFusionBattery, &[Flag(T::Lf)]),
    EquipmentRule::any(E::RadicalHeatSink, &[Flag(T::Rhs)]),
    EquipmentRule::any(E::EmergencyCoolant, &[Flag(T::Ecs)]),
    EquipmentRule::any(E::AdvancedFireControl, &[Flag(T::Afc)]),
    EquipmentRule::any(E::BasicFireControl, &[Flag(T::Bfc)]),
    EquipmentRule::any(E::VstolChassis, &[Flag(T::Vstol)]),
    EquipmentRule::any(E::Helipad, &[Flag(T::Heli)]),
    EquipmentRule::any(E::DockingCollar, &[Count(T::Dt)]),
    EquipmentRule::any(E::BridgeLayer, &[Flag(T::Brid)]),
    EquipmentRule::any(E::VariableRangeTargeting, &[Flag(T::Vrt)]),
    EquipmentRule::any(E::FireResistantArmor, &[Flag(T::Fr)]),
    EquipmentRule::any(E::ReinforcedCockpit, &[Flag(T::Cr)]),
    EquipmentRule::any(E::HarJelII, &[Flag(T::Bhj2)]),
    EquipmentRule::any(E::HarJelIII, &[Flag(T::Bhj3)]),
    EquipmentRule::any(E::ReconCamera, &[Flag(T::Rcn)]),
    EquipmentRule::any(E::HighResImager, &[Flag(T::Rcn)]),
    EquipmentRule::any(E::HyperspectralImager, &[Flag(T::Rcn)]),
    EquipmentRule::any(E::InfraredImager, &[Flag(T::Rcn)]),
    EquipmentRule::any(E::TrailerHitch, &[Flag(T::Htc)]),
    EquipmentRule::any(E::CargoContainer, &[Tonnage(T::Ct)]),
    EquipmentRule::any(E::ArmoredMotiveSystem, &[Flag(T::Ars)]),
    EquipmentRule::any(E::BoobyTrap, &[Flag(T::Bt)]),
    EquipmentRule::any(E::MobileFieldBase, &[Flag(T::Mfb)]),
    EquipmentRule::any(E::MineDispenser, &[Count(T::Mds)]),
    EquipmentRule::any(E::NullSignature, &[Flag(T::Stl)]),
    EquipmentRule::any(E::VoidSignature, &[Flag(T::Mas)]),
    EquipmentRule::any(E::ChameleonLps, &[Flag(T::Lmas)]),
];

/// Post-scan override.
#[derive(Debug, Clone, Copy)]
pub enum Override {
    /// If the first tag is present, remove the others.
    Removes(AbilityTag, &'static [AbilityTag]),
    /// If any of the tags is present, add the implied flag.
    Implies(&'static [AbilityTag], AbilityTag),
}

/// Overrides, applied in order after the scan.
pub static OVERRIDES: &[Override] = &[
    Override::Removes(T::Aecm, &[T::Ecm, T::Lecm]),
    Override::Removes(T::Ecm, &[T::Lecm]),
    Override::Removes(T::Stl, &[T::Ecm]),
    Override::Removes(T::Xmec, &[T::Mec]),
    Override::Removes(T::Caseii, &[T::Case, T::Casep]),
    Override::Removes(T::Case, &[T::Casep]),
    Override::Removes(T::Rams, &[T::Ams]),
    Override::Removes(T::Bhj3, &[T::Bhj2]),
    Override::Implies(&[T::Prb, T::Lprb, T::Bh, T::Wat, T::Rsd], T::Rcn),
];

/// Find the first equipment row matching an item.
#[must_use]
pub fn rule_for(kind: EquipmentKind, category: UnitCategory) -> Option<&'static EquipmentRule> {
    EQUIPMENT_RULES.iter().find(|rule| rule.matches(kind, category))
}

fn apply_grant(catalog: &mut AbilityCatalog, grant: Grant, item: &EquipmentMount) -> Result<()> {
    match grant {
        Grant::Flag(tag) => catalog.set(tag)?,
        Grant::Count(tag) => catalog.merge_int(tag, 1)?,
        Grant::Tonnage(tag) => catalog.merge_real(tag, item.tonnage)?,
    }
    Ok(())
}

fn apply_override(catalog: &mut AbilityCatalog, rule: &Override) -> Result<()> {
    match rule {
        Override::Removes(full, basic) => {
            if catalog.contains(*full) {
                for tag in *basic {
                    catalog.remove(*tag);
                }
            }
        }
        Override::Implies(sources, implied) => {
            if catalog.contains_any(sources) {
                catalog.set(*implied)?;
            }
        }
    }
    Ok(())
}

fn bay_tags(kind: BayKind) -> (AbilityTag, bool) {
    match kind {
        BayKind::Cargo => (T::Ct, true),
        BayKind::Infantry | BayKind::BattleArmor => (T::It, false),
        BayKind::Mek => (T::Mt, true),
        BayKind::ProtoMek => (T::Pt, true),
        BayKind::LightVehicle => (T::Vtm, true),
        BayKind::HeavyVehicle => (T::Vth, true),
        BayKind::SuperheavyVehicle => (T::Vts, true),
        BayKind::Fighter => (T::At, true),
        BayKind::SmallCraft => (T::St, true),
    }
}

fn unit_rules(
    record: &UnitRecord,
    category: UnitCategory,
    catalog: &mut AbilityCatalog,
) -> Result<()> {
    if record.omni {
        catalog.set(T::Omni)?;
    }
    if category == UnitCategory::BA && record.movement.motive != MotiveType::Quad {
        catalog.set(T::Mec)?;
    }
    if record.movement.umu > 0 {
        catalog.set(T::Umu)?;
    }
    if record.armor.bar < 10 {
        catalog.set(T::Bar)?;
    }
    if category == UnitCategory::AF {
        catalog.set(T::Soa)?;
    }
    let energy_only = !record.weapons.is_empty()
        && record.ammo.is_empty()
        && record.weapons.iter().all(|w| !w.profile.uses_ammo);
    if energy_only {
        catalog.set(T::Ene)?;
    }

    if let Some(lam) = &record.lam {
        if lam.bimodal {
            let map = MovementProfile::new().with(MovementMode::AerodyneThrust, lam.fighter_thrust);
            catalog.replace(T::Bim, AbilityValue::Map(map))?;
        } else {
            let map = MovementProfile::new()
                .with(MovementMode::Wige, lam.airmek_mp * 2)
                .with(MovementMode::AerodyneThrust, lam.fighter_thrust);
            catalog.replace(T::Lam, AbilityValue::Map(map))?;
        }
    }

    for bay in &record.bays {
        let (tag, has_doors) = bay_tags(bay.kind);
        if tag.shape() == PayloadShape::Real {
            catalog.merge_real(tag, bay.capacity)?;
        } else {
            catalog.merge_int(tag, bay.capacity.round() as i64)?;
        }
        if has_doors && bay.doors > 0 {
            if let Some(doors) = tag.doors() {
                catalog.merge_int(doors, i64::from(bay.doors))?;
            }
        }
    }

    if category.is_fighter() {
        let bombs = i64::from(record.bomb_capacity / 5);
        if bombs > 0 {
            catalog.merge_int(T::Bomb, bombs)?;
        }
    }

    if record.has_quirk("crew") {
        catalog.merge_int(T::Crw, 1)?;
    }
    Ok(())
}

/// Detect abilities from equipment, weapon buckets and unit-level rules.
pub fn detect(
    record: &UnitRecord,
    category: UnitCategory,
    tally: &DamageTally,
) -> Result<AbilityCatalog> {
    let mut catalog = tally.abilities.clone();

    for item in &record.equipment {
        if let Some(rule) = rule_for(item.kind, category) {
            for grant in rule.grants {
                apply_grant(&mut catalog, *grant, item)?;
            }
        }
    }

    unit_rules(record, category, &mut catalog)?;

    for rule in OVERRIDES {
        apply_override(&mut catalog, rule)?;
    }

    if let Some(mhq) = catalog.number(T::Mhq) {
        catalog.remove(T::Mhq);
        let floored = mhq.floor();
        if floored > 0.0 {
            catalog.replace(T::Mhq, AbilityValue::Int(floored as i64))?;
        }
    }

    debug!(category = %category, abilities = catalog.len(), "Detected abilities");
    Ok(catalog)
}
