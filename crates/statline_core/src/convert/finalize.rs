//! Rounding of tallied damage into vectors and damage-valued abilities.

use tracing::debug;

use super::classify::UnitCategory;
use super::damage::{DamageTally, Facing, LocationTally, SpecialClass, TallyLocation};
use super::heat::HeatOutcome;
use crate::ability::{AbilityCatalog, AbilityTag, AbilityValue, ArcSummary};
use crate::damage::{DamageValue, DamageVector};
use crate::element::ElementDamage;
use crate::error::Result;

/// Bands in an arc's STD, CAP, SCAP and MSL vectors.
const ARC_BANDS: usize = 4;

/// Bands in a turret's standard damage.
const TURRET_BANDS: usize = 3;

fn special_bands(class: SpecialClass, bands: usize) -> usize {
    if class == SpecialClass::Srm {
        2
    } else {
        bands
    }
}

/// Whether a rounded special-class vector earns its ability.
fn class_granted(class: SpecialClass, vector: &DamageVector) -> bool {
    if class == SpecialClass::Heat {
        vector.values().any(|v| v.magnitude() >= 1)
    } else {
        vector.m().magnitude() >= 1
    }
}

/// Grant special-class abilities from a location's tally.
fn grant_special_classes(
    location: &LocationTally,
    bands: usize,
    abilities: &mut AbilityCatalog,
) -> Result<()> {
    for (class, raw) in &location.special {
        let vector = DamageVector::dual_rounded_normal(raw, special_bands(*class, bands), false);
        if class_granted(*class, &vector) {
            abilities.replace(class.tag(), AbilityValue::Vector(vector))?;
        }
    }
    Ok(())
}

fn finalize_standard(
    category: UnitCategory,
    tally: &DamageTally,
    abilities: &mut AbilityCatalog,
) -> Result<ElementDamage> {
    let bands = category.damage_bands();
    let standard =
        DamageVector::dual_rounded_up(&tally.standard(TallyLocation::Standard), bands, true);

    if let Some(location) = tally.location(TallyLocation::Standard) {
        grant_special_classes(location, bands, abilities)?;
    }

    let rear =
        DamageVector::dual_rounded_normal(&tally.standard(TallyLocation::Rear), bands, false);
    if rear.has_damage() {
        abilities.replace(AbilityTag::Rear, AbilityValue::Vector(rear))?;
    }

    let indirect = DamageValue::dual_rounded_normal(tally.indirect_fire);
    if !indirect.is_zero() {
        abilities.replace(AbilityTag::If, AbilityValue::Damage(indirect))?;
    }

    if category.can_mount_turrets() {
        if let Some(location) = tally.location(TallyLocation::Turret) {
            let mut turret = ArcSummary::new(DamageVector::dual_rounded_normal(
                &location.standard,
                TURRET_BANDS,
                false,
            ));
            grant_special_classes(location, TURRET_BANDS, turret.abilities_mut())?;
            if !turret.is_empty() {
                abilities.replace(AbilityTag::Tur, AbilityValue::Arc(Box::new(turret)))?;
            }
        }
    }

    Ok(ElementDamage::Standard(standard))
}

fn finalize_arc(location: Option<&LocationTally>) -> Result<ArcSummary> {
    let Some(location) = location else {
        return Ok(ArcSummary::new(DamageVector::zero(ARC_BANDS, true)));
    };

    let mut arc = ArcSummary::new(DamageVector::dual_rounded_up(
        &location.standard,
        ARC_BANDS,
        true,
    ));
    let abilities = arc.abilities_mut();
    for (tag, value) in location.abilities.iter() {
        abilities.replace(tag, value.clone())?;
    }
    for (tag, raw) in [
        (AbilityTag::Cap, &location.capital),
        (AbilityTag::Scap, &location.sub_capital),
        (AbilityTag::Msl, &location.missile),
    ] {
        let vector = DamageVector::dual_rounded_up(raw, ARC_BANDS, false);
        if vector.has_damage() {
            abilities.replace(tag, AbilityValue::Vector(vector))?;
        }
    }
    grant_special_classes(location, ARC_BANDS, abilities)?;
    Ok(arc)
}

fn finalize_arcs(tally: &DamageTally) -> Result<ElementDamage> {
    let [front, left, right, rear] =
        Facing::ALL.map(|facing| finalize_arc(tally.location(TallyLocation::Arc(facing))));
    Ok(ElementDamage::Arcs(Box::new([front?, left?, right?, rear?])))
}

/// Round the tally into element damage and add damage-valued abilities.
pub fn finalize(
    category: UnitCategory,
    tally: &DamageTally,
    heat: &HeatOutcome,
    abilities: &mut AbilityCatalog,
) -> Result<ElementDamage> {
    let damage = if category.uses_arcs() {
        finalize_arcs(tally)?
    } else {
        finalize_standard(category, tally, abilities)?
    };
    if heat.extended {
        abilities.set(AbilityTag::Ovl)?;
    }
    debug!(
        category = %category,
        arcs = category.uses_arcs(),
        abilities = abilities.len(),
        "Finalized damage"
    );
    Ok(damage)
}
