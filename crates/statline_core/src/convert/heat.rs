//! Heat adjustment.
//!
//! When a unit generates more heat than it can sink, its damage at short
//! and medium range is scaled down to what it can sustain, and the gap
//! becomes the overheat (OV) rating.

use tracing::debug;

use super::classify::UnitCategory;
use super::damage::{DamageTally, TallyLocation};
use crate::math::{round_up, round_up_to_tenth};
use crate::record::{ArmorKind, EquipmentKind, UnitRecord};

/// Heat the unit can always absorb without penalty.
const FREE_HEAT: f64 = 4.0;

/// Highest overheat rating.
const MAX_OVERHEAT: f64 = 4.0;

/// Result of heat adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeatOutcome {
    /// Overheat rating.
    pub overheat: u8,
    /// Overheat extends to the Long band.
    pub extended: bool,
    /// Total heat of forward-firing weapons, movement and penalties.
    pub total_front_heat: f64,
    /// Heat dissipation plus bonuses.
    pub capacity: f64,
    /// Whether damage was rescaled.
    pub rescaled: bool,
}

/// Difference between rounded damage and rounded heat-limited damage.
#[must_use]
pub fn heat_delta(damage: f64, capacity: f64, heat: f64) -> f64 {
    round_up(round_up_to_tenth(damage))
        - round_up(round_up_to_tenth(damage * capacity / (heat - FREE_HEAT)))
}

/// Heat generated by movement.
#[must_use]
pub fn movement_heat(record: &UnitRecord, category: UnitCategory) -> f64 {
    if !category.is_mek() {
        return 0.0;
    }
    let jump = record.movement.jump;
    if jump > 0 {
        let heat = if record.movement.improved_jump_jets {
            jump.div_ceil(2)
        } else {
            jump
        };
        f64::from(heat.max(3))
    } else {
        2.0
    }
}

/// Fixed heat from signature-reduction systems.
#[must_use]
pub fn penalty_heat(record: &UnitRecord) -> f64 {
    let mut heat = 0.0;
    if record.armor.kind == ArmorKind::Stealth
        || record.has_equipment(EquipmentKind::StealthArmorSystem)
    {
        heat += 10.0;
    }
    if record.has_equipment(EquipmentKind::NullSignature) {
        heat += 10.0;
    }
    if record.has_equipment(EquipmentKind::VoidSignature) {
        heat += 10.0;
    }
    if record.has_equipment(EquipmentKind::ChameleonLps) {
        heat += 6.0;
    }
    heat
}

/// Heat dissipation plus equipment bonuses.
#[must_use]
pub fn heat_capacity(record: &UnitRecord) -> f64 {
    let mut capacity = f64::from(record.heat_dissipation.max(0));
    capacity += record.count_equipment(EquipmentKind::CoolantPod) as f64;
    if record.has_equipment(EquipmentKind::PartialWing) {
        capacity += 3.0;
    }
    if record.has_equipment(EquipmentKind::RadicalHeatSink) {
        capacity += 1.0;
    }
    if record.has_equipment(EquipmentKind::EmergencyCoolant) {
        capacity += 1.0;
    }
    capacity
}

fn scale_factor(capacity: f64, heat: f64) -> f64 {
    if heat - FREE_HEAT > capacity {
        capacity / (heat - FREE_HEAT)
    } else {
        1.0
    }
}

/// Rescale `tally` for excess heat and derive the overheat rating.
pub fn adjust(record: &UnitRecord, category: UnitCategory, tally: &mut DamageTally) -> HeatOutcome {
    if !category.tracks_heat() {
        return HeatOutcome::default();
    }

    let base = movement_heat(record, category) + penalty_heat(record);
    let capacity = heat_capacity(record);
    let total_front_heat = base + tally.front_heat;
    let mut outcome = HeatOutcome {
        total_front_heat,
        capacity,
        ..HeatOutcome::default()
    };

    if total_front_heat - FREE_HEAT <= capacity {
        debug!(heat = total_front_heat, capacity, "Heat within capacity");
        return outcome;
    }

    let standard = tally.standard(TallyLocation::Standard);
    let overheat = heat_delta(standard[1], capacity, total_front_heat).clamp(0.0, MAX_OVERHEAT);
    outcome.overheat = overheat as u8;

    if outcome.overheat > 0 && category.supports_extended_overheat() {
        let heat_long = base + tally.long_heat;
        outcome.extended = heat_long - FREE_HEAT > capacity
            && heat_delta(standard[2], capacity, heat_long) >= 1.0;
    }

    let front_factor = scale_factor(capacity, total_front_heat);
    let rear_factor = scale_factor(capacity, base + tally.rear_heat);
    let last_band = if outcome.extended { 3 } else { 1 };

    for (location, location_tally) in &mut tally.locations {
        let factor = if location.is_rear_facing() {
            rear_factor
        } else {
            front_factor
        };
        for bands in location_tally.all_bands_mut() {
            for value in bands.iter_mut().take(last_band + 1) {
                *value = round_up_to_tenth(*value * factor);
            }
        }
    }

    if outcome.extended {
        tally.indirect_fire = round_up_to_tenth(tally.indirect_fire * front_factor);
    }
    outcome.rescaled = true;

    debug!(
        heat = total_front_heat,
        capacity,
        overheat = outcome.overheat,
        extended = outcome.extended,
        "Rescaled damage for heat"
    );
    outcome
}
