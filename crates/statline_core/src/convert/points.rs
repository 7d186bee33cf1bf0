//! Point value scoring.
//!
//! Ground and aerospace elements use separate formulas built from the same
//! pieces: a damage-driven offense term scaled by a blanket factor, a
//! durability-driven defense term, and flat bonuses read from ability tables.

use tracing::debug;

use super::classify::UnitCategory;
use super::damage::Facing;
use crate::ability::{AbilityCatalog, AbilityTag, AbilityValue};
use crate::damage::DamageVector;
use crate::element::ConvertedElement;
use crate::math::{round_half_up, round_up_to_half};

/// How an ability contributes to a score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bonus {
    /// Fixed amount when present.
    Flat(f64),
    /// Amount per unit of the tag's numeric value.
    PerCount(f64),
    /// Largest band of the tag's damage payload.
    LargestBand,
}

use AbilityTag as T;
use Bonus::{Flat, LargestBand, PerCount};

/// Offense bonuses shared by ground and aerospace elements.
pub static OFFENSE_BONUSES: &[(AbilityTag, Bonus)] = &[
    (T::Mel, Flat(0.5)),
    (T::Snarc, Flat(1.0)),
    (T::Inarc, Flat(1.0)),
    (T::Cnarc, Flat(0.5)),
    (T::Tsm, Flat(1.0)),
    (T::Itsm, Flat(0.5)),
    (T::Tag, Flat(0.5)),
    (T::Ltag, Flat(0.25)),
    (T::ArtAis, PerCount(6.0)),
    (T::ArtAc, PerCount(4.0)),
    (T::ArtBa, PerCount(7.0)),
    (T::ArtCm5, PerCount(5.0)),
    (T::ArtCm7, PerCount(7.0)),
    (T::ArtCm9, PerCount(9.0)),
    (T::ArtCm12, PerCount(12.0)),
    (T::ArtLt, PerCount(6.0)),
    (T::ArtS, PerCount(4.0)),
    (T::ArtT, PerCount(3.0)),
    (T::ArtLtc, PerCount(3.0)),
    (T::ArtSc, PerCount(2.0)),
    (T::ArtTc, PerCount(1.0)),
    (T::Mtas, PerCount(0.2)),
    (T::Btas, PerCount(0.2)),
    (T::Tsemp, PerCount(1.0)),
    (T::Tsempo, PerCount(0.5)),
    (T::Bomb, PerCount(0.5)),
    (T::Ht, LargestBand),
    (T::If, LargestBand),
];

/// Defense bonuses of ground elements.
pub static GROUND_DEFENSE_BONUSES: &[(AbilityTag, Bonus)] = &[
    (T::Ams, Flat(1.0)),
    (T::Rams, Flat(1.25)),
    (T::Arm, Flat(0.5)),
    (T::Bhj2, Flat(0.5)),
    (T::Bhj3, Flat(1.0)),
    (T::Cr, Flat(0.25)),
    (T::Case, Flat(0.25)),
    (T::Caseii, Flat(0.5)),
    (T::Fr, Flat(0.5)),
    (T::Shld, Flat(1.0)),
];

/// Defense bonuses of aerospace elements. PNT in arcs is added separately.
pub static AEROSPACE_DEFENSE_BONUSES: &[(AbilityTag, Bonus)] =
    &[(T::Ams, Flat(1.0)), (T::Pnt, PerCount(1.0))];

/// Flat force bonuses.
pub static FORCE_BONUSES: &[(AbilityTag, Bonus)] = &[
    (T::Rcn, Flat(2.0)),
    (T::Ecm, Flat(2.0)),
    (T::Aecm, Flat(3.0)),
    (T::Lecm, Flat(1.0)),
    (T::Prb, Flat(1.0)),
    (T::Lprb, Flat(1.0)),
    (T::Bh, Flat(1.0)),
    (T::Wat, Flat(1.0)),
    (T::Nova, Flat(1.0)),
    (T::Dn, Flat(1.0)),
    (T::Mhq, PerCount(1.0)),
];

/// Abilities that stop a short-ranged unit from counting as a brawler.
const RANGED_SUPPORT: [AbilityTag; 4] = [T::If, T::Lrm, T::Tag, T::Ltag];

const C3_BONUS: f64 = 0.05;
const BRAWLER_MALUS: f64 = 0.25;

fn arc_weight(facing: Facing) -> f64 {
    match facing {
        Facing::Front => 1.0,
        Facing::Left | Facing::Right => 0.5,
        Facing::Rear => 0.25,
    }
}

fn bonus_value(abilities: &AbilityCatalog, tag: AbilityTag, bonus: Bonus) -> f64 {
    let Some(value) = abilities.get(tag) else {
        return 0.0;
    };
    match bonus {
        Bonus::Flat(amount) => amount,
        Bonus::PerCount(amount) => value.as_f64().unwrap_or(0.0) * amount,
        Bonus::LargestBand => match value {
            AbilityValue::Damage(damage) => damage.as_points(),
            AbilityValue::Vector(vector) => vector.max_points(),
            _ => 0.0,
        },
    }
}

/// Sum of a bonus table over a catalog.
#[must_use]
pub fn table_bonus(abilities: &AbilityCatalog, table: &[(AbilityTag, Bonus)]) -> f64 {
    table
        .iter()
        .map(|(tag, bonus)| bonus_value(abilities, *tag, *bonus))
        .sum()
}

/// Multiplier applied to the whole offense term.
#[must_use]
pub fn blanket_factor(category: UnitCategory, abilities: &AbilityCatalog) -> f64 {
    let mut factor = 1.0;
    if abilities.contains(T::Vrt) {
        factor += 0.1;
    }
    for tag in [T::Shld, T::Stl, T::Dro] {
        if abilities.contains(tag) {
            factor -= 0.1;
        }
    }
    if category == UnitCategory::SV && !abilities.contains(T::Afc) {
        factor -= if abilities.contains(T::Bfc) { 0.1 } else { 0.2 };
    }
    factor
}

/// `S + 2M + L` in points, minimal damage counting 0.5.
fn weighted_damage(vector: &DamageVector) -> f64 {
    vector.s().as_points() + 2.0 * vector.m().as_points() + vector.l().as_points()
}

fn has_c3(abilities: &AbilityCatalog) -> bool {
    abilities.iter().any(|(tag, _)| tag.is_c3())
}

fn ground_points(element: &ConvertedElement) -> f64 {
    let abilities = &element.abilities;
    let zero = DamageVector::zero(3, true);
    let damage = element.standard_damage().unwrap_or(&zero);
    let (s, m, l) = (
        damage.s().as_points(),
        damage.m().as_points(),
        damage.l().as_points(),
    );
    let tmm = f64::from(element.tmm);

    let mut offense = weighted_damage(damage);
    if element.category.has_size_offense_bonus() {
        offense += 0.5 * f64::from(element.size);
    }
    if element.overheat >= 1 {
        offense += 1.0 + 0.5 * f64::from(element.overheat - 1);
    }
    offense += table_bonus(abilities, OFFENSE_BONUSES);
    offense *= blanket_factor(element.category, abilities);

    let mut defense = 0.125 * f64::from(element.movement.top_speed());
    if element.movement.has_jump() {
        defense += 0.5;
    }
    defense += table_bonus(abilities, GROUND_DEFENSE_BONUSES);
    let armor_mult = if abilities.contains(T::Bar) { 1.5 } else { 2.0 };
    let structure_mult = match element.category {
        UnitCategory::IM | UnitCategory::CV | UnitCategory::SV => 0.5,
        _ => 1.0,
    };
    let concealment = [T::Stl, T::Mas, T::Lmas]
        .iter()
        .filter(|tag| abilities.contains(**tag))
        .count() as f64;
    let defense_factor = 1.0 + (tmm + concealment) / 10.0;
    defense += (f64::from(element.durability.armor) * armor_mult
        + f64::from(element.durability.structure) * structure_mult)
        * defense_factor;

    let mut subtotal = offense + defense;

    if element.tmm >= 2 {
        let reach = if m > 0.0 { m } else { 0.5 * s };
        subtotal += round_up_to_half((tmm - 1.0) * 0.5 * reach);
    }
    if has_c3(abilities) {
        subtotal += subtotal * C3_BONUS;
    }
    let ranged_support = abilities.contains_any(&RANGED_SUPPORT)
        || abilities.iter().any(|(tag, _)| tag.is_artillery());
    if l == 0.0 && element.tmm <= 1 && !ranged_support {
        subtotal -= BRAWLER_MALUS * (s + m);
    }
    subtotal + table_bonus(abilities, FORCE_BONUSES)
}

fn aerospace_points(element: &ConvertedElement) -> f64 {
    let abilities = &element.abilities;

    let mut offense = match element.standard_damage() {
        Some(damage) => weighted_damage(damage),
        None => element
            .damage
            .arcs()
            .map(|(facing, arc)| {
                let classes = [T::Cap, T::Scap, T::Msl]
                    .iter()
                    .filter_map(|tag| arc.abilities().vector(*tag))
                    .map(weighted_damage)
                    .sum::<f64>();
                arc_weight(facing) * (weighted_damage(arc.standard()) + classes)
            })
            .sum(),
    };
    let overheat = 0.5 * f64::from(element.overheat);
    offense += overheat;
    if element.has_extended_overheat() {
        offense += overheat;
    }
    offense += table_bonus(abilities, OFFENSE_BONUSES);
    offense *= blanket_factor(element.category, abilities);

    let armor = f64::from(element.durability.armor);
    let threshold = f64::from(element.threshold.unwrap_or(0));
    let mut defense = 0.25 * f64::from(element.movement.top_speed())
        + armor * 2.0 * (1.0 + threshold / 10.0)
        + f64::from(element.durability.structure);
    if abilities.contains(T::Stl) {
        defense += 0.2 * armor;
    }
    defense += table_bonus(abilities, AEROSPACE_DEFENSE_BONUSES);
    defense += element
        .damage
        .arcs()
        .map(|(_, arc)| bonus_value(arc.abilities(), T::Pnt, PerCount(1.0)))
        .sum::<f64>();

    let mut subtotal = offense + defense;
    if has_c3(abilities) {
        subtotal += subtotal * C3_BONUS;
    }
    subtotal + table_bonus(abilities, FORCE_BONUSES)
}

/// Point value before the skill adjustment. Always at least 1.
#[must_use]
pub fn base_point_value(element: &ConvertedElement) -> u32 {
    let raw = if element.category.is_aerospace() {
        aerospace_points(element)
    } else {
        ground_points(element)
    };
    let points = round_half_up(raw).max(1.0) as u32;
    debug!(category = %element.category, raw, points, "Scored element");
    points
}

/// Adjust a point value for a skill rating other than 4.
#[must_use]
pub fn adjust_for_skill(points: u32, skill: i32) -> u32 {
    let adjusted = match skill.cmp(&4) {
        std::cmp::Ordering::Greater => {
            let multiplier = 1 + points.saturating_sub(5) / 10;
            i64::from(points) - i64::from(multiplier) * i64::from(skill - 4)
        }
        std::cmp::Ordering::Less => {
            let multiplier = 1 + points.saturating_sub(3) / 5;
            i64::from(points) + i64::from(multiplier) * i64::from(4 - skill)
        }
        std::cmp::Ordering::Equal => i64::from(points),
    };
    adjusted.max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::ArcSummary;
    use crate::damage::DamageValue;
    use crate::element::{Durability, ElementDamage};
    use crate::movement::{MovementMode, MovementProfile};
    use crate::record::UnitRole;

    fn vector(values: &[u32], bands: usize) -> DamageVector {
        let values: Vec<DamageValue> = values.iter().map(|v| DamageValue::new(*v)).collect();
        DamageVector::from_values(&values, bands, true)
    }

    fn ground(category: UnitCategory, damage: &[u32], tmm: u8, inches: u32) -> ConvertedElement {
        ConvertedElement {
            chassis: "Test".into(),
            model: String::new(),
            role: UnitRole::Undetermined,
            skill: 4,
            category,
            size: 1,
            movement: MovementProfile::new().with(MovementMode::Default, inches),
            tmm,
            damage: ElementDamage::Standard(vector(damage, 3)),
            overheat: 0,
            durability: Durability::full(5, 2),
            threshold: None,
            abilities: AbilityCatalog::new(),
            base_point_value: 0,
            point_value: 0,
        }
    }

    #[test]
    fn test_regression_lock_ground_unit() {
        // offense 2 + 4 + 0.5 size; defense 0.5 + 10 + 2; brawler -1
        let element = ground(UnitCategory::BM, &[2, 2, 0], 0, 4);
        assert_eq!(base_point_value(&element), 18);
    }

    #[test]
    fn test_vehicle_structure_and_no_size_bonus() {
        // offense 6; defense 0.5 + 10 + 1; brawler -1 -> 16.5 -> 17
        let element = ground(UnitCategory::CV, &[2, 2, 0], 0, 4);
        assert_eq!(base_point_value(&element), 17);
    }

    #[test]
    fn test_long_range_avoids_brawler_malus() {
        // offense 2 + 4 + 2 + 0.5; defense 12.5
        let element = ground(UnitCategory::BM, &[2, 2, 2], 0, 4);
        assert_eq!(base_point_value(&element), 21);
    }

    #[test]
    fn test_agile_bonus() {
        // offense 3 + 6 + 0.5; defense 1 + (10 + 2) * 1.2
        // agile round_up_to_half(1 * 0.5 * 3) = 1.5
        let element = ground(UnitCategory::BM, &[3, 3, 0], 2, 8);
        assert_eq!(base_point_value(&element), 26);
    }

    #[test]
    fn test_offense_table_and_blanket_factor() {
        let mut element = ground(UnitCategory::BM, &[2, 2, 2], 0, 4);
        element.abilities.merge_int(AbilityTag::ArtLt, 1).unwrap();
        // offense (8.5 + 6) + defense 12.5 = 27
        assert_eq!(base_point_value(&element), 27);
        element.abilities.set(AbilityTag::Vrt).unwrap();
        // 14.5 * 1.1 = 15.95 + 12.5 = 28.45
        assert_eq!(base_point_value(&element), 28);
    }

    #[test]
    fn test_force_and_c3_bonuses() {
        let mut element = ground(UnitCategory::BM, &[2, 2, 2], 0, 4);
        element.abilities.set(AbilityTag::Ecm).unwrap();
        element.abilities.replace(AbilityTag::Mhq, AbilityValue::Int(3)).unwrap();
        // 21 + 2 + 3
        assert_eq!(base_point_value(&element), 26);

        let mut networked = ground(UnitCategory::BM, &[2, 2, 2], 0, 4);
        networked.abilities.set(AbilityTag::C3s).unwrap();
        // 21 * 1.05 = 22.05
        assert_eq!(base_point_value(&networked), 22);
    }

    #[test]
    fn test_support_vehicle_without_fire_control() {
        let element = ground(UnitCategory::SV, &[2, 2, 2], 0, 4);
        assert_eq!(blanket_factor(UnitCategory::SV, &element.abilities), 0.8);
        let mut basic = AbilityCatalog::new();
        basic.set(AbilityTag::Bfc).unwrap();
        assert_eq!(blanket_factor(UnitCategory::SV, &basic), 0.9);
        basic.set(AbilityTag::Afc).unwrap();
        assert_eq!(blanket_factor(UnitCategory::SV, &basic), 1.0);
    }

    #[test]
    fn test_minimum_point_value() {
        let mut element = ground(UnitCategory::CI, &[0, 0, 0], 0, 0);
        element.durability = Durability::full(0, 0);
        element.movement = MovementProfile::new();
        assert_eq!(base_point_value(&element), 1);
    }

    #[test]
    fn test_fighter_points() {
        let mut element = ground(UnitCategory::AF, &[3, 3, 2], 0, 0);
        element.damage = ElementDamage::Standard(vector(&[3, 3, 2, 0], 4));
        element.movement = MovementProfile::new().with(MovementMode::AerodyneThrust, 6);
        element.durability = Durability::full(6, 4);
        element.threshold = Some(2);
        element.overheat = 2;
        // offense 11 + 1; defense 1.5 + 6 * 2 * 1.2 + 4 = 19.9
        assert_eq!(base_point_value(&element), 32);
    }

    #[test]
    fn test_arc_points_are_weighted() {
        let mut front = ArcSummary::new(vector(&[4, 4, 4, 0], 4));
        front
            .abilities_mut()
            .replace(AbilityTag::Cap, AbilityValue::Vector(vector(&[1, 1, 1, 1], 4)))
            .unwrap();
        let mut rear = ArcSummary::new(vector(&[4, 4, 0, 0], 4));
        rear.abilities_mut().merge_int(AbilityTag::Pnt, 2).unwrap();
        let empty = ArcSummary::new(DamageVector::zero(4, true));

        let mut element = ground(UnitCategory::DS, &[], 0, 0);
        element.damage = ElementDamage::Arcs(Box::new([front, empty.clone(), empty, rear]));
        element.movement = MovementProfile::new().with(MovementMode::SpheroidThrust, 4);
        element.durability = Durability::full(20, 10);
        element.threshold = Some(2);
        // offense 16 + 4 + 0.25 * 12 = 23
        // defense 1 + 20 * 2 * 1.2 + 10 + 2 = 61
        assert_eq!(base_point_value(&element), 84);
    }

    #[test]
    fn test_skill_adjustment() {
        assert_eq!(adjust_for_skill(18, 4), 18);
        // worse skill: multiplier 2 at 15-24
        assert_eq!(adjust_for_skill(18, 5), 16);
        assert_eq!(adjust_for_skill(14, 5), 13);
        // better skill: multiplier 4 at 18-22
        assert_eq!(adjust_for_skill(18, 3), 22);
        assert_eq!(adjust_for_skill(7, 2), 9);
        assert_eq!(adjust_for_skill(2, 8), 1);
    }
}
