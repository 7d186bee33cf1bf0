//! Text export of converted elements.
//!
//! - [`format_abilities`] / [`ability_line`]: the sorted ability list
//! - [`element_line`] / [`arc_lines`] / [`export`]: tab-separated statlines
//! - [`parse_abilities`] / [`parse_arc_line`]: read exported lines back

mod parse;

pub use parse::{parse_abilities, parse_arc_line};

use crate::ability::{AbilityCatalog, AbilityTag, AbilityValue, ArcSummary};
use crate::convert::Facing;
use crate::damage::DamageVector;
use crate::element::ConvertedElement;

/// Arc damage classes printed in front of each arc's abilities.
const ARC_CLASSES: [AbilityTag; 3] = [AbilityTag::Cap, AbilityTag::Scap, AbilityTag::Msl];

/// Bands printed for an arc's damage classes.
const ARC_BANDS: usize = 4;

fn format_turret(turret: &ArcSummary) -> String {
    let mut parts = vec![turret.standard().to_string()];
    parts.extend(format_abilities(turret.abilities()));
    format!("TUR({})", parts.join(","))
}

/// Format one ability, or `None` for door counts (printed with their bay).
fn format_ability(
    catalog: &AbilityCatalog,
    tag: AbilityTag,
    value: &AbilityValue,
) -> Option<String> {
    if tag.is_door_count() {
        return None;
    }
    let code = tag.code();
    let doors = tag
        .doors()
        .and_then(|doors| catalog.int(doors))
        .map(|n| format!("D{n}"))
        .unwrap_or_default();

    let text = match value {
        AbilityValue::None => code.to_string(),
        AbilityValue::Int(n) if tag.is_artillery() => format!("{code}-{n}"),
        AbilityValue::Int(n) => format!("{code}{n}{doors}"),
        AbilityValue::Real(x) => format!("{code}{x}{doors}"),
        AbilityValue::Damage(value) => format!("{code}{value}"),
        AbilityValue::Vector(vector) => format!("{code}{vector}"),
        AbilityValue::Map(movement) => format!("{code}({movement})"),
        AbilityValue::Arc(turret) => format_turret(turret),
    };
    Some(text)
}

/// Every printable ability, sorted case-insensitively.
#[must_use]
pub fn format_abilities(catalog: &AbilityCatalog) -> Vec<String> {
    let mut formatted: Vec<String> = catalog
        .iter()
        .filter_map(|(tag, value)| format_ability(catalog, tag, value))
        .collect();
    formatted.sort_by_key(|text| text.to_lowercase());
    formatted
}

/// Abilities as one comma-separated line.
#[must_use]
pub fn ability_line(catalog: &AbilityCatalog) -> String {
    format_abilities(catalog).join(", ")
}

/// The tab-separated statline of an element.
#[must_use]
pub fn element_line(element: &ConvertedElement) -> String {
    let threshold = element
        .threshold
        .map_or_else(|| "-".to_string(), |t| t.to_string());
    let damage = element
        .standard_damage()
        .map(ToString::to_string)
        .unwrap_or_default();
    [
        element.chassis.clone(),
        element.model.clone(),
        element.point_value.to_string(),
        element.category.to_string(),
        element.size.to_string(),
        element.tmm.to_string(),
        element.overheat.to_string(),
        element.movement.to_string(),
        element.durability.armor.to_string(),
        threshold,
        element.durability.structure.to_string(),
        damage,
        ability_line(&element.abilities),
    ]
    .join("\t")
}

fn arc_line(facing: Facing, arc: &ArcSummary) -> String {
    let mut fields = vec![facing.label().to_string(), format!("STD{}", arc.standard())];
    for tag in ARC_CLASSES {
        let vector = arc
            .abilities()
            .vector(tag)
            .copied()
            .unwrap_or_else(|| DamageVector::zero(ARC_BANDS, false));
        fields.push(format!("{}{vector}", tag.code()));
    }
    let mut rest = arc.abilities().clone();
    for tag in ARC_CLASSES {
        rest.remove(tag);
    }
    fields.push(ability_line(&rest));
    fields.join("\t")
}

/// One line per arc, front to rear. Empty for non-arc elements.
#[must_use]
pub fn arc_lines(element: &ConvertedElement) -> Vec<String> {
    element
        .damage
        .arcs()
        .map(|(facing, arc)| arc_line(facing, arc))
        .collect()
}

/// The element line followed by any arc lines.
#[must_use]
pub fn export(element: &ConvertedElement) -> String {
    let mut lines = vec![element_line(element)];
    lines.extend(arc_lines(element));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::DamageValue;
    use crate::movement::{MovementMode, MovementProfile};

    fn vector(values: &[u32]) -> DamageVector {
        let values: Vec<DamageValue> = values.iter().map(|v| DamageValue::new(*v)).collect();
        DamageVector::from_values(&values, values.len(), false)
    }

    #[test]
    fn test_format_shapes() {
        let mut catalog = AbilityCatalog::new();
        catalog.set(AbilityTag::Ecm).unwrap();
        catalog.merge_int(AbilityTag::ArtLt, 2).unwrap();
        catalog.merge_int(AbilityTag::Mash, 1).unwrap();
        catalog.merge_real(AbilityTag::Ct, 12.5).unwrap();
        catalog.merge_int(AbilityTag::CtDoors, 1).unwrap();
        catalog.replace(AbilityTag::If, AbilityValue::Damage(DamageValue::MINIMAL)).unwrap();
        catalog.replace(AbilityTag::Srm, AbilityValue::Vector(vector(&[2, 2]))).unwrap();
        catalog
            .replace(
                AbilityTag::Lam,
                AbilityValue::Map(
                    MovementProfile::new()
                        .with(MovementMode::Wige, 30)
                        .with(MovementMode::AerodyneThrust, 6),
                ),
            )
            .unwrap();

        assert_eq!(
            format_abilities(&catalog),
            vec!["ARTLT-2", "CT12.5D1", "ECM", "IF0*", "LAM(30\"g/6a)", "MASH1", "SRM2/2"]
        );
    }

    #[test]
    fn test_whole_reals_drop_decimal() {
        let mut catalog = AbilityCatalog::new();
        catalog.replace(AbilityTag::It, AbilityValue::Real(8.0)).unwrap();
        assert_eq!(ability_line(&catalog), "IT8");
    }

    #[test]
    fn test_bay_with_doors() {
        let mut catalog = AbilityCatalog::new();
        catalog.merge_int(AbilityTag::Mt, 4).unwrap();
        catalog.merge_int(AbilityTag::MtDoors, 2).unwrap();
        assert_eq!(ability_line(&catalog), "MT4D2");
    }

    #[test]
    fn test_turret_format() {
        let mut turret = ArcSummary::new(vector(&[2, 2, 0]));
        turret
            .abilities_mut()
            .replace(AbilityTag::Lrm, AbilityValue::Vector(vector(&[1, 1, 1])))
            .unwrap();
        let mut catalog = AbilityCatalog::new();
        catalog.set(AbilityTag::Case).unwrap();
        catalog.replace(AbilityTag::Tur, AbilityValue::Arc(Box::new(turret))).unwrap();
        assert_eq!(ability_line(&catalog), "CASE, TUR(2/2/-,LRM1/1/1)");
    }

    #[test]
    fn test_case_insensitive_sort() {
        let mut catalog = AbilityCatalog::new();
        catalog.set(AbilityTag::Itsm).unwrap();
        catalog.set(AbilityTag::Ams).unwrap();
        catalog.merge_int(AbilityTag::C3m, 1).unwrap();
        assert_eq!(ability_line(&catalog), "AMS, C3M1, I-TSM");
    }
}
