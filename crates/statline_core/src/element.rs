//! The converted statline.

use serde::{Deserialize, Serialize};

use crate::ability::{AbilityCatalog, AbilityTag, ArcSummary};
use crate::convert::{Facing, UnitCategory};
use crate::damage::DamageVector;
use crate::movement::MovementProfile;
use crate::record::UnitRole;

/// Damage of an element: one standard vector, or one summary per arc.
///
/// The two forms are mutually exclusive, so an arc-using element can never
/// carry standard damage and vice versa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementDamage {
    /// Standard damage of a non-arc unit.
    Standard(DamageVector),
    /// Front, left, right and rear arcs, in [`Facing::ALL`] order.
    Arcs(Box<[ArcSummary; 4]>),
}

impl ElementDamage {
    /// Standard damage vector, if this is a non-arc unit.
    #[must_use]
    pub const fn standard(&self) -> Option<&DamageVector> {
        match self {
            Self::Standard(vector) => Some(vector),
            Self::Arcs(_) => None,
        }
    }

    /// Summary of one arc, if this is an arc unit.
    #[must_use]
    pub fn arc(&self, facing: Facing) -> Option<&ArcSummary> {
        match self {
            Self::Standard(_) => None,
            Self::Arcs(arcs) => Some(&arcs[facing as usize]),
        }
    }

    /// Arcs paired with their facing. Empty for non-arc units.
    pub fn arcs(&self) -> impl Iterator<Item = (Facing, &ArcSummary)> + '_ {
        let arcs: &[ArcSummary] = match self {
            Self::Standard(_) => &[],
            Self::Arcs(arcs) => arcs.as_slice(),
        };
        Facing::ALL.into_iter().zip(arcs.iter())
    }
}

/// Armor and structure, full and current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Durability {
    /// Full armor.
    pub armor: u32,
    /// Current armor.
    pub current_armor: u32,
    /// Full structure.
    pub structure: u32,
    /// Current structure.
    pub current_structure: u32,
}

impl Durability {
    /// Undamaged durability.
    #[must_use]
    pub const fn full(armor: u32, structure: u32) -> Self {
        Self {
            armor,
            current_armor: armor,
            structure,
            current_structure: structure,
        }
    }
}

/// A converted statline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedElement {
    /// Chassis name.
    pub chassis: String,
    /// Model designation.
    pub model: String,
    /// Battlefield role.
    pub role: UnitRole,
    /// Skill rating used for the point value.
    pub skill: i32,
    /// Unit category.
    pub category: UnitCategory,
    /// Size class.
    pub size: u8,
    /// Movement by mode.
    pub movement: MovementProfile,
    /// Target movement modifier.
    pub tmm: u8,
    /// Standard or per-arc damage.
    pub damage: ElementDamage,
    /// Overheat rating.
    pub overheat: u8,
    /// Armor and structure.
    pub durability: Durability,
    /// Damage threshold (aerospace only).
    pub threshold: Option<u32>,
    /// Special abilities.
    pub abilities: AbilityCatalog,
    /// Point value before the skill adjustment.
    pub base_point_value: u32,
    /// Final point value.
    pub point_value: u32,
}

impl ConvertedElement {
    /// `chassis model`, or just the chassis when the model is empty.
    #[must_use]
    pub fn name(&self) -> String {
        if self.model.is_empty() {
            self.chassis.clone()
        } else {
            format!("{} {}", self.chassis, self.model)
        }
    }

    /// Whether damage is tracked per arc.
    #[must_use]
    pub const fn uses_arcs(&self) -> bool {
        matches!(self.damage, ElementDamage::Arcs(_))
    }

    /// Standard damage of a non-arc element.
    #[must_use]
    pub const fn standard_damage(&self) -> Option<&DamageVector> {
        self.damage.standard()
    }

    /// Whether overheat extends to long range.
    #[must_use]
    pub fn has_extended_overheat(&self) -> bool {
        self.abilities.contains(AbilityTag::Ovl)
    }

    /// Final point value. Always at least 1.
    #[must_use]
    pub const fn point_value(&self) -> u32 {
        self.point_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::DamageValue;

    #[test]
    fn test_standard_and_arcs_are_exclusive() {
        let standard = ElementDamage::Standard(DamageVector::zero(3, true));
        assert!(standard.standard().is_some());
        assert!(standard.arc(Facing::Front).is_none());
        assert_eq!(standard.arcs().count(), 0);

        let arc = ArcSummary::new(DamageVector::from_values(&[DamageValue::new(2)], 4, true));
        let arcs = ElementDamage::Arcs(Box::new([
            arc.clone(),
            ArcSummary::new(DamageVector::zero(4, true)),
            ArcSummary::new(DamageVector::zero(4, true)),
            ArcSummary::new(DamageVector::zero(4, true)),
        ]));
        assert!(arcs.standard().is_none());
        assert_eq!(arcs.arc(Facing::Front), Some(&arc));
        let facings: Vec<Facing> = arcs.arcs().map(|(facing, _)| facing).collect();
        assert_eq!(facings, Facing::ALL.to_vec());
    }

    #[test]
    fn test_full_durability() {
        let durability = Durability::full(5, 2);
        assert_eq!(durability.current_armor, 5);
        assert_eq!(durability.current_structure, 2);
    }
}
